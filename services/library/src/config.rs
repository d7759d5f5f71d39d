/// Library service configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Database connection URL (default `sqlite://library.db?mode=rwc`). Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3000). Env var: `LIBRARY_PORT`.
    pub library_port: u16,
    /// Seconds between overdue sweeps (default 86400). Env var: `SWEEP_INTERVAL_SECS`.
    pub sweep_interval_secs: u64,
}

const DEFAULT_DATABASE_URL: &str = "sqlite://library.db?mode=rwc";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 24 * 60 * 60;

impl LibraryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup("DATABASE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            library_port: lookup("LIBRARY_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            sweep_interval_secs: lookup("SWEEP_INTERVAL_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}
