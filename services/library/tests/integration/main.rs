mod lifecycle_test;
mod race_test;
