// tests/integration/main.rs

mod config_loading;
mod driver_run;
