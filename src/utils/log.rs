use env_logger::Env;

/// Sets up `env_logger` for the process, logging at the info level unless `RUST_LOG` says
/// otherwise.
pub fn bootstrap_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}
