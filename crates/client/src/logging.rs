use log::LevelFilter;

/// Initialize logging for the application.
/// Should be called once at the start of main(); safe to call again.
pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Info)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }
}
