//! Basic stdout logging example.
//!
//! This example demonstrates the simplest way to create a logger with the
//! default configuration (info level, text records on stdout).

fn main() {
    let logger = rotalog::Logger::default();

    logger.debug("This is a debug message (not visible at info level)", &[]);
    logger.info("Application started", &[("version", &"1.0.0"), ("config", &"default")]);
    logger.warning("This is a warning message", &[]);
    logger.error("This is an error message", &[("code", &500)]);
}
