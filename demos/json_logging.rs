//! JSON structured logging example.
//!
//! This example demonstrates newline-delimited JSON output with structured
//! fields, configured through the builder API.

fn main() {
    let logger = rotalog::builder()
        .with_level("debug")
        .with_json_format()
        .build();

    logger.info("User logged in", &[("user_id", &123), ("action", &"login")]);
    logger.warning("Resource not found", &[("error_code", &404)]);
    logger.error("Authentication failed", &[("component", &"auth")]);
}
