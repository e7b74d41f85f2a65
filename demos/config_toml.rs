//! Example of loading logging configuration from TOML.
//!
//! Run with:
//! ```bash
//! cargo run --example config_toml
//! ```

use serde::Deserialize;

const CONFIG: &str = r#"
[log]
level = "debug"
json_format = true
max_backups = 5
"#;

#[derive(Deserialize)]
struct AppConfig {
    log: rotalog::Config,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let root: AppConfig = toml::from_str(CONFIG)?;

    // Install it as the process default, then log through the facade
    rotalog::init_default(&root.log, None)?;
    let logger = rotalog::Logger::process_default();

    logger.debug("This is a debug message (visible because level is debug)", &[]);
    logger.info("User session ended", &[("user", &"bob"), ("duration_ms", &1234)]);
    logger.error(
        "Database error occurred",
        &[("error_code", &500), ("error_type", &"database")],
    );

    // Libraries using `tracing` directly share the same output
    tracing::info!(component = "demo", "plain tracing event");

    Ok(())
}
