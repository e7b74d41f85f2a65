use rotalog::{
    Logger, with_compression, with_max_age, with_max_backups, with_max_size, with_output_file,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let log_path = temp_dir.path().join("test.log");

    // 1MB files, two gzipped backups kept for at most a day
    let logger = Logger::new([
        with_output_file(&log_path),
        with_max_size(1),
        with_max_backups(2),
        with_max_age(1),
        with_compression(),
    ]);

    let padding = "-".repeat(512);
    for i in 0..5000 {
        logger.info("Log message", &[("number", &i), ("padding", &padding)]);
    }
    logger.close()?;

    for entry in std::fs::read_dir(temp_dir.path())? {
        let entry = entry?;
        println!("{} ({} bytes)", entry.file_name().to_string_lossy(), entry.metadata()?.len());
    }

    Ok(())
}
