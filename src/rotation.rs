use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Config;
use crate::config::DEFAULT_MAX_SIZE_MB;

const MEGABYTE: u64 = 1024 * 1024;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Suffix appended to compressed backups.
pub const COMPRESS_SUFFIX: &str = ".gz";

/// Thresholds controlling when a log file rotates and which backups survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Size in bytes after which the active file is rotated.
    pub max_size: u64,
    /// Backups to keep, `None` keeps all of them.
    pub max_backups: Option<usize>,
    /// Backups older than this are removed, `None` disables age pruning.
    pub max_age: Option<Duration>,
    /// Gzip backups once rotated.
    pub compress: bool,
}

impl RotationPolicy {
    /// Interpret the rotation settings of a [`Config`].
    ///
    /// Non-positive values are not errors: a size `<= 0` falls back to the
    /// 100 MB default, and a backup count or age `<= 0` means "no limit".
    pub fn from_config(config: &Config) -> Self {
        let size_mb = if config.max_size_mb > 0 {
            config.max_size_mb as u64
        } else {
            DEFAULT_MAX_SIZE_MB as u64
        };
        let max_backups = (config.max_backups > 0).then_some(config.max_backups as usize);
        let max_age = (config.max_age_days > 0)
            .then(|| Duration::from_secs(config.max_age_days as u64 * SECONDS_PER_DAY));

        Self {
            max_size: size_mb.saturating_mul(MEGABYTE),
            max_backups,
            max_age,
            compress: config.compress,
        }
    }

    /// Check if writing `incoming` more bytes to a file of `current` bytes
    /// requires a rotation first. An empty file is never rotated.
    pub fn exceeds(&self, current: u64, incoming: usize) -> bool {
        current > 0 && current.saturating_add(incoming as u64) > self.max_size
    }
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A rotated file belonging to an active log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    /// Position in the rotation chain, `1` being the most recent.
    pub index: usize,
    /// Location on disk.
    pub path: PathBuf,
    /// Whether the file is gzip compressed.
    pub compressed: bool,
}

/// Path of backup `index` for the active file `base`.
pub fn backup_path(base: &Path, index: usize, compressed: bool) -> PathBuf {
    let suffix = if compressed { COMPRESS_SUFFIX } else { "" };
    PathBuf::from(format!("{}.{}{}", base.display(), index, suffix))
}

/// Parse a directory entry name into a backup index of `base_name`.
///
/// `app.log.3` and `app.log.3.gz` match `app.log`; anything else does not.
pub fn parse_backup_name(base_name: &str, candidate: &str) -> Option<(usize, bool)> {
    let rest = candidate.strip_prefix(base_name)?.strip_prefix('.')?;
    let (digits, compressed) = match rest.strip_suffix(COMPRESS_SUFFIX) {
        Some(digits) => (digits, true),
        None => (rest, false),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index: usize = digits.parse().ok()?;
    (index > 0).then_some((index, compressed))
}

/// List the backups of `base`, most recent first.
pub fn list_backups(base: &Path) -> std::io::Result<Vec<Backup>> {
    let Some(base_name) = base.file_name().and_then(|n| n.to_str()) else {
        return Ok(Vec::new());
    };
    let dir = match base.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut backups = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some((index, compressed)) = parse_backup_name(base_name, name) {
            backups.push(Backup {
                index,
                path: backup_path(base, index, compressed),
                compressed,
            });
        }
    }
    backups.sort_by_key(|b| (b.index, b.compressed));
    Ok(backups)
}
