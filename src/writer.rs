use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing_subscriber::fmt::MakeWriter;

use crate::RotationPolicy;
use crate::rotation::{backup_path, list_backups};

/// State of the current log file.
#[derive(Debug)]
struct FileState {
    file: File,
    /// Current size of the file in bytes.
    size: u64,
}

/// A writer that rotates its log file by size and prunes old backups.
///
/// The file is opened lazily on the first write. Once a write would push the
/// file past [`RotationPolicy::max_size`], the file is moved to `<path>.1`
/// (older backups shift up), optionally gzipped, and a fresh file is started.
#[derive(Debug)]
pub struct RotatingWriter {
    /// Path of the active log file.
    path: PathBuf,
    policy: RotationPolicy,
    state: Option<FileState>,
}

impl RotatingWriter {
    /// Create a new rotating writer. No file is touched until the first write.
    pub fn new(path: impl Into<PathBuf>, policy: RotationPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            state: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Flush and release the file handle. A later write reopens the file.
    pub fn close(&mut self) -> io::Result<()> {
        match self.state.take() {
            Some(state) => state.file.sync_all(),
            None => Ok(()),
        }
    }

    /// Force a rotation now, regardless of the current size.
    pub fn rotate(&mut self) -> io::Result<()> {
        self.close()?;
        self.rotate_files()?;
        self.state = Some(self.open_new()?);
        Ok(())
    }

    /// Open the active file, appending if the pending write still fits.
    fn open_existing_or_new(&mut self, incoming: usize) -> io::Result<()> {
        // Ensure parent directory exists (create if necessary), so paths such
        // as `logs/app.log` work before `logs/` is created.
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let existing = match self.path.metadata() {
            Ok(metadata) => Some(metadata.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e),
        };

        match existing {
            Some(size) if !self.policy.exceeds(size, incoming) => {
                let file = OpenOptions::new().append(true).open(&self.path)?;
                self.state = Some(FileState { file, size });
                Ok(())
            }
            Some(_) => self.rotate(),
            None => {
                self.state = Some(self.open_new()?);
                Ok(())
            }
        }
    }

    fn open_new(&self) -> io::Result<FileState> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        Ok(FileState { file, size: 0 })
    }

    /// Move the active file into the backup chain and prune.
    fn rotate_files(&self) -> io::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        // Shift backups: path.N -> path.(N+1), most recent last so nothing is
        // overwritten.
        let mut backups = list_backups(&self.path)?;
        backups.reverse();
        for backup in &backups {
            let to = backup_path(&self.path, backup.index + 1, backup.compressed);
            std::fs::rename(&backup.path, &to)?;
        }

        let first = backup_path(&self.path, 1, false);
        std::fs::rename(&self.path, &first)?;

        if self.policy.compress {
            compress_file(&first, &backup_path(&self.path, 1, true))?;
        }

        self.prune()
    }

    /// Remove backups beyond the configured count or older than the
    /// configured age.
    fn prune(&self) -> io::Result<()> {
        let cutoff = self
            .policy
            .max_age
            .and_then(|age| SystemTime::now().checked_sub(age));

        for backup in list_backups(&self.path)? {
            let too_many = self
                .policy
                .max_backups
                .is_some_and(|max| backup.index > max);
            let too_old = match cutoff {
                Some(cutoff) => backup.path.metadata()?.modified()? < cutoff,
                None => false,
            };
            if too_many || too_old {
                std::fs::remove_file(&backup.path)?;
            }
        }
        Ok(())
    }
}

/// Gzip `src` into `dst` and remove `src`. The modification time of `src`
/// is carried over so age pruning still sees when the records were written.
fn compress_file(src: &Path, dst: &Path) -> io::Result<()> {
    let modified = src.metadata()?.modified()?;
    let mut input = File::open(src)?;
    let output = File::create(dst)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    let output = encoder.finish()?;
    output.set_modified(modified)?;
    output.sync_all()?;
    std::fs::remove_file(src)
}

impl Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let needs_rotation = match &self.state {
            None => None,
            Some(state) => Some(self.policy.exceeds(state.size, buf.len())),
        };
        match needs_rotation {
            None => self.open_existing_or_new(buf.len())?,
            Some(true) => self.rotate()?,
            Some(false) => {}
        }

        let state = self
            .state
            .as_mut()
            .ok_or_else(|| io::Error::other("Failed to open log file"))?;
        let written = state.file.write(buf)?;
        state.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.state.as_mut() {
            Some(state) => state.file.flush(),
            None => Ok(()),
        }
    }
}

/// Shared handle to a [`RotatingWriter`].
///
/// Used as the formatter's writer; every record takes the lock for the
/// duration of a single write.
#[derive(Debug, Clone)]
pub struct FileSink {
    inner: Arc<Mutex<RotatingWriter>>,
}

impl FileSink {
    pub fn new(writer: RotatingWriter) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Release the underlying file handle.
    pub fn close(&self) -> io::Result<()> {
        self.lock().close()
    }

    pub fn path(&self) -> PathBuf {
        self.lock().path().to_path_buf()
    }

    fn lock(&self) -> MutexGuard<'_, RotatingWriter> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Locked access to a [`FileSink`] for one record.
pub struct SinkGuard<'a>(MutexGuard<'a, RotatingWriter>);

impl Write for SinkGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<'a> MakeWriter<'a> for FileSink {
    type Writer = SinkGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkGuard(self.lock())
    }
}
