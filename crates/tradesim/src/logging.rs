use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log size that triggers a trim (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Newest bytes kept by a trim (1 MB)
const KEEP_SIZE: u64 = 1024 * 1024;

const ROTATION_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Cut `path` down to its newest `keep` bytes, starting on a line boundary,
/// once it grows past `max`. Rewrites the file in place and reports whether
/// it was trimmed.
fn trim_log(path: &Path, max: u64, keep: u64) -> io::Result<bool> {
    let len = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if len <= max {
        return Ok(false);
    }

    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    file.seek(SeekFrom::Start(len - keep.min(len)))?;
    let mut tail = Vec::new();
    file.read_to_end(&mut tail)?;
    let line_start = tail.iter().position(|&b| b == b'\n').map_or(0, |i| i + 1);

    file.seek(SeekFrom::Start(0))?;
    file.write_all(ROTATION_MARKER)?;
    file.write_all(&tail[line_start..])?;
    let end = file.stream_position()?;
    file.set_len(end)?;
    Ok(true)
}

/// Hands out writers that share one open log file
#[derive(Clone)]
struct LogWriterFactory {
    file: Arc<Mutex<File>>,
}

struct LogWriter {
    file: Arc<Mutex<File>>,
}

impl LogWriter {
    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut file)
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            file: self.file.clone(),
        }
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tradesim={level},tradesim_core=warn")))
}

/// Initialize the global tracing subscriber.
///
/// Without `log_file` events go to stderr so stdout carries only the report.
/// With a file, it is rotated once it passes 5MB (keeping the last 1MB) and
/// then appended to. `RUST_LOG` overrides `level` in both cases.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let Some(log_path) = log_file else {
        tracing_subscriber::registry()
            .with(env_filter(level))
            .with(fmt::layer().with_writer(io::stderr).with_target(false))
            .init();
        return Ok(());
    };

    if let Some(dir) = log_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    match trim_log(log_path, MAX_LOG_SIZE, KEEP_SIZE) {
        Ok(true) => eprintln!("Trimmed log file {}", log_path.display()),
        Ok(false) => {}
        Err(e) => eprintln!("Warning: Failed to rotate log file: {e}"),
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    let writer_factory = LogWriterFactory {
        file: Arc::new(Mutex::new(file)),
    };

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            fmt::layer()
                .with_writer(writer_factory)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();

    tracing::info!(log_path = %log_path.display(), "logging initialized");
    Ok(())
}
