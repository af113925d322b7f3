use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "networth.log";

const ROTATION_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Size-based trimming of the log file on startup
#[derive(Debug, Clone, Copy)]
struct Rotation {
    /// Trim once the file grows past this many bytes
    max_bytes: u64,
    /// Bytes of the newest entries kept after trimming
    keep_bytes: u64,
}

impl Rotation {
    const DEFAULT: Rotation = Rotation {
        max_bytes: 5 * 1024 * 1024,
        keep_bytes: 1024 * 1024,
    };

    /// Trim `path` in place, returning whether anything was removed.
    ///
    /// The kept tail starts on a line boundary so no entry is cut in half.
    fn apply(self, path: &Path) -> std::io::Result<bool> {
        let size = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if size <= self.max_bytes {
            return Ok(false);
        }

        let contents = fs::read(path)?;
        let cut = contents.len().saturating_sub(self.keep_bytes as usize);
        let tail = &contents[cut..];
        let tail = match tail.iter().position(|&b| b == b'\n') {
            Some(newline) => &tail[newline + 1..],
            None => tail,
        };

        let mut trimmed = Vec::with_capacity(ROTATION_MARKER.len() + tail.len());
        trimmed.extend_from_slice(ROTATION_MARKER);
        trimmed.extend_from_slice(tail);
        fs::write(path, trimmed)?;
        Ok(true)
    }
}

fn env_filter(level: &str) -> EnvFilter {
    let default_filter = format!("networth={level},networth_core=warn");
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Default data directory: `~/.networth`
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".networth")
}

/// Send logs to `{data_dir}/networth.log`.
///
/// A log over 5 MB is cut back to its newest 1 MB before appending. `RUST_LOG`
/// overrides `level` when set.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;

    let log_path = data_dir.join(LOG_FILE_NAME);

    if let Err(e) = Rotation::DEFAULT.apply(&log_path) {
        eprintln!("Warning: could not trim {}: {e}", log_path.display());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();

    tracing::info!(log_path = %log_path.display(), "networth logging initialized");
    Ok(())
}

/// Initialize logging to stderr, leaving stdout free for command output
pub fn init_stderr_logging(level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}
