//! Generated report files on local disk.
//!
//! Every successful request writes exactly one `rapor_<uuid>.<ext>` file into
//! the output directory. A background sweep removes report files older than the
//! retention window; files not matching that naming scheme are never touched.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use uuid::Uuid;

use crate::render::DocumentFormat;

const FILE_PREFIX: &str = "rapor_";

/// A freshly written report file.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub file_name: String,
    pub path: PathBuf,
}

impl OutputFile {
    /// Picks a new unique name in `dir` for the given format.
    pub fn allocate(dir: &Path, format: DocumentFormat) -> Self {
        let file_name = format!("{FILE_PREFIX}{}.{}", Uuid::new_v4(), format.extension());
        Self {
            path: dir.join(&file_name),
            file_name,
        }
    }

    /// Writes `bytes` to a new unique file. Never overwrites an existing file,
    /// and removes the partial file if the write fails.
    pub async fn write(
        dir: &Path,
        format: DocumentFormat,
        bytes: &[u8],
    ) -> std::io::Result<Self> {
        let output = Self::allocate(dir, format);
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&output.path)
            .await?;
        fill_or_discard(file, &output.path, bytes).await?;
        Ok(output)
    }
}

async fn fill_or_discard(
    mut file: tokio::fs::File,
    path: &Path,
    bytes: &[u8],
) -> std::io::Result<()> {
    let mut written = file.write_all(bytes).await;
    if written.is_ok() {
        written = file.flush().await;
    }

    if let Err(e) = written {
        drop(file);
        match tokio::fs::remove_file(path).await {
            Ok(()) => {}
            Err(cleanup) if cleanup.kind() == ErrorKind::NotFound => {}
            Err(cleanup) => {
                warn!(error = %cleanup, path = %path.display(), "Could not remove partial report")
            }
        }
        return Err(e);
    }
    Ok(())
}

/// `rapor_<uuid>.pdf` or `rapor_<uuid>.docx`, exactly as `allocate` names them.
fn is_report_file(name: &str) -> bool {
    let Some(rest) = name.strip_prefix(FILE_PREFIX) else {
        return false;
    };
    let stem = [DocumentFormat::Pdf, DocumentFormat::Docx]
        .into_iter()
        .find_map(|format| {
            rest.strip_suffix(format.extension())
                .and_then(|s| s.strip_suffix('.'))
        });
    stem.is_some_and(|stem| Uuid::parse_str(stem).is_ok())
}

/// `None` when the entry vanished between listing and inspection.
async fn metadata_if_present(path: &Path) -> std::io::Result<Option<std::fs::Metadata>> {
    match tokio::fs::symlink_metadata(path).await {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Deletes report files in `dir` whose modification time is at least `max_age` old.
/// Returns the number of files removed.
pub async fn sweep_expired(dir: &Path, max_age: Duration) -> std::io::Result<usize> {
    let now = SystemTime::now();
    let mut removed = 0;
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !is_report_file(name) {
            continue;
        }

        let Some(metadata) = metadata_if_present(&entry.path()).await? else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        let age = metadata
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .unwrap_or(Duration::ZERO);

        if age >= max_age {
            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => removed += 1,
                // Another sweep or an operator got there first.
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
    }

    Ok(removed)
}

/// Runs `sweep_expired` forever on a fixed interval.
pub async fn run_retention_sweeper(dir: PathBuf, max_age: Duration, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match sweep_expired(&dir, max_age).await {
            Ok(0) => {}
            Ok(removed) => info!(removed, dir = %dir.display(), "Swept expired reports"),
            Err(e) => warn!(error = %e, dir = %dir.display(), "Report sweep failed"),
        }
    }
}
