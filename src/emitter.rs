// src/emitter.rs - Writes each copy to a timestamped file

use std::fmt;
use std::path::PathBuf;
use chrono::{DateTime, Datelike, Local, Timelike};
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wall-clock time truncated to the minute. Copies emitted within the same
/// minute share a filename, so the emitter appends rather than overwrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampKey {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub hour: u32,
    pub minute: u32,
}

impl TimestampKey {
    pub fn now() -> Self {
        Self::from(Local::now())
    }
}

impl From<DateTime<Local>> for TimestampKey {
    fn from(t: DateTime<Local>) -> Self {
        Self {
            day: t.day(),
            month: t.month(),
            year: t.year(),
            hour: t.hour(),
            minute: t.minute(),
        }
    }
}

impl fmt::Display for TimestampKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Integer components, no zero padding
        write!(
            f,
            "{}_{}_{}_{}_{}",
            self.day, self.month, self.year, self.hour, self.minute
        )
    }
}

#[derive(Debug, Clone)]
pub struct FileEmitter {
    output_dir: PathBuf,
}

impl FileEmitter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write one copy as a line in `{index}.{key}` under the output directory.
    /// Appends when the file already exists so no copy is silently lost.
    pub async fn emit(
        &self,
        index: u32,
        stamp: &TimestampKey,
        text: &str,
    ) -> Result<PathBuf, EmitError> {
        let path = self.output_dir.join(format!("{}.{}", index, stamp));
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(text.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        tracing::info!("Emitted copy {} to {}", index, path.display());
        Ok(path)
    }
}
