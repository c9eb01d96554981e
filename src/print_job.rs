// src/print_job.rs - Print job lifecycle: start, cooperative cancel, progress

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::emitter::{FileEmitter, TimestampKey};
use crate::progress;

#[derive(Debug, Error)]
pub enum StartError {
    #[error("a print job is already running")]
    AlreadyRunning,
    #[error("invalid print request: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Idle,
    Running(u8),
    Cancelled,
    Failed(String),
    Completed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Cancelled | JobStatus::Failed(_) | JobStatus::Completed
        )
    }
}

/// One user-initiated request: print `copies` copies of `text`.
/// Immutable for the job's duration. Text may be empty but never absent.
#[derive(Debug, Clone)]
pub struct PrintJobRequest {
    pub text: String,
    pub copies: u32,
}

impl PrintJobRequest {
    /// Build a request from the presentation layer's free-form fields.
    /// The copy count arrives as text and must parse to a positive integer.
    pub fn parse(document: Option<&str>, copies: &str) -> Result<Self, StartError> {
        let text = document
            .ok_or_else(|| StartError::InvalidRequest("no document text supplied".to_string()))?;
        let copies: u32 = copies.trim().parse().map_err(|_| {
            StartError::InvalidRequest(format!(
                "copy count '{}' is not a positive number",
                copies.trim()
            ))
        })?;
        if copies == 0 {
            return Err(StartError::InvalidRequest(
                "copy count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            text: text.to_string(),
            copies,
        })
    }
}

/// Runs at most one print job at a time. Status transitions are published on
/// the snapshot channel and mirrored into a shared cell readable via `status()`;
/// only the job's own task writes either one after start.
pub struct JobController {
    status: Arc<RwLock<JobStatus>>,
    status_tx: mpsc::Sender<JobStatus>,
    cancel_flag: Arc<AtomicBool>,
    busy: Arc<AtomicBool>,
    emitter: FileEmitter,
    copy_interval: Duration,
}

impl JobController {
    pub fn new(
        emitter: FileEmitter,
        copy_interval: Duration,
        status_tx: mpsc::Sender<JobStatus>,
    ) -> Self {
        Self {
            status: Arc::new(RwLock::new(JobStatus::Idle)),
            status_tx,
            cancel_flag: Arc::new(AtomicBool::new(false)),
            busy: Arc::new(AtomicBool::new(false)),
            emitter,
            copy_interval,
        }
    }

    pub async fn status(&self) -> JobStatus {
        self.status.read().await.clone()
    }

    /// Begin a job and return immediately. Fails fast with `AlreadyRunning`
    /// while a job is active; an invalid request leaves the controller idle.
    pub async fn start(&self, request: PrintJobRequest) -> Result<(), StartError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Start rejected: busy printing");
            return Err(StartError::AlreadyRunning);
        }
        if request.copies == 0 {
            self.busy.store(false, Ordering::Release);
            return Err(StartError::InvalidRequest(
                "copy count must be at least 1".to_string(),
            ));
        }
        self.cancel_flag.store(false, Ordering::Release);

        let job_id = Uuid::new_v4();
        tracing::info!("Starting print job {} ({} copies)", job_id, request.copies);
        self.publish(JobStatus::Running(0)).await;

        let worker = JobWorker {
            status: self.status.clone(),
            status_tx: self.status_tx.clone(),
            cancel_flag: self.cancel_flag.clone(),
            busy: self.busy.clone(),
            emitter: self.emitter.clone(),
            copy_interval: self.copy_interval,
        };
        tokio::spawn(async move {
            worker.run(job_id, request).await;
        });
        Ok(())
    }

    /// Raise the cancellation flag. The loop observes it at the next iteration
    /// boundary; an in-flight write is never interrupted. No-op when idle.
    pub fn request_cancel(&self) -> bool {
        if !self.busy.load(Ordering::Acquire) {
            return false;
        }
        self.cancel_flag.store(true, Ordering::Release);
        tracing::info!("Cancellation requested");
        true
    }

    async fn publish(&self, status: JobStatus) {
        *self.status.write().await = status.clone();
        let _ = self.status_tx.send(status).await;
    }
}

/// The background half of a job: owns the copy loop for one request.
struct JobWorker {
    status: Arc<RwLock<JobStatus>>,
    status_tx: mpsc::Sender<JobStatus>,
    cancel_flag: Arc<AtomicBool>,
    busy: Arc<AtomicBool>,
    emitter: FileEmitter,
    copy_interval: Duration,
}

impl JobWorker {
    async fn run(self, job_id: Uuid, request: PrintJobRequest) {
        let outcome = self.copy_loop(&request).await;
        match &outcome {
            JobStatus::Completed => tracing::info!("Print job {} completed", job_id),
            JobStatus::Cancelled => tracing::info!("Print job {} cancelled", job_id),
            JobStatus::Failed(msg) => tracing::error!("Print job {} failed: {}", job_id, msg),
            _ => {}
        }
        self.publish(outcome).await;
        self.busy.store(false, Ordering::Release);
    }

    async fn copy_loop(&self, request: &PrintJobRequest) -> JobStatus {
        for index in 1..=request.copies {
            if self.cancel_flag.load(Ordering::Acquire) {
                // Progress resets to zero on cancel
                self.publish(JobStatus::Running(0)).await;
                return JobStatus::Cancelled;
            }

            // Models backpressure from a slow device, one copy per interval
            tokio::time::sleep(self.copy_interval).await;

            let stamp = TimestampKey::now();
            if let Err(e) = self.emitter.emit(index, &stamp, &request.text).await {
                return JobStatus::Failed(e.to_string());
            }

            let percent = progress::percent_for(index, request.copies);
            self.publish(JobStatus::Running(percent)).await;
        }
        JobStatus::Completed
    }

    async fn publish(&self, status: JobStatus) {
        *self.status.write().await = status.clone();
        let _ = self.status_tx.send(status).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_positive_count() {
        let request = PrintJobRequest::parse(Some("hello"), "3").unwrap();
        assert_eq!(request.text, "hello");
        assert_eq!(request.copies, 3);
    }

    #[test]
    fn test_parse_trims_count() {
        let request = PrintJobRequest::parse(Some("doc"), " 7 ").unwrap();
        assert_eq!(request.copies, 7);
    }

    #[test]
    fn test_parse_allows_empty_text() {
        let request = PrintJobRequest::parse(Some(""), "1").unwrap();
        assert_eq!(request.text, "");
    }

    #[test]
    fn test_parse_rejects_missing_text() {
        let err = PrintJobRequest::parse(None, "2").unwrap_err();
        assert!(matches!(err, StartError::InvalidRequest(_)));
    }

    #[test]
    fn test_parse_rejects_non_numeric_count() {
        for bad in ["abc", "", "2.5", "-3"] {
            let err = PrintJobRequest::parse(Some("doc"), bad).unwrap_err();
            assert!(
                matches!(err, StartError::InvalidRequest(_)),
                "input {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_rejects_zero_count() {
        let err = PrintJobRequest::parse(Some("doc"), "0").unwrap_err();
        assert!(matches!(err, StartError::InvalidRequest(_)));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
        assert!(JobStatus::Failed("boom".to_string()).is_terminal());
        assert!(!JobStatus::Idle.is_terminal());
        assert!(!JobStatus::Running(50).is_terminal());
    }
}
