// printspool: simulated print spooler — job lifecycle, progress reporting, file emission

pub mod config;
pub mod emitter;
pub mod print_job;
pub mod progress;

pub use emitter::{EmitError, FileEmitter, TimestampKey};
pub use print_job::{JobController, JobStatus, PrintJobRequest, StartError};
