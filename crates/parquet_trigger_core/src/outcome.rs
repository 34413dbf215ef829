use thiserror::Error;

use crate::contract::LaunchedRun;

pub const STATUS_SUCCESS: u16 = 200;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

pub const JOB_STARTED_MESSAGE: &str = "job started";
pub const NO_FILE_MESSAGE: &str = "no file found";
pub const NO_MATCHING_FILE_MESSAGE: &str = "no matching file found";
pub const INTERNAL_ERROR_MESSAGE: &str = "error processing upload";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStage {
    ListObjects,
    StartJobRun,
}

impl RemoteStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListObjects => "list_objects",
            Self::StartJobRun => "start_job_run",
        }
    }
}

impl std::fmt::Display for RemoteStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal failures of a single trigger run. All of them are rendered into a
/// response; none escape the handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("bucket '{container}' has no objects")]
    EmptyContainer { container: String },
    #[error("bucket '{container}' has no top-level .json or .csv object")]
    NoMatchingFile { container: String },
    #[error("{stage} failed: {message}")]
    RemoteCall { stage: RemoteStage, message: String },
}

impl TriggerError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptyContainer { .. } | Self::NoMatchingFile { .. } => STATUS_NOT_FOUND,
            Self::RemoteCall { .. } => STATUS_INTERNAL_ERROR,
        }
    }

    pub fn response_message(&self) -> &'static str {
        match self {
            Self::EmptyContainer { .. } => NO_FILE_MESSAGE,
            Self::NoMatchingFile { .. } => NO_MATCHING_FILE_MESSAGE,
            Self::RemoteCall { .. } => INTERNAL_ERROR_MESSAGE,
        }
    }
}

/// Notification payload that cannot be interpreted. Unlike [`TriggerError`]
/// this is not mapped to a status code and fails the invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("notification event contains no records")]
    NoRecords,
    #[error("malformed notification event: {0}")]
    Malformed(String),
}

pub type TriggerOutcome = Result<LaunchedRun, TriggerError>;

pub fn status_code(outcome: &TriggerOutcome) -> u16 {
    match outcome {
        Ok(_) => STATUS_SUCCESS,
        Err(error) => error.status_code(),
    }
}

pub fn response_message(outcome: &TriggerOutcome) -> &'static str {
    match outcome {
        Ok(_) => JOB_STARTED_MESSAGE,
        Err(error) => error.response_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_maps_to_job_started() {
        let outcome: TriggerOutcome = Ok(LaunchedRun {
            run_id: "jr_123".to_string(),
        });

        assert_eq!(status_code(&outcome), 200);
        assert_eq!(response_message(&outcome), "job started");
    }

    #[test]
    fn missing_files_map_to_not_found() {
        let empty: TriggerOutcome = Err(TriggerError::EmptyContainer {
            container: "my-bucket".to_string(),
        });
        let unmatched: TriggerOutcome = Err(TriggerError::NoMatchingFile {
            container: "my-bucket".to_string(),
        });

        assert_eq!(status_code(&empty), 404);
        assert_eq!(response_message(&empty), "no file found");
        assert_eq!(status_code(&unmatched), 404);
        assert_eq!(response_message(&unmatched), "no matching file found");
    }

    #[test]
    fn remote_failures_hide_cause_from_response() {
        let outcome: TriggerOutcome = Err(TriggerError::RemoteCall {
            stage: RemoteStage::StartJobRun,
            message: "AccessDeniedException".to_string(),
        });

        assert_eq!(status_code(&outcome), 500);
        assert_eq!(response_message(&outcome), "error processing upload");
    }

    #[test]
    fn remote_failure_display_names_stage_and_cause() {
        let error = TriggerError::RemoteCall {
            stage: RemoteStage::ListObjects,
            message: "NoSuchBucket".to_string(),
        };

        assert_eq!(error.to_string(), "list_objects failed: NoSuchBucket");
    }
}
