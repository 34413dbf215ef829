use crate::runtime::contract::{DEFAULT_JOB_NAME, DEFAULT_OUTPUT_PREFIX};

/// Job name and output prefix used for every launch. Deployments always run
/// with the defaults; the struct exists so handlers receive them explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub job_name: String,
    /// Bucket-relative prefix for the job output, ending in `/`.
    pub output_prefix: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            job_name: DEFAULT_JOB_NAME.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}
