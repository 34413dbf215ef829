use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::outcome::EventError;

pub const DEFAULT_JOB_NAME: &str = "parquet-conversion-job";
pub const DEFAULT_OUTPUT_PREFIX: &str = "parquet-output/";
pub const ALLOWED_EXTENSIONS: [&str; 2] = [".json", ".csv"];
pub const STORAGE_SCHEME: &str = "s3://";
pub const INPUT_PATH_ARGUMENT: &str = "--input_path";
pub const OUTPUT_PATH_ARGUMENT: &str = "--output_path";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct S3NotificationEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3NotificationRecord>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct S3NotificationRecord {
    #[serde(rename = "eventSource", default)]
    pub event_source: Option<String>,
    #[serde(rename = "eventName", default)]
    pub event_name: Option<String>,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    #[serde(default)]
    pub object: Option<S3Object>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct S3Object {
    #[serde(default)]
    pub key: Option<String>,
}

/// Trigger input derived from the first record of an upload notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub container: String,
    /// Key of the upload that fired the notification. Informational only;
    /// the file to convert is chosen from the bucket listing.
    pub object_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    pub key: String,
    pub size: Option<i64>,
}

impl ObjectEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobLaunchRequest {
    pub job_name: String,
    pub input_location: String,
    pub output_location: String,
}

impl JobLaunchRequest {
    pub fn new(job_name: &str, container: &str, file_key: &str, output_prefix: &str) -> Self {
        Self {
            job_name: job_name.to_string(),
            input_location: format!("{container}/{file_key}"),
            output_location: format!("{container}/{output_prefix}"),
        }
    }

    /// Arguments handed to the batch job, keyed by the job's parameter names.
    pub fn job_arguments(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (
                INPUT_PATH_ARGUMENT.to_string(),
                format!("{STORAGE_SCHEME}{}", self.input_location),
            ),
            (
                OUTPUT_PATH_ARGUMENT.to_string(),
                format!("{STORAGE_SCHEME}{}", self.output_location),
            ),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedRun {
    pub run_id: String,
}

pub fn parse_notification(event: Value) -> Result<NotificationRecord, EventError> {
    let event: S3NotificationEvent = serde_json::from_value(event)
        .map_err(|error| EventError::Malformed(error.to_string()))?;

    let Some(record) = event.records.into_iter().next() else {
        return Err(EventError::NoRecords);
    };

    let container = record.s3.bucket.name;
    if container.trim().is_empty() {
        return Err(EventError::Malformed(
            "bucket name cannot be empty".to_string(),
        ));
    }

    Ok(NotificationRecord {
        container,
        object_key: record.s3.object.and_then(|object| object.key),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn upload_event(bucket: &str, key: &str) -> Value {
        json!({
            "Records": [
                {
                    "eventVersion": "2.1",
                    "eventSource": "aws:s3",
                    "awsRegion": "us-east-1",
                    "eventName": "ObjectCreated:Put",
                    "s3": {
                        "s3SchemaVersion": "1.0",
                        "bucket": {"name": bucket, "arn": format!("arn:aws:s3:::{bucket}")},
                        "object": {"key": key, "size": 1024}
                    }
                }
            ]
        })
    }

    #[test]
    fn parses_bucket_from_first_record() {
        let record = parse_notification(upload_event("my-bucket", "data.csv"))
            .expect("event should parse");

        assert_eq!(record.container, "my-bucket");
        assert_eq!(record.object_key.as_deref(), Some("data.csv"));
    }

    #[test]
    fn rejects_event_without_records() {
        let error = parse_notification(json!({"Records": []})).expect_err("event should fail");
        assert_eq!(error, EventError::NoRecords);
    }

    #[test]
    fn rejects_record_without_bucket() {
        let error = parse_notification(json!({
            "Records": [{"eventSource": "aws:s3", "s3": {"object": {"key": "data.csv"}}}]
        }))
        .expect_err("event should fail");

        assert!(matches!(error, EventError::Malformed(_)));
    }

    #[test]
    fn rejects_blank_bucket_name() {
        let error =
            parse_notification(upload_event("  ", "data.csv")).expect_err("event should fail");
        assert_eq!(
            error,
            EventError::Malformed("bucket name cannot be empty".to_string())
        );
    }

    #[test]
    fn keeps_bucket_name_as_delivered() {
        let record = parse_notification(upload_event(" my-bucket ", "data.csv"))
            .expect("non-blank bucket should parse");

        assert_eq!(record.container, " my-bucket ");
    }

    #[test]
    fn builds_locations_from_container_and_key() {
        let request = JobLaunchRequest::new(
            DEFAULT_JOB_NAME,
            "my-bucket",
            "data.csv",
            DEFAULT_OUTPUT_PREFIX,
        );

        assert_eq!(request.job_name, "parquet-conversion-job");
        assert_eq!(request.input_location, "my-bucket/data.csv");
        assert_eq!(request.output_location, "my-bucket/parquet-output/");
    }

    #[test]
    fn job_arguments_carry_storage_scheme() {
        let request = JobLaunchRequest::new(
            DEFAULT_JOB_NAME,
            "my-bucket",
            "data.json",
            DEFAULT_OUTPUT_PREFIX,
        );
        let arguments = request.job_arguments();

        assert_eq!(arguments.len(), 2);
        assert_eq!(
            arguments.get("--input_path").map(String::as_str),
            Some("s3://my-bucket/data.json")
        );
        assert_eq!(
            arguments.get("--output_path").map(String::as_str),
            Some("s3://my-bucket/parquet-output/")
        );
    }
}
