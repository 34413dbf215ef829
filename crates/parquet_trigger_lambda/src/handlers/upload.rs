use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::adapters::job_launcher::JobLauncher;
use crate::adapters::object_store::ObjectLister;
use crate::config::HandlerConfig;
use crate::runtime::contract::{parse_notification, JobLaunchRequest, NotificationRecord};
use crate::runtime::outcome::{
    response_message, status_code, EventError, RemoteStage, TriggerError, TriggerOutcome,
};
use crate::runtime::selection::select_file;

const COMPONENT: &str = "upload_trigger";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TriggerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

pub fn handle_upload_event(
    event: Value,
    config: &HandlerConfig,
    lister: &dyn ObjectLister,
    launcher: &dyn JobLauncher,
) -> Result<TriggerResponse, EventError> {
    info!(component = COMPONENT, event = "upload_received", payload = %event);

    let record = parse_notification(event)?;
    info!(
        component = COMPONENT,
        event = "bucket_resolved",
        bucket = %record.container,
        object_key = record.object_key.as_deref().unwrap_or(""),
    );

    let outcome = launch_conversion(&record, config, lister, launcher);
    if let Err(TriggerError::RemoteCall { stage, message }) = &outcome {
        error!(
            component = COMPONENT,
            event = "trigger_failed",
            bucket = %record.container,
            stage = stage.as_str(),
            error = %message,
        );
    }

    Ok(render_response(&outcome))
}

/// Lists the bucket, selects the file to convert, and starts the conversion
/// job. At most one job run is started per call.
pub fn launch_conversion(
    record: &NotificationRecord,
    config: &HandlerConfig,
    lister: &dyn ObjectLister,
    launcher: &dyn JobLauncher,
) -> TriggerOutcome {
    let container = record.container.as_str();

    let entries = lister
        .list_objects(container)
        .map_err(|message| TriggerError::RemoteCall {
            stage: RemoteStage::ListObjects,
            message,
        })?;

    if entries.is_empty() {
        warn!(component = COMPONENT, event = "bucket_empty", bucket = %container);
        return Err(TriggerError::EmptyContainer {
            container: container.to_string(),
        });
    }

    let Some(selected) = select_file(&entries) else {
        warn!(
            component = COMPONENT,
            event = "no_matching_file",
            bucket = %container,
            listed_objects = entries.len(),
        );
        return Err(TriggerError::NoMatchingFile {
            container: container.to_string(),
        });
    };
    info!(
        component = COMPONENT,
        event = "file_selected",
        bucket = %container,
        file = %selected.key,
        size = selected.size,
    );

    let request = JobLaunchRequest::new(
        &config.job_name,
        container,
        &selected.key,
        &config.output_prefix,
    );
    let run = launcher
        .start_job_run(&request)
        .map_err(|message| TriggerError::RemoteCall {
            stage: RemoteStage::StartJobRun,
            message,
        })?;

    info!(
        component = COMPONENT,
        event = "job_started",
        job_name = %request.job_name,
        job_run_id = %run.run_id,
        input_location = %request.input_location,
        output_location = %request.output_location,
    );
    Ok(run)
}

pub fn render_response(outcome: &TriggerOutcome) -> TriggerResponse {
    TriggerResponse {
        status_code: status_code(outcome),
        body: Value::from(response_message(outcome)).to_string(),
    }
}
