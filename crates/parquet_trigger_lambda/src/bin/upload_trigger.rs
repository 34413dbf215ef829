use std::collections::HashMap;

use aws_sdk_glue::operation::start_job_run::StartJobRunOutput;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use parquet_trigger_lambda::adapters::job_launcher::JobLauncher;
use parquet_trigger_lambda::adapters::object_store::ObjectLister;
use parquet_trigger_lambda::config::HandlerConfig;
use parquet_trigger_lambda::handlers::upload::{handle_upload_event, TriggerResponse};
use parquet_trigger_lambda::logging::init_tracing;
use parquet_trigger_lambda::runtime::contract::{JobLaunchRequest, LaunchedRun, ObjectEntry};
use serde_json::Value;

struct S3ObjectLister {
    s3_client: aws_sdk_s3::Client,
}

impl ObjectLister for S3ObjectLister {
    fn list_objects(&self, container: &str) -> Result<Vec<ObjectEntry>, String> {
        let bucket = container.to_string();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .list_objects_v2()
                    .bucket(bucket)
                    .send()
                    .await
                    .map(|output| entries_from_listing(&output))
                    .map_err(|error| {
                        format!(
                            "failed to list objects in s3: {}",
                            aws_sdk_s3::error::DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }
}

/// A listing without `Contents` yields no entries; objects without a key are
/// skipped.
fn entries_from_listing(output: &ListObjectsV2Output) -> Vec<ObjectEntry> {
    output
        .contents()
        .iter()
        .filter_map(|object| {
            object.key().map(|key| ObjectEntry {
                key: key.to_string(),
                size: object.size(),
            })
        })
        .collect()
}

struct GlueJobLauncher {
    glue_client: aws_sdk_glue::Client,
}

impl JobLauncher for GlueJobLauncher {
    fn start_job_run(&self, request: &JobLaunchRequest) -> Result<LaunchedRun, String> {
        let job_name = request.job_name.clone();
        let arguments: HashMap<String, String> = request.job_arguments().into_iter().collect();
        let client = self.glue_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .start_job_run()
                    .job_name(job_name)
                    .set_arguments(Some(arguments))
                    .send()
                    .await
                    .map_err(|error| {
                        format!(
                            "failed to start glue job run: {}",
                            aws_sdk_glue::error::DisplayErrorContext(&error)
                        )
                    })?;

                run_from_output(&output)
            })
        })
    }
}

fn run_from_output(output: &StartJobRunOutput) -> Result<LaunchedRun, String> {
    output
        .job_run_id()
        .map(|run_id| LaunchedRun {
            run_id: run_id.to_string(),
        })
        .ok_or_else(|| "glue job run started without a job run id".to_string())
}

struct RuntimeDependencies {
    config: HandlerConfig,
    lister: S3ObjectLister,
    launcher: GlueJobLauncher,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<TriggerResponse, Error> {
    handle_upload_event(event.payload, &deps.config, &deps.lister, &deps.launcher)
        .map_err(|error| Error::from(error.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        config: HandlerConfig::default(),
        lister: S3ObjectLister {
            s3_client: aws_sdk_s3::Client::new(&aws_config),
        },
        launcher: GlueJobLauncher {
            glue_client: aws_sdk_glue::Client::new(&aws_config),
        },
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &deps))).await
}
