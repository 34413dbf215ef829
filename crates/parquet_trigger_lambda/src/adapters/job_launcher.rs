use crate::runtime::contract::{JobLaunchRequest, LaunchedRun};

pub trait JobLauncher {
    fn start_job_run(&self, request: &JobLaunchRequest) -> Result<LaunchedRun, String>;
}
