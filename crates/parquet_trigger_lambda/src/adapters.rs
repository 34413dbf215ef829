pub mod job_launcher;
pub mod object_store;
