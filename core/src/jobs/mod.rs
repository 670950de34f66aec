//! Batch job management under `/zosmf/restjobs/jobs`.

pub mod get;
pub mod submit;
pub mod types;

pub use get::GetJobs;
pub use submit::SubmitJobs;
pub use types::{
    CommonJobParms, GetJobParms, GetJobParmsBuilder, Job, JobFile, JobStepData, SubmitJclParms,
    SubmitJobParms,
};

/// Path of the jobs resource relative to the host.
pub const RESOURCE: &str = "/zosmf/restjobs/jobs";
