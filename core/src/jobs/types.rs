//! z/OSMF job documents and the parameters used to look them up.
//!
//! Every field is optional: z/OSMF omits or nulls fields depending on the
//! job's phase and on which endpoint produced the document.

use serde::{Deserialize, Serialize};

/// A job as returned by the list, status and submit endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Job {
    #[serde(rename = "jobid", default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(rename = "jobname", default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsystem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// INPUT, ACTIVE or OUTPUT.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// JOB, STC or TSU.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// e.g. `CC 0000`; null while the job runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_correlator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_data: Option<Vec<JobStepData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_member: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_submitted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_started: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_ended: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_not_running: Option<String>,
}

/// One step of a job, present when status is requested with `step-data=Y`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JobStepData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smfid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proc_step_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,
}

/// A spool file of a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JobFile {
    #[serde(rename = "jobid", default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(rename = "jobname", default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recfm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_correlator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Spool file number, used to address its records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ddname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lrecl: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsystem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stepname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procstep: Option<String>,
}

/// Search filters for listing jobs. Unset filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetJobParms {
    pub owner: Option<String>,
    pub prefix: Option<String>,
    pub max_jobs: Option<u32>,
    pub job_id: Option<String>,
}

impl GetJobParms {
    pub fn builder() -> GetJobParmsBuilder {
        GetJobParmsBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct GetJobParmsBuilder {
    parms: GetJobParms,
}

impl GetJobParmsBuilder {
    pub fn owner(mut self, owner: &str) -> Self {
        self.parms.owner = Some(owner.to_string());
        self
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.parms.prefix = Some(prefix.to_string());
        self
    }

    pub fn max_jobs(mut self, max_jobs: u32) -> Self {
        self.parms.max_jobs = Some(max_jobs);
        self
    }

    pub fn job_id(mut self, job_id: &str) -> Self {
        self.parms.job_id = Some(job_id.to_string());
        self
    }

    pub fn build(self) -> GetJobParms {
        self.parms
    }
}

/// Identifies one job by id and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonJobParms {
    pub job_id: String,
    pub job_name: String,
    /// Ask for per-step data along with the status.
    pub step_data: bool,
}

impl CommonJobParms {
    pub fn new(job_id: &str, job_name: &str) -> Self {
        Self {
            job_id: job_id.to_string(),
            job_name: job_name.to_string(),
            step_data: false,
        }
    }

    pub fn with_step_data(mut self) -> Self {
        self.step_data = true;
        self
    }
}

/// In-stream JCL to hand to the internal reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitJclParms {
    pub jcl: String,
    /// Internal reader record format, `F` when unset.
    pub internal_reader_recfm: Option<String>,
    /// Internal reader record length, `80` when unset.
    pub internal_reader_lrecl: Option<String>,
}

impl SubmitJclParms {
    pub fn new(jcl: &str) -> Self {
        Self {
            jcl: jcl.to_string(),
            internal_reader_recfm: None,
            internal_reader_lrecl: None,
        }
    }
}

/// A data set (or member) holding the JCL to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitJobParms {
    pub job_data_set: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_reads_zosmf_field_names() {
        let job: Job = serde_json::from_str(
            r#"{"jobid":"JOB00042","jobname":"TESTJOB","owner":"IBMUSER","status":"OUTPUT",
                "type":"JOB","class":"A","retcode":"CC 0000","subsystem":"JES2",
                "job-correlator":"J0000042SY1.....D1C4A8E2.......:","phase":20,
                "phase-name":"Job is on the hard copy queue",
                "files-url":"https://host:443/zosmf/restjobs/jobs/TESTJOB/JOB00042/files"}"#,
        )
        .unwrap();
        assert_eq!(job.job_id.as_deref(), Some("JOB00042"));
        assert_eq!(job.job_name.as_deref(), Some("TESTJOB"));
        assert_eq!(job.job_type.as_deref(), Some("JOB"));
        assert_eq!(job.phase, Some(20));
        assert_eq!(job.phase_name.as_deref(), Some("Job is on the hard copy queue"));
        assert!(job.files_url.unwrap().ends_with("/files"));
    }

    #[test]
    fn job_tolerates_null_and_missing_fields() {
        let job: Job = serde_json::from_str(r#"{"jobid":"JOB1","retcode":null}"#).unwrap();
        assert_eq!(job.job_id.as_deref(), Some("JOB1"));
        assert!(job.retcode.is_none());
        assert!(job.owner.is_none());
    }

    #[test]
    fn job_file_reads_counts_and_id() {
        let file: JobFile = serde_json::from_str(
            r#"{"jobid":"JOB1","jobname":"J","id":2,"ddname":"JESMSGLG","byte-count":1200,
                "record-count":14,"recfm":"UA","lrecl":133,"stepname":"JES2"}"#,
        )
        .unwrap();
        assert_eq!(file.id, Some(2));
        assert_eq!(file.byte_count, Some(1200));
        assert_eq!(file.record_count, Some(14));
        assert_eq!(file.ddname.as_deref(), Some("JESMSGLG"));
    }

    #[test]
    fn step_data_uses_kebab_case() {
        let step: JobStepData = serde_json::from_str(
            r#"{"step-name":"STEP1","program-name":"IEFBR14","step-number":1,"active":false}"#,
        )
        .unwrap();
        assert_eq!(step.step_name.as_deref(), Some("STEP1"));
        assert_eq!(step.program_name.as_deref(), Some("IEFBR14"));
        assert_eq!(step.step_number, Some(1));
    }

    #[test]
    fn get_job_parms_builder_sets_only_given_filters() {
        let parms = GetJobParms::builder().owner("*").prefix("TEST*").build();
        assert_eq!(parms.owner.as_deref(), Some("*"));
        assert_eq!(parms.prefix.as_deref(), Some("TEST*"));
        assert!(parms.max_jobs.is_none());
        assert!(parms.job_id.is_none());
    }
}
