//! Job queries: listings, status, spool files, spool content and JCL.

use crate::client::ZosmfClient;
use crate::error::ApiError;
use crate::jobs::types::{CommonJobParms, GetJobParms, Job, JobFile};
use crate::jobs::RESOURCE;
use crate::request::{encode_segment, ZosmfRequest};

/// Read-only operations against `/zosmf/restjobs/jobs`.
#[derive(Debug, Clone)]
pub struct GetJobs {
    client: ZosmfClient,
}

impl GetJobs {
    pub fn new(client: ZosmfClient) -> Self {
        Self { client }
    }

    /// Jobs visible to the logged-in user, with z/OSMF's default filters.
    pub fn get_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.get_jobs_common(&GetJobParms::default())
    }

    pub fn get_jobs_by_owner(&self, owner: &str) -> Result<Vec<Job>, ApiError> {
        require("owner", owner)?;
        self.get_jobs_common(&GetJobParms::builder().owner(owner).build())
    }

    /// Jobs whose name matches `prefix` (`*` wildcards allowed).
    pub fn get_jobs_by_prefix(&self, prefix: &str) -> Result<Vec<Job>, ApiError> {
        require("prefix", prefix)?;
        self.get_jobs_common(&GetJobParms::builder().prefix(prefix).build())
    }

    pub fn get_jobs_by_owner_and_prefix(
        &self,
        owner: &str,
        prefix: &str,
    ) -> Result<Vec<Job>, ApiError> {
        require("owner", owner)?;
        require("prefix", prefix)?;
        self.get_jobs_common(&GetJobParms::builder().owner(owner).prefix(prefix).build())
    }

    /// List jobs with arbitrary filters. Issues exactly one GET.
    pub fn get_jobs_common(&self, parms: &GetJobParms) -> Result<Vec<Job>, ApiError> {
        let mut request = ZosmfRequest::get_json(self.client.url(RESOURCE));
        if let Some(owner) = &parms.owner {
            request = request.query("owner", owner.as_str());
        }
        if let Some(prefix) = &parms.prefix {
            request = request.query("prefix", prefix.as_str());
        }
        if let Some(max_jobs) = parms.max_jobs {
            request = request.query("max-jobs", max_jobs.to_string());
        }
        if let Some(job_id) = &parms.job_id {
            request = request.query("jobid", job_id.as_str());
        }

        self.client.execute(&request)?.into_json()
    }

    /// The single job with id `job_id`, whoever owns it.
    pub fn get_job(&self, job_id: &str) -> Result<Job, ApiError> {
        require("job id", job_id)?;
        let parms = GetJobParms::builder().owner("*").job_id(job_id).build();
        let mut jobs = self.get_jobs_common(&parms)?;
        match jobs.len() {
            0 => Err(ApiError::NotFound(format!("job {job_id}"))),
            1 => Ok(jobs.remove(0)),
            n => Err(ApiError::UnexpectedResult(format!(
                "expected 1 job for {job_id}, received {n}"
            ))),
        }
    }

    pub fn get_status(&self, job_name: &str, job_id: &str) -> Result<Job, ApiError> {
        self.get_status_common(&CommonJobParms::new(job_id, job_name))
    }

    pub fn get_status_for_job(&self, job: &Job) -> Result<Job, ApiError> {
        let (job_name, job_id) = job_keys(job)?;
        self.get_status(job_name, job_id)
    }

    pub fn get_status_common(&self, parms: &CommonJobParms) -> Result<Job, ApiError> {
        let mut request = ZosmfRequest::get_json(self.job_url(parms)?);
        if parms.step_data {
            request = request.query("step-data", "Y");
        }
        self.client.execute(&request)?.into_json()
    }

    pub fn get_spool_files(&self, job_name: &str, job_id: &str) -> Result<Vec<JobFile>, ApiError> {
        let url = format!("{}/files", self.job_url(&CommonJobParms::new(job_id, job_name))?);
        self.client.execute(&ZosmfRequest::get_json(url))?.into_json()
    }

    pub fn get_spool_files_for_job(&self, job: &Job) -> Result<Vec<JobFile>, ApiError> {
        let (job_name, job_id) = job_keys(job)?;
        self.get_spool_files(job_name, job_id)
    }

    /// Full text of one spool file.
    pub fn get_spool_content(&self, file: &JobFile) -> Result<String, ApiError> {
        let job_name = file
            .job_name
            .as_deref()
            .ok_or_else(|| ApiError::InvalidArgument("spool file has no job name".to_string()))?;
        let job_id = file
            .job_id
            .as_deref()
            .ok_or_else(|| ApiError::InvalidArgument("spool file has no job id".to_string()))?;
        let spool_id = file
            .id
            .ok_or_else(|| ApiError::InvalidArgument("spool file has no id".to_string()))?;
        self.get_spool_content_by_id(job_name, job_id, spool_id)
    }

    pub fn get_spool_content_by_id(
        &self,
        job_name: &str,
        job_id: &str,
        spool_id: i64,
    ) -> Result<String, ApiError> {
        if spool_id <= 0 {
            return Err(ApiError::InvalidArgument(format!("spool id {spool_id}")));
        }
        let url = format!(
            "{}/files/{spool_id}/records",
            self.job_url(&CommonJobParms::new(job_id, job_name))?
        );
        self.client.execute(&ZosmfRequest::get_text(url))?.into_text()
    }

    /// JCL the job was submitted with.
    pub fn get_jcl(&self, job_name: &str, job_id: &str) -> Result<String, ApiError> {
        self.get_jcl_common(&CommonJobParms::new(job_id, job_name))
    }

    pub fn get_jcl_for_job(&self, job: &Job) -> Result<String, ApiError> {
        let (job_name, job_id) = job_keys(job)?;
        self.get_jcl(job_name, job_id)
    }

    pub fn get_jcl_common(&self, parms: &CommonJobParms) -> Result<String, ApiError> {
        let url = format!("{}/files/JCL/records", self.job_url(parms)?);
        self.client.execute(&ZosmfRequest::get_text(url))?.into_text()
    }

    fn job_url(&self, parms: &CommonJobParms) -> Result<String, ApiError> {
        require("job name", &parms.job_name)?;
        require("job id", &parms.job_id)?;
        Ok(format!(
            "{}/{}/{}",
            self.client.url(RESOURCE),
            encode_segment(&parms.job_name),
            encode_segment(&parms.job_id)
        ))
    }
}

fn require(what: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidArgument(format!("{what} not specified")));
    }
    Ok(())
}

fn job_keys(job: &Job) -> Result<(&str, &str), ApiError> {
    let job_name = job
        .job_name
        .as_deref()
        .ok_or_else(|| ApiError::InvalidArgument("job has no job name".to_string()))?;
    let job_id = job
        .job_id
        .as_deref()
        .ok_or_else(|| ApiError::InvalidArgument("job has no job id".to_string()))?;
    Ok((job_name, job_id))
}
