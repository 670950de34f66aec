//! Job submission through the JES internal reader.

use serde::Serialize;

use crate::client::ZosmfClient;
use crate::error::ApiError;
use crate::jobs::types::{Job, SubmitJclParms, SubmitJobParms};
use crate::jobs::RESOURCE;
use crate::request::ZosmfRequest;

const DEFAULT_RECFM: &str = "F";
const DEFAULT_LRECL: &str = "80";

#[derive(Serialize)]
struct SubmitFileBody {
    file: String,
}

/// Submit operations against `/zosmf/restjobs/jobs`.
#[derive(Debug, Clone)]
pub struct SubmitJobs {
    client: ZosmfClient,
}

impl SubmitJobs {
    pub fn new(client: ZosmfClient) -> Self {
        Self { client }
    }

    /// Submit in-stream JCL. `recfm` and `lrecl` default to `F` and `80`.
    pub fn submit_jcl(
        &self,
        jcl: &str,
        recfm: Option<&str>,
        lrecl: Option<&str>,
    ) -> Result<Job, ApiError> {
        self.submit_jcl_common(&SubmitJclParms {
            jcl: jcl.to_string(),
            internal_reader_recfm: recfm.map(str::to_string),
            internal_reader_lrecl: lrecl.map(str::to_string),
        })
    }

    pub fn submit_jcl_common(&self, parms: &SubmitJclParms) -> Result<Job, ApiError> {
        if parms.jcl.trim().is_empty() {
            return Err(ApiError::InvalidArgument("jcl not specified".to_string()));
        }
        let recfm = parms.internal_reader_recfm.as_deref().unwrap_or(DEFAULT_RECFM);
        let lrecl = parms.internal_reader_lrecl.as_deref().unwrap_or(DEFAULT_LRECL);

        let request = ZosmfRequest::put_text(self.client.url(RESOURCE))
            .header("X-IBM-Intrdr-Class", "A")
            .header("X-IBM-Intrdr-Recfm", recfm)
            .header("X-IBM-Intrdr-Lrecl", lrecl)
            .header("X-IBM-Intrdr-Mode", "TEXT")
            .body(parms.jcl.as_str());

        self.client.execute(&request)?.into_json()
    }

    /// Submit the JCL stored in `data_set`, e.g. `HLQ.JCL(IEFBR14)`.
    pub fn submit_job(&self, data_set: &str) -> Result<Job, ApiError> {
        self.submit_job_common(&SubmitJobParms {
            job_data_set: data_set.to_string(),
        })
    }

    pub fn submit_job_common(&self, parms: &SubmitJobParms) -> Result<Job, ApiError> {
        if parms.job_data_set.trim().is_empty() {
            return Err(ApiError::InvalidArgument("job data set not specified".to_string()));
        }
        let body = SubmitFileBody {
            file: format!("//'{}'", parms.job_data_set),
        };
        let request = ZosmfRequest::put_json(self.client.url(RESOURCE)).json_body(&body)?;
        self.client.execute(&request)?.into_json()
    }
}
