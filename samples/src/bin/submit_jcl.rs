//! Submit a JCL stream and print the job z/OSMF created for it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use zosmf_core::SubmitJobs;
use zosmf_samples::{init_logging, ConnectionArgs};

const DEFAULT_JCL: &str = "//IEFBR14 JOB (ACCT),'SAMPLE',CLASS=A,MSGCLASS=X\n//STEP1    EXEC PGM=IEFBR14\n";

#[derive(Parser)]
#[clap(about = "Submit JCL through z/OSMF", version)]
struct Cli {
    #[clap(flatten)]
    connection: ConnectionArgs,

    /// File holding the JCL; a one-step IEFBR14 job when omitted
    jcl: Option<PathBuf>,

    /// Submit the data set (e.g. `SYS1.PROCLIB(MYJOB)`) instead of local JCL
    #[clap(long, conflicts_with = "jcl")]
    data_set: Option<String>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let submit_jobs = SubmitJobs::new(cli.connection.client());

    let job = match (&cli.data_set, &cli.jcl) {
        (Some(data_set), _) => submit_jobs
            .submit_job(data_set)
            .with_context(|| format!("submitting {data_set}"))?,
        (None, Some(path)) => {
            let jcl = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            submit_jobs.submit_jcl(&jcl, None, None).context("submitting JCL")?
        }
        (None, None) => submit_jobs
            .submit_jcl(DEFAULT_JCL, None, None)
            .context("submitting JCL")?,
    };

    println!(
        "submitted {}({}) owner={} status={}",
        job.job_name.as_deref().unwrap_or("?"),
        job.job_id.as_deref().unwrap_or("?"),
        job.owner.as_deref().unwrap_or("?"),
        job.status.as_deref().unwrap_or("?"),
    );
    Ok(())
}
