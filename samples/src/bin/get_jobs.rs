//! Walk through the job query operations against one system.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use zosmf_core::{ApiError, GetJobs};
use zosmf_samples::{init_logging, ConnectionArgs};

#[derive(Parser)]
#[clap(about = "List jobs and read their spool output", version)]
struct Cli {
    #[clap(flatten)]
    connection: ConnectionArgs,

    /// Job name prefix to list
    #[clap(long, default_value = "*")]
    prefix: String,

    /// Owner to list; defaults to the logged-on user
    #[clap(long)]
    owner: Option<String>,

    /// Lines of spool output to show from the end of each file
    #[clap(long, default_value_t = 10)]
    tail: usize,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let get_jobs = GetJobs::new(cli.connection.client());

    let jobs = match &cli.owner {
        Some(owner) => get_jobs.get_jobs_by_owner_and_prefix(owner, &cli.prefix),
        None => get_jobs.get_jobs_by_prefix(&cli.prefix),
    }
    .context("listing jobs")?;
    for job in &jobs {
        println!(
            "{:<8} {:<8} {:<8} {:<8} {}",
            job.job_name.as_deref().unwrap_or("-"),
            job.job_id.as_deref().unwrap_or("-"),
            job.owner.as_deref().unwrap_or("-"),
            job.status.as_deref().unwrap_or("-"),
            job.retcode.as_deref().unwrap_or(""),
        );
    }

    if let Some(job) = jobs.first() {
        let status = get_jobs.get_status_for_job(job).context("reading job status")?;
        info!(status = ?status.status, retcode = ?status.retcode, "first job");

        for file in get_jobs.get_spool_files_for_job(job).context("listing spool files")? {
            let content = get_jobs.get_spool_content(&file).context("reading spool file")?;
            let lines: Vec<&str> = content.lines().collect();
            println!("--- {} ({}) ---", file.ddname.as_deref().unwrap_or("?"), lines.len());
            for line in &lines[lines.len().saturating_sub(cli.tail)..] {
                println!("{line}");
            }
        }

        println!("--- JCL ---");
        print!("{}", get_jobs.get_jcl_for_job(job).context("reading JCL")?);
    }

    match get_jobs.get_job("JOB00000") {
        Err(ApiError::NotFound(msg)) => info!(%msg, "lookup of a missing job"),
        Err(e) => warn!(error = %e, "lookup of a missing job failed"),
        Ok(job) => warn!(?job, "JOB00000 unexpectedly exists"),
    }
    Ok(())
}
