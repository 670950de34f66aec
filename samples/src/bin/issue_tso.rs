//! Issue one TSO command and print what it wrote.

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use zosmf_core::{IssueTso, StartTsoParams};
use zosmf_samples::{init_logging, ConnectionArgs};

#[derive(Parser)]
#[clap(about = "Issue a TSO command through z/OSMF", version)]
struct Cli {
    #[clap(flatten)]
    connection: ConnectionArgs,

    /// Accounting number for the TSO address space
    #[clap(short = 'a', long, env = "ZOSMF_ACCOUNT")]
    account: String,

    /// Logon procedure
    #[clap(long)]
    proc: Option<String>,

    /// TSO command to issue
    command: String,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let params = cli.proc.map(|proc| StartTsoParams {
        proc,
        ..StartTsoParams::default()
    });
    let response = IssueTso::new(cli.connection.client())
        .issue_tso_command(&cli.account, &cli.command, params.as_ref())
        .context("issuing TSO command")?;

    info!(
        start_ready = response.start_ready,
        responses = response.zosmf_responses.len(),
        stopped = response.stop_response.as_ref().is_some_and(|r| r.success),
        "TSO command finished"
    );
    if !response.success {
        bail!("TSO command {} did not complete", cli.command);
    }
    println!("{}", response.command_responses.unwrap_or_default());
    Ok(())
}
