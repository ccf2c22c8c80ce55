//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Join the innercircle waitlist.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "innercircle", version, about)]
pub struct Args {
    /// TOML settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Inbound referral code, or the invite link that carries it
    #[arg(long = "ref", value_name = "CODE_OR_LINK")]
    pub referral: Option<String>,

    /// Run against an in-memory waitlist instead of the backend
    #[arg(long)]
    pub demo: bool,

    /// Look up the email before generating a referral code
    #[arg(long)]
    pub precheck_email: bool,

    /// Host embedded in invite links
    #[arg(long, value_name = "HOST")]
    pub share_site: Option<String>,

    /// Also write JSONL logs to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}
