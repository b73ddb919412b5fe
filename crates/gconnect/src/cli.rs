//! Clap derive structures for the `gconnect` demo CLI.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use gconnect_api::Region;

/// gconnect -- pull a day of Garmin Connect health stats and publish
/// them as a mem.ai note
#[derive(Debug, Parser)]
#[command(
    name = "gconnect",
    version,
    about = "Fetch Garmin Connect health stats and republish them to mem.ai",
    long_about = "Logs in to Garmin Connect (reusing a persisted token bundle when\n\
        present, falling back to credential login), fetches the daily health\n\
        summary, and posts it as a markdown note to mem.ai."
)]
pub struct Cli {
    /// Directory holding the persisted token bundle
    #[arg(long, env = "GARMIN_TOKENS")]
    pub tokens: Option<PathBuf>,

    /// Garmin account email (prompted for when credential login is needed)
    #[arg(long, env = "GARMIN_EMAIL")]
    pub email: Option<String>,

    /// Which Garmin deployment to use
    #[arg(long, default_value = "global")]
    pub region: RegionArg,

    /// Day to fetch, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// mem.ai API key; without it the stats are printed instead
    #[arg(long, env = "MEM_API_KEY", hide_env = true)]
    pub mem_key: Option<String>,

    /// Print the stats instead of posting them
    #[arg(long)]
    pub dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RegionArg {
    /// Commercial deployment (garmin.com)
    Global,
    /// China-restricted deployment (garmin.cn)
    Cn,
}

impl From<RegionArg> for Region {
    fn from(arg: RegionArg) -> Self {
        match arg {
            RegionArg::Global => Self::Global,
            RegionArg::Cn => Self::China,
        }
    }
}
