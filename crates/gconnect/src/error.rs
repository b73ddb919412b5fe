//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes for scripting around the CLI.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const PUBLISH: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Garmin Connect request failed")]
    #[diagnostic(
        code(gconnect::api),
        help(
            "Check your network connection and the service status.\n\
             Re-run with -vv to see the requests being made."
        )
    )]
    Connect(#[from] gconnect_api::Error),

    #[error("Could not determine a token directory")]
    #[diagnostic(
        code(gconnect::no_token_dir),
        help("Pass --tokens <DIR> or set GARMIN_TOKENS.")
    )]
    NoTokenDir,

    #[error("Credential prompt failed")]
    #[diagnostic(code(gconnect::prompt))]
    Prompt(#[from] dialoguer::Error),

    #[error("Publishing to mem.ai failed (HTTP {status}): {body}")]
    #[diagnostic(
        code(gconnect::publish),
        help("Verify the MEM_API_KEY value and your mem.ai account status.")
    )]
    Publish { status: u16, body: String },

    #[error("Request to mem.ai failed")]
    #[diagnostic(code(gconnect::publish_transport))]
    PublishTransport(#[from] reqwest::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Connect(e) if e.is_auth_error() => exit_code::AUTH,
            Self::NoTokenDir => exit_code::USAGE,
            Self::Publish { .. } | Self::PublishTransport(_) => exit_code::PUBLISH,
            _ => exit_code::GENERAL,
        }
    }
}
