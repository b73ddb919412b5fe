// gconnect-api: Async Rust client for the Garmin Connect web API
//
// One facade object (`ConnectClient`) owns the authenticated session and
// exposes the endpoint wrappers as inherent methods, split across one
// file per upstream service.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod transport;

mod activities;
mod challenges;
mod devices;
mod gear;
mod goals;
mod metrics;
mod wellness;

pub use activities::{ActivityDownloadFormat, ActivityUploadFormat};
pub use auth::{Credentials, TokenBundle};
pub use client::ConnectClient;
pub use endpoints::Region;
pub use error::Error;
pub use goals::GoalStatus;
pub use metrics::ProgressMetric;
pub use models::{Profile, UnitSystem};
