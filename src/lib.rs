pub mod aggregate;
pub mod config;
pub mod error;
pub mod github_api;
pub mod manifest;
pub mod progress_bar;
pub mod report;
mod sections;

pub use aggregate::{CollectSummary, Collector, UsageCounters};
pub use error::{ApiError, DecodeError, Error};
pub use github_api::{GithubApi, GithubClient, RefStrategy, RepositoryRef};
pub use manifest::Manifest;
pub use report::{PackageEntry, Report, ReportOptions};
pub use sections::{Section, Sections};
