use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ApiError {
  #[error("{url} was not found")]
  NotFound { url: String },
  #[error("{kind} error {status} from {url}", kind = status_kind(.status))]
  Status { status: u16, url: String },
  #[error(transparent)]
  Transport(#[from] reqwest::Error),
}

fn status_kind(status: &u16) -> &'static str {
  if *status >= 500 {
    "server"
  } else {
    "client"
  }
}

impl ApiError {
  pub fn is_client_error(&self) -> bool {
    match self {
      Self::NotFound { .. } => true,
      Self::Status { status, .. } => (400..500).contains(status),
      Self::Transport(err) => {
        err.status().map_or(false, |s| s.is_client_error())
      }
    }
  }
}

#[derive(Error, Debug)]
pub enum DecodeError {
  #[error("unsupported content encoding {0:?}")]
  Encoding(String),
  #[error("invalid base64 content: {0}")]
  Base64(#[from] base64::DecodeError),
  #[error("invalid yaml: {0}")]
  Yaml(#[from] serde_yaml::Error),
}

#[derive(Error, Debug)]
pub enum Error {
  #[error("configuration error: {0}")]
  Config(String),
  #[error("failed to read {path}: {source}")]
  ReadInput {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("invalid repository {0:?} (expected owner/name)")]
  InvalidRepoFormat(String),
  #[error("failed to resolve branch: {0}")]
  RefResolution(#[source] ApiError),
  #[error("repository has no branches")]
  NoBranches,
  #[error("failed to fetch manifest: {0}")]
  Fetch(#[from] ApiError),
  #[error("failed to decode manifest: {0}")]
  Decode(#[from] DecodeError),
  #[error("failed to serialize report: {0}")]
  Serialize(#[from] serde_json::Error),
  #[error("failed to write {path}: {source}")]
  OutputWrite {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl Error {
  pub fn is_expected_skip(&self) -> bool {
    match self {
      Self::InvalidRepoFormat(_) | Self::NoBranches | Self::Decode(_) => true,
      Self::RefResolution(err) | Self::Fetch(err) => err.is_client_error(),
      _ => false,
    }
  }
}
