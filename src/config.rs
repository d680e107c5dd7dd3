use crate::{
  error::{Error, Result},
  github_api::RepositoryRef,
};
use itertools::Itertools;
use log::{debug, warn};
use std::{convert::TryFrom, fs, path::Path};

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Reads `GITHUB_TOKEN` from a dotenv style file. The process environment is
/// not consulted.
pub fn read_token(env_path: &Path) -> Result<String> {
  let iter = dotenv::from_path_iter(env_path).map_err(|e| {
    Error::Config(format!("failed to open {}: {}", env_path.display(), e))
  })?;

  for item in iter {
    let (key, value) = item.map_err(|e| {
      Error::Config(format!("failed to parse {}: {}", env_path.display(), e))
    })?;
    if key == TOKEN_VAR {
      let value = value.trim();
      if value.is_empty() {
        break;
      }
      return Ok(value.to_owned());
    }
  }

  Err(Error::Config(format!(
    "{} not found in {}",
    TOKEN_VAR,
    env_path.display()
  )))
}

/// Malformed entries are logged and skipped, duplicates are dropped.
pub fn parse_repos(contents: &str) -> Vec<RepositoryRef> {
  let tokens = contents
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with('#'))
    .flat_map(str::split_whitespace);

  let mut total = 0;
  let repos: Vec<_> = tokens
    .filter_map(|token| match RepositoryRef::try_from(token) {
      Ok(repo) => {
        total += 1;
        Some(repo)
      }
      Err(err) => {
        warn!("{}, skipping", err);
        None
      }
    })
    .unique()
    .collect();

  if repos.len() != total {
    debug!("dropped {} duplicate repositories", total - repos.len());
  }
  repos
}

pub fn read_repos(path: &Path) -> Result<Vec<RepositoryRef>> {
  let contents = fs::read_to_string(path).map_err(|source| Error::ReadInput {
    path: path.to_owned(),
    source,
  })?;
  Ok(parse_repos(&contents))
}
