use crate::error::{ApiError, DecodeError, Error};
use log::debug;
use std::{fmt, str::FromStr};

mod make_request;
mod repo_name;
mod types;

pub use make_request::GithubClient;
pub use repo_name::RepositoryRef;
pub use types::{Branch, BranchCommit, CommitAuthor, CommitDetail, FileContents};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const MANIFEST_PATH: &str = "pubspec.yaml";
const API_PAGE_LIMIT: usize = 100;
const BASE64_ENCODING: &str = "base64";

pub trait GithubApi {
  fn list_branches(&self, repo: &RepositoryRef)
    -> Result<Vec<Branch>, ApiError>;

  /// Contents of the file at `path`. `None` means the default branch.
  fn get_file_contents(
    &self,
    repo: &RepositoryRef,
    path: &str,
    git_ref: Option<&str>,
  ) -> Result<FileContents, ApiError>;
}

#[derive(Eq, PartialEq, Debug, Copy, Clone)]
pub enum RefStrategy {
  DefaultBranch,
  LatestCommit,
}

impl Default for RefStrategy {
  fn default() -> Self {
    Self::DefaultBranch
  }
}

impl fmt::Display for RefStrategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::DefaultBranch => write!(f, "default"),
      Self::LatestCommit => write!(f, "latest"),
    }
  }
}

impl FromStr for RefStrategy {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "default" => Ok(Self::DefaultBranch),
      "latest" => Ok(Self::LatestCommit),
      _ => Err(Error::Config(format!(
        "unknown branch strategy {:?} (expected default or latest)",
        s
      ))),
    }
  }
}

impl RefStrategy {
  pub fn resolve(
    self,
    api: &impl GithubApi,
    repo: &RepositoryRef,
  ) -> Result<Option<String>, Error> {
    match self {
      Self::DefaultBranch => Ok(None),
      Self::LatestCommit => {
        let branches =
          api.list_branches(repo).map_err(Error::RefResolution)?;
        let branch = latest_branch(&branches).ok_or(Error::NoBranches)?;
        debug!(
          "[{}] using branch {} ({:?})",
          repo,
          branch.name,
          branch.commit_date()
        );
        Ok(Some(branch.name.clone()))
      }
    }
  }
}

/// Strictly newer dates replace the current pick, so the first branch wins
/// ties. Undated branches lose to any dated one.
pub fn latest_branch(branches: &[Branch]) -> Option<&Branch> {
  let mut iter = branches.iter();
  let mut best = iter.next()?;
  let mut best_date = best.commit_date();
  for branch in iter {
    let date = branch.commit_date();
    if date > best_date {
      best = branch;
      best_date = date;
    }
  }
  Some(best)
}

pub fn fetch_manifest(
  api: &impl GithubApi,
  repo: &RepositoryRef,
  git_ref: Option<&str>,
) -> Result<Vec<u8>, Error> {
  let contents = api.get_file_contents(repo, MANIFEST_PATH, git_ref)?;
  Ok(decode_content(&contents)?)
}

pub fn decode_content(contents: &FileContents) -> Result<Vec<u8>, DecodeError> {
  if contents.encoding != BASE64_ENCODING {
    return Err(DecodeError::Encoding(contents.encoding.clone()));
  }

  // the API wraps the encoded payload in lines
  let stripped: String = contents
    .content
    .chars()
    .filter(|c| !c.is_ascii_whitespace())
    .collect();
  Ok(base64::decode(&stripped)?)
}
