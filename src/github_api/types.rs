//! Response bodies of the REST endpoints we consume. Only the fields we read
//! are modeled; everything else in the payload is ignored.
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Branch {
  pub name: String,
  pub commit: BranchCommit,
}

/// Both the branch listing and `/commits/{sha}` return this shape. The
/// listing omits the nested `commit` object.
#[derive(Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct BranchCommit {
  #[serde(default)]
  pub sha: String,
  #[serde(default)]
  pub commit: Option<CommitDetail>,
}

#[derive(Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct CommitDetail {
  #[serde(default)]
  pub author: Option<CommitAuthor>,
}

#[derive(Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct CommitAuthor {
  #[serde(default)]
  pub date: Option<DateTime<Utc>>,
}

impl Branch {
  pub fn commit_date(&self) -> Option<DateTime<Utc>> {
    self
      .commit
      .commit
      .as_ref()
      .and_then(|c| c.author.as_ref())
      .and_then(|a| a.date)
  }

  pub fn has_commit_details(&self) -> bool {
    self.commit.commit.is_some()
  }
}

#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct FileContents {
  #[serde(default)]
  pub content: String,
  #[serde(default)]
  pub encoding: String,
}
