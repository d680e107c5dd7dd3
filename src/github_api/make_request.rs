use super::{
  Branch, BranchCommit, FileContents, GithubApi, RepositoryRef,
  API_PAGE_LIMIT, DEFAULT_API_URL,
};
use crate::error::{ApiError, Error};
use log::debug;
use reqwest::{blocking::Client, header, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("pubspec_stats/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GithubClient {
  client: Client,
  api_url: String,
  api_token: String,
}

impl GithubClient {
  pub fn new(api_token: String, timeout: Duration) -> Result<Self, Error> {
    Self::with_api_url(DEFAULT_API_URL, api_token, timeout)
  }

  pub fn with_api_url(
    api_url: &str,
    api_token: String,
    timeout: Duration,
  ) -> Result<Self, Error> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
      header::ACCEPT,
      header::HeaderValue::from_static("application/vnd.github+json"),
    );
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .default_headers(headers)
      .timeout(timeout)
      .build()
      .map_err(|e| Error::Config(format!("failed to build client: {}", e)))?;

    Ok(Self {
      client,
      api_url: api_url.trim_end_matches('/').to_owned(),
      api_token,
    })
  }

  fn make_request<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, &str)],
  ) -> Result<T, ApiError> {
    let url = format!("{}{}", self.api_url, path);
    debug!("GET {} {:?}", url, query);

    let mut req = self.client.get(&url).bearer_auth(&self.api_token);
    if !query.is_empty() {
      req = req.query(query);
    }
    let res = req.send()?;

    match res.status() {
      StatusCode::NOT_FOUND => Err(ApiError::NotFound { url }),
      status if !status.is_success() => Err(ApiError::Status {
        status: status.as_u16(),
        url,
      }),
      _ => Ok(res.json()?),
    }
  }

  fn repo_path(repo: &RepositoryRef) -> String {
    format!("/repos/{}/{}", repo.owner, repo.name)
  }
}

impl GithubApi for GithubClient {
  fn list_branches(
    &self,
    repo: &RepositoryRef,
  ) -> Result<Vec<Branch>, ApiError> {
    let path = format!("{}/branches", Self::repo_path(repo));
    let per_page = API_PAGE_LIMIT.to_string();

    let mut branches = Vec::new();
    for page in 1.. {
      let page = page.to_string();
      let current: Vec<Branch> = self.make_request(
        &path,
        &[("per_page", per_page.as_str()), ("page", page.as_str())],
      )?;
      let finished = current.len() < API_PAGE_LIMIT;
      branches.extend(current);
      if finished {
        break;
      }
    }

    // the listing only carries the head sha, the date needs one more lookup
    for branch in branches.iter_mut().filter(|b| !b.has_commit_details()) {
      let commit: BranchCommit = self.make_request(
        &format!("{}/commits/{}", Self::repo_path(repo), branch.commit.sha),
        &[],
      )?;
      branch.commit = commit;
    }

    Ok(branches)
  }

  fn get_file_contents(
    &self,
    repo: &RepositoryRef,
    path: &str,
    git_ref: Option<&str>,
  ) -> Result<FileContents, ApiError> {
    let path = format!("{}/contents/{}", Self::repo_path(repo), path);
    match git_ref {
      Some(git_ref) => self.make_request(&path, &[("ref", git_ref)]),
      None => self.make_request(&path, &[]),
    }
  }
}
