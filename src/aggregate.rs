use crate::{
  error::{Error, Result},
  github_api::{fetch_manifest, GithubApi, RefStrategy, RepositoryRef},
  manifest::Manifest,
  progress_bar::get_bar,
  Section, Sections,
};
use indicatif::{ParallelProgressIterator, ProgressBar};
use log::{error, info, warn};
use rayon::prelude::*;
use std::{
  collections::BTreeMap,
  sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex, PoisonError,
  },
  thread,
  time::Duration,
};

pub const DEFAULT_LIMIT: usize = 5;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct UsageCounters {
  counts: Sections<BTreeMap<String, usize>>,
}

impl UsageCounters {
  pub fn record(&mut self, manifest: &Manifest) {
    for (section, packages) in manifest.sections().iter_with() {
      let counts = &mut self.counts[section];
      for package in packages {
        *counts.entry(package.clone()).or_insert(0) += 1;
      }
    }
  }

  pub fn count(&self, section: Section, package: &str) -> usize {
    self.counts[section].get(package).copied().unwrap_or(0)
  }

  pub fn section(&self, section: Section) -> &BTreeMap<String, usize> {
    &self.counts[section]
  }

  pub fn is_empty(&self) -> bool {
    self.counts.as_ref().into_iter().all(BTreeMap::is_empty)
  }
}

#[derive(Debug, Clone)]
pub struct CollectSummary {
  pub counters: UsageCounters,
  pub succeeded: usize,
  pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct Collector {
  pub limit: usize,
  pub ref_strategy: RefStrategy,
  // pause after each repository, outside the counters lock
  pub delay: Duration,
  pub progress: bool,
}

impl Default for Collector {
  fn default() -> Self {
    Self {
      limit: DEFAULT_LIMIT,
      ref_strategy: RefStrategy::default(),
      delay: DEFAULT_DELAY,
      progress: false,
    }
  }
}

impl Collector {
  pub fn collect<A>(
    &self,
    api: &A,
    repos: &[RepositoryRef],
  ) -> Result<CollectSummary>
  where
    A: GithubApi + Sync,
  {
    if self.limit == 0 {
      return Err(Error::Config("limit must be at least 1".to_owned()));
    }

    let pool = rayon::ThreadPoolBuilder::new()
      .num_threads(self.limit)
      .thread_name(|i| format!("collector-{}", i))
      .build()
      .map_err(|e| Error::Config(format!("failed to start workers: {}", e)))?;

    let bar = if self.progress {
      get_bar(repos.len() as u64)
    } else {
      ProgressBar::hidden()
    };

    let counters = Mutex::new(UsageCounters::default());
    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    pool.install(|| {
      repos
        .par_iter()
        .progress_with(bar.clone())
        .for_each(|repo| {
          bar.set_message(&repo.to_string());
          match self.process(api, repo) {
            Ok(manifest) => {
              info!("[{}] {} packages", repo, manifest.package_count());
              counters
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .record(&manifest);
              succeeded.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
              if err.is_expected_skip() {
                warn!("[{}] skipped: {}", repo, err);
              } else {
                error!("[{}] skipped: {}", repo, err);
              }
              failed.fetch_add(1, Ordering::Relaxed);
            }
          }

          if !self.delay.is_zero() {
            thread::sleep(self.delay);
          }
        })
    });
    bar.finish_and_clear();

    Ok(CollectSummary {
      counters: counters
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner),
      succeeded: succeeded.into_inner(),
      failed: failed.into_inner(),
    })
  }

  fn process<A: GithubApi>(
    &self,
    api: &A,
    repo: &RepositoryRef,
  ) -> Result<Manifest> {
    let git_ref = self.ref_strategy.resolve(api, repo)?;
    let bytes = fetch_manifest(api, repo, git_ref.as_deref())?;
    Ok(Manifest::from_slice(&bytes)?)
  }
}
