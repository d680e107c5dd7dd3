use anyhow::{bail, Result};
use log::info;
use pubspec_stats::{
  config::{read_repos, read_token},
  Collector, GithubClient, RefStrategy, Report, ReportOptions,
};
use std::{path::PathBuf, time::Duration};
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
  name = "pubspec_stats",
  about = "count how many GitHub repositories depend on each Dart/Flutter \
           package, based on their pubspec.yaml",
  after_help = "Env file example:\n  GITHUB_TOKEN=ghp_ABC123xyz\n\n\
                Example:\n  pubspec_stats --env .env --repos repos.txt \
                --out stats.json --limit 3"
)]
struct Opt {
  /// Path to a .env file containing GITHUB_TOKEN.
  #[structopt(long, parse(from_os_str))]
  env: PathBuf,

  /// Path to a file with GitHub repositories (owner/name, one per line).
  #[structopt(long, parse(from_os_str))]
  repos: PathBuf,

  /// Path of the JSON file to write the result to.
  #[structopt(long, parse(from_os_str))]
  out: PathBuf,

  /// Maximum number of repositories fetched concurrently.
  #[structopt(long, default_value = "5")]
  limit: usize,

  /// Only report packages used by at least this many repositories.
  #[structopt(long, default_value = "1")]
  min: usize,

  /// Which branch to read pubspec.yaml from: "default" for the default
  /// branch, "latest" for the branch with the most recent commit.
  #[structopt(long, default_value = "default")]
  branch_strategy: RefStrategy,

  /// Pause after each repository, in milliseconds.
  #[structopt(long, default_value = "200")]
  delay_ms: u64,

  /// Timeout of each API request, in seconds.
  #[structopt(long, default_value = "10")]
  timeout_secs: u64,

  /// Base URL of the GitHub REST API.
  #[structopt(long, default_value = "https://api.github.com")]
  api_url: String,

  /// Reference URL attached to each package; {package} is replaced by its
  /// name.
  #[structopt(long, default_value = "https://pub.dev/packages/{package}")]
  url_template: String,

  /// Don't show a progress bar.
  #[structopt(long)]
  no_progress: bool,
}

pub fn main() -> Result<()> {
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("info"),
  )
  .init();

  let opt = Opt::from_args();

  if opt.limit == 0 {
    bail!("--limit must be at least 1");
  }
  if opt.min == 0 {
    bail!("--min must be at least 1");
  }

  let token = read_token(&opt.env)?;
  let repos = read_repos(&opt.repos)?;
  let client = GithubClient::with_api_url(
    &opt.api_url,
    token,
    Duration::from_secs(opt.timeout_secs),
  )?;

  info!(
    "collecting {} repositories ({} branch, limit {})",
    repos.len(),
    opt.branch_strategy,
    opt.limit
  );

  let collector = Collector {
    limit: opt.limit,
    ref_strategy: opt.branch_strategy,
    delay: Duration::from_millis(opt.delay_ms),
    progress: !opt.no_progress,
  };
  let summary = collector.collect(&client, &repos)?;
  info!(
    "{} repositories counted, {} skipped",
    summary.succeeded, summary.failed
  );

  let report = Report::build(
    &summary.counters,
    &ReportOptions {
      min_usage: opt.min,
      url_template: opt.url_template,
    },
  );
  report.write(&opt.out)?;

  println!(
    "Stats written to {} ({} packages)",
    opt.out.display(),
    report.package_count()
  );

  Ok(())
}
