use crate::{
  aggregate::UsageCounters,
  error::{Error, Result},
  Section, Sections,
};
use serde::Serialize;
use std::{
  collections::{BTreeMap, BTreeSet},
  fs,
  path::Path,
};

pub const DEFAULT_MIN_USAGE: usize = 1;
pub const PACKAGE_PLACEHOLDER: &str = "{package}";
pub const DEFAULT_URL_TEMPLATE: &str = "https://pub.dev/packages/{package}";

#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
pub struct PackageEntry {
  pub count: usize,
  pub url: String,
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
  pub min_usage: usize,
  /// `{package}` is replaced by the package name.
  pub url_template: String,
}

impl Default for ReportOptions {
  fn default() -> Self {
    Self {
      min_usage: DEFAULT_MIN_USAGE,
      url_template: DEFAULT_URL_TEMPLATE.to_owned(),
    }
  }
}

impl ReportOptions {
  pub fn reference_url(&self, package: &str) -> String {
    self.url_template.replace(PACKAGE_PLACEHOLDER, package)
  }
}

#[derive(Serialize, PartialEq, Eq, Debug, Clone, Default)]
#[serde(transparent)]
pub struct Report {
  sections: Sections<BTreeMap<String, PackageEntry>>,
}

impl Report {
  pub fn build(counters: &UsageCounters, options: &ReportOptions) -> Self {
    let mut report = Self::default();
    for &section in &Section::ALL {
      report.sections[section] = counters
        .section(section)
        .iter()
        .filter(|(_, &count)| count >= options.min_usage)
        .map(|(package, &count)| {
          let entry = PackageEntry {
            count,
            url: options.reference_url(package),
          };
          (package.clone(), entry)
        })
        .collect();
    }
    report
  }

  pub fn section(&self, section: Section) -> &BTreeMap<String, PackageEntry> {
    &self.sections[section]
  }

  pub fn package_count(&self) -> usize {
    self
      .sections
      .as_ref()
      .into_iter()
      .flat_map(BTreeMap::keys)
      .collect::<BTreeSet<_>>()
      .len()
  }

  pub fn to_json(&self) -> Result<String> {
    let mut out = serde_json::to_string_pretty(self)?;
    out.push('\n');
    Ok(out)
  }

  pub fn write(&self, path: &Path) -> Result<()> {
    fs::write(path, self.to_json()?).map_err(|source| Error::OutputWrite {
      path: path.to_owned(),
      source,
    })
  }
}
