//! Dependency declarations of a `pubspec.yaml`.
use crate::{error::DecodeError, Section, Sections};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Deserialize, Default)]
struct RawManifest {
  #[serde(default, deserialize_with = "package_names")]
  dependencies: BTreeSet<String>,
  #[serde(default, deserialize_with = "package_names")]
  dev_dependencies: BTreeSet<String>,
  #[serde(default, deserialize_with = "package_names")]
  dependency_overrides: BTreeSet<String>,
}

/// Keeps the keys of a section mapping. Values (version constraints, git or
/// path specs) are not inspected; `null` reads as an empty section.
fn package_names<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let section: Option<BTreeMap<String, serde_yaml::Value>> =
    Option::deserialize(deserializer)?;
  Ok(section.map(|m| m.into_keys().collect()).unwrap_or_default())
}

#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Manifest {
  packages: Sections<BTreeSet<String>>,
}

impl Manifest {
  pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
    // an empty document deserializes to unit, not to a mapping
    let raw: Option<RawManifest> = serde_yaml::from_slice(bytes)?;
    let raw = raw.unwrap_or_default();
    Ok(Self {
      packages: Sections {
        dependencies: raw.dependencies,
        dev_dependencies: raw.dev_dependencies,
        dependency_overrides: raw.dependency_overrides,
      },
    })
  }

  pub fn section(&self, section: Section) -> &BTreeSet<String> {
    &self.packages[section]
  }

  pub fn sections(&self) -> &Sections<BTreeSet<String>> {
    &self.packages
  }

  pub fn package_count(&self) -> usize {
    self.packages.as_ref().into_iter().map(BTreeSet::len).sum()
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn names(manifest: &Manifest, section: Section) -> Vec<&str> {
    manifest.section(section).iter().map(String::as_str).collect()
  }

  #[test]
  fn all_sections() {
    let manifest = Manifest::from_slice(
      br#"
name: example_app
version: 1.0.0+1
environment:
  sdk: ">=3.0.0 <4.0.0"
dependencies:
  flutter:
    sdk: flutter
  http: ^1.1.0
  provider: any
  my_fork:
    git:
      url: https://github.com/someone/my_fork.git
      ref: main
dev_dependencies:
  flutter_test:
    sdk: flutter
  lints: ^2.0.0
dependency_overrides:
  http:
    path: ../http
flutter:
  uses-material-design: true
"#,
    )
    .unwrap();

    assert_eq!(
      names(&manifest, Section::Dependencies),
      vec!["flutter", "http", "my_fork", "provider"]
    );
    assert_eq!(
      names(&manifest, Section::DevDependencies),
      vec!["flutter_test", "lints"]
    );
    assert_eq!(names(&manifest, Section::DependencyOverrides), vec!["http"]);
    assert_eq!(manifest.package_count(), 7);
  }

  #[test]
  fn absent_and_null_sections() {
    let manifest =
      Manifest::from_slice(b"name: x\ndependencies:\ndev_dependencies: ~\n")
        .unwrap();
    assert_eq!(manifest, Manifest::default());
    assert_eq!(manifest.package_count(), 0);
  }

  #[test]
  fn empty_document() {
    assert_eq!(Manifest::from_slice(b"").unwrap(), Manifest::default());
    assert_eq!(
      Manifest::from_slice(b"# just a comment\n").unwrap(),
      Manifest::default()
    );
  }

  #[test]
  fn null_values_are_declarations() {
    let manifest =
      Manifest::from_slice(b"dependencies:\n  path:\n  meta: null\n").unwrap();
    assert_eq!(names(&manifest, Section::Dependencies), vec!["meta", "path"]);
  }

  #[test]
  fn invalid_yaml() {
    assert!(matches!(
      Manifest::from_slice(b"dependencies: [unclosed"),
      Err(DecodeError::Yaml(_))
    ));
    assert!(matches!(
      Manifest::from_slice(b"dependencies:\n  - http\n  - provider\n"),
      Err(DecodeError::Yaml(_))
    ));
  }
}
