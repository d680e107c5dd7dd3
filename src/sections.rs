use serde::Serialize;
use std::{array, ops};

#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Copy, Clone)]
pub enum Section {
  Dependencies,
  DevDependencies,
  DependencyOverrides,
}

impl Section {
  pub const ALL: [Section; 3] = [
    Self::Dependencies,
    Self::DevDependencies,
    Self::DependencyOverrides,
  ];
}

/// One value per manifest section. Field names double as the section keys in
/// `pubspec.yaml` and in the report.
#[derive(Eq, PartialEq, Debug, Clone, Default, Hash, Serialize)]
pub struct Sections<T> {
  pub dependencies: T,
  pub dev_dependencies: T,
  pub dependency_overrides: T,
}

impl<T> Sections<T> {
  pub fn as_ref(&self) -> Sections<&T> {
    Sections {
      dependencies: &self.dependencies,
      dev_dependencies: &self.dev_dependencies,
      dependency_overrides: &self.dependency_overrides,
    }
  }

  pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Sections<U> {
    Sections {
      dependencies: f(self.dependencies),
      dev_dependencies: f(self.dev_dependencies),
      dependency_overrides: f(self.dependency_overrides),
    }
  }

  pub fn iter_with(&self) -> impl Iterator<Item = (Section, &T)> {
    IntoIterator::into_iter(Section::ALL)
      .map(move |section| (section, &self[section]))
  }
}

impl<T> IntoIterator for Sections<T> {
  type Item = T;
  type IntoIter = array::IntoIter<T, 3>;

  fn into_iter(self) -> Self::IntoIter {
    IntoIterator::into_iter([
      self.dependencies,
      self.dev_dependencies,
      self.dependency_overrides,
    ])
  }
}

impl<T> ops::Index<Section> for Sections<T> {
  type Output = T;

  fn index(&self, section: Section) -> &Self::Output {
    match section {
      Section::Dependencies => &self.dependencies,
      Section::DevDependencies => &self.dev_dependencies,
      Section::DependencyOverrides => &self.dependency_overrides,
    }
  }
}

impl<T> ops::IndexMut<Section> for Sections<T> {
  fn index_mut(&mut self, section: Section) -> &mut Self::Output {
    match section {
      Section::Dependencies => &mut self.dependencies,
      Section::DevDependencies => &mut self.dev_dependencies,
      Section::DependencyOverrides => &mut self.dependency_overrides,
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn index_matches_fields() {
    let mut sections = Sections {
      dependencies: 1,
      dev_dependencies: 2,
      dependency_overrides: 3,
    };
    assert_eq!(sections[Section::DevDependencies], 2);
    sections[Section::DependencyOverrides] += 10;
    assert_eq!(sections.dependency_overrides, 13);

    let values: Vec<_> = sections.iter_with().collect();
    assert_eq!(
      values,
      vec![
        (Section::Dependencies, &1),
        (Section::DevDependencies, &2),
        (Section::DependencyOverrides, &13)
      ]
    );
    assert_eq!(sections.map(|v| v * 2).into_iter().sum::<i32>(), 32);
  }
}
