use crate::Error;
use std::{convert::TryFrom, fmt, str::FromStr};

#[derive(Hash, Ord, PartialOrd, PartialEq, Eq, Debug, Clone)]
pub struct RepositoryRef {
  pub owner: String,
  pub name: String,
}

impl RepositoryRef {
  pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      owner: owner.into(),
      name: name.into(),
    }
  }
}

impl TryFrom<&str> for RepositoryRef {
  type Error = Error;

  fn try_from(name_with_owner: &str) -> Result<Self, Self::Error> {
    let trimmed = name_with_owner.trim();
    let get_err = || Error::InvalidRepoFormat(name_with_owner.to_owned());
    let mut items = trimmed.split('/');
    let owner = items.next().ok_or_else(get_err)?;
    let name = items.next().ok_or_else(get_err)?;
    if items.next().is_some() || owner.is_empty() || name.is_empty() {
      return Err(get_err());
    }
    Ok(Self::new(owner, name))
  }
}

impl FromStr for RepositoryRef {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::try_from(s)
  }
}

impl fmt::Display for RepositoryRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}
