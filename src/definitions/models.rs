use std::{fmt, path::Path, str::FromStr};

use snafu::ResultExt;

use crate::common::{ConfigSnafu, Error, FileSnafu, Result};

/// Which value set a flip targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Primary,
    Secondary,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Site::Primary => "primary",
            Site::Secondary => "secondary",
        })
    }
}

impl FromStr for Site {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "primary" => Ok(Site::Primary),
            "secondary" => Ok(Site::Secondary),
            other => ConfigSnafu {
                message: format!("unknown site '{other}', expected primary or secondary"),
                prefix: "site",
            }
            .fail(),
        }
    }
}

/// One failover-managed record declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipRecord {
    pub fqdn: String,
    pub kind: String,
    pub primary: String,
    pub secondary: String,
}

impl FlipRecord {
    /// The raw comma separated value string declared for `site`.
    pub fn value_for(&self, site: Site) -> &str {
        match site {
            Site::Primary => &self.primary,
            Site::Secondary => &self.secondary,
        }
    }

    pub fn values_for(&self, site: Site) -> Vec<String> {
        split_values(self.value_for(site))
    }
}

/// Splits a comma separated value string into an ordered answer list.
pub fn split_values(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub name: String,
    pub records: Vec<FlipRecord>,
}

/// Applications keyed by name, in order of first declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigModel {
    apps: Vec<AppConfig>,
}

impl ConfigModel {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).context(FileSnafu { path })?;
        text.parse()
    }

    pub fn get(&self, name: &str) -> Option<&AppConfig> {
        self.apps.iter().find(|app| app.name == name)
    }

    pub fn apps(&self) -> impl Iterator<Item = &AppConfig> {
        self.apps.iter()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Returns the application named `name`, inserting an empty one at the
    /// end if it has not been declared yet.
    pub fn insert_or_append(&mut self, name: &str) -> &mut AppConfig {
        let idx = match self.apps.iter().position(|app| app.name == name) {
            Some(idx) => idx,
            None => {
                self.apps.push(AppConfig {
                    name: name.to_string(),
                    records: Vec::new(),
                });
                self.apps.len() - 1
            }
        };
        &mut self.apps[idx]
    }
}

impl FromStr for ConfigModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        super::parser::parse(s)
    }
}
