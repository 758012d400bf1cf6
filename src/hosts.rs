use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::CommandError;

/// Alias used when no host argument is given.
pub const LOCALHOST_ALIAS: &str = "localhost";

/// Host substituted for `localhost` unless the alias file overrides it.
pub const DEFAULT_HOST: &str = "http://localhost:8080";

static ALIAS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\w+)\s*=\s*(.*)$").expect("alias line pattern is valid")
});

// Alias name -> comma separated host string, as written in the alias file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// Load aliases from `path`.
    ///
    /// The alias file is optional, so a file that cannot be read produces an
    /// empty table instead of an error.
    #[must_use]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        let path_ref = path.as_ref();
        match fs::read_to_string(path_ref) {
            Ok(content) => {
                let table = Self::parse(&content);
                debug!(path = %path_ref.display(), aliases = table.len(), "loaded alias file");
                table
            }
            Err(e) => {
                debug!(path = %path_ref.display(), error = %e, "alias file not readable, using no aliases");
                Self::default()
            }
        }
    }

    /// Parse `alias = host,host` lines; lines that do not look like that are skipped.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut table = Self::default();
        for line in content.lines() {
            if let Some(caps) = ALIAS_LINE.captures(line) {
                table.insert(&caps[1], caps[2].trim_end());
            }
        }
        table
    }

    pub fn insert(&mut self, alias: &str, hosts: &str) {
        self.entries.insert(alias.to_string(), hosts.to_string());
    }

    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Ordered, non-empty list of discovery server URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HostList(Vec<String>);

impl HostList {
    /// Split a comma separated host string, trimming each entry.
    ///
    /// Returns `None` when no non-blank entry remains.
    #[must_use]
    pub fn parse(hosts: &str) -> Option<Self> {
        let list: Vec<String> = hosts
            .split(',')
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .map(String::from)
            .collect();

        if list.is_empty() {
            None
        } else {
            Some(Self(list))
        }
    }
}

impl PartialEq<[&str]> for HostList {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.iter().map(String::as_str).eq(other.iter().copied())
    }
}

impl<const N: usize> PartialEq<[&str; N]> for HostList {
    fn eq(&self, other: &[&str; N]) -> bool {
        *self == other[..]
    }
}

/// Take the host argument off the front of `args` and resolve it.
///
/// A missing argument, or one that looks like a flag, is left in place and
/// `localhost` is used instead.
///
/// # Errors
///
/// Returns [`CommandError::NoHosts`] if the resolved host string holds no hosts.
pub fn resolve_hosts(
    args: &mut VecDeque<String>,
    aliases: &AliasTable,
) -> Result<HostList, CommandError> {
    let takes_target = args.front().is_some_and(|next| !next.starts_with('-'));
    let target = takes_target
        .then(|| args.pop_front())
        .flatten()
        .unwrap_or_else(|| LOCALHOST_ALIAS.to_string());
    resolve_target(&target, aliases)
}

/// Resolve one alias, `localhost`, or literal host string into a [`HostList`].
///
/// # Errors
///
/// Returns [`CommandError::NoHosts`] if the resolved host string holds no hosts.
pub fn resolve_target(target: &str, aliases: &AliasTable) -> Result<HostList, CommandError> {
    let host_string = if let Some(hosts) = aliases.get(target) {
        debug!(alias = target, hosts, "resolved alias");
        hosts
    } else if target == LOCALHOST_ALIAS {
        DEFAULT_HOST
    } else {
        target
    };

    HostList::parse(host_string).ok_or_else(|| CommandError::NoHosts {
        target: target.to_string(),
    })
}
