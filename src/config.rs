use std::env;
use std::path::PathBuf;

use crate::hosts::AliasTable;

/// Environment variable that overrides the alias file location.
pub const ALIAS_FILE_ENV: &str = "DISCOVERY_RC";

/// Alias file name, relative to the user's home directory.
pub const DEFAULT_ALIAS_FILE: &str = ".discoveryrc";

// Where host aliases come from
#[derive(Debug, Clone, Default)]
pub enum AliasSource {
    /// Read `alias = host,host` lines from this file when it is needed
    File(PathBuf),
    /// Use an already loaded table
    Table(AliasTable),
    /// No aliases at all
    #[default]
    None,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub aliases: AliasSource,
}

impl Config {
    /// Build the configuration a normal run uses: `$DISCOVERY_RC` if set,
    /// otherwise `~/.discoveryrc`.
    #[must_use]
    pub fn from_env() -> Self {
        let aliases = match env::var_os(ALIAS_FILE_ENV) {
            Some(path) if !path.is_empty() => AliasSource::File(PathBuf::from(path)),
            _ => dirs::home_dir()
                .map(|home| AliasSource::File(home.join(DEFAULT_ALIAS_FILE)))
                .unwrap_or_default(),
        };
        Self { aliases }
    }

    #[must_use]
    pub fn with_alias_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            aliases: AliasSource::File(path.into()),
        }
    }

    #[must_use]
    pub fn with_alias_table(table: AliasTable) -> Self {
        Self {
            aliases: AliasSource::Table(table),
        }
    }

    // Load the alias table; a missing or unreadable file yields an empty table
    #[must_use]
    pub fn alias_table(&self) -> AliasTable {
        match &self.aliases {
            AliasSource::File(path) => AliasTable::from_file(path),
            AliasSource::Table(table) => table.clone(),
            AliasSource::None => AliasTable::default(),
        }
    }
}
