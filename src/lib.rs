use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

pub mod command;
pub mod config;
pub mod error;
pub mod hosts;
pub mod options;
pub mod payload;

pub use command::parse_command;
pub use config::{AliasSource, Config};
pub use error::CommandError;
pub use hosts::{AliasTable, HostList};
pub use payload::{ServiceDefinition, ServiceProperties, StaticAnnouncement};

// How a successful operation should report its result
#[derive(Serialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    #[serde(rename = "JSON")]
    #[value(name = "JSON")]
    Json,
    #[serde(rename = "ID")]
    #[value(name = "ID")]
    Id,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Id => f.write_str("ID"),
        }
    }
}

// Command selected by the first argument
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommandKind {
    Add,
    Show,
    Delete,
    Help,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AddRequest {
    pub hosts: HostList,
    pub output: OutputFormat,
    pub definition: ServiceDefinition,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ShowRequest {
    pub hosts: HostList,
    pub output: OutputFormat,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub hosts: HostList,
    pub id: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HelpRequest {
    /// Subcommand whose help was asked for, `Help` when none was recognized
    #[serde(rename = "topic")]
    pub command: CommandKind,
    pub text: String,
}

/// A fully parsed command line.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "command", rename_all = "UPPERCASE")]
pub enum Invocation {
    Add(AddRequest),
    Show(ShowRequest),
    Delete(DeleteRequest),
    Help(HelpRequest),
}

impl Invocation {
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Add(_) => CommandKind::Add,
            Self::Show(_) => CommandKind::Show,
            Self::Delete(_) => CommandKind::Delete,
            Self::Help(help) => help.command,
        }
    }

    #[must_use]
    pub fn is_help(&self) -> bool {
        matches!(self, Self::Help(_))
    }

    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        match self {
            Self::Help(help) => Some(&help.text),
            _ => None,
        }
    }

    #[must_use]
    pub fn hosts(&self) -> Option<&HostList> {
        match self {
            Self::Add(request) => Some(&request.hosts),
            Self::Show(request) => Some(&request.hosts),
            Self::Delete(request) => Some(&request.hosts),
            Self::Help(_) => None,
        }
    }

    // Delete and help have no output flag and report the default
    #[must_use]
    pub fn output(&self) -> OutputFormat {
        match self {
            Self::Add(request) => request.output,
            Self::Show(request) => request.output,
            Self::Delete(_) | Self::Help(_) => OutputFormat::default(),
        }
    }
}
