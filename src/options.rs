//! Flag tables for each subcommand.
//!
//! The dispatcher and host resolver take their tokens off the front of the
//! argument list first; whatever is left is handed to clap through one of
//! the structs below.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser};
use std::collections::VecDeque;
use std::iter;

use crate::error::CommandError;
use crate::OutputFormat;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "show",
    args_override_self = true,
    about = "Show the services registered on a discovery server",
    override_usage = "discovery show [alias|URL] [OPTIONS]"
)]
pub struct ShowArgs {
    /// Output option: format JSON or ID
    #[arg(short = 'o', long = "output", value_name = "FMT", ignore_case = true)]
    pub output: Option<OutputFormat>,

    #[arg(hide = true)]
    pub extra: Vec<String>,
}

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "add",
    args_override_self = true,
    about = "Announce a static service to a discovery server",
    override_usage = "discovery add [alias|URL] [OPTIONS] SERVICE_DEFINITION"
)]
pub struct AddArgs {
    /// Output option: format JSON or ID
    #[arg(short = 'o', long = "output", value_name = "FMT", ignore_case = true)]
    pub output: Option<OutputFormat>,

    /// Service definition: environment
    #[arg(short = 'e', long)]
    pub environment: Option<String>,

    /// Service definition: type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub service_type: Option<String>,

    /// Service definition: pool
    #[arg(short = 'p', long)]
    pub pool: Option<String>,

    /// Service definition: location
    #[arg(short = 'l', long)]
    pub location: Option<String>,

    /// Sets a service property
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Service definition: entire raw JSON data, or '-' for stdin
    #[arg(
        short = 'j',
        long = "JSON",
        value_name = "JSON",
        allow_hyphen_values = true
    )]
    pub json: Option<String>,

    /// Service definition: file holding the raw JSON data, or '-' for stdin
    #[arg(
        short = 'f',
        long = "JSONFile",
        value_name = "JSONFILE",
        allow_hyphen_values = true
    )]
    pub json_file: Option<String>,

    #[arg(hide = true)]
    pub extra: Vec<String>,
}

impl AddArgs {
    // True if any of the discrete service definition flags was given
    #[must_use]
    pub fn has_discrete_fields(&self) -> bool {
        self.environment.is_some()
            || self.service_type.is_some()
            || self.pool.is_some()
            || self.location.is_some()
    }
}

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "delete",
    args_override_self = true,
    about = "Remove a static service from a discovery server",
    override_usage = "discovery delete [alias|URL] IDENTIFIER"
)]
pub struct DeleteArgs {
    #[arg(hide = true)]
    pub extra: Vec<String>,
}

/// Result of running one flag table over the remaining arguments.
#[derive(Debug)]
pub enum Flags<T> {
    Parsed(T),
    Help(String),
}

/// Full help text for a flag table, used both for `-h` and after errors.
#[must_use]
pub fn usage<T: CommandFactory>() -> String {
    T::command().render_help().to_string()
}

/// Help text for all three subcommands, shown when no known command is given.
#[must_use]
pub fn combined_usage() -> String {
    format!(
        "{}\n{}\n{}",
        usage::<AddArgs>(),
        usage::<ShowArgs>(),
        usage::<DeleteArgs>()
    )
}

#[must_use]
pub fn is_help_flag(arg: &str) -> bool {
    arg == "-h" || arg == "--help"
}

/// Parse the remaining arguments against the flag table `T`.
///
/// # Errors
///
/// Returns [`CommandError::UnknownFlag`] for options `T` does not define and
/// [`CommandError::InvalidArgument`] for flag values clap rejects.
pub fn parse_flags<T: Parser>(args: VecDeque<String>) -> Result<Flags<T>, CommandError> {
    let name = T::command().get_name().to_string();
    match T::try_parse_from(iter::once(name).chain(args)) {
        Ok(parsed) => Ok(Flags::Parsed(parsed)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Ok(Flags::Help(usage::<T>()))
            }
            ErrorKind::UnknownArgument => Err(CommandError::UnknownFlag {
                flag: context(&err, ContextKind::InvalidArg).unwrap_or_default(),
                usage: usage::<T>(),
            }),
            _ => Err(CommandError::InvalidArgument {
                message: describe(&err),
                usage: usage::<T>(),
            }),
        },
    }
}

fn context(err: &clap::Error, kind: ContextKind) -> Option<String> {
    match err.get(kind)? {
        ContextValue::String(value) => Some(value.clone()),
        ContextValue::Strings(values) => Some(values.join(", ")),
        other => Some(other.to_string()),
    }
}

fn describe(err: &clap::Error) -> String {
    let arg = context(err, ContextKind::InvalidArg);
    let value = context(err, ContextKind::InvalidValue).filter(|value| !value.is_empty());
    match (arg, value) {
        (Some(arg), Some(value)) => match context(err, ContextKind::ValidValue) {
            Some(valid) => format!("'{value}' is not valid for {arg} (expected one of: {valid})"),
            None => format!("'{value}' is not valid for {arg}"),
        },
        (Some(arg), None) if err.kind() == ErrorKind::InvalidValue => {
            format!("missing value for {arg}")
        }
        (Some(arg), None) => format!("{}: {arg}", err.kind()),
        _ => err.kind().to_string(),
    }
}
