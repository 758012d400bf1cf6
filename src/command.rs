use std::collections::VecDeque;
use std::io::Read;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::CommandError;
use crate::hosts::resolve_hosts;
use crate::options::{
    combined_usage, is_help_flag, parse_flags, usage, AddArgs, DeleteArgs, Flags, ShowArgs,
};
use crate::payload::{collect_properties, JsonSource, ServiceDefinition, ServiceFields};
use crate::{AddRequest, CommandKind, DeleteRequest, HelpRequest, Invocation, ShowRequest};

// Stand-in selector when no command was given; matches nothing
const NO_COMMAND: &str = "?";

/// Parse a full command line (without the program name).
///
/// The first argument selects `add`, `show` or `delete`, case-insensitively.
/// Anything else, including nothing at all, produces a help request covering
/// every subcommand. `stdin` is only read when the command asks for JSON from
/// standard input.
///
/// # Errors
///
/// Returns a [`CommandError`] describing the first problem found with the
/// arguments or with the JSON input they point to.
pub fn parse_command<I, S, R>(
    args: I,
    config: &Config,
    stdin: R,
) -> Result<Invocation, CommandError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    R: Read,
{
    let mut args: VecDeque<String> = args.into_iter().map(Into::into).collect();
    let selector = args
        .pop_front()
        .unwrap_or_else(|| NO_COMMAND.to_string())
        .to_uppercase();
    debug!(command = %selector, "dispatching command");

    match selector.as_str() {
        "ADD" => parse_add(args, config, stdin),
        "SHOW" => parse_show(args, config),
        "DELETE" => parse_delete(args, config),
        _ => Ok(help(CommandKind::Help, combined_usage())),
    }
}

fn help(command: CommandKind, text: String) -> Invocation {
    Invocation::Help(HelpRequest { command, text })
}

fn reject_extra<T: clap::CommandFactory>(extra: &[String]) -> Result<(), CommandError> {
    if extra.is_empty() {
        Ok(())
    } else {
        Err(CommandError::ExtraArguments {
            args: extra.to_vec(),
            usage: usage::<T>(),
        })
    }
}

fn parse_show(mut args: VecDeque<String>, config: &Config) -> Result<Invocation, CommandError> {
    let hosts = resolve_hosts(&mut args, &config.alias_table())?;

    let flags = match parse_flags::<ShowArgs>(args)? {
        Flags::Parsed(flags) => flags,
        Flags::Help(text) => return Ok(help(CommandKind::Show, text)),
    };
    reject_extra::<ShowArgs>(&flags.extra)?;

    Ok(Invocation::Show(ShowRequest {
        hosts,
        output: flags.output.unwrap_or_default(),
    }))
}

fn parse_delete(mut args: VecDeque<String>, config: &Config) -> Result<Invocation, CommandError> {
    if args.back().is_some_and(|last| is_help_flag(last)) {
        return Ok(help(CommandKind::Delete, usage::<DeleteArgs>()));
    }

    // The identifier is always the last argument; the host comes before it
    let id = args.pop_back().ok_or_else(|| CommandError::MissingArgument {
        argument: "service identifier",
        usage: usage::<DeleteArgs>(),
    })?;
    let hosts = resolve_hosts(&mut args, &config.alias_table())?;

    let flags = match parse_flags::<DeleteArgs>(args)? {
        Flags::Parsed(flags) => flags,
        Flags::Help(text) => return Ok(help(CommandKind::Delete, text)),
    };
    reject_extra::<DeleteArgs>(&flags.extra)?;

    Ok(Invocation::Delete(DeleteRequest { hosts, id }))
}

fn parse_add<R: Read>(
    mut args: VecDeque<String>,
    config: &Config,
    stdin: R,
) -> Result<Invocation, CommandError> {
    let hosts = resolve_hosts(&mut args, &config.alias_table())?;

    let flags = match parse_flags::<AddArgs>(args)? {
        Flags::Parsed(flags) => flags,
        Flags::Help(text) => return Ok(help(CommandKind::Add, text)),
    };
    reject_extra::<AddArgs>(&flags.extra)?;

    let source = JsonSource::select(flags.json.as_deref(), flags.json_file.as_deref());
    if source.is_some() && !flags.properties.is_empty() {
        return Err(CommandError::ConflictingInput {
            properties: flags.properties.iter().map(|p| format!("-D{p}")).collect(),
            usage: usage::<AddArgs>(),
        });
    }

    let output = flags.output.unwrap_or_default();

    let definition = if let Some(source) = source {
        if flags.has_discrete_fields() {
            warn!("raw JSON service definition given, ignoring environment/type/pool/location flags");
        }
        debug!(?source, "loading raw JSON service definition");
        ServiceDefinition::Raw(source.load(stdin)?)
    } else {
        let fields = ServiceFields {
            properties: collect_properties(&flags.properties),
            environment: flags.environment,
            service_type: flags.service_type,
            pool: flags.pool,
            location: flags.location,
        };
        ServiceDefinition::Announcement(fields.into_announcement(&usage::<AddArgs>())?)
    };

    Ok(Invocation::Add(AddRequest {
        hosts,
        output,
        definition,
    }))
}
