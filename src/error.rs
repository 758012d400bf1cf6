use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while turning a command line into an
/// [`Invocation`](crate::Invocation).
///
/// Variants that stem from bad user input carry the active subcommand's help
/// text in `usage` and print it after the message.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid option: {flag}\n{usage}")]
    UnknownFlag { flag: String, usage: String },

    #[error("invalid argument: {message}\n{usage}")]
    InvalidArgument { message: String, usage: String },

    #[error("missing argument --{option}\n{usage}")]
    MissingOption { option: &'static str, usage: String },

    #[error("missing {argument}\n{usage}")]
    MissingArgument {
        argument: &'static str,
        usage: String,
    },

    #[error("extra arguments:\n{}{usage}", bullet_list(.args))]
    ExtraArguments { args: Vec<String>, usage: String },

    #[error(
        "service properties cannot be combined with raw JSON input:\n{}{usage}",
        bullet_list(.properties)
    )]
    ConflictingInput {
        properties: Vec<String>,
        usage: String,
    },

    #[error("no hosts resolved from '{target}'")]
    NoHosts { target: String },

    #[error("malformed JSON from {origin}")]
    MalformedJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read JSON file {}", .path.display())]
    UnreadableJsonFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read JSON from standard input")]
    UnreadableStdin {
        #[source]
        source: io::Error,
    },
}

fn bullet_list(items: &[String]) -> String {
    items.iter().map(|item| format!("   {item}\n")).collect()
}
