use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::CommandError;

/// Value of `--JSON` / `--JSONFile` that means "read standard input".
pub const STDIN_MARKER: &str = "-";

static PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([^=]+)=(.*)$").expect("property pattern is valid"));

pub type ServiceProperties = BTreeMap<String, String>;

// Static announcement built from the discrete service definition flags
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StaticAnnouncement {
    pub environment: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub pool: String,
    pub location: Option<String>,
    pub properties: Option<ServiceProperties>,
}

/// Payload of an `add` request.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ServiceDefinition {
    Announcement(StaticAnnouncement),
    /// Raw JSON passed through as given
    Raw(Value),
}

impl ServiceDefinition {
    /// JSON document sent to the discovery server.
    ///
    /// # Errors
    ///
    /// Returns an error if the announcement cannot be serialized.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        match self {
            Self::Announcement(announcement) => serde_json::to_value(announcement),
            Self::Raw(value) => Ok(value.clone()),
        }
    }
}

// Discrete flag values collected for a static announcement
#[derive(Debug, Clone, Default)]
pub struct ServiceFields {
    pub environment: Option<String>,
    pub service_type: Option<String>,
    pub pool: Option<String>,
    pub location: Option<String>,
    pub properties: ServiceProperties,
}

impl ServiceFields {
    /// Turn the collected flags into a [`StaticAnnouncement`].
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::MissingOption`] naming the first of
    /// `environment`, `type` or `pool` that was not supplied.
    pub fn into_announcement(self, usage: &str) -> Result<StaticAnnouncement, CommandError> {
        let require = |value: Option<String>, option: &'static str| {
            value.ok_or_else(|| CommandError::MissingOption {
                option,
                usage: usage.to_string(),
            })
        };

        Ok(StaticAnnouncement {
            environment: require(self.environment, "environment")?,
            service_type: require(self.service_type, "type")?,
            pool: require(self.pool, "pool")?,
            location: self.location,
            properties: (!self.properties.is_empty()).then_some(self.properties),
        })
    }
}

/// Split a `-D` value into key and value, `None` if it is not `key=value`.
#[must_use]
pub fn parse_property(raw: &str) -> Option<(String, String)> {
    PROPERTY
        .captures(raw)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// Merge every well formed `-D` value into one property map; later keys win.
#[must_use]
pub fn collect_properties(raw: &[String]) -> ServiceProperties {
    let mut properties = ServiceProperties::new();
    for value in raw {
        match parse_property(value) {
            Some((key, val)) => {
                properties.insert(key, val);
            }
            None => debug!(property = %value, "ignoring property not in key=value form"),
        }
    }
    properties
}

// Where a raw JSON service definition comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonSource {
    File(PathBuf),
    Stdin,
    Literal(String),
}

impl JsonSource {
    /// Pick the raw JSON source from the `--JSONFile` and `--JSON` values.
    /// `--JSONFile` wins when both are given.
    #[must_use]
    pub fn select(json: Option<&str>, json_file: Option<&str>) -> Option<Self> {
        match (json_file, json) {
            (Some(STDIN_MARKER), _) | (None, Some(STDIN_MARKER)) => Some(Self::Stdin),
            (Some(path), _) => Some(Self::File(expand_tilde(path))),
            (None, Some(literal)) => Some(Self::Literal(literal.to_string())),
            (None, None) => None,
        }
    }

    /// Read and parse the JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnreadableJsonFile`] or
    /// [`CommandError::UnreadableStdin`] if the input cannot be read, and
    /// [`CommandError::MalformedJson`] if it is not valid JSON.
    pub fn load<R: Read>(&self, mut stdin: R) -> Result<Value, CommandError> {
        let content = match self {
            Self::File(path) => {
                fs::read_to_string(path).map_err(|source| CommandError::UnreadableJsonFile {
                    path: path.clone(),
                    source,
                })?
            }
            Self::Stdin => {
                let mut buffer = String::new();
                stdin
                    .read_to_string(&mut buffer)
                    .map_err(|source| CommandError::UnreadableStdin { source })?;
                buffer
            }
            Self::Literal(literal) => literal.clone(),
        };

        serde_json::from_str(&content).map_err(|source| CommandError::MalformedJson {
            origin: self.describe(),
            source,
        })
    }

    fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "standard input".to_string(),
            Self::Literal(_) => "--JSON".to_string(),
        }
    }
}

// Expand a leading `~` to the home directory
fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => Some(""),
        Some(rest) => rest.strip_prefix('/'),
        None => None,
    };
    match (rest, dirs::home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
