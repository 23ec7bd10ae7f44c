//! Argument messages as they travel across the plugin boundary.
//!
//! Every message derives `Default` so that a partially populated message
//! (a field the sender did not know about) still decodes; absent fields take
//! their zero value, matching how the boundary treats unset message fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Where the component being operated on comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgsSource {
    pub app: String,
    pub path: String,
}

/// Metadata about the job that triggered the call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgsJobInfo {
    pub local: bool,
    pub workspace: String,
    pub id: String,
}

/// Configuration a deployment needs to reach back to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgsDeploymentConfig {
    pub id: String,
    pub server_addr: String,
    pub server_tls: bool,
    pub server_tls_skip_verify: bool,
    pub entrypoint_invite_token: String,
}

/// Project-scoped working directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgsDataDirProject {
    pub cache_dir: String,
    pub data_dir: String,
}

/// App-scoped working directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgsDataDirApp {
    pub cache_dir: String,
    pub data_dir: String,
}

/// Component-scoped working directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgsDataDirComponent {
    pub cache_dir: String,
    pub data_dir: String,
}

/// A logger, identified only by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgsLogger {
    pub name: String,
}

/// A set of labels attached to the operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgsLabelSet {
    pub labels: BTreeMap<String, String>,
}

/// A terminal UI served on a side-channel stream.
///
/// `stream_id` names a multiplexed stream on the connection that carried
/// this message. Whoever receives the message dials the id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgsTerminalUi {
    pub stream_id: u32,
}
