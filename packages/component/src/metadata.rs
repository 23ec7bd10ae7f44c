//! Plain metadata passed to every component operation.

use serde::{Deserialize, Serialize};

/// The source of the component: which app, and where it lives on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    /// Name of the application.
    pub app: String,
    /// Path to the application's root.
    pub path: String,
}

/// Information about the job executing the operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobInfo {
    /// True if the job runs on the same machine as the user's CLI.
    pub local: bool,
    pub workspace: String,
    pub id: String,
}

/// Settings a deployed artifact uses to connect back to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentConfig {
    pub id: String,
    pub server_addr: String,
    pub server_tls: bool,
    pub server_tls_skip_verify: bool,
    pub entrypoint_invite_token: String,
}

impl DeploymentConfig {
    /// Whether the deployment has a server to talk to at all.
    pub fn has_server(&self) -> bool {
        !self.server_addr.is_empty()
    }
}
