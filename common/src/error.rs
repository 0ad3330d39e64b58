//! Error types shared by the packet sender and the management API client.

use std::io;
use std::net::IpAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification used when deciding how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Parse,
}

#[derive(Debug, Error)]
pub enum MgmtError {
    #[error("session file '{}' not found", .0.display())]
    SessionMissing(PathBuf),

    #[error("failed to access session file '{}': {source}", .path.display())]
    SessionIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to run '{}': {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },

    #[error("failed to parse JSON output from {operation}: {source}")]
    InvalidJson {
        operation: String,
        stdout: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no session id in login response")]
    MissingSid { stdout: String },
}

impl MgmtError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MgmtError::SessionMissing(_) => ErrorKind::Configuration,
            MgmtError::SessionIo { .. }
            | MgmtError::Spawn { .. }
            | MgmtError::CommandFailed { .. } => ErrorKind::Transport,
            MgmtError::InvalidJson { .. } | MgmtError::MissingSid { .. } => ErrorKind::Parse,
        }
    }

    /// Raw command output worth showing to the operator alongside the error.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            MgmtError::InvalidJson { stdout, .. } | MgmtError::MissingSid { stdout } => {
                Some(stdout.as_str())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    #[error("no TCP flags given")]
    Empty,

    #[error("invalid TCP flag '{0}' (expected any of F S R P A U E C)")]
    Unknown(char),
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid target address '{0}'")]
    InvalidAddress(String),

    #[error("invalid target port '{0}'")]
    InvalidPort(String),

    #[error(transparent)]
    Flags(#[from] FlagError),

    #[error("failed to build TCP segment: {0}")]
    Packet(String),

    #[error("failed to send packet to {dst}: {source}")]
    Transport {
        dst: IpAddr,
        #[source]
        source: io::Error,
    },
}

impl ProbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProbeError::InvalidAddress(_) | ProbeError::InvalidPort(_) | ProbeError::Flags(_) => {
                ErrorKind::Configuration
            }
            ProbeError::Packet(_) => ErrorKind::Parse,
            ProbeError::Transport { .. } => ErrorKind::Transport,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
