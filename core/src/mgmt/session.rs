use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use secwrap_common::error::MgmtError;
use serde::{Deserialize, Serialize};

/// On-disk form of the session file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionToken {
    pub sid: String,
}

/// The local file that `mgmt_cli -s` reads the session id from.
///
/// Its existence is what marks the client as logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Fails with [`MgmtError::SessionMissing`] unless the file is present.
    pub fn require(&self) -> Result<(), MgmtError> {
        if self.exists() {
            Ok(())
        } else {
            Err(MgmtError::SessionMissing(self.path.clone()))
        }
    }

    pub fn write(&self, sid: &str) -> Result<(), MgmtError> {
        let token = SessionToken { sid: sid.to_string() };
        let json = serde_json::to_string(&token).map_err(|e| self.io_error(e.into()))?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }

    pub fn read(&self) -> Result<SessionToken, MgmtError> {
        self.require()?;
        let contents = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        serde_json::from_str(&contents).map_err(|source| MgmtError::InvalidJson {
            operation: format!("session file '{}'", self.path.display()),
            stdout: contents,
            source,
        })
    }

    /// Deletes the file. A file that is already gone is not an error.
    pub fn remove(&self) -> Result<(), MgmtError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: io::Error) -> MgmtError {
        MgmtError::SessionIo {
            path: self.path.clone(),
            source,
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
