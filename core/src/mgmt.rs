//! Client for the firewall management API, driven through the `mgmt_cli` tool.
//!
//! The client goes through three states: logged out, logged in (the session
//! file exists), and logged out again once [`MgmtClient::logout`] has removed
//! the file. Any call made while logged out fails before a process is spawned.

use std::path::PathBuf;

use secwrap_common::config::MgmtConfig;
use secwrap_common::error::MgmtError;
use serde_json::Value;
use tracing::{debug, warn};

pub mod runner;
pub mod session;

use runner::{CommandOutput, CommandRunner};
use session::SessionFile;

const LOGIN_OPERATION: &str = "login";
const LOGOUT_OPERATION: &str = "logout";

pub struct MgmtClient<R: CommandRunner> {
    runner: R,
    program: PathBuf,
    session: SessionFile,
}

impl<R: CommandRunner> MgmtClient<R> {
    pub fn new(cfg: &MgmtConfig, runner: R) -> Self {
        Self {
            runner,
            program: cfg.program.clone(),
            session: SessionFile::new(cfg.session_file.clone()),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn session(&self) -> &SessionFile {
        &self.session
    }

    /// Logs in as the local root administrator and stores the session id.
    ///
    /// Runs `mgmt_cli login -r true --format json`.
    pub async fn login(&self) -> Result<(), MgmtError> {
        let args: Vec<String> = ["login", "-r", "true", "--format", "json"]
            .map(String::from)
            .to_vec();
        let output = self.exec(LOGIN_OPERATION, &args).await?;

        let response: Value = parse_json(LOGIN_OPERATION, output.stdout.clone())?;
        let sid = response
            .get("sid")
            .and_then(Value::as_str)
            .filter(|sid| !sid.is_empty())
            .ok_or(MgmtError::MissingSid {
                stdout: output.stdout,
            })?;

        self.session.write(sid)?;
        debug!("session stored in {}", self.session.path().display());
        Ok(())
    }

    /// Runs an API command inside the current session and parses its JSON output.
    ///
    /// Appends `-s <session-file> --format json` to `args`. Nothing runs when
    /// the session file is missing.
    pub async fn run_mgmt_cli(&self, args: &[&str]) -> Result<Value, MgmtError> {
        self.session.require()?;

        let mut full_args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        full_args.push("-s".into());
        full_args.push(self.session.path().display().to_string());
        full_args.push("--format".into());
        full_args.push("json".into());

        let operation = args.first().copied().unwrap_or("mgmt_cli");
        let output = self.exec(operation, &full_args).await?;
        parse_json(operation, output.stdout)
    }

    /// Ends the session if one exists and always removes the session file.
    ///
    /// The remote logout is best effort; its failure is only logged.
    pub async fn logout(&self) -> Result<(), MgmtError> {
        if !self.session.exists() {
            return Ok(());
        }

        let args: Vec<String> = vec![
            LOGOUT_OPERATION.into(),
            "-s".into(),
            self.session.path().display().to_string(),
        ];
        match self.runner.run(&self.program, &args).await {
            Ok(output) if output.success => debug!("logged out"),
            Ok(output) => warn!("logout failed: {}", output.stderr.trim()),
            Err(e) => warn!("logout failed: {e}"),
        }

        self.session.remove()
    }

    async fn exec(&self, operation: &str, args: &[String]) -> Result<CommandOutput, MgmtError> {
        debug!("running {} {}", self.program.display(), args.join(" "));
        let output = self
            .runner
            .run(&self.program, args)
            .await
            .map_err(|source| MgmtError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.success {
            return Err(MgmtError::CommandFailed {
                operation: operation.to_string(),
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }
}

fn parse_json(operation: &str, stdout: String) -> Result<Value, MgmtError> {
    match serde_json::from_str(&stdout) {
        Ok(value) => Ok(value),
        Err(source) => Err(MgmtError::InvalidJson {
            operation: operation.to_string(),
            stdout,
            source,
        }),
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
