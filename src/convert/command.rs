//! Backend converter that runs an external bridge program.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::model::RawDocument;

use super::{DocumentConverter, PipelineOptions};

/// Program launched when no backend is configured.
pub const DEFAULT_BACKEND: &str = "docling-bridge";

/// How to launch the backend program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Program name or path
    pub program: OsString,

    /// Arguments placed before the generated ones
    pub args: Vec<OsString>,
}

impl BackendConfig {
    /// Create a config for a program.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a leading argument.
    pub fn with_arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several leading arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program name for messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }

    /// Check that the backend program can be launched.
    ///
    /// Runs it with `--version` and discards the output. Only a launch
    /// failure is an error; the exit status is ignored.
    pub fn probe(&self) -> Result<()> {
        let status = self
            .command()
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(_) => Ok(()),
            Err(e) => Err(self.launch_error(e)),
        }
    }

    fn launch_error(&self, err: io::Error) -> Error {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                Error::BackendUnavailable {
                    program: self.program_name(),
                    reason: err.to_string(),
                }
            }
            _ => Error::Io(err),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND)
    }
}

/// Converter that hands documents to an external bridge program.
///
/// The program is invoked as `<program> [args...] --options <json> <input>`
/// and must print one JSON document on standard output.
#[derive(Debug, Clone)]
pub struct CommandConverter {
    backend: BackendConfig,
    pipeline: PipelineOptions,
}

impl CommandConverter {
    /// Create a converter for a backend and pipeline configuration.
    pub fn new(backend: BackendConfig, pipeline: PipelineOptions) -> Self {
        Self { backend, pipeline }
    }

    fn build_command(&self, path: &Path) -> Result<Command> {
        let options = serde_json::to_string(&self.pipeline)
            .map_err(|e| Error::Other(format!("Could not encode pipeline options: {}", e)))?;

        let mut command = self.backend.command();
        command.arg("--options").arg(options).arg(path);
        Ok(command)
    }
}

impl DocumentConverter for CommandConverter {
    fn name(&self) -> &str {
        "command"
    }

    fn convert(&self, path: &Path) -> Result<RawDocument> {
        let mut command = self.build_command(path)?;
        log::debug!("Running backend: {:?}", command);

        let output = command
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.backend.launch_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Backend {
                status: output.status.to_string(),
                message: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| Error::BackendOutput(format!("not UTF-8: {}", e)))?;
        RawDocument::from_json_str(&stdout)
    }
}
