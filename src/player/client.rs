//! Running commands against the external player

use super::command::PlayerCommand;
use crate::error::ProcessError;
use std::process::Command;

/// Default client binary
pub const RHYTHMBOX_CLIENT: &str = "rhythmbox-client";

/// Something that can carry out player commands
pub trait Player {
    /// Run one command and return its standard output
    fn execute(&self, command: &PlayerCommand) -> Result<String, ProcessError>;
}

impl<P: Player + ?Sized> Player for &P {
    fn execute(&self, command: &PlayerCommand) -> Result<String, ProcessError> {
        (**self).execute(command)
    }
}

/// Spawns rhythmbox-client once per command and waits for it to exit
#[derive(Debug, Clone)]
pub struct RhythmboxClient {
    binary: String,
}

impl RhythmboxClient {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for RhythmboxClient {
    fn default() -> Self {
        Self::new(RHYTHMBOX_CLIENT)
    }
}

impl Player for RhythmboxClient {
    fn execute(&self, command: &PlayerCommand) -> Result<String, ProcessError> {
        log::debug!("{} {}", self.binary, command);

        let output = Command::new(&self.binary)
            .args(command.args())
            .output()
            .map_err(|source| ProcessError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProcessError::Failed {
                binary: self.binary.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
