mod process;

#[cfg(test)]
pub(crate) mod fake;

use anyhow::Result;
use std::path::Path;
use tracing::info;

pub use process::{ExternalPlayer, PlayerProcess, Spawn};

/// Result of polling the launcher
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerStatus {
    /// No player has been started or the last one was already reported
    Idle,
    Running,
    /// The held player terminated since the last poll
    Exited,
}

/// Owns at most one external player at a time
pub struct Launcher<S: Spawn> {
    spawner: S,
    current: Option<S::Process>,
}

impl<S: Spawn> Launcher<S> {
    pub fn new(spawner: S) -> Self {
        Self {
            spawner,
            current: None,
        }
    }

    /// Start a player for `path` and hand back its process
    pub fn play(&self, path: &Path) -> Result<S::Process> {
        self.spawner.spawn(path)
    }

    /// Replace the held player with a new one playing `path`.
    ///
    /// The previous player is terminated first, even if the new one then
    /// fails to start.
    pub fn select(&mut self, path: &Path) -> Result<()> {
        self.stop();
        let process = self.play(path)?;
        self.current = Some(process);
        Ok(())
    }

    /// Check the held player once. `Exited` is reported a single time, after
    /// which the handle is released.
    pub fn poll(&mut self) -> PlayerStatus {
        let Some(process) = self.current.as_mut() else {
            return PlayerStatus::Idle;
        };
        if process.is_running() {
            return PlayerStatus::Running;
        }

        self.current = None;
        info!("Player exited");
        PlayerStatus::Exited
    }

    /// Terminate and release the held player, if any
    pub fn stop(&mut self) {
        if let Some(mut process) = self.current.take() {
            process.terminate();
        }
    }

    #[cfg(test)]
    pub(crate) fn has_player(&self) -> bool {
        self.current.is_some()
    }
}

impl<S: Spawn> Drop for Launcher<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
