use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, warn};

use crate::config::PlayerCommand;

/// A running player that can be queried and stopped
pub trait PlayerProcess {
    /// False once the process has terminated for any reason
    fn is_running(&mut self) -> bool;

    /// Signal the process to stop without waiting for it
    fn terminate(&mut self);
}

/// Something that can start a player for a file
pub trait Spawn {
    type Process: PlayerProcess;

    fn spawn(&self, path: &Path) -> Result<Self::Process>;
}

impl PlayerProcess for Child {
    fn is_running(&mut self) -> bool {
        match self.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                debug!("Player {} finished: {}", self.id(), status);
                false
            }
            Err(e) => {
                warn!("Cannot query player {}, treating it as finished: {}", self.id(), e);
                false
            }
        }
    }

    fn terminate(&mut self) {
        // A reaped pid may already belong to another process
        if let Ok(Some(status)) = self.try_wait() {
            debug!("Player {} already finished: {}", self.id(), status);
            return;
        }

        request_stop(self);

        // Reap it if it is already down, never block
        match self.try_wait() {
            Ok(Some(status)) => debug!("Player {} stopped: {}", self.id(), status),
            Ok(None) => debug!("Player {} still shutting down", self.id()),
            Err(e) => debug!("Cannot reap player {}: {}", self.id(), e),
        }
    }
}

/// Ask the player to quit so it can leave fullscreen cleanly
#[cfg(unix)]
fn request_stop(child: &mut Child) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let pid = Pid::from_raw(child.id() as i32);
    if let Err(e) = kill(pid, Signal::SIGTERM) {
        debug!("Cannot send SIGTERM to player {}: {}", child.id(), e);
    }
}

#[cfg(not(unix))]
fn request_stop(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!("Player {} already gone: {}", child.id(), e);
    }
}

/// Runs the configured player binary from the search path
pub struct ExternalPlayer {
    command: PlayerCommand,
}

impl ExternalPlayer {
    pub fn new(command: PlayerCommand) -> Self {
        Self { command }
    }
}

impl Spawn for ExternalPlayer {
    type Process = Child;

    fn spawn(&self, path: &Path) -> Result<Child> {
        let child = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(path)
            .stdin(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start player '{}'", self.command.program))?;

        info!(
            "Started {} (pid {}) for {}",
            self.command.program,
            child.id(),
            path.display()
        );
        Ok(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::{Duration, Instant};

    fn player(program: &str, args: &[&str]) -> ExternalPlayer {
        ExternalPlayer::new(PlayerCommand {
            program: program.to_owned(),
            args: args.iter().map(|a| a.to_string()).collect(),
        })
    }

    fn wait_until_stopped(child: &mut Child) -> bool {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            if !child.is_running() {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }

    #[test]
    fn missing_binary_is_an_error() {
        let result = player("definitely-not-a-real-player-binary", &[]).spawn(Path::new("a.mp4"));

        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("definitely-not-a-real-player-binary"));
    }

    #[cfg(unix)]
    #[test]
    fn short_lived_player_is_reported_finished() {
        let mut child = player("true", &["--fullscreen"]).spawn(Path::new("clip.mp4")).unwrap();

        assert!(wait_until_stopped(&mut child));
    }

    #[cfg(unix)]
    #[test]
    fn terminate_sends_sigterm_to_a_running_player() {
        use std::os::unix::process::ExitStatusExt;

        let mut child = player("sleep", &[]).spawn(Path::new("30")).unwrap();
        assert!(child.is_running());

        child.terminate();

        assert!(wait_until_stopped(&mut child));
        let status = child.try_wait().unwrap().unwrap();
        assert_eq!(status.signal(), Some(nix::sys::signal::Signal::SIGTERM as i32));
    }

    #[cfg(unix)]
    #[test]
    fn terminate_after_exit_is_harmless() {
        let mut child = player("true", &[]).spawn(Path::new("clip.mp4")).unwrap();
        assert!(wait_until_stopped(&mut child));

        child.terminate();

        assert!(child.try_wait().unwrap().unwrap().success());
    }
}
