//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` without blocking the UI; returns the status line to show on failure.
pub fn dispatch_backend_command(cmd_tx: &Sender<BackendCommand>, cmd: BackendCommand) -> Option<String> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            None
        }
        Err(TrySendError::Full(_)) => Some("UI command queue is full; please retry".to_string()),
        Err(TrySendError::Disconnected(_)) => {
            Some("Backend command processor disconnected; restart the viewer".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn reports_full_and_disconnected_queues() {
        let (tx, rx) = bounded::<BackendCommand>(1);
        assert_eq!(dispatch_backend_command(&tx, BackendCommand::LoadProfile), None);

        let full = dispatch_backend_command(&tx, BackendCommand::LoadSkills).expect("full");
        assert!(full.contains("full"));

        drop(rx);
        let gone = dispatch_backend_command(&tx, BackendCommand::LoadSkills).expect("gone");
        assert!(gone.contains("disconnected"));
    }
}
