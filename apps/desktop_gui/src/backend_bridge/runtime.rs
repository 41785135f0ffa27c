//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use backend_client::{BackendClient, BackendConfig};
use crossbeam_channel::{Receiver, Sender};
use server_api::{public_profile, skills_by_category, submit_contact, ApiContext};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the worker. Without a backend the worker still runs and answers
/// every command with an error, so the viewer works offline.
pub fn launch(config: Option<BackendConfig>, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let api = match config.map(BackendClient::new).transpose() {
            Ok(client) => client.map(|client| ApiContext::new(Arc::new(client))),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err}"),
                )));
                tracing::error!(error = %err, "invalid backend configuration");
                None
            }
        };

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let Some(api) = api.as_ref() else {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::General,
                        "backend unavailable: no backend configured",
                    )));
                    continue;
                };
                let event = handle(api, cmd).await;
                if ui_tx.send(event).is_err() {
                    break;
                }
            }
            tracing::debug!("backend worker stopped");
        });
    });
}

async fn handle(api: &ApiContext, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::LoadProfile => match public_profile(api).await {
            Ok(profile) => UiEvent::ProfileLoaded(profile),
            Err(err) => UiEvent::Error(UiError::from_api(UiErrorContext::LoadContent, &err)),
        },
        BackendCommand::LoadSkills => match skills_by_category(api).await {
            Ok(groups) => UiEvent::SkillsLoaded(groups),
            Err(err) => UiEvent::Error(UiError::from_api(UiErrorContext::LoadContent, &err)),
        },
        BackendCommand::SubmitContact(form) => match submit_contact(api, &form).await {
            Ok(toast) => UiEvent::Toast(toast),
            Err(err) => UiEvent::Error(UiError::from_api(UiErrorContext::SubmitContact, &err)),
        },
    }
}
