use chrono::Utc;
use shared::{
    domain::{ContactId, ContactStatus, ContactSubmission},
    error::ApiError,
    protocol::{ContactReplyPayload, Toast},
};
use tracing::{info, warn};

use crate::{required, upstream, AdminSession, ApiContext};

/// Newest first.
pub async fn list_contacts(
    ctx: &ApiContext,
    session: &AdminSession,
) -> Result<Vec<ContactSubmission>, ApiError> {
    ctx.backend
        .list_contacts(session.access_token())
        .await
        .map_err(upstream)
}

pub async fn update_contact_status(
    ctx: &ApiContext,
    session: &AdminSession,
    id: ContactId,
    status: ContactStatus,
) -> Result<Toast, ApiError> {
    let token = session.access_token();
    if status == ContactStatus::Archived {
        let contact = ctx
            .backend
            .load_contact(token, id)
            .await
            .map_err(upstream)?;
        if !contact.can_archive() {
            return Err(ApiError::validation(
                "only pending messages can be archived",
            ));
        }
    }

    let replied_at = (status == ContactStatus::Replied).then(Utc::now);
    ctx.backend
        .update_contact_status(token, id, status, replied_at)
        .await
        .map_err(upstream)?;
    info!(contact_id = %id, status = status.as_str(), "contact status updated");
    Ok(Toast::success("Status updated!"))
}

/// Sends the reply e-mail, then marks the submission replied. Nothing is
/// written when the e-mail function fails.
pub async fn send_reply(
    ctx: &ApiContext,
    session: &AdminSession,
    id: ContactId,
    message: &str,
) -> Result<Toast, ApiError> {
    required(message, "reply message")?;
    let token = session.access_token();
    let contact = ctx
        .backend
        .load_contact(token, id)
        .await
        .map_err(upstream)?;

    let payload = ContactReplyPayload {
        to: contact.email.clone(),
        name: contact.name.clone(),
        message: message.to_string(),
    };
    if let Err(err) = ctx.backend.send_contact_reply(token, &payload).await {
        warn!(contact_id = %id, error = %err, "reply e-mail failed");
        return Err(upstream(err));
    }

    ctx.backend
        .update_contact_status(token, id, ContactStatus::Replied, Some(Utc::now()))
        .await
        .map_err(upstream)?;
    info!(contact_id = %id, "contact reply sent");
    Ok(Toast::success("Reply sent successfully!"))
}
