//! Portfolio operations shared by the HTTP server and the admin tool: the
//! admin gate, the three content editors, and the public reads and contact
//! form. Each function is a single fetch or mutate against the backend;
//! row-level authorization stays with the backend.

use std::sync::Arc;

use backend_client::{BackendError, PortfolioBackend};
use shared::{
    domain::AuthUser,
    error::{ApiError, ErrorCode},
    protocol::Toast,
};

mod admin;
mod contacts;
mod profile;
mod public;
mod skills;

pub use admin::{dashboard_menu, require_admin, sign_in, sign_out, ACCESS_DENIED_MESSAGE};
pub use contacts::{list_contacts, send_reply, update_contact_status};
pub use profile::{load_profile, save_profile, upload_profile_asset, ProfileAsset};
pub use public::{public_profile, skills_by_category, submit_contact, SkillGroup};
pub use skills::{delete_skill, list_skills, save_skill, SkillEditor};

#[derive(Clone)]
pub struct ApiContext {
    pub backend: Arc<dyn PortfolioBackend>,
}

impl ApiContext {
    pub fn new(backend: Arc<dyn PortfolioBackend>) -> Self {
        Self { backend }
    }
}

/// A verified admin: only [`require_admin`] hands these out.
#[derive(Debug, Clone)]
pub struct AdminSession {
    access_token: String,
    user: AuthUser,
}

impl AdminSession {
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn user(&self) -> &AuthUser {
        &self.user
    }
}

/// The destructive toast an editor shows when `err` comes back.
pub fn error_toast(title: &str, err: &ApiError) -> Toast {
    Toast::error(title, err.message.clone())
}

fn upstream(err: BackendError) -> ApiError {
    ApiError::from(err)
}

fn required(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::new(
            ErrorCode::Validation,
            format!("{field} is required"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
