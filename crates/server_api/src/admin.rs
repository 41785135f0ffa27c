use shared::{
    domain::{Role, Session},
    error::{ApiError, ErrorCode},
    protocol::{DashboardMenuItem, Toast},
};
use tracing::{info, warn};

use crate::{upstream, ApiContext, AdminSession};

pub const ACCESS_DENIED_MESSAGE: &str = "You need admin privileges to access this page.";

const MENU: &[(&str, &str, &str)] = &[
    (
        "Profile Settings",
        "/admin/profile",
        "Update name, bio, image, resume",
    ),
    ("Experiences", "/admin/experiences", "Manage work experiences"),
    ("Projects", "/admin/projects", "Manage portfolio projects"),
    ("Skills", "/admin/skills", "Add and edit skills"),
    ("PORs", "/admin/pors", "Positions of Responsibility"),
    ("Achievements", "/admin/achievements", "Manage achievements"),
    (
        "Contact Messages",
        "/admin/contacts",
        "View and reply to contacts",
    ),
];

pub async fn sign_in(ctx: &ApiContext, email: &str, password: &str) -> Result<Session, ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::validation("email and password are required"));
    }
    let session = ctx
        .backend
        .sign_in(email.trim(), password)
        .await
        .map_err(|err| match err.status() {
            Some(400 | 401) => ApiError::new(ErrorCode::Unauthorized, "invalid login credentials"),
            _ => upstream(err),
        })?;
    info!(user_id = %session.user.id, "admin signed in");
    Ok(session)
}

pub async fn sign_out(ctx: &ApiContext, session: &AdminSession) -> Result<Toast, ApiError> {
    ctx.backend
        .sign_out(session.access_token())
        .await
        .map_err(upstream)?;
    Ok(Toast::success("Logged out successfully"))
}

/// No usable session means `Unauthorized` (send the visitor to sign-in); a
/// session without the admin role means `Forbidden`.
pub async fn require_admin(
    ctx: &ApiContext,
    access_token: Option<&str>,
) -> Result<AdminSession, ApiError> {
    let Some(access_token) = access_token.map(str::trim).filter(|token| !token.is_empty()) else {
        return Err(ApiError::new(ErrorCode::Unauthorized, "sign in required"));
    };

    let user = ctx
        .backend
        .user_for_token(access_token)
        .await
        .map_err(|err| match err.status() {
            Some(401 | 403) => ApiError::new(ErrorCode::Unauthorized, "session expired"),
            _ => upstream(err),
        })?;

    let is_admin = ctx
        .backend
        .has_role(access_token, user.id, Role::Admin)
        .await
        .map_err(upstream)?;
    if !is_admin {
        warn!(user_id = %user.id, "non-admin attempted to open the dashboard");
        return Err(ApiError::new(ErrorCode::Forbidden, ACCESS_DENIED_MESSAGE));
    }

    Ok(AdminSession {
        access_token: access_token.to_string(),
        user,
    })
}

pub fn dashboard_menu() -> Vec<DashboardMenuItem> {
    MENU.iter()
        .map(|(title, path, description)| DashboardMenuItem {
            title: (*title).to_string(),
            path: (*path).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}
