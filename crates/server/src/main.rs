use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
    Form, Json, Router,
};
use backend_client::BackendClient;
use serde::Deserialize;
use server_api::{
    dashboard_menu, delete_skill, list_contacts, list_skills, load_profile, public_profile,
    require_admin, save_profile, save_skill, send_reply, sign_in, sign_out, skills_by_category,
    submit_contact, update_contact_status, upload_profile_asset, AdminSession, ApiContext,
    ProfileAsset,
};
use shared::{
    domain::{ContactId, ProfileSettings, SkillId},
    error::{ApiError, ErrorCode},
    protocol::{
        ContactFormRequest, ContactsResponse, DashboardResponse, LoginRequest, LoginResponse,
        ProfileResponse, ReplyRequest, SaveSkillRequest, SkillsResponse, Toast, ToastResponse,
        UpdateStatusRequest,
    },
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod app_state;
mod config;
mod pages;

use app_state::AppState;
use config::load_settings;
use pages::{render_not_found, render_section, PageContent};

const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

type Rejection = (StatusCode, Json<ApiError>);

#[derive(Debug, Deserialize)]
struct UploadQuery {
    filename: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let backend = BackendClient::new(settings.backend_config()?)
        .with_context(|| format!("invalid backend url '{}'", settings.backend_url))?;
    let api = ApiContext::new(Arc::new(backend));
    let state = AppState::new(api);
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, backend = %settings.backend_url, "portfolio server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/contact", post(http_submit_contact))
        .route("/api/admin/login", post(http_login))
        .route("/api/admin/logout", post(http_logout))
        .route("/api/admin/dashboard", get(http_dashboard))
        .route(
            "/api/admin/profile",
            get(http_load_profile).put(http_save_profile),
        )
        .route("/api/admin/profile/:asset", post(http_upload_asset))
        .route(
            "/api/admin/skills",
            get(http_list_skills).post(http_add_skill),
        )
        .route(
            "/api/admin/skills/:id",
            put(http_update_skill).delete(http_delete_skill),
        )
        .route("/api/admin/contacts", get(http_list_contacts))
        .route(
            "/api/admin/contacts/:id/status",
            put(http_update_contact_status),
        )
        .route("/api/admin/contacts/:id/reply", post(http_reply));

    for path in state.sections.paths() {
        router = router.route(path, get(section_page));
    }
    router = router.route("/contact", post(contact_form));

    router
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Upstream => StatusCode::BAD_GATEWAY,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(err: ApiError) -> Rejection {
    let status = status_for(err.code);
    if status.is_server_error() {
        warn!(code = ?err.code, message = %err.message, "request failed");
    }
    (status, Json(err))
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

async fn admin(state: &AppState, headers: &HeaderMap) -> Result<AdminSession, Rejection> {
    require_admin(&state.api, bearer(headers)).await.map_err(reject)
}

fn toast(toast: Toast) -> Json<ToastResponse> {
    Json(ToastResponse { toast })
}

async fn healthz() -> &'static str {
    "ok"
}

async fn page_content(state: &AppState, path: &str) -> PageContent {
    let mut content = PageContent::default();
    match path {
        "/skills" => match skills_by_category(&state.api).await {
            Ok(groups) => content.skills = groups,
            Err(err) => warn!(%path, error = %err, "skills unavailable"),
        },
        "/" | "/about" | "/resume" | "/contact" => match public_profile(&state.api).await {
            Ok(profile) => content.profile = Some(profile),
            Err(err) => warn!(%path, error = %err, "profile unavailable"),
        },
        _ => {}
    }
    content
}

async fn section_page(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let path = uri.path();
    let Some(index) = state.sections.index_of(path) else {
        return not_found_page(&state, path);
    };
    let content = page_content(&state, path).await;
    Html(render_section(&state, path, index, &content)).into_response()
}

async fn not_found(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    not_found_page(&state, uri.path())
}

fn not_found_page(state: &AppState, path: &str) -> Response {
    warn!(%path, "404: route not found");
    (StatusCode::NOT_FOUND, Html(render_not_found(state, path))).into_response()
}

/// Plain HTML form post from the contact section; re-renders the page with the outcome.
async fn contact_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ContactFormRequest>,
) -> Response {
    let path = "/contact";
    let (status, notice) = match submit_contact(&state.api, &form).await {
        Ok(toast) => (StatusCode::OK, toast),
        Err(err) => (
            status_for(err.code),
            server_api::error_toast("Error", &err),
        ),
    };
    let mut content = page_content(&state, path).await;
    content.notice = Some(notice);
    let index = state.sections.index_of(path).unwrap_or_default();
    (status, Html(render_section(&state, path, index, &content))).into_response()
}

async fn http_submit_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactFormRequest>,
) -> Result<Json<ToastResponse>, Rejection> {
    submit_contact(&state.api, &req)
        .await
        .map(toast)
        .map_err(reject)
}

async fn http_login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Rejection> {
    let session = sign_in(&state.api, &req.email, &req.password)
        .await
        .map_err(reject)?;
    Ok(Json(LoginResponse {
        access_token: session.access_token,
        user_id: session.user.id,
    }))
}

async fn http_logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ToastResponse>, Rejection> {
    let session = admin(&state, &headers).await?;
    sign_out(&state.api, &session)
        .await
        .map(toast)
        .map_err(reject)
}

async fn http_dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DashboardResponse>, Rejection> {
    let session = admin(&state, &headers).await?;
    Ok(Json(DashboardResponse {
        user_id: session.user().id,
        menu: dashboard_menu(),
    }))
}

async fn http_load_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ProfileResponse>, Rejection> {
    let session = admin(&state, &headers).await?;
    let profile = load_profile(&state.api, &session).await.map_err(reject)?;
    Ok(Json(ProfileResponse { profile }))
}

async fn http_save_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(profile): Json<ProfileSettings>,
) -> Result<Json<ToastResponse>, Rejection> {
    let session = admin(&state, &headers).await?;
    save_profile(&state.api, &session, &profile)
        .await
        .map(toast)
        .map_err(reject)
}

async fn http_upload_asset(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(asset): Path<String>,
    Query(q): Query<UploadQuery>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, Rejection> {
    let session = admin(&state, &headers).await?;
    let asset = match asset.as_str() {
        "image" => ProfileAsset::Image,
        "resume" => ProfileAsset::Resume,
        other => {
            return Err(reject(ApiError::new(
                ErrorCode::NotFound,
                format!("unknown profile asset '{other}'"),
            )))
        }
    };
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream");

    let (profile, toast) = upload_profile_asset(
        &state.api,
        &session,
        asset,
        &q.filename,
        body.to_vec(),
        content_type,
    )
    .await
    .map_err(reject)?;
    Ok(Json(
        serde_json::json!({ "profile": profile, "toast": toast }),
    ))
}

async fn http_list_skills(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SkillsResponse>, Rejection> {
    let session = admin(&state, &headers).await?;
    let skills = list_skills(&state.api, &session).await.map_err(reject)?;
    Ok(Json(SkillsResponse { skills }))
}

async fn http_add_skill(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SaveSkillRequest>,
) -> Result<Json<ToastResponse>, Rejection> {
    let session = admin(&state, &headers).await?;
    save_skill(&state.api, &session, None, &req.draft)
        .await
        .map(toast)
        .map_err(reject)
}

async fn http_update_skill(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(req): Json<SaveSkillRequest>,
) -> Result<Json<ToastResponse>, Rejection> {
    let session = admin(&state, &headers).await?;
    save_skill(&state.api, &session, Some(SkillId(id)), &req.draft)
        .await
        .map(toast)
        .map_err(reject)
}

async fn http_delete_skill(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<ToastResponse>, Rejection> {
    let session = admin(&state, &headers).await?;
    delete_skill(&state.api, &session, SkillId(id))
        .await
        .map(toast)
        .map_err(reject)
}

async fn http_list_contacts(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ContactsResponse>, Rejection> {
    let session = admin(&state, &headers).await?;
    let contacts = list_contacts(&state.api, &session).await.map_err(reject)?;
    Ok(Json(ContactsResponse { contacts }))
}

async fn http_update_contact_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ToastResponse>, Rejection> {
    let session = admin(&state, &headers).await?;
    update_contact_status(&state.api, &session, ContactId(id), req.status)
        .await
        .map(toast)
        .map_err(reject)
}

async fn http_reply(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(req): Json<ReplyRequest>,
) -> Result<Json<ToastResponse>, Rejection> {
    let session = admin(&state, &headers).await?;
    send_reply(&state.api, &session, ContactId(id), &req.message)
        .await
        .map(toast)
        .map_err(reject)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
