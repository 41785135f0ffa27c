use shared::{domain::ProfileSettings, error::ApiError, protocol::Toast};
use tracing::info;

use crate::{required, upstream, AdminSession, ApiContext};

const MAX_ASSET_BYTES: usize = 10 * 1024 * 1024;
const MAX_FILENAME_BYTES: usize = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAsset {
    Image,
    Resume,
}

impl ProfileAsset {
    fn folder(self) -> &'static str {
        match self {
            ProfileAsset::Image => "profile-images",
            ProfileAsset::Resume => "resumes",
        }
    }
}

pub async fn load_profile(
    ctx: &ApiContext,
    session: &AdminSession,
) -> Result<ProfileSettings, ApiError> {
    ctx.backend
        .load_profile(Some(session.access_token()))
        .await
        .map_err(upstream)
}

pub async fn save_profile(
    ctx: &ApiContext,
    session: &AdminSession,
    profile: &ProfileSettings,
) -> Result<Toast, ApiError> {
    required(&profile.full_name, "full name")?;
    ctx.backend
        .update_profile(session.access_token(), profile)
        .await
        .map_err(upstream)?;
    info!(profile_id = %profile.id, "profile updated");
    Ok(Toast::success("Profile updated successfully!"))
}

/// Stores the file and points the profile's image or resume link at it.
pub async fn upload_profile_asset(
    ctx: &ApiContext,
    session: &AdminSession,
    asset: ProfileAsset,
    filename: &str,
    bytes: Vec<u8>,
    content_type: &str,
) -> Result<(ProfileSettings, Toast), ApiError> {
    let filename = filename.trim();
    required(filename, "filename")?;
    if filename.len() > MAX_FILENAME_BYTES {
        return Err(ApiError::validation("filename is too long"));
    }
    if filename.contains('/') || filename.contains('\\') {
        return Err(ApiError::validation(
            "filename must not contain path separators",
        ));
    }
    if bytes.is_empty() {
        return Err(ApiError::validation("file cannot be empty"));
    }
    if bytes.len() > MAX_ASSET_BYTES {
        return Err(ApiError::validation(format!(
            "file exceeds {MAX_ASSET_BYTES} bytes"
        )));
    }

    let token = session.access_token();
    let path = format!("{}/{filename}", asset.folder());
    let url = ctx
        .backend
        .upload_asset(token, &path, bytes, content_type)
        .await
        .map_err(upstream)?;

    let mut profile = ctx
        .backend
        .load_profile(Some(token))
        .await
        .map_err(upstream)?;
    match asset {
        ProfileAsset::Image => profile.profile_image_url = Some(url),
        ProfileAsset::Resume => profile.resume_url = Some(url),
    }
    ctx.backend
        .update_profile(token, &profile)
        .await
        .map_err(upstream)?;
    info!(?asset, %path, "profile asset uploaded");
    Ok((profile, Toast::success("Profile updated successfully!")))
}
