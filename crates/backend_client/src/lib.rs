//! Typed access to the hosted backend the portfolio stores its content in.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{
    domain::{
        AuthUser, ContactId, ContactStatus, ContactSubmission, NewContactSubmission,
        ProfileSettings, Role, Session, Skill, SkillDraft, SkillId, UserId, UserRole,
        CONTACTS_TABLE, PROFILE_TABLE, SKILLS_TABLE, USER_ROLES_TABLE,
    },
    protocol::ContactReplyPayload,
};

mod client;
pub mod error;
mod query;

pub use client::{BackendClient, BackendConfig, DEFAULT_REPLY_FUNCTION, DEFAULT_STORAGE_BUCKET};
pub use error::BackendError;
pub use query::TableQuery;

/// Content operations the portfolio needs from its backend. Reads that the
/// public site performs take an optional token; admin writes require one.
#[async_trait]
pub trait PortfolioBackend: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError>;
    async fn user_for_token(&self, access_token: &str) -> Result<AuthUser, BackendError>;
    async fn has_role(
        &self,
        access_token: &str,
        user_id: UserId,
        role: Role,
    ) -> Result<bool, BackendError>;

    async fn load_profile(&self, access_token: Option<&str>)
        -> Result<ProfileSettings, BackendError>;
    async fn update_profile(
        &self,
        access_token: &str,
        profile: &ProfileSettings,
    ) -> Result<(), BackendError>;

    async fn list_skills(&self, access_token: Option<&str>) -> Result<Vec<Skill>, BackendError>;
    async fn insert_skill(&self, access_token: &str, draft: &SkillDraft)
        -> Result<(), BackendError>;
    async fn update_skill(
        &self,
        access_token: &str,
        id: SkillId,
        draft: &SkillDraft,
    ) -> Result<(), BackendError>;
    async fn delete_skill(&self, access_token: &str, id: SkillId) -> Result<(), BackendError>;

    async fn list_contacts(&self, access_token: &str)
        -> Result<Vec<ContactSubmission>, BackendError>;
    async fn load_contact(
        &self,
        access_token: &str,
        id: ContactId,
    ) -> Result<ContactSubmission, BackendError>;
    async fn insert_contact(&self, submission: &NewContactSubmission) -> Result<(), BackendError>;
    async fn update_contact_status(
        &self,
        access_token: &str,
        id: ContactId,
        status: ContactStatus,
        replied_at: Option<DateTime<Utc>>,
    ) -> Result<(), BackendError>;
    async fn send_contact_reply(
        &self,
        access_token: &str,
        payload: &ContactReplyPayload,
    ) -> Result<(), BackendError>;

    /// Stores a file and returns the URL it is publicly served from.
    async fn upload_asset(
        &self,
        access_token: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BackendError>;
}

#[derive(Debug, Serialize)]
struct SkillRow<'a> {
    name: &'a str,
    category: &'a str,
    proficiency: u8,
    icon: Option<&'a str>,
}

impl<'a> From<&'a SkillDraft> for SkillRow<'a> {
    fn from(draft: &'a SkillDraft) -> Self {
        Self {
            name: draft.name.trim(),
            category: draft.category.trim(),
            proficiency: draft.proficiency,
            icon: Some(draft.icon.trim()).filter(|icon| !icon.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ContactStatusPatch {
    status: ContactStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    replied_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl PortfolioBackend for BackendClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        self.sign_in_with_password(email, password).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        BackendClient::sign_out(self, access_token).await
    }

    async fn user_for_token(&self, access_token: &str) -> Result<AuthUser, BackendError> {
        BackendClient::user_for_token(self, access_token).await
    }

    async fn has_role(
        &self,
        access_token: &str,
        user_id: UserId,
        role: Role,
    ) -> Result<bool, BackendError> {
        let rows: Vec<UserRole> = self
            .from(USER_ROLES_TABLE)
            .auth(Some(access_token))
            .select("user_id,role")
            .eq("user_id", user_id)
            .eq("role", role.as_str())
            .limit(1)
            .fetch()
            .await?;
        Ok(!rows.is_empty())
    }

    async fn load_profile(
        &self,
        access_token: Option<&str>,
    ) -> Result<ProfileSettings, BackendError> {
        self.from(PROFILE_TABLE)
            .auth(access_token)
            .single()
            .await
    }

    async fn update_profile(
        &self,
        access_token: &str,
        profile: &ProfileSettings,
    ) -> Result<(), BackendError> {
        self.from(PROFILE_TABLE)
            .auth(Some(access_token))
            .eq("id", profile.id)
            .update(profile)
            .await
    }

    async fn list_skills(&self, access_token: Option<&str>) -> Result<Vec<Skill>, BackendError> {
        self.from(SKILLS_TABLE)
            .auth(access_token)
            .order("category", true)
            .fetch()
            .await
    }

    async fn insert_skill(
        &self,
        access_token: &str,
        draft: &SkillDraft,
    ) -> Result<(), BackendError> {
        self.from(SKILLS_TABLE)
            .auth(Some(access_token))
            .insert(&SkillRow::from(draft))
            .await
    }

    async fn update_skill(
        &self,
        access_token: &str,
        id: SkillId,
        draft: &SkillDraft,
    ) -> Result<(), BackendError> {
        self.from(SKILLS_TABLE)
            .auth(Some(access_token))
            .eq("id", id)
            .update(&SkillRow::from(draft))
            .await
    }

    async fn delete_skill(&self, access_token: &str, id: SkillId) -> Result<(), BackendError> {
        self.from(SKILLS_TABLE)
            .auth(Some(access_token))
            .eq("id", id)
            .delete()
            .await
    }

    async fn list_contacts(
        &self,
        access_token: &str,
    ) -> Result<Vec<ContactSubmission>, BackendError> {
        self.from(CONTACTS_TABLE)
            .auth(Some(access_token))
            .order("created_at", false)
            .fetch()
            .await
    }

    async fn load_contact(
        &self,
        access_token: &str,
        id: ContactId,
    ) -> Result<ContactSubmission, BackendError> {
        self.from(CONTACTS_TABLE)
            .auth(Some(access_token))
            .eq("id", id)
            .single()
            .await
    }

    async fn insert_contact(&self, submission: &NewContactSubmission) -> Result<(), BackendError> {
        self.from(CONTACTS_TABLE).insert(submission).await
    }

    async fn update_contact_status(
        &self,
        access_token: &str,
        id: ContactId,
        status: ContactStatus,
        replied_at: Option<DateTime<Utc>>,
    ) -> Result<(), BackendError> {
        self.from(CONTACTS_TABLE)
            .auth(Some(access_token))
            .eq("id", id)
            .update(&ContactStatusPatch { status, replied_at })
            .await
    }

    async fn send_contact_reply(
        &self,
        access_token: &str,
        payload: &ContactReplyPayload,
    ) -> Result<(), BackendError> {
        self.invoke(Some(access_token), self.reply_function(), payload)
            .await?;
        Ok(())
    }

    async fn upload_asset(
        &self,
        access_token: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BackendError> {
        let bucket = self.storage_bucket().to_string();
        self.upload(access_token, &bucket, path, bytes, content_type)
            .await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
