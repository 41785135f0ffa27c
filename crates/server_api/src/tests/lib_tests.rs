use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use backend_client::{BackendError, PortfolioBackend};
use chrono::{DateTime, Utc};
use shared::{
    domain::{
        AuthUser, ContactId, ContactStatus, ContactSubmission, NewContactSubmission, ProfileId,
        ProfileSettings, Role, Session, Skill, SkillDraft, SkillId, UserId,
    },
    error::ErrorCode,
    protocol::{ContactFormRequest, ContactReplyPayload, ToastVariant},
};
use uuid::Uuid;

use super::*;

const ADMIN_TOKEN: &str = "admin-token";
const VISITOR_TOKEN: &str = "visitor-token";

#[derive(Debug, Clone, PartialEq)]
enum Call {
    InsertSkill(SkillDraft),
    UpdateSkill(SkillId, SkillDraft),
    DeleteSkill(SkillId),
    InsertContact(String),
    UpdateStatus(ContactId, ContactStatus, bool),
    Reply(ContactReplyPayload),
    Upload(String),
    UpdateProfile(ProfileSettings),
}

struct FakeBackend {
    admin: UserId,
    contacts: Vec<ContactSubmission>,
    skills: Vec<Skill>,
    profile: ProfileSettings,
    fail_reply: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    fn new() -> Self {
        Self {
            admin: UserId(Uuid::new_v4()),
            contacts: Vec::new(),
            skills: Vec::new(),
            profile: ProfileSettings {
                id: ProfileId(Uuid::new_v4()),
                full_name: "Ada Lovelace".into(),
                bio: None,
                profile_image_url: None,
                resume_url: None,
                phone: None,
                email: None,
                github_url: None,
                linkedin_url: None,
                instagram_url: None,
                kofi_url: None,
            },
            fail_reply: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }
}

fn contact(status: ContactStatus) -> ContactSubmission {
    ContactSubmission {
        id: ContactId(Uuid::new_v4()),
        name: "Bob".into(),
        email: "bob@example.com".into(),
        message: "Hello there".into(),
        status,
        created_at: Utc::now(),
        replied_at: None,
    }
}

fn skill(name: &str, category: &str) -> Skill {
    Skill {
        id: SkillId(Uuid::new_v4()),
        name: name.into(),
        category: category.into(),
        proficiency: 90,
        icon: None,
    }
}

fn http(status: u16, message: &str) -> BackendError {
    BackendError::Http {
        status,
        message: message.into(),
    }
}

#[async_trait]
impl PortfolioBackend for FakeBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        if email == "ada@example.com" && password == "secret" {
            Ok(Session {
                access_token: ADMIN_TOKEN.into(),
                refresh_token: None,
                expires_in: Some(3600),
                user: AuthUser {
                    id: self.admin,
                    email: Some(email.into()),
                },
            })
        } else {
            Err(http(400, "Invalid login credentials"))
        }
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), BackendError> {
        Ok(())
    }

    async fn user_for_token(&self, access_token: &str) -> Result<AuthUser, BackendError> {
        match access_token {
            ADMIN_TOKEN => Ok(AuthUser {
                id: self.admin,
                email: None,
            }),
            VISITOR_TOKEN => Ok(AuthUser {
                id: UserId(Uuid::new_v4()),
                email: None,
            }),
            _ => Err(http(401, "invalid JWT")),
        }
    }

    async fn has_role(
        &self,
        _access_token: &str,
        user_id: UserId,
        role: Role,
    ) -> Result<bool, BackendError> {
        Ok(role == Role::Admin && user_id == self.admin)
    }

    async fn load_profile(
        &self,
        _access_token: Option<&str>,
    ) -> Result<ProfileSettings, BackendError> {
        Ok(self.profile.clone())
    }

    async fn update_profile(
        &self,
        _access_token: &str,
        profile: &ProfileSettings,
    ) -> Result<(), BackendError> {
        self.record(Call::UpdateProfile(profile.clone()));
        Ok(())
    }

    async fn list_skills(&self, _access_token: Option<&str>) -> Result<Vec<Skill>, BackendError> {
        Ok(self.skills.clone())
    }

    async fn insert_skill(
        &self,
        _access_token: &str,
        draft: &SkillDraft,
    ) -> Result<(), BackendError> {
        self.record(Call::InsertSkill(draft.clone()));
        Ok(())
    }

    async fn update_skill(
        &self,
        _access_token: &str,
        id: SkillId,
        draft: &SkillDraft,
    ) -> Result<(), BackendError> {
        self.record(Call::UpdateSkill(id, draft.clone()));
        Ok(())
    }

    async fn delete_skill(&self, _access_token: &str, id: SkillId) -> Result<(), BackendError> {
        self.record(Call::DeleteSkill(id));
        Ok(())
    }

    async fn list_contacts(
        &self,
        _access_token: &str,
    ) -> Result<Vec<ContactSubmission>, BackendError> {
        Ok(self.contacts.clone())
    }

    async fn load_contact(
        &self,
        _access_token: &str,
        id: ContactId,
    ) -> Result<ContactSubmission, BackendError> {
        self.contacts
            .iter()
            .find(|contact| contact.id == id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound("contact_submissions".into()))
    }

    async fn insert_contact(&self, submission: &NewContactSubmission) -> Result<(), BackendError> {
        assert_eq!(submission.status, ContactStatus::Pending);
        self.record(Call::InsertContact(submission.email.clone()));
        Ok(())
    }

    async fn update_contact_status(
        &self,
        _access_token: &str,
        id: ContactId,
        status: ContactStatus,
        replied_at: Option<DateTime<Utc>>,
    ) -> Result<(), BackendError> {
        self.record(Call::UpdateStatus(id, status, replied_at.is_some()));
        Ok(())
    }

    async fn send_contact_reply(
        &self,
        _access_token: &str,
        payload: &ContactReplyPayload,
    ) -> Result<(), BackendError> {
        if self.fail_reply {
            return Err(http(500, "mail provider unavailable"));
        }
        self.record(Call::Reply(payload.clone()));
        Ok(())
    }

    async fn upload_asset(
        &self,
        _access_token: &str,
        path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, BackendError> {
        self.record(Call::Upload(path.to_string()));
        Ok(format!("https://cdn.example.com/{path}"))
    }
}

fn context(backend: FakeBackend) -> (ApiContext, Arc<FakeBackend>) {
    let backend = Arc::new(backend);
    (ApiContext::new(backend.clone()), backend)
}

async fn admin(ctx: &ApiContext) -> AdminSession {
    require_admin(ctx, Some(ADMIN_TOKEN))
        .await
        .expect("admin session")
}

#[tokio::test]
async fn require_admin_distinguishes_missing_session_from_missing_role() {
    let (ctx, _) = context(FakeBackend::new());

    let err = require_admin(&ctx, None).await.expect_err("no token");
    assert_eq!(err.code, ErrorCode::Unauthorized);

    let err = require_admin(&ctx, Some("  ")).await.expect_err("blank token");
    assert_eq!(err.code, ErrorCode::Unauthorized);

    let err = require_admin(&ctx, Some("expired"))
        .await
        .expect_err("expired token");
    assert_eq!(err.code, ErrorCode::Unauthorized);
    assert_eq!(err.message, "session expired");

    let err = require_admin(&ctx, Some(VISITOR_TOKEN))
        .await
        .expect_err("not an admin");
    assert_eq!(err.code, ErrorCode::Forbidden);
    assert_eq!(err.message, ACCESS_DENIED_MESSAGE);

    let session = admin(&ctx).await;
    assert_eq!(session.access_token(), ADMIN_TOKEN);
}

#[tokio::test]
async fn sign_in_maps_rejected_credentials_to_unauthorized() {
    let (ctx, _) = context(FakeBackend::new());

    let session = sign_in(&ctx, " ada@example.com ", "secret")
        .await
        .expect("sign in");
    assert_eq!(session.access_token, ADMIN_TOKEN);

    let err = sign_in(&ctx, "ada@example.com", "wrong")
        .await
        .expect_err("bad password");
    assert_eq!(err.code, ErrorCode::Unauthorized);

    let err = sign_in(&ctx, "", "secret").await.expect_err("no email");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[tokio::test]
async fn save_skill_inserts_or_updates_depending_on_editor_state() {
    let (ctx, backend) = context(FakeBackend::new());
    let session = admin(&ctx).await;

    let mut editor = SkillEditor::default();
    editor.start_new();
    assert_eq!(editor.title(), "Add Skill");
    editor.draft.name = "Rust".into();
    editor.draft.category = "Languages".into();

    let toast = save_skill(&ctx, &session, editor.editing, &editor.draft)
        .await
        .expect("insert");
    assert_eq!(toast.title, "Skill added!");

    let existing = skill("Go", "Languages");
    editor.start_edit(&existing);
    assert_eq!(editor.title(), "Edit Skill");
    editor.draft.proficiency = 60;
    let toast = save_skill(&ctx, &session, editor.editing, &editor.draft)
        .await
        .expect("update");
    assert_eq!(toast.title, "Skill updated!");

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(&calls[0], Call::InsertSkill(draft) if draft.proficiency == 80));
    assert!(matches!(&calls[1], Call::UpdateSkill(id, draft) if *id == existing.id && draft.proficiency == 60));

    editor.reset();
    assert_eq!(editor, SkillEditor::default());
}

#[tokio::test]
async fn save_skill_rejects_incomplete_drafts() {
    let (ctx, backend) = context(FakeBackend::new());
    let session = admin(&ctx).await;

    let mut draft = SkillDraft {
        name: "Rust".into(),
        ..SkillDraft::default()
    };
    let err = save_skill(&ctx, &session, None, &draft)
        .await
        .expect_err("missing category");
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(err.message, "category is required");

    draft.category = "Languages".into();
    draft.proficiency = 101;
    let err = save_skill(&ctx, &session, None, &draft)
        .await
        .expect_err("proficiency");
    assert_eq!(err.code, ErrorCode::Validation);

    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn delete_skill_reports_success() {
    let (ctx, backend) = context(FakeBackend::new());
    let session = admin(&ctx).await;
    let id = SkillId(Uuid::new_v4());

    let toast = delete_skill(&ctx, &session, id).await.expect("delete");
    assert_eq!(toast.title, "Skill deleted!");
    assert_eq!(backend.calls(), vec![Call::DeleteSkill(id)]);
}

#[tokio::test]
async fn failed_reply_leaves_status_untouched() {
    let mut fake = FakeBackend::new();
    let pending = contact(ContactStatus::Pending);
    let id = pending.id;
    fake.contacts.push(pending);
    fake.fail_reply = true;
    let (ctx, backend) = context(fake);
    let session = admin(&ctx).await;

    let err = send_reply(&ctx, &session, id, "Thanks!")
        .await
        .expect_err("function failure");
    assert_eq!(err.code, ErrorCode::Upstream);
    assert!(backend.calls().is_empty());

    let toast = error_toast("Error", &err);
    assert_eq!(toast.variant, ToastVariant::Destructive);
    assert_eq!(toast.description.as_deref(), Some("mail provider unavailable"));
}

#[tokio::test]
async fn successful_reply_marks_submission_replied() {
    let mut fake = FakeBackend::new();
    let pending = contact(ContactStatus::Pending);
    let id = pending.id;
    fake.contacts.push(pending);
    let (ctx, backend) = context(fake);
    let session = admin(&ctx).await;

    let err = send_reply(&ctx, &session, id, "   ")
        .await
        .expect_err("empty reply");
    assert_eq!(err.code, ErrorCode::Validation);

    let toast = send_reply(&ctx, &session, id, "Thanks!")
        .await
        .expect("reply");
    assert_eq!(toast.title, "Reply sent successfully!");
    assert_eq!(
        backend.calls(),
        vec![
            Call::Reply(ContactReplyPayload {
                to: "bob@example.com".into(),
                name: "Bob".into(),
                message: "Thanks!".into(),
            }),
            Call::UpdateStatus(id, ContactStatus::Replied, true),
        ]
    );
}

#[tokio::test]
async fn only_pending_submissions_can_be_archived() {
    let mut fake = FakeBackend::new();
    let pending = contact(ContactStatus::Pending);
    let replied = contact(ContactStatus::Replied);
    let (pending_id, replied_id) = (pending.id, replied.id);
    fake.contacts.extend([pending, replied]);
    let (ctx, backend) = context(fake);
    let session = admin(&ctx).await;

    let err = update_contact_status(&ctx, &session, replied_id, ContactStatus::Archived)
        .await
        .expect_err("replied cannot be archived");
    assert_eq!(err.code, ErrorCode::Validation);

    let toast = update_contact_status(&ctx, &session, pending_id, ContactStatus::Archived)
        .await
        .expect("archive");
    assert_eq!(toast.title, "Status updated!");
    assert_eq!(
        backend.calls(),
        vec![Call::UpdateStatus(pending_id, ContactStatus::Archived, false)]
    );
}

#[tokio::test]
async fn contact_form_validates_before_storing() {
    let (ctx, backend) = context(FakeBackend::new());
    let form = |name: &str, email: &str, message: &str| ContactFormRequest {
        name: name.into(),
        email: email.into(),
        message: message.into(),
    };

    for (bad, field) in [
        (form("", "bob@example.com", "hi"), "name"),
        (form("Bob", "not-an-email", "hi"), "email"),
        (form("Bob", "bob@example.com", "  "), "message"),
        (form(&"x".repeat(101), "bob@example.com", "hi"), "name"),
        (form("Bob", "bob@example.com", &"x".repeat(5001)), "message"),
    ] {
        let err = submit_contact(&ctx, &bad).await.expect_err(field);
        assert_eq!(err.code, ErrorCode::Validation, "{field}");
    }
    assert!(backend.calls().is_empty());

    let toast = submit_contact(&ctx, &form(" Bob ", "bob@example.com", "Hello"))
        .await
        .expect("submit");
    assert_eq!(toast.title, "Message sent!");
    assert!(toast.description.is_some());
    assert_eq!(
        backend.calls(),
        vec![Call::InsertContact("bob@example.com".into())]
    );
}

#[tokio::test]
async fn skills_are_grouped_in_backend_order() {
    let mut fake = FakeBackend::new();
    fake.skills = vec![
        skill("Rust", "Languages"),
        skill("Postgres", "Databases"),
        skill("Go", "Languages"),
    ];
    let (ctx, _) = context(fake);

    let groups = skills_by_category(&ctx).await.expect("groups");
    let summary: Vec<(&str, Vec<&str>)> = groups
        .iter()
        .map(|group| {
            (
                group.category.as_str(),
                group.skills.iter().map(|s| s.name.as_str()).collect(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Languages", vec!["Rust", "Go"]),
            ("Databases", vec!["Postgres"]),
        ]
    );
}

#[tokio::test]
async fn uploading_a_resume_updates_the_profile_link() {
    let (ctx, backend) = context(FakeBackend::new());
    let session = admin(&ctx).await;

    let err = upload_profile_asset(
        &ctx,
        &session,
        ProfileAsset::Resume,
        "../cv.pdf",
        vec![1],
        "application/pdf",
    )
    .await
    .expect_err("path separator");
    assert_eq!(err.code, ErrorCode::Validation);

    let (profile, toast) = upload_profile_asset(
        &ctx,
        &session,
        ProfileAsset::Resume,
        "cv.pdf",
        vec![1, 2, 3],
        "application/pdf",
    )
    .await
    .expect("upload");
    assert_eq!(
        profile.resume_url.as_deref(),
        Some("https://cdn.example.com/resumes/cv.pdf")
    );
    assert_eq!(toast.title, "Profile updated successfully!");

    let calls = backend.calls();
    assert_eq!(calls[0], Call::Upload("resumes/cv.pdf".into()));
    assert_eq!(calls[1], Call::UpdateProfile(profile));
}

#[tokio::test]
async fn save_profile_requires_a_name() {
    let (ctx, backend) = context(FakeBackend::new());
    let session = admin(&ctx).await;
    let mut profile = load_profile(&ctx, &session).await.expect("profile");

    profile.full_name = " ".into();
    let err = save_profile(&ctx, &session, &profile)
        .await
        .expect_err("blank name");
    assert_eq!(err.code, ErrorCode::Validation);

    profile.full_name = "Ada King".into();
    profile.bio = Some("Analyst".into());
    save_profile(&ctx, &session, &profile).await.expect("save");
    assert_eq!(backend.calls(), vec![Call::UpdateProfile(profile)]);
}

#[test]
fn dashboard_lists_every_editor() {
    let menu = dashboard_menu();
    assert_eq!(menu.len(), 7);
    assert_eq!(menu[0].path, "/admin/profile");
    assert!(menu.iter().any(|item| item.path == "/admin/contacts"));
}
