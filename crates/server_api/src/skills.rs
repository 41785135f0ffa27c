use shared::{
    domain::{Skill, SkillDraft, SkillId, MAX_SKILL_PROFICIENCY},
    error::ApiError,
    protocol::Toast,
};
use tracing::info;

use crate::{required, upstream, AdminSession, ApiContext};

/// Form state of the add/edit skill dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillEditor {
    pub editing: Option<SkillId>,
    pub draft: SkillDraft,
}

impl SkillEditor {
    pub fn start_new(&mut self) {
        self.reset();
    }

    pub fn start_edit(&mut self, skill: &Skill) {
        self.editing = Some(skill.id);
        self.draft = SkillDraft::from(skill);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Skill"
        } else {
            "Add Skill"
        }
    }
}

pub async fn list_skills(ctx: &ApiContext, session: &AdminSession) -> Result<Vec<Skill>, ApiError> {
    ctx.backend
        .list_skills(Some(session.access_token()))
        .await
        .map_err(upstream)
}

/// Inserts when `editing` is `None`, updates that row otherwise.
pub async fn save_skill(
    ctx: &ApiContext,
    session: &AdminSession,
    editing: Option<SkillId>,
    draft: &SkillDraft,
) -> Result<Toast, ApiError> {
    validate_draft(draft)?;
    let token = session.access_token();
    match editing {
        Some(id) => {
            ctx.backend
                .update_skill(token, id, draft)
                .await
                .map_err(upstream)?;
            info!(skill_id = %id, name = %draft.name, "skill updated");
            Ok(Toast::success("Skill updated!"))
        }
        None => {
            ctx.backend
                .insert_skill(token, draft)
                .await
                .map_err(upstream)?;
            info!(name = %draft.name, "skill added");
            Ok(Toast::success("Skill added!"))
        }
    }
}

pub async fn delete_skill(
    ctx: &ApiContext,
    session: &AdminSession,
    id: SkillId,
) -> Result<Toast, ApiError> {
    ctx.backend
        .delete_skill(session.access_token(), id)
        .await
        .map_err(upstream)?;
    info!(skill_id = %id, "skill deleted");
    Ok(Toast::success("Skill deleted!"))
}

fn validate_draft(draft: &SkillDraft) -> Result<(), ApiError> {
    required(&draft.name, "name")?;
    required(&draft.category, "category")?;
    if draft.proficiency > MAX_SKILL_PROFICIENCY {
        return Err(ApiError::validation(format!(
            "proficiency must be between 0 and {MAX_SKILL_PROFICIENCY}"
        )));
    }
    Ok(())
}
