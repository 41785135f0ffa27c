use shared::{
    domain::{ContactStatus, NewContactSubmission, ProfileSettings, Skill},
    error::ApiError,
    protocol::{ContactFormRequest, Toast},
};
use tracing::info;

use crate::{required, upstream, ApiContext};

const MAX_NAME_CHARS: usize = 100;
const MAX_EMAIL_CHARS: usize = 255;
const MAX_MESSAGE_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<Skill>,
}

pub async fn public_profile(ctx: &ApiContext) -> Result<ProfileSettings, ApiError> {
    ctx.backend.load_profile(None).await.map_err(upstream)
}

/// Skills bucketed by category, categories in the order the backend returns them.
pub async fn skills_by_category(ctx: &ApiContext) -> Result<Vec<SkillGroup>, ApiError> {
    let skills = ctx.backend.list_skills(None).await.map_err(upstream)?;
    let mut groups: Vec<SkillGroup> = Vec::new();
    for skill in skills {
        match groups
            .iter_mut()
            .find(|group| group.category == skill.category)
        {
            Some(group) => group.skills.push(skill),
            None => groups.push(SkillGroup {
                category: skill.category.clone(),
                skills: vec![skill],
            }),
        }
    }
    Ok(groups)
}

pub async fn submit_contact(
    ctx: &ApiContext,
    form: &ContactFormRequest,
) -> Result<Toast, ApiError> {
    let name = form.name.trim();
    let email = form.email.trim();
    let message = form.message.trim();

    required(name, "name")?;
    required(email, "email")?;
    required(message, "message")?;
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ApiError::validation("name is too long"));
    }
    if email.chars().count() > MAX_EMAIL_CHARS || !looks_like_email(email) {
        return Err(ApiError::validation("email address is invalid"));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::validation("message is too long"));
    }

    ctx.backend
        .insert_contact(&NewContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            status: ContactStatus::Pending,
        })
        .await
        .map_err(upstream)?;
    info!(%email, "contact submission stored");
    Ok(Toast::success("Message sent!")
        .with_description("Thank you for reaching out. I'll get back to you soon."))
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

#[cfg(test)]
mod tests {
    use super::looks_like_email;

    #[test]
    fn email_shape_check() {
        assert!(looks_like_email("ada@example.com"));
        assert!(looks_like_email("a.b+c@mail.example.org"));
        assert!(!looks_like_email("ada.example.com"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("ada@localhost"));
        assert!(!looks_like_email("ada@@example.com"));
        assert!(!looks_like_email("ada @example.com"));
    }
}
