//! UI/backend events and error modeling for the portfolio viewer.

use server_api::SkillGroup;
use shared::{
    domain::ProfileSettings,
    error::{ApiError, ErrorCode},
    protocol::Toast,
};

pub enum UiEvent {
    ProfileLoaded(ProfileSettings),
    SkillsLoaded(Vec<SkillGroup>),
    Toast(Toast),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadContent,
    SubmitContact,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_api(context: UiErrorContext, err: &ApiError) -> Self {
        let category = match err.code {
            ErrorCode::Validation => UiErrorCategory::Validation,
            ErrorCode::Upstream => UiErrorCategory::Transport,
            _ => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: err.message.clone(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("invalid")
            || lower.contains("required")
            || lower.contains("too long")
        {
            UiErrorCategory::Validation
        } else if lower.contains("timeout")
            || lower.contains("connection")
            || lower.contains("unavailable")
            || lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The destructive toast shown for this error.
    pub fn toast(&self) -> Toast {
        let title = match self.context {
            UiErrorContext::BackendStartup => "Backend unavailable",
            UiErrorContext::LoadContent => "Could not load content",
            UiErrorContext::SubmitContact => "Error",
            UiErrorContext::General => "Something went wrong",
        };
        Toast::error(title, self.message.clone())
    }
}
