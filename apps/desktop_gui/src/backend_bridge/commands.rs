//! Backend commands queued from UI to backend worker.

use shared::protocol::ContactFormRequest;

pub enum BackendCommand {
    LoadProfile,
    LoadSkills,
    SubmitContact(ContactFormRequest),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadProfile => "load_profile",
            BackendCommand::LoadSkills => "load_skills",
            BackendCommand::SubmitContact(_) => "submit_contact",
        }
    }
}
