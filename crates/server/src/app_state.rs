use navigation::SectionSequence;
use server_api::ApiContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) sections: SectionSequence,
}

impl AppState {
    pub(crate) fn new(api: ApiContext) -> Self {
        Self {
            api,
            sections: SectionSequence::portfolio(),
        }
    }
}
