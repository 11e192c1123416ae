use log::info;

use crate::model::{ids::PlayerHandle, player::PlayerProfile};

use super::{
    async_data::{AsyncData, LoadState},
    navigation::{NavigationIntent, Route},
    PlayerSource,
};

#[derive(Debug, PartialEq)]
pub enum ProfileState<'a> {
    Loading,
    Ready(&'a PlayerProfile),
    NotFound,
    Failed(&'a str),
}

pub struct ProfileController {
    handle: Option<PlayerHandle>,
    profile: AsyncData<Option<PlayerProfile>>,
}

impl ProfileController {
    pub fn new() -> Self {
        Self {
            handle: None,
            profile: AsyncData::new(),
        }
    }

    /// Drops whatever was shown before and starts loading `handle`.
    pub fn activate(&mut self, source: &dyn PlayerSource, handle: PlayerHandle) {
        info!("Opening profile of {}", handle);
        let responder = self.profile.begin();
        self.handle = Some(handle.clone());
        source.fetch_profile(handle, responder);
    }

    pub fn poll(&mut self) -> bool {
        self.profile.try_update()
    }

    pub fn handle(&self) -> Option<&PlayerHandle> {
        self.handle.as_ref()
    }

    pub fn state(&self) -> ProfileState<'_> {
        match self.profile.state() {
            LoadState::Loading => ProfileState::Loading,
            LoadState::Ready(Some(profile)) => ProfileState::Ready(profile),
            LoadState::Ready(None) => ProfileState::NotFound,
            LoadState::Failed(message) => ProfileState::Failed(message),
        }
    }

    pub fn back(&self) -> NavigationIntent {
        NavigationIntent::Open(Route::List)
    }
}

impl Default for ProfileController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{controller::testing::ScriptedSource, service::data_manager::DataRetrievalError};

    fn handle(name: &str) -> PlayerHandle {
        PlayerHandle::new(name).unwrap()
    }

    fn record(name: &str) -> PlayerProfile {
        PlayerProfile::new(handle(name))
    }

    #[test]
    fn resolves_to_record() {
        let source = ScriptedSource::default();
        let mut profile = ProfileController::new();
        profile.activate(&source, handle("magnuscarlsen"));
        assert_eq!(profile.state(), ProfileState::Loading);

        source.take_profile("magnuscarlsen").send(Ok(Some(record("magnuscarlsen"))));
        assert!(profile.poll());
        assert_eq!(profile.state(), ProfileState::Ready(&record("magnuscarlsen")));
    }

    #[test]
    fn empty_result_is_not_found_not_failure() {
        let source = ScriptedSource::default();
        let mut profile = ProfileController::new();
        profile.activate(&source, handle("unknownhandle"));
        source.take_profile("unknownhandle").send(Ok(None));
        profile.poll();
        assert_eq!(profile.state(), ProfileState::NotFound);
    }

    #[test]
    fn transport_error_is_failure() {
        let source = ScriptedSource::default();
        let mut profile = ProfileController::new();
        profile.activate(&source, handle("hikaru"));
        source.take_profile("hikaru").send(Err(DataRetrievalError::Abandoned));
        profile.poll();
        assert!(matches!(profile.state(), ProfileState::Failed(_)));
    }

    #[test]
    fn late_response_for_previous_handle_is_ignored() {
        let source = ScriptedSource::default();
        let mut profile = ProfileController::new();
        profile.activate(&source, handle("alice"));
        profile.activate(&source, handle("bob"));
        assert_eq!(profile.handle(), Some(&handle("bob")));

        source.take_profile("bob").send(Ok(Some(record("bob"))));
        source.take_profile("alice").send(Ok(Some(record("alice"))));
        profile.poll();
        assert_eq!(profile.state(), ProfileState::Ready(&record("bob")));
    }

    #[test]
    fn early_response_for_previous_handle_is_ignored() {
        let source = ScriptedSource::default();
        let mut profile = ProfileController::new();
        profile.activate(&source, handle("alice"));
        profile.activate(&source, handle("bob"));

        source.take_profile("alice").send(Ok(Some(record("alice"))));
        profile.poll();
        assert_eq!(profile.state(), ProfileState::Loading);

        source.take_profile("bob").send(Ok(None));
        profile.poll();
        assert_eq!(profile.state(), ProfileState::NotFound);
    }

    #[test]
    fn reactivation_hides_previous_record() {
        let source = ScriptedSource::default();
        let mut profile = ProfileController::new();
        profile.activate(&source, handle("alice"));
        source.take_profile("alice").send(Ok(Some(record("alice"))));
        profile.poll();

        profile.activate(&source, handle("bob"));
        assert_eq!(profile.state(), ProfileState::Loading);
    }

    #[test]
    fn back_returns_to_list() {
        assert_eq!(ProfileController::new().back(), NavigationIntent::Open(Route::List));
    }
}
