use log::{debug, info};

use crate::model::{ids::PlayerHandle, roster::Roster};

use super::{
    async_data::{AsyncData, LoadState},
    navigation::{NavigationIntent, Route},
    paginator::{self, Paginator, PAGE_SIZE},
    PlayerSource,
};

/// Roster fetch plus client-side pagination and a row cursor on the visible page.
pub struct ListController {
    roster: AsyncData<Roster>,
    current_page: usize,
    selected: usize,
}

impl ListController {
    pub fn new() -> Self {
        Self {
            roster: AsyncData::new(),
            current_page: 1,
            selected: 0,
        }
    }

    pub fn activate(&mut self, source: &dyn PlayerSource) {
        self.current_page = 1;
        self.selected = 0;
        source.fetch_roster(self.roster.begin());
    }

    pub fn poll(&mut self) -> bool {
        if !self.roster.try_update() {
            return false;
        }
        if let Some(message) = self.roster.error() {
            info!("Roster failed: {}", message);
        } else if let Some(roster) = self.roster.get_data() {
            info!("Roster ready with {} entries", roster.len());
            self.current_page = 1;
            self.selected = 0;
        }
        true
    }

    pub fn state(&self) -> &LoadState<Roster> {
        self.roster.state()
    }

    fn entries(&self) -> &[PlayerHandle] {
        self.roster.get_data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.entries().len()
    }

    pub fn total_pages(&self) -> usize {
        paginator::total_pages(self.total(), PAGE_SIZE)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.current_page, self.total_pages())
    }

    /// Zero-based index of the first visible entry.
    pub fn page_start(&self) -> usize {
        paginator::page_bounds(self.current_page, PAGE_SIZE, self.total()).start
    }

    pub fn visible(&self) -> &[PlayerHandle] {
        &self.entries()[paginator::page_bounds(self.current_page, PAGE_SIZE, self.total())]
    }

    pub fn summary(&self) -> Option<String> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let start = self.page_start();
        Some(format!(
            "Showing {}-{} of {} grandmasters",
            start + 1,
            (start + PAGE_SIZE).min(total),
            total
        ))
    }

    /// Jumps to `target`, clamped into the valid page range. Never re-fetches.
    pub fn set_page(&mut self, target: usize) {
        let clamped = target.clamp(1, self.total_pages().max(1));
        if clamped != target {
            debug!("Page {} out of range, clamped to {}", target, clamped);
        }
        self.current_page = clamped;
        self.selected = 0;
    }

    pub fn next_page(&mut self) {
        if let Some(target) = self.paginator().next() {
            self.set_page(target);
        }
    }

    pub fn previous_page(&mut self) {
        if let Some(target) = self.paginator().previous() {
            self.set_page(target);
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&PlayerHandle> {
        self.visible().get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible().len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn activate_row(&self, handle: &PlayerHandle) -> NavigationIntent {
        NavigationIntent::Open(Route::Profile(handle.clone()))
    }

    pub fn activate_selected(&self) -> Option<NavigationIntent> {
        self.selected().map(|handle| self.activate_row(handle))
    }
}

impl Default for ListController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        controller::testing::{handles, ScriptedSource},
        service::data_manager::DataRetrievalError,
    };

    fn ready_with(count: usize) -> ListController {
        let source = ScriptedSource::default();
        let mut list = ListController::new();
        list.activate(&source);
        source.take_roster().send(Ok(handles(count)));
        assert!(list.poll());
        list
    }

    fn names(list: &ListController) -> Vec<&str> {
        list.visible().iter().map(|h| h.as_str()).collect()
    }

    #[test]
    fn loading_until_roster_arrives() {
        let source = ScriptedSource::default();
        let mut list = ListController::new();
        list.activate(&source);
        assert_eq!(list.state(), &LoadState::Loading);
        assert!(!list.poll());
        assert_eq!(list.summary(), None);
        assert!(list.visible().is_empty());
    }

    #[test]
    fn roster_of_45_has_three_pages() {
        let mut list = ready_with(45);
        assert_eq!(list.total_pages(), 3);
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.visible().len(), 20);
        assert_eq!(list.visible()[0].as_str(), "player1");
        assert_eq!(list.visible()[19].as_str(), "player20");
        assert_eq!(list.summary().as_deref(), Some("Showing 1-20 of 45 grandmasters"));

        list.set_page(3);
        assert_eq!(names(&list), ["player41", "player42", "player43", "player44", "player45"]);
        assert_eq!(list.summary().as_deref(), Some("Showing 41-45 of 45 grandmasters"));
    }

    #[test]
    fn page_change_never_touches_roster() {
        let mut list = ready_with(45);
        list.next_page();
        assert_eq!(list.current_page(), 2);
        list.previous_page();
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.total(), 45);
        assert_eq!(list.state(), &LoadState::Ready(handles(45)));
    }

    #[test]
    fn out_of_range_targets_are_clamped() {
        let mut list = ready_with(45);
        list.set_page(9);
        assert_eq!(list.current_page(), 3);
        list.set_page(0);
        assert_eq!(list.current_page(), 1);
    }

    #[test]
    fn affordances_stop_at_the_edges() {
        let mut list = ready_with(45);
        list.previous_page();
        assert_eq!(list.current_page(), 1);
        list.set_page(3);
        list.next_page();
        assert_eq!(list.current_page(), 3);
    }

    #[test]
    fn empty_roster_has_no_summary_and_one_display_page() {
        let mut list = ready_with(0);
        assert_eq!(list.total_pages(), 0);
        assert_eq!(list.summary(), None);
        assert_eq!(list.paginator().indicator(), "1 of 1");
        list.next_page();
        list.set_page(5);
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.activate_selected(), None);
    }

    #[test]
    fn failure_is_kept_as_message() {
        let source = ScriptedSource::default();
        let mut list = ListController::new();
        list.activate(&source);
        source.take_roster().send(Err(DataRetrievalError::Abandoned));
        list.poll();
        assert!(matches!(list.state(), LoadState::Failed(_)));
        assert!(list.visible().is_empty());
    }

    #[test]
    fn row_activation_emits_profile_intent() {
        let mut list = ready_with(45);
        list.set_page(2);
        list.select_next();
        list.select_next();
        assert_eq!(list.selected().map(|h| h.as_str()), Some("player23"));
        assert_eq!(
            list.activate_selected(),
            Some(NavigationIntent::Open(Route::parse("/profile/player23").unwrap()))
        );
    }

    #[test]
    fn cursor_stays_on_the_visible_page() {
        let mut list = ready_with(45);
        list.set_page(3);
        for _ in 0..10 {
            list.select_next();
        }
        assert_eq!(list.selected_index(), 4);
        list.next_page();
        assert_eq!(list.selected_index(), 4);
        list.previous_page();
        assert_eq!(list.selected_index(), 0);
        list.select_previous();
        assert_eq!(list.selected_index(), 0);
    }

    #[test]
    fn reactivation_resets_to_first_page() {
        let source = ScriptedSource::default();
        let mut list = ListController::new();
        list.activate(&source);
        source.take_roster().send(Ok(handles(45)));
        list.poll();
        list.set_page(3);

        list.activate(&source);
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.state(), &LoadState::Loading);
        source.take_roster().send(Ok(handles(5)));
        list.poll();
        assert_eq!(list.total_pages(), 1);
    }
}
