//! Recording list: fetching, paging, filters and the dropdowns that feed them.

use super::Console;
use crate::api::RecordingsBackend;
use crate::dropdown::DropdownKind;
use crate::error::Result;
use crate::model::ListResponse;
use crate::state::{FilterState, ListQuery, RequestToken};
use crate::view::{ListView, ViewPatch, render_list};

/// A list request that has been issued but not yet completed
#[derive(Debug, Clone)]
pub struct PendingList {
    pub token: RequestToken,
    pub query: ListQuery,
}

impl<B: RecordingsBackend> Console<B> {
    /// Fetch and render the current page with the current filters
    pub async fn fetch_recordings(&mut self) -> Vec<ViewPatch> {
        let pending = self.begin_list_fetch();
        let result = self.backend.list(&pending.query).await;
        self.complete_list_fetch(pending.token, result)
    }

    /// Issue a list request for the current page and filters
    pub fn begin_list_fetch(&mut self) -> PendingList {
        PendingList {
            token: self.state.list_requests.issue(),
            query: self.state.list_query(),
        }
    }

    /// Render a completed list request.
    ///
    /// Completions of superseded requests are dropped without touching the view.
    pub fn complete_list_fetch(
        &mut self,
        token: RequestToken,
        result: Result<ListResponse>,
    ) -> Vec<ViewPatch> {
        if !self.state.list_requests.is_current(token) {
            crate::verbose!("Dropping stale list response {:?}", token);
            return Vec::new();
        }

        let patches = match result {
            Ok(response) => {
                crate::verbose!(
                    "Loaded {} recordings (previous: {}, next: {})",
                    response.recordings.len(),
                    response.has_previous,
                    response.has_next
                );
                let (list, pagination) = render_list(&response);
                vec![ViewPatch::List(list), ViewPatch::Pagination(pagination)]
            }
            Err(e) => {
                crate::failure!("Failed to fetch recordings", e);
                vec![ViewPatch::List(ListView::Error)]
            }
        };

        self.apply(patches)
    }

    pub(super) async fn next_page(&mut self) -> Vec<ViewPatch> {
        if !self.view.pagination.next_enabled {
            crate::verbose!("Next page is disabled");
            return Vec::new();
        }
        self.state.cursor.next();
        self.fetch_recordings().await
    }

    pub(super) async fn previous_page(&mut self) -> Vec<ViewPatch> {
        if !self.view.pagination.previous_enabled || !self.state.cursor.previous() {
            crate::verbose!("Previous page is disabled");
            return Vec::new();
        }
        self.fetch_recordings().await
    }

    pub(super) async fn submit_filters(&mut self) -> Vec<ViewPatch> {
        let filters = FilterState::from_selection(
            &self.dropdowns.selected(DropdownKind::DepartmentFilter),
            &self.dropdowns.selected(DropdownKind::LanguageFilter),
            &self.filename_input,
        );
        self.state.apply_filters(filters);
        self.fetch_recordings().await
    }

    pub(super) async fn clear_filters(&mut self) -> Vec<ViewPatch> {
        for kind in [DropdownKind::DepartmentFilter, DropdownKind::LanguageFilter] {
            if let Some(dropdown) = self.dropdowns.get_mut(kind) {
                dropdown.clear();
            }
        }
        if let Some(dropdown) = self.dropdowns.get_mut(DropdownKind::UploadLanguage) {
            dropdown.refresh_label();
        }
        self.filename_input.clear();
        self.state.apply_filters(FilterState::default());

        let mut patches = vec![ViewPatch::FilenameSearch(String::new())];
        patches.extend(
            [
                DropdownKind::DepartmentFilter,
                DropdownKind::LanguageFilter,
                DropdownKind::UploadLanguage,
            ]
            .into_iter()
            .filter_map(|kind| self.label_patch(kind)),
        );
        let mut applied = self.apply(patches);
        applied.extend(self.fetch_recordings().await);
        applied
    }

    pub(super) fn toggle_dropdown(&mut self, kind: DropdownKind) -> Vec<ViewPatch> {
        self.dropdowns.toggle(kind);
        let mut patches = vec![ViewPatch::DropdownOpen(self.dropdowns.open_menu())];
        patches.extend(self.label_patch(kind));
        self.apply(patches)
    }

    pub(super) fn set_option(
        &mut self,
        kind: DropdownKind,
        value: &str,
        checked: bool,
    ) -> Vec<ViewPatch> {
        let found = self
            .dropdowns
            .get_mut(kind)
            .is_some_and(|d| d.set_checked(value, checked));
        if !found {
            crate::verbose!("No option '{}' in {} dropdown", value, kind);
            return Vec::new();
        }
        let patches = self.label_patch(kind).into_iter().collect();
        self.apply(patches)
    }

    pub(super) fn click_outside(&mut self) -> Vec<ViewPatch> {
        self.dropdowns.close_all();
        self.apply(vec![ViewPatch::DropdownOpen(None)])
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{FakeBackend, ScriptedSurface, console, recording};
    use super::super::{Action, Console};
    use crate::dropdown::DropdownKind;
    use crate::model::ListResponse;
    use crate::state::FilterState;
    use crate::view::{LIST_ERROR, ListView, NO_RECORDINGS, ViewPatch};

    fn page(ids: &[&str], has_previous: bool, has_next: bool) -> ListResponse {
        ListResponse {
            recordings: ids.iter().map(|id| recording(id)).collect(),
            has_previous,
            has_next,
        }
    }

    async fn loaded(response: ListResponse) -> (Console<FakeBackend>, ScriptedSurface) {
        let backend = FakeBackend::new();
        backend.set_list(Some(response));
        let mut console = console(backend);
        let mut surface = ScriptedSurface::default();
        console.dispatch(Action::Refresh, &mut surface).await;
        (console, surface)
    }

    fn check(console: &mut Console<FakeBackend>, kind: DropdownKind, value: &str) {
        let patches = console.set_option(kind, value, true);
        assert_eq!(patches.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_list_renders_single_placeholder() {
        let (console, _) = loaded(ListResponse::default()).await;
        assert_eq!(console.view().list, ListView::Empty);
        assert_eq!(console.view().list.entry_count(), 1);
        assert_eq!(console.view().list.placeholder(), Some(NO_RECORDINGS));
    }

    #[tokio::test]
    async fn test_pagination_follows_backend_flags() {
        let (console, _) = loaded(page(&["1"], false, true)).await;
        assert!(!console.view().pagination.previous_enabled);
        assert!(console.view().pagination.next_enabled);

        let (console, _) = loaded(page(&["1"], true, false)).await;
        assert!(console.view().pagination.previous_enabled);
        assert!(!console.view().pagination.next_enabled);
    }

    #[tokio::test]
    async fn test_list_failure_renders_error_row() {
        let backend = FakeBackend::new();
        backend.set_list(None);
        let mut console = console(backend);
        let mut surface = ScriptedSurface::default();

        let patches = console.dispatch(Action::Refresh, &mut surface).await;

        assert_eq!(patches, vec![ViewPatch::List(ListView::Error)]);
        assert_eq!(console.view().list.placeholder(), Some(LIST_ERROR));
        assert!(surface.alerts.is_empty());
        assert_eq!(console.backend().list_queries().len(), 1);
    }

    #[tokio::test]
    async fn test_paging_keeps_filters_and_stays_above_one() {
        let (mut console, mut surface) = loaded(page(&["1", "2"], false, true)).await;
        check(&mut console, DropdownKind::DepartmentFilter, "Sales");
        console
            .dispatch(Action::SetFilenameSearch(" sync ".to_string()), &mut surface)
            .await;
        console.dispatch(Action::SubmitFilters, &mut surface).await;

        console.backend().set_list(Some(page(&["3"], true, true)));
        console.dispatch(Action::NextPage, &mut surface).await;
        assert_eq!(console.state().cursor.page(), 2);

        console.backend().set_list(Some(page(&["1"], false, true)));
        console.dispatch(Action::PreviousPage, &mut surface).await;
        assert_eq!(console.state().cursor.page(), 1);

        // previous is disabled on page 1
        console.dispatch(Action::PreviousPage, &mut surface).await;
        assert_eq!(console.state().cursor.page(), 1);

        let expected = FilterState {
            department: "Sales".to_string(),
            language: String::new(),
            filename: "sync".to_string(),
        };
        let queries = console.backend().list_queries();
        assert_eq!(
            queries.iter().map(|q| q.page).collect::<Vec<_>>(),
            vec![1, 1, 2, 1]
        );
        assert!(queries[1..].iter().all(|q| q.filters == expected));
    }

    #[tokio::test]
    async fn test_filter_submit_resets_page() {
        let (mut console, mut surface) = loaded(page(&["1"], false, true)).await;
        console.dispatch(Action::NextPage, &mut surface).await;
        console.dispatch(Action::NextPage, &mut surface).await;
        assert_eq!(console.state().cursor.page(), 3);

        check(&mut console, DropdownKind::LanguageFilter, "en");
        check(&mut console, DropdownKind::LanguageFilter, "de");
        console.dispatch(Action::SubmitFilters, &mut surface).await;

        assert_eq!(console.state().cursor.page(), 1);
        assert_eq!(console.state().filters.language, "en,de");
        let last = console.backend().list_queries().pop().unwrap();
        assert_eq!(last.page, 1);
        assert_eq!(last.filters.language, "en,de");
    }

    #[tokio::test]
    async fn test_clear_filters_resets_everything() {
        let (mut console, mut surface) = loaded(page(&["1"], false, true)).await;
        check(&mut console, DropdownKind::DepartmentFilter, "HR");
        check(&mut console, DropdownKind::UploadLanguage, "es");
        console
            .dispatch(Action::SetFilenameSearch("call".to_string()), &mut surface)
            .await;
        console.dispatch(Action::SubmitFilters, &mut surface).await;
        console.dispatch(Action::NextPage, &mut surface).await;

        console.dispatch(Action::ClearFilters, &mut surface).await;

        assert_eq!(console.state().filters, FilterState::default());
        assert_eq!(console.state().cursor.page(), 1);
        assert_eq!(console.filename_input(), "");
        assert_eq!(console.view().filename_search, "");
        assert!(console.dropdowns().selected(DropdownKind::DepartmentFilter).is_empty());
        assert_eq!(
            console.view().label(DropdownKind::DepartmentFilter),
            "Select Department"
        );
        // the upload form keeps its own selection
        assert_eq!(console.view().label(DropdownKind::UploadLanguage), "es");
        let last = console.backend().list_queries().pop().unwrap();
        assert_eq!(last.page, 1);
        assert_eq!(last.filters, FilterState::default());
    }

    #[tokio::test]
    async fn test_stale_list_response_is_dropped() {
        let (mut console, _) = loaded(page(&["1"], false, true)).await;

        let slow = console.begin_list_fetch();
        let fast = console.begin_list_fetch();

        let applied = console.complete_list_fetch(fast.token, Ok(page(&["new"], false, false)));
        assert_eq!(applied.len(), 2);

        let dropped = console.complete_list_fetch(slow.token, Ok(page(&["old"], true, true)));
        assert!(dropped.is_empty());
        assert_eq!(console.view().list.rows()[0].id.as_str(), "new");
        assert!(!console.view().pagination.next_enabled);
    }

    #[tokio::test]
    async fn test_dropdown_actions_update_labels_and_exclusion() {
        let (mut console, mut surface) = loaded(ListResponse::default()).await;

        console
            .dispatch(Action::ToggleDropdown(DropdownKind::Pattern), &mut surface)
            .await;
        assert_eq!(console.view().open_dropdown, Some(DropdownKind::Pattern));

        console
            .dispatch(
                Action::ToggleDropdown(DropdownKind::LanguageFilter),
                &mut surface,
            )
            .await;
        assert_eq!(console.view().open_dropdown, Some(DropdownKind::LanguageFilter));

        console
            .dispatch(
                Action::SetOption {
                    kind: DropdownKind::LanguageFilter,
                    value: "fr".to_string(),
                    checked: true,
                },
                &mut surface,
            )
            .await;
        assert_eq!(console.view().label(DropdownKind::LanguageFilter), "fr");

        console.dispatch(Action::ClickOutside, &mut surface).await;
        assert_eq!(console.view().open_dropdown, None);
        assert!(console.dropdowns().iter().all(|d| !d.is_open()));
    }
}
