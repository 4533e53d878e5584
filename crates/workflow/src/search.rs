//! Search-and-select workflow.
//!
//! Lets the user locate a firm through the directory service and choose
//! among candidates. Screen states move `Searching -> Selecting ->
//! Configuring`, with back-transitions that clear all downstream state.

use growlaw_client::DirectoryApi;
use growlaw_model::{Firm, Place, SearchQuery};

/// Notice shown when a search returns zero candidates.
pub const NO_RESULTS_NOTICE: &str = "No law firms found. Try a different name or location.";

const BLANK_QUERY_MESSAGE: &str = "Enter a law firm name";
const SEARCH_FALLBACK: &str = "Failed to search for law firms";

/// Which screen the search flow is on.
#[derive(Debug, Clone)]
pub enum SearchStage {
    /// The search form, no candidates yet.
    Searching,
    /// A candidate list is shown, awaiting a pick.
    Selecting { candidates: Vec<Place> },
    /// A firm has been selected and is being configured.
    Configuring { firm: Firm },
}

/// State machine driving firm search and selection.
pub struct SearchWorkflow<D> {
    api: D,
    stage: SearchStage,
    searched_location: Option<String>,
    notice: Option<&'static str>,
    error: Option<String>,
}

impl<D: DirectoryApi> SearchWorkflow<D> {
    pub fn new(api: D) -> Self {
        Self {
            api,
            stage: SearchStage::Searching,
            searched_location: None,
            notice: None,
            error: None,
        }
    }

    pub fn stage(&self) -> &SearchStage {
        &self.stage
    }

    /// Zero-result notice, if the last search came back empty.
    pub fn notice(&self) -> Option<&str> {
        self.notice
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Run a directory search.
    ///
    /// A blank query is a validation error and issues no request. An empty
    /// result set surfaces a notice and stays on the search form. A failed
    /// request surfaces the server's message (generic fallback otherwise)
    /// and leaves the prior state untouched.
    pub async fn search(&mut self, query: &str, location: Option<&str>) {
        self.notice = None;
        self.error = None;

        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.error = Some(BLANK_QUERY_MESSAGE.to_string());
            return;
        }

        let mut search = SearchQuery::new(trimmed);
        if let Some(location) = location {
            search = search.with_location(location);
        }

        match self.api.search_firms(&search).await {
            Ok(response) if response.results.is_empty() => {
                self.notice = Some(NO_RESULTS_NOTICE);
            }
            Ok(response) => {
                self.searched_location = location.map(str::to_string);
                self.stage = SearchStage::Selecting {
                    candidates: response.results,
                };
            }
            Err(err) => {
                self.error = Some(err.user_message(SEARCH_FALLBACK));
            }
        }
    }

    /// Pick a candidate by place id.
    ///
    /// Maps the candidate to a fresh `Firm` and discards the candidate list;
    /// returning to the list requires a new search. Returns false when the
    /// id is unknown or no list is shown.
    pub fn select(&mut self, place_id: &str) -> bool {
        let SearchStage::Selecting { candidates } = &self.stage else {
            return false;
        };
        let Some(place) = candidates.iter().find(|p| p.place_id == place_id) else {
            return false;
        };

        let firm = Firm::from_place(place, self.searched_location.as_deref());
        self.stage = SearchStage::Configuring { firm };
        true
    }

    /// Return to the search form, clearing all downstream state.
    pub fn back(&mut self) {
        self.stage = SearchStage::Searching;
        self.searched_location = None;
        self.notice = None;
        self.error = None;
    }

    pub fn firm(&self) -> Option<&Firm> {
        match &self.stage {
            SearchStage::Configuring { firm } => Some(firm),
            _ => None,
        }
    }

    pub fn firm_mut(&mut self) -> Option<&mut Firm> {
        match &mut self.stage {
            SearchStage::Configuring { firm } => Some(firm),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growlaw_client::ApiError;
    use growlaw_model::{CitySearchResponse, Coordinates, SearchResponse};
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct FakeDirectory {
        responses: Mutex<VecDeque<Result<SearchResponse, ApiError>>>,
    }

    impl FakeDirectory {
        fn with(responses: Vec<Result<SearchResponse, ApiError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    impl DirectoryApi for FakeDirectory {
        async fn search_firms(
            &self,
            _query: &SearchQuery,
        ) -> Result<SearchResponse, ApiError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected search request")
        }

        async fn search_city(&self, _city: &str) -> Result<CitySearchResponse, ApiError> {
            unreachable!("city search not used by this workflow")
        }

        async fn place_details(&self, _place_id: &str) -> Result<Place, ApiError> {
            unreachable!("place details not used by this workflow")
        }
    }

    fn place(id: &str, name: &str) -> Place {
        Place {
            place_id: id.to_string(),
            name: name.to_string(),
            address: "1 Main St".to_string(),
            location: Coordinates {
                latitude: 0.0,
                longitude: 0.0,
            },
            google_maps_url: String::new(),
            website: None,
            phone_number: None,
            types: Vec::new(),
            osm_type: None,
            osm_id: None,
        }
    }

    fn one_result(id: &str, name: &str) -> SearchResponse {
        SearchResponse {
            results: vec![place(id, name)],
            total_results: 1,
        }
    }

    #[tokio::test]
    async fn blank_query_never_hits_the_network() {
        let mut flow = SearchWorkflow::new(FakeDirectory::with(vec![]));
        flow.search("   ", None).await;
        assert_eq!(flow.error(), Some("Enter a law firm name"));
        assert!(matches!(flow.stage(), SearchStage::Searching));
    }

    #[tokio::test]
    async fn empty_results_show_notice_and_stay_searching() {
        let api = FakeDirectory::with(vec![Ok(SearchResponse {
            results: vec![],
            total_results: 0,
        })]);
        let mut flow = SearchWorkflow::new(api);
        flow.search("Acme Law", None).await;
        assert_eq!(flow.notice(), Some(NO_RESULTS_NOTICE));
        assert!(matches!(flow.stage(), SearchStage::Searching));
        assert_eq!(flow.error(), None);
    }

    #[tokio::test]
    async fn failed_search_surfaces_server_message() {
        let api = FakeDirectory::with(vec![Err(ApiError::Server {
            status: 503,
            message: "Places provider unavailable".to_string(),
        })]);
        let mut flow = SearchWorkflow::new(api);
        flow.search("Acme Law", None).await;
        assert_eq!(flow.error(), Some("Places provider unavailable"));
        assert!(matches!(flow.stage(), SearchStage::Searching));
    }

    #[tokio::test]
    async fn transport_error_uses_fallback_message() {
        let api = FakeDirectory::with(vec![Err(ApiError::Connection("refused".to_string()))]);
        let mut flow = SearchWorkflow::new(api);
        flow.search("Acme Law", None).await;
        assert_eq!(flow.error(), Some("Failed to search for law firms"));
    }

    #[tokio::test]
    async fn selecting_a_candidate_builds_a_default_firm() {
        let api = FakeDirectory::with(vec![Ok(one_result("p1", "Acme Law"))]);
        let mut flow = SearchWorkflow::new(api);
        flow.search("Acme Law", Some("Chicago, IL")).await;
        assert!(matches!(flow.stage(), SearchStage::Selecting { .. }));

        assert!(flow.select("p1"));
        let firm = flow.firm().unwrap();
        assert_eq!(firm.name, "Acme Law");
        assert_eq!(firm.practice_area, "General Practice");
        assert_eq!(firm.location, "Chicago, IL");
        assert!(firm.keywords.is_empty());
    }

    #[tokio::test]
    async fn double_toggle_restores_empty_keywords() {
        let api = FakeDirectory::with(vec![Ok(one_result("p1", "Acme Law"))]);
        let mut flow = SearchWorkflow::new(api);
        flow.search("Acme Law", None).await;
        flow.select("p1");

        let firm = flow.firm_mut().unwrap();
        firm.toggle_keyword("Dairy Farming");
        firm.toggle_keyword("Dairy Farming");
        assert!(flow.firm().unwrap().keywords.is_empty());
    }

    #[tokio::test]
    async fn select_with_unknown_id_is_refused() {
        let api = FakeDirectory::with(vec![Ok(one_result("p1", "Acme Law"))]);
        let mut flow = SearchWorkflow::new(api);
        flow.search("Acme Law", None).await;
        assert!(!flow.select("nope"));
        assert!(matches!(flow.stage(), SearchStage::Selecting { .. }));
    }

    #[tokio::test]
    async fn back_clears_downstream_state() {
        let api = FakeDirectory::with(vec![Ok(one_result("p1", "Acme Law"))]);
        let mut flow = SearchWorkflow::new(api);
        flow.search("Acme Law", Some("Chicago, IL")).await;
        flow.select("p1");
        assert!(flow.firm().is_some());

        flow.back();
        assert!(matches!(flow.stage(), SearchStage::Searching));
        assert!(flow.firm().is_none());
        assert_eq!(flow.error(), None);
        assert_eq!(flow.notice(), None);
    }
}
