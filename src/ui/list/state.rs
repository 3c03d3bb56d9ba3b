use crate::api::{Movie, MovieId};
use crate::movies::ListQuery;
use crate::ui::mvi::UiState;

/// Shown while a list fetch is in the failed state.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch movies. Please try again later.";

/// Fetch lifecycle: `Idle → Pending → {Succeeded, Failed}`, back to
/// `Pending` on every parameter change or retry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed {
        message: String,
        /// Underlying error, for logs and verbose output.
        detail: String,
    },
}

impl FetchStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Page metadata reported with the last successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageInfo {
    /// 1-based.
    pub page: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListViewState {
    pub query: ListQuery,
    pub status: FetchStatus,
    /// Replaced wholesale on each successful fetch; kept on failure.
    pub movies: Vec<Movie>,
    pub page_info: Option<PageInfo>,
    /// Generation of the most recently started fetch.
    pub latest_generation: u64,
    /// Ignore completions from fetches older than `latest_generation`.
    pub discard_stale: bool,
    /// Business-rule rejection text shown in a dialog until dismissed.
    pub error_modal: Option<String>,
    /// Non-blocking message (e.g. a failed vote or edit).
    pub notice: Option<String>,
}

impl Default for ListViewState {
    fn default() -> Self {
        Self::new(ListQuery::default(), true)
    }
}

impl UiState for ListViewState {}

impl ListViewState {
    pub fn new(query: ListQuery, discard_stale: bool) -> Self {
        Self {
            query,
            status: FetchStatus::Idle,
            movies: Vec::new(),
            page_info: None,
            latest_generation: 0,
            discard_stale,
            error_modal: None,
            notice: None,
        }
    }

    pub fn movie(&self, movie_id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == movie_id)
    }

    pub fn total_pages(&self) -> u32 {
        self.page_info.map(|info| info.total_pages).unwrap_or(0)
    }

    /// Whether a completion tagged `generation` should be applied.
    pub fn accepts(&self, generation: u64) -> bool {
        !self.discard_stale || generation == self.latest_generation
    }
}
