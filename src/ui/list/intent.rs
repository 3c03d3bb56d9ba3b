use crate::api::{MovieId, PageResult, SortDirection, SortField, VoteCounts};
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum ListIntent {
    SetSortField(SortField),
    SetSortDirection(SortDirection),
    /// Request a 1-based page. Clamped to the known page range.
    SetPage(u32),
    /// Replace the title filter. A different filter starts again from page 1.
    SetTitleFilter(String),
    ClearTitleFilter,
    FetchStarted {
        generation: u64,
    },
    FetchSucceeded {
        generation: u64,
        page: PageResult,
    },
    FetchFailed {
        generation: u64,
        detail: String,
    },
    /// Authoritative counts for one movie after a vote.
    CountsRefreshed {
        movie_id: MovieId,
        counts: VoteCounts,
    },
    /// Business-rule rejection; opens the error dialog.
    VoteRejected {
        description: String,
    },
    DismissError,
    Notice(String),
    ClearNotice,
}

impl Intent for ListIntent {}
