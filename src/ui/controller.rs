//! View Controller shared by the global and per-owner list screens.
//!
//! Parameter changes go through the reducer; when the effective query
//! changes the controller re-fetches immediately. Vote and edit actions are
//! routed to their components and their results fed back as intents.

use crate::api::{ApiClient, Movie, MovieId, SortDirection, SortField, VoteKind};
use crate::config::ListingConfig;
use crate::movies::{
    EditError, FetchCompletion, ListQuery, ListScope, MovieDraft, MovieListFetcher, PendingFetch,
};
use crate::session::SessionContext;
use crate::ui::list::{ListIntent, ListReducer, ListViewState};
use crate::ui::mvi::Reducer;
use crate::ui::pagination::PaginationControls;
use crate::votes::{VoteError, VoteMutator, VoteOutcome};

pub struct ListController {
    fetcher: MovieListFetcher,
    state: ListViewState,
}

impl ListController {
    pub fn new(scope: ListScope, listing: &ListingConfig) -> Self {
        Self::with_query(scope, listing, ListQuery::from_config(listing))
    }

    pub fn with_query(scope: ListScope, listing: &ListingConfig, query: ListQuery) -> Self {
        Self {
            fetcher: MovieListFetcher::new(scope, listing.page_size),
            state: ListViewState::new(query, listing.discard_stale_responses),
        }
    }

    pub fn scope(&self) -> &ListScope {
        self.fetcher.scope()
    }

    pub fn state(&self) -> &ListViewState {
        &self.state
    }

    pub fn dispatch(&mut self, intent: ListIntent) {
        let state = std::mem::take(&mut self.state);
        self.state = ListReducer::reduce(state, intent);
    }

    pub fn pagination(&self) -> Option<PaginationControls> {
        PaginationControls::new(self.state.query.page, self.state.total_pages())
    }

    /// Issue a fetch for the current query and enter `Pending`.
    pub fn begin_fetch(&mut self) -> PendingFetch {
        let pending = self.fetcher.begin(&self.state.query);
        self.dispatch(ListIntent::FetchStarted {
            generation: pending.generation(),
        });
        pending
    }

    pub fn complete_fetch(&mut self, completion: FetchCompletion) {
        let FetchCompletion { generation, result } = completion;
        if !self.state.accepts(generation) {
            tracing::debug!(
                generation,
                latest = self.state.latest_generation,
                "Discarding stale movie list response"
            );
            return;
        }
        match result {
            Ok(page) => self.dispatch(ListIntent::FetchSucceeded { generation, page }),
            Err(err) => {
                tracing::warn!(generation, error = %err, "Error fetching movies");
                self.dispatch(ListIntent::FetchFailed {
                    generation,
                    detail: err.to_string(),
                });
            }
        }
    }

    pub async fn refresh(&mut self, api: &ApiClient) {
        let pending = self.begin_fetch();
        let completion = pending.run(api).await;
        self.complete_fetch(completion);
    }

    /// Manual retry after a failed fetch.
    pub async fn retry(&mut self, api: &ApiClient) {
        self.refresh(api).await;
    }

    pub async fn set_sort_field(&mut self, api: &ApiClient, field: SortField) {
        self.change_query(api, ListIntent::SetSortField(field)).await;
    }

    pub async fn set_sort_direction(&mut self, api: &ApiClient, direction: SortDirection) {
        self.change_query(api, ListIntent::SetSortDirection(direction)).await;
    }

    pub async fn go_to_page(&mut self, api: &ApiClient, page: u32) {
        self.change_query(api, ListIntent::SetPage(page)).await;
    }

    pub async fn set_title_filter(&mut self, api: &ApiClient, title: impl Into<String>) {
        self.change_query(api, ListIntent::SetTitleFilter(title.into())).await;
    }

    pub async fn clear_title_filter(&mut self, api: &ApiClient) {
        self.change_query(api, ListIntent::ClearTitleFilter).await;
    }

    async fn change_query(&mut self, api: &ApiClient, intent: ListIntent) {
        let before = self.state.query.clone();
        self.dispatch(intent);
        if self.state.query != before {
            self.refresh(api).await;
        }
    }

    /// Toggle a vote and splice the refreshed counts into the list.
    ///
    /// Business-rule rejections open the error dialog and leave counts
    /// untouched; other failures are logged and surfaced as a notice.
    pub async fn vote(
        &mut self,
        api: &ApiClient,
        session: &mut SessionContext,
        movie_id: MovieId,
        kind: VoteKind,
    ) -> Result<VoteOutcome, VoteError> {
        let result = VoteMutator::new(api).submit(session, movie_id, kind).await;
        if result.is_ok() {
            self.dispatch(ListIntent::ClearNotice);
        }
        match &result {
            Ok(VoteOutcome::Applied {
                counts: Some(counts),
                ..
            }) => self.dispatch(ListIntent::CountsRefreshed {
                movie_id,
                counts: *counts,
            }),
            Ok(VoteOutcome::Applied { counts: None, .. }) => {}
            Ok(VoteOutcome::Rejected { description }) => {
                self.dispatch(ListIntent::VoteRejected {
                    description: description.clone(),
                });
            }
            Err(VoteError::NotSignedIn) => {}
            Err(VoteError::Api(err)) => self.dispatch(ListIntent::Notice(format!(
                "Vote failed: {}",
                err.user_message()
            ))),
        }
        result
    }

    /// Submit a new movie, then re-fetch the whole list.
    pub async fn create_movie(
        &mut self,
        api: &ApiClient,
        session: &SessionContext,
        draft: &MovieDraft,
    ) -> Result<Movie, EditError> {
        if !session.has_credential() {
            return Err(EditError::NotSignedIn);
        }
        let request = draft.validate()?;
        let movie = api.create_movie(&request).await.map_err(|err| {
            tracing::warn!(error = %err, "Error creating movie");
            EditError::from(err)
        })?;
        tracing::info!(movie_id = movie.id, "Movie created");
        self.refresh(api).await;
        Ok(movie)
    }

    /// Edit one of the signed-in user's movies, then re-fetch the whole list.
    ///
    /// Ownership is checked against the listed movie, or against a fresh
    /// `GET /movies/{id}` when the movie is not on the current page.
    pub async fn edit_movie(
        &mut self,
        api: &ApiClient,
        session: &SessionContext,
        movie_id: MovieId,
        draft: &MovieDraft,
    ) -> Result<Movie, EditError> {
        if !session.has_credential() {
            return Err(EditError::NotSignedIn);
        }
        let owned = match self.state.movie(movie_id) {
            Some(movie) => session.owns(movie),
            None => {
                let movie = api.movie(movie_id).await.map_err(|err| {
                    tracing::warn!(movie_id, error = %err, "Error loading movie for edit");
                    EditError::from(err)
                })?;
                session.owns(&movie)
            }
        };
        if !owned {
            return Err(EditError::NotOwner);
        }
        let request = draft.validate()?;
        let movie = api.update_movie(movie_id, &request).await.map_err(|err| {
            tracing::warn!(movie_id, error = %err, "Error editing movie");
            EditError::from(err)
        })?;
        self.refresh(api).await;
        Ok(movie)
    }

    pub fn dismiss_error(&mut self) {
        self.dispatch(ListIntent::DismissError);
    }
}
