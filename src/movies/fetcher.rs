use crate::api::{ApiClient, ApiError, MovieListRequest, PageResult};
use crate::movies::query::{ListQuery, ListScope};

/// Issues movie list reads for one scope.
///
/// Every fetch is tagged with a monotonically increasing generation so the
/// view can tell which completion belongs to the latest parameters.
#[derive(Debug)]
pub struct MovieListFetcher {
    scope: ListScope,
    page_size: u32,
    issued: u64,
}

/// A fetch that has been issued but not yet sent.
///
/// Owns everything it needs, so several may be in flight at once.
#[derive(Debug, Clone)]
pub struct PendingFetch {
    generation: u64,
    scope: ListScope,
    request: MovieListRequest,
}

/// Outcome of a [`PendingFetch`], still tagged with its generation.
#[derive(Debug)]
pub struct FetchCompletion {
    pub generation: u64,
    pub result: Result<PageResult, ApiError>,
}

impl MovieListFetcher {
    pub fn new(scope: ListScope, page_size: u32) -> Self {
        Self {
            scope,
            page_size: page_size.max(1),
            issued: 0,
        }
    }

    pub fn scope(&self) -> &ListScope {
        &self.scope
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Generation of the most recently issued fetch (0 before the first).
    pub fn latest_generation(&self) -> u64 {
        self.issued
    }

    pub fn begin(&mut self, query: &ListQuery) -> PendingFetch {
        self.issued += 1;
        PendingFetch {
            generation: self.issued,
            scope: self.scope,
            request: query.to_request(&self.scope, self.page_size),
        }
    }
}

impl PendingFetch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &MovieListRequest {
        &self.request
    }

    pub async fn run(self, api: &ApiClient) -> FetchCompletion {
        tracing::debug!(
            generation = self.generation,
            scope = ?self.scope,
            page = self.request.page_index,
            sort = %self.request.sort_field,
            direction = %self.request.sort_direction,
            "Fetching movies"
        );
        let result = match self.scope {
            ListScope::Global => api.list_movies(&self.request).await,
            ListScope::Owner { owner_id } => api.list_owner_movies(owner_id, &self.request).await,
        };
        FetchCompletion {
            generation: self.generation,
            result,
        }
    }
}
