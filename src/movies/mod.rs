//! Movie List Fetcher and movie submission forms.

mod draft;
mod fetcher;
mod query;

pub use draft::{DraftError, EditError, MovieDraft};
pub use fetcher::{FetchCompletion, MovieListFetcher, PendingFetch};
pub use query::{ListQuery, ListScope};
