use std::collections::HashMap;

use crate::api::{MovieId, VoteKind, VoteRecord};

/// The signed-in user's votes, keyed by movie.
///
/// Holds at most one entry per movie; a missing entry means no opinion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteCache {
    entries: HashMap<MovieId, VoteKind>,
}

impl VoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, movie_id: MovieId) -> Option<VoteKind> {
        self.entries.get(&movie_id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace every entry with the server's list of votes.
    ///
    /// Records without a movie id or a type carry no opinion and are skipped.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = VoteRecord>) {
        self.entries = records
            .into_iter()
            .filter_map(|record| Some((record.movie_id?, record.vote_type?)))
            .collect();
    }

    /// Reconcile one movie from a vote mutation response.
    ///
    /// No vote object (or one without a type) removes the entry; otherwise the
    /// returned type replaces whatever was cached.
    pub fn reconcile(&mut self, movie_id: MovieId, response: Option<&VoteRecord>) {
        match response.and_then(|record| record.vote_type) {
            Some(kind) => {
                self.entries.insert(movie_id, kind);
            }
            None => {
                self.entries.remove(&movie_id);
            }
        }
    }
}
