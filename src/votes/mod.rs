//! Vote Cache and Vote Mutator.

mod cache;
mod mutator;

pub use cache::VoteCache;
pub use mutator::{VoteError, VoteMutator, VoteOutcome};
