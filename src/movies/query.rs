use crate::api::{MovieListRequest, SortDirection, SortField, UserId};
use crate::config::ListingConfig;

/// Which movies a list screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListScope {
    /// Every movie, searchable by title.
    #[default]
    Global,
    /// Movies submitted by one user.
    Owner { owner_id: UserId },
}

/// User-facing list parameters. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub page: u32,
    pub title: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
            page: 1,
            title: String::new(),
        }
    }
}

impl ListQuery {
    pub fn from_config(listing: &ListingConfig) -> Self {
        Self {
            sort_field: listing.sort_field,
            sort_direction: listing.sort_direction,
            ..Self::default()
        }
    }

    /// Translate into the service's zero-based request for `scope`.
    ///
    /// The title filter is only sent for the global scope; blank filters are
    /// never sent.
    pub fn to_request(&self, scope: &ListScope, page_size: u32) -> MovieListRequest {
        let title = match scope {
            ListScope::Global => Some(self.title.trim().to_string()).filter(|t| !t.is_empty()),
            ListScope::Owner { .. } => None,
        };
        MovieListRequest {
            sort_field: self.sort_field,
            sort_direction: self.sort_direction,
            page_index: self.page.saturating_sub(1),
            size: page_size,
            title,
        }
    }
}
