//! Plain-text rendering of list screens for the terminal.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::api::{Movie, VoteKind};
use crate::session::SessionContext;
use crate::ui::list::{FetchStatus, ListViewState};
use crate::ui::pagination::{PageControlKind, PaginationControls};

/// Relative age of a submission, e.g. "today" or "3 days ago".
pub fn days_ago(created: NaiveDate, today: NaiveDate) -> String {
    let days = (today - created).num_days();
    match days {
        i64::MIN..=0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        n => format!("{} days ago", n),
    }
}

pub fn render_card(movie: &Movie, session: &SessionContext, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", movie.id, movie.title);

    let owner = movie
        .owner
        .as_ref()
        .map(|o| o.full_name())
        .unwrap_or_else(|| "unknown".to_string());
    let age = movie
        .created_date
        .map(|created| format!(" {}", days_ago(created, today)))
        .unwrap_or_default();
    let _ = writeln!(out, "  Posted by {}{}", owner, age);

    if let Some(published) = movie.publication_date {
        let _ = writeln!(out, "  Publication date: {}", published.format("%Y-%m-%d"));
    }
    if !movie.description.is_empty() {
        let _ = writeln!(out, "  {}", movie.description);
    }

    let gate = if session.has_credential() {
        ""
    } else {
        "  (sign in to vote)"
    };
    let _ = writeln!(
        out,
        "  Like ({}) | Hate ({}){}",
        movie.likes_count, movie.hates_count, gate
    );

    match session.vote_for(movie.id) {
        Some(VoteKind::Like) => {
            let _ = writeln!(out, "  You like this movie | Unlike");
        }
        Some(VoteKind::Hate) => {
            let _ = writeln!(out, "  You hate this movie | Unhate");
        }
        None => {}
    }
    if session.owns(movie) {
        let _ = writeln!(out, "  [edit]");
    }
    out
}

/// One-line pagination. Neighbour page numbers that fall outside the range
/// are omitted; disabled arrows are shown in parentheses.
pub fn render_pagination(controls: &PaginationControls) -> String {
    controls
        .controls()
        .iter()
        .filter(|control| {
            !(control.disabled
                && matches!(control.kind, PageControlKind::Before | PageControlKind::After))
        })
        .map(|control| {
            let label = match control.kind {
                PageControlKind::First => "«".to_string(),
                PageControlKind::Previous => "‹".to_string(),
                PageControlKind::Next => "›".to_string(),
                PageControlKind::Last => "»".to_string(),
                PageControlKind::Current => format!("[{}]", control.target),
                PageControlKind::Before => (controls.current() - 1).to_string(),
                PageControlKind::After => (controls.current() + 1).to_string(),
            };
            if control.disabled {
                format!("({})", label)
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a whole list screen: cards, pagination, status and dialogs.
pub fn render_list(state: &ListViewState, session: &SessionContext, today: NaiveDate) -> String {
    let mut out = String::new();

    if let Some(description) = &state.error_modal {
        let _ = writeln!(out, "Error: {}\n", description);
    }

    match &state.status {
        FetchStatus::Idle | FetchStatus::Pending if state.movies.is_empty() => {
            let _ = writeln!(out, "Loading...");
        }
        _ => {}
    }

    if state.movies.is_empty() && state.status == FetchStatus::Succeeded {
        let _ = writeln!(out, "No movies found.");
    }

    for movie in &state.movies {
        out.push_str(&render_card(movie, session, today));
        out.push('\n');
    }

    if !state.movies.is_empty() {
        if let Some(controls) = PaginationControls::new(state.query.page, state.total_pages()) {
            let total = state.page_info.map(|i| i.total_elements).unwrap_or(0);
            let _ = writeln!(
                out,
                "{}   page {} of {} ({} movies)",
                render_pagination(&controls),
                controls.current(),
                controls.total_pages(),
                total
            );
        }
    }

    if let FetchStatus::Failed { message, .. } = &state.status {
        let _ = writeln!(out, "{} [Retry]", message);
    }
    if let Some(notice) = &state.notice {
        let _ = writeln!(out, "{}", notice);
    }
    out
}
