//! Pagination control model.
//!
//! Exposes first / previous / current-1 / current / current+1 / next / last
//! affordances bounded by `[1, total_pages]`. Controls only produce a target
//! page; the list controller decides when to fetch.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControlKind {
    First,
    Previous,
    Before,
    Current,
    After,
    Next,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    pub kind: PageControlKind,
    /// Page this control leads to, already clamped into range.
    pub target: u32,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    current: u32,
    total_pages: u32,
    controls: Vec<PageControl>,
}

impl PaginationControls {
    /// Build controls for a 1-based `current` page. Returns `None` when
    /// there are no pages to navigate.
    pub fn new(current: u32, total_pages: u32) -> Option<Self> {
        if total_pages == 0 {
            return None;
        }
        let current = current.clamp(1, total_pages);
        let at_start = current <= 1;
        let at_end = current >= total_pages;
        let clamp = |page: u32| page.clamp(1, total_pages);

        let controls = vec![
            PageControl {
                kind: PageControlKind::First,
                target: 1,
                disabled: at_start,
            },
            PageControl {
                kind: PageControlKind::Previous,
                target: clamp(current - 1),
                disabled: at_start,
            },
            PageControl {
                kind: PageControlKind::Before,
                target: clamp(current - 1),
                disabled: at_start,
            },
            PageControl {
                kind: PageControlKind::Current,
                target: current,
                disabled: false,
            },
            PageControl {
                kind: PageControlKind::After,
                target: clamp(current + 1),
                disabled: at_end,
            },
            PageControl {
                kind: PageControlKind::Next,
                target: clamp(current + 1),
                disabled: at_end,
            },
            PageControl {
                kind: PageControlKind::Last,
                target: total_pages,
                disabled: at_end,
            },
        ];

        Some(Self {
            current,
            total_pages,
            controls,
        })
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn controls(&self) -> &[PageControl] {
        &self.controls
    }

    pub fn control(&self, kind: PageControlKind) -> Option<&PageControl> {
        self.controls.iter().find(|c| c.kind == kind)
    }

    pub fn is_disabled(&self, kind: PageControlKind) -> bool {
        self.control(kind).map_or(true, |c| c.disabled)
    }

    /// Target page of an enabled control.
    pub fn target(&self, kind: PageControlKind) -> Option<u32> {
        self.control(kind).filter(|c| !c.disabled).map(|c| c.target)
    }
}
