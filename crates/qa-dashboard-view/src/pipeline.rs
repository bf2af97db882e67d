// crates/qa-dashboard-view/src/pipeline.rs
// ============================================================================
// Module: Agent Pipeline
// Description: Search, bucket filter, stable sort, and pagination.
// Purpose: Project the roster into the visible page on demand.
// Dependencies: qa-dashboard-core
// ============================================================================

//! ## Overview
//! The pipeline is recomputed from scratch for every render:
//! name search, then bucket filter, then a stable sort, then a page slice of
//! [`PAGE_SIZE`] rows. Nothing is cached between calls.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::fmt;

use qa_dashboard_core::AgentRecord;
use qa_dashboard_core::PerformanceBucket;
use qa_dashboard_core::matches_search;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

// ============================================================================
// SECTION: Sort Keys
// ============================================================================

/// Roster sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Name, ascending.
    #[default]
    Name,
    /// Overall score, descending.
    OverallScore,
    /// Error rate, ascending.
    ErrorRate,
    /// First-contact resolution, descending.
    Fcr,
}

impl SortKey {
    /// Every sort key in menu order.
    pub const ALL: [Self; 4] = [Self::Name, Self::OverallScore, Self::ErrorRate, Self::Fcr];

    /// Parses a key from its wire label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == label)
    }

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::OverallScore => "overallScore",
            Self::ErrorRate => "errorRate",
            Self::Fcr => "fcr",
        }
    }

    /// Orders two records under this key.
    #[must_use]
    pub fn compare(self, left: &AgentRecord, right: &AgentRecord) -> Ordering {
        match self {
            Self::Name => left.name.cmp(&right.name),
            Self::OverallScore => right.overall_score.total_cmp(&left.overall_score),
            Self::ErrorRate => left.metrics.error_rate.total_cmp(&right.metrics.error_rate),
            Self::Fcr => right.metrics.fcr.total_cmp(&left.metrics.fcr),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Pipeline Stages
// ============================================================================

/// Applies the name search and bucket filter, preserving roster order.
#[must_use]
pub fn filter_agents<'a>(
    agents: &'a [AgentRecord],
    search: &str,
    bucket: PerformanceBucket,
) -> Vec<&'a AgentRecord> {
    agents
        .iter()
        .filter(|agent| matches_search(&agent.name, search))
        .filter(|agent| bucket.contains(agent.overall_score))
        .collect()
}

/// Stable-sorts rows under `key`; ties keep their prior order.
pub fn sort_agents(rows: &mut [&AgentRecord], key: SortKey) {
    rows.sort_by(|left, right| key.compare(left, right));
}

/// Number of pages for `count` rows; zero rows yield zero pages.
#[must_use]
pub const fn page_count(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Clamps a one-based page number into `1..=pages` (1 when there are none).
#[must_use]
pub fn clamp_page(page: usize, pages: usize) -> usize {
    page.clamp(1, pages.max(1))
}

// ============================================================================
// SECTION: Page View
// ============================================================================

/// Visible slice of the filtered roster.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    /// Rows on this page.
    pub rows: Vec<&'a AgentRecord>,
    /// One-based current page.
    pub page: usize,
    /// Total pages (zero when nothing matched).
    pub total_pages: usize,
    /// Rows that passed search and filter.
    pub filtered: usize,
    /// Rows in the full roster.
    pub total: usize,
}

impl PageView<'_> {
    /// Returns true when a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Returns true when a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// One-based index of the first visible row, clamped to `filtered`.
    #[must_use]
    pub fn first_index(&self) -> usize {
        (self.page.saturating_sub(1) * PAGE_SIZE + 1).min(self.filtered)
    }

    /// One-based index of the last visible row, clamped to `filtered`.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.page.saturating_mul(PAGE_SIZE).min(self.filtered)
    }

    /// Range line, for example `Showing 1 - 10 of 11 agents`.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut line = format!(
            "Showing {} - {} of {} agents",
            self.first_index(),
            self.last_index(),
            self.filtered
        );
        if self.filtered != self.total {
            line.push_str(&format!(" (filtered from {} total)", self.total));
        }
        line
    }
}

/// Runs the full pipeline and slices page `page` (clamped).
#[must_use]
pub fn build_page<'a>(
    agents: &'a [AgentRecord],
    search: &str,
    bucket: PerformanceBucket,
    key: SortKey,
    page: usize,
) -> PageView<'a> {
    let mut rows = filter_agents(agents, search, bucket);
    sort_agents(&mut rows, key);
    let filtered = rows.len();
    let total_pages = page_count(filtered);
    let page = clamp_page(page, total_pages);
    let rows = rows.into_iter().skip((page - 1) * PAGE_SIZE).take(PAGE_SIZE).collect();
    PageView {
        rows,
        page,
        total_pages,
        filtered,
        total: agents.len(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
