//! Bounded walk over a paginated listing

use std::future::Future;
use std::ops::ControlFlow;

use tracing::debug;

use crate::config::{GH_LIST_PER_PAGE, GH_SEARCH_LIMIT};
use crate::release::context::Context;
use crate::release::error::{ReleaseError, SourceError};
use crate::release::types::Page;

/// Page size and the maximum number of items scanned per listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBudget {
    pub per_page: u32,
    pub search_limit: u32,
}

impl Default for PageBudget {
    fn default() -> Self {
        Self {
            per_page: GH_LIST_PER_PAGE,
            search_limit: GH_SEARCH_LIMIT,
        }
    }
}

impl PageBudget {
    pub fn new(per_page: u32, search_limit: u32) -> Self {
        Self {
            per_page,
            search_limit,
        }
    }

    /// Returns true if another page may be fetched after `fetched` pages
    pub fn allows(&self, fetched: u32) -> bool {
        self.per_page > 0
            && u64::from(fetched + 1) * u64::from(self.per_page) <= u64::from(self.search_limit)
    }

    /// Maximum number of pages fetched per listing
    pub fn max_pages(&self) -> u32 {
        self.search_limit.checked_div(self.per_page).unwrap_or(0)
    }
}

/// How a page walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// The visitor asked to stop
    Stopped,
    /// The source reported no further pages
    Exhausted,
    /// The page budget ran out before the source did
    BudgetSpent,
}

/// Fetch pages one at a time, starting at page 1, and hand every item to
/// `visit` until it breaks, the source has no next page, or the budget is
/// spent. The context is honored at every fetch; errors end the walk
/// immediately.
pub async fn walk_pages<T, F, Fut, V>(
    ctx: &Context,
    budget: PageBudget,
    mut fetch: F,
    mut visit: V,
) -> Result<Walk, ReleaseError>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, SourceError>>,
    V: FnMut(T) -> ControlFlow<()>,
{
    let mut page = 1;
    let mut fetched = 0;

    while budget.allows(fetched) {
        if let Some(err) = ctx.err() {
            return Err(err);
        }
        let Page { items, next_page } = ctx.run(fetch(page, budget.per_page)).await??;
        fetched += 1;
        debug!("Fetched page {} with {} items", page, items.len());

        for item in items {
            if visit(item).is_break() {
                return Ok(Walk::Stopped);
            }
        }

        match next_page {
            Some(next) => page = next,
            None => return Ok(Walk::Exhausted),
        }
    }

    debug!("Page budget of {} pages spent", budget.max_pages());
    Ok(Walk::BudgetSpent)
}
