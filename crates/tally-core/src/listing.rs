//! # Listing Module
//!
//! Client-side helpers for the list screens: search filtering, sorting,
//! row selection, pagination state and expiry labels.
//!
//! ## Expense List Pipeline
//! ```text
//! fetched rows ──► ExpenseFilter::apply ──► sort_expenses ──► screen
//!                  (search, category,       (SortState:
//!                   paid through, dates)     click = asc/desc toggle)
//!
//! Selection: ids checked by the user, compared against the visible rows
//! ```

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{CatalogItem, ExpenseSummary, InvoiceSummary, QuoteTemplate};

// =============================================================================
// Search
// =============================================================================

/// Case-insensitive substring match of `term` against any of `fields`.
///
/// An empty term matches everything; `None` fields never match.
///
/// ## Example
/// ```rust
/// use tally_core::listing::matches_search;
///
/// assert!(matches_search("acme", [Some("ACME Ltd"), None]));
/// assert!(matches_search("", [None::<&str>]));
/// assert!(!matches_search("globex", [Some("ACME Ltd")]));
/// ```
pub fn matches_search<'a, I>(term: &str, fields: I) -> bool
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Invoices whose client name, number or status contains `term`.
pub fn filter_invoices<'a>(invoices: &'a [InvoiceSummary], term: &str) -> Vec<&'a InvoiceSummary> {
    invoices
        .iter()
        .filter(|inv| {
            matches_search(
                term,
                [
                    inv.client.as_ref().map(|c| c.name.as_str()),
                    inv.invoice_number.as_deref(),
                    Some(inv.status.as_str()),
                ],
            )
        })
        .collect()
}

/// Templates whose name contains `term`.
pub fn filter_templates<'a>(templates: &'a [QuoteTemplate], term: &str) -> Vec<&'a QuoteTemplate> {
    templates
        .iter()
        .filter(|t| matches_search(term, [Some(t.name.as_str())]))
        .collect()
}

/// Catalog items whose name or description contains `term`.
///
/// Feeds the line-item picker.
pub fn filter_catalog_items<'a>(items: &'a [CatalogItem], term: &str) -> Vec<&'a CatalogItem> {
    items
        .iter()
        .filter(|item| matches_search(term, [Some(item.name.as_str()), item.description.as_deref()]))
        .collect()
}

// =============================================================================
// Expense Filters
// =============================================================================

/// Filters of the expense list. Every set filter must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseFilter {
    /// Matched against category name, description and paid-through account.
    #[serde(default)]
    pub search: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub paid_through: Option<String>,
    /// Inclusive.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date_from: Option<NaiveDate>,
    /// Inclusive: the whole day counts.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date_to: Option<NaiveDate>,
}

impl ExpenseFilter {
    /// Whether any filter is set.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.category_id.is_some()
            || self.paid_through.as_deref().is_some_and(|p| !p.is_empty())
            || self.date_from.is_some()
            || self.date_to.is_some()
    }

    /// Clears every filter.
    pub fn clear(&mut self) {
        *self = ExpenseFilter::default();
    }

    pub fn matches(&self, expense: &ExpenseSummary) -> bool {
        let category_name = expense.category.as_ref().map(|c| c.name.as_str());
        if !matches_search(
            &self.search,
            [
                category_name,
                expense.description.as_deref(),
                expense.paid_through.as_deref(),
            ],
        ) {
            return false;
        }

        if let Some(category_id) = self.category_id {
            if expense.category_id != Some(category_id) {
                return false;
            }
        }

        if let Some(paid_through) = self.paid_through.as_deref().filter(|p| !p.is_empty()) {
            if expense.paid_through.as_deref() != Some(paid_through) {
                return false;
            }
        }

        // An undated expense never falls inside a date range.
        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(date) = expense.expense_date else {
                return false;
            };
            if self.date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.date_to.is_some_and(|to| date > to) {
                return false;
            }
        }

        true
    }

    /// Rows passing every filter, in their original order.
    pub fn apply<'a>(&self, expenses: &'a [ExpenseSummary]) -> Vec<&'a ExpenseSummary> {
        expenses.iter().filter(|e| self.matches(e)).collect()
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort direction of a list column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Orients an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Which column a list is sorted by, if any.
///
/// Clicking the sorted column flips its direction; clicking another column
/// sorts by it ascending.
///
/// ## Example
/// ```rust
/// use tally_core::listing::{ExpenseSortField, SortDirection, SortState};
///
/// let mut sort = SortState::default();
/// sort.sort_by(ExpenseSortField::Amount);
/// sort.sort_by(ExpenseSortField::Amount);
/// assert_eq!(sort.direction, SortDirection::Desc);
///
/// sort.sort_by(ExpenseSortField::ExpenseDate);
/// assert_eq!(sort.direction, SortDirection::Asc);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState<F> {
    pub field: Option<F>,
    pub direction: SortDirection,
}

impl<F> Default for SortState<F> {
    fn default() -> Self {
        SortState {
            field: None,
            direction: SortDirection::Asc,
        }
    }
}

impl<F: PartialEq + Copy> SortState<F> {
    pub fn sort_by(&mut self, field: F) {
        if self.field == Some(field) {
            self.direction = self.direction.reversed();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Asc;
        }
    }
}

/// Sortable columns of the expense list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseSortField {
    ExpenseDate,
    Amount,
    Description,
    PaidThrough,
}

impl ExpenseSortField {
    /// Ascending comparison of two rows on this column. Missing values sort
    /// first.
    pub fn compare(self, a: &ExpenseSummary, b: &ExpenseSummary) -> Ordering {
        match self {
            ExpenseSortField::ExpenseDate => a.expense_date.cmp(&b.expense_date),
            ExpenseSortField::Amount => match (a.amount, b.amount) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (x, y) => x.is_some().cmp(&y.is_some()),
            },
            ExpenseSortField::Description => a.description.cmp(&b.description),
            ExpenseSortField::PaidThrough => a.paid_through.cmp(&b.paid_through),
        }
    }
}

/// Sorts filtered expense rows in place. Unsorted state keeps the order;
/// ties keep their relative order.
pub fn sort_expenses(rows: &mut [&ExpenseSummary], sort: &SortState<ExpenseSortField>) {
    if let Some(field) = sort.field {
        rows.sort_by(|a, b| sort.direction.apply(field.compare(a, b)));
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Rows checked for a bulk action, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: BTreeSet<i64>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// Checks or unchecks one row.
    pub fn toggle(&mut self, id: i64, checked: bool) {
        if checked {
            self.ids.insert(id);
        } else {
            self.ids.remove(&id);
        }
    }

    /// The header checkbox: checking selects exactly the visible rows,
    /// unchecking clears everything.
    pub fn toggle_all<I>(&mut self, visible: I, checked: bool)
    where
        I: IntoIterator<Item = i64>,
    {
        self.ids = if checked {
            visible.into_iter().collect()
        } else {
            BTreeSet::new()
        };
    }

    /// True when there is at least one visible row and all of them are checked.
    pub fn is_all_selected<I>(&self, visible: I) -> bool
    where
        I: IntoIterator<Item = i64>,
    {
        let mut any = false;
        for id in visible {
            if !self.is_selected(id) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Indeterminate state of the header checkbox.
    pub fn is_some_selected<I>(&self, visible: I) -> bool
    where
        I: IntoIterator<Item = i64>,
    {
        !self.ids.is_empty() && !self.is_all_selected(visible)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Query parameters of a paged list request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub search: Option<String>,
}

/// Which page of a server-paged list is shown.
///
/// Pages are 1-based and `current_page` always stays in `1..=total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Pagination {
    /// Builds pagination from the server's reply; `total_pages` is at least 1.
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        Pagination {
            current_page: current_page.clamp(1, total_pages),
            total_pages,
        }
    }

    /// Moves to `page`.
    ///
    /// Returns `true` if the page changed and must be fetched; pages outside
    /// the range and the current page are ignored.
    pub fn go_to(&mut self, page: u32) -> bool {
        if page >= 1 && page <= self.total_pages && page != self.current_page {
            self.current_page = page;
            return true;
        }
        false
    }

    pub fn next(&mut self) -> bool {
        if self.current_page < self.total_pages {
            return self.go_to(self.current_page + 1);
        }
        false
    }

    pub fn previous(&mut self) -> bool {
        if self.current_page > 1 {
            return self.go_to(self.current_page - 1);
        }
        false
    }

    /// Back to the first page, used when the search term changes.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Query for the current page with `per_page` rows per page.
    pub fn query(&self, search: &str, per_page: u32) -> PageQuery {
        PageQuery {
            page: self.current_page,
            per_page,
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(1, 1)
    }
}

// =============================================================================
// Expiry Labels
// =============================================================================

fn ordinal_suffix(day: u32) -> &'static str {
    if (4..=20).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Label for a quote's expiry date relative to `today`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use tally_core::listing::format_expiry;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// let expiry = NaiveDate::from_ymd_opt(2026, 11, 22).unwrap();
/// assert_eq!(format_expiry(expiry, today), "22nd November, 2026");
///
/// let past = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
/// assert_eq!(format_expiry(past, today), "Expired");
/// ```
pub fn format_expiry(expiry: NaiveDate, today: NaiveDate) -> String {
    if expiry < today {
        return "Expired".to_string();
    }
    let day = expiry.day();
    format!(
        "{}{} {}, {}",
        day,
        ordinal_suffix(day),
        expiry.format("%B"),
        expiry.year()
    )
}
