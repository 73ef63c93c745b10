//! Client-side filter -> sort -> paginate pipeline over the fetched users.
//!
//! `UserPipeline` owns the source collection plus the user's criteria and keeps two index
//! vectors derived from them. Every setter recomputes what it invalidated and re-clamps the
//! current page, so readers never observe an out-of-range page.

use std::any::Any;
use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;

use log::debug;
use roster_states::{SnapshotClone, State, StateCtx, state_assign_impl};

use crate::config::DEFAULT_PAGE_SIZE;
use crate::users::{UserRecord, UsersCompute};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Name,
    Email,
    Company,
}

impl FilterField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Company];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Company => "Company",
        }
    }

    fn value(self, user: &UserRecord) -> &str {
        match self {
            Self::Name => &user.name,
            Self::Email => &user.email,
            Self::Company => user.company_name(),
        }
    }
}

/// Case-insensitive substring patterns. An empty pattern matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub name: String,
    pub email: String,
    pub company: String,
}

impl FilterCriteria {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Name => &self.name,
            FilterField::Email => &self.email,
            FilterField::Company => &self.company,
        }
    }

    pub fn get_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Name => &mut self.name,
            FilterField::Email => &mut self.email,
            FilterField::Company => &mut self.company,
        }
    }

    pub fn is_empty(&self) -> bool {
        FilterField::ALL
            .iter()
            .all(|&field| self.get(field).is_empty())
    }

    pub fn is_filtered(&self) -> bool {
        !self.is_empty()
    }

    /// True when `user` satisfies every non-empty pattern.
    pub fn matches(&self, user: &UserRecord) -> bool {
        Matcher::new(self).matches(user)
    }
}

/// Lowercased, non-empty patterns, built once per recompute.
struct Matcher {
    patterns: Vec<(FilterField, String)>,
}

impl Matcher {
    fn new(criteria: &FilterCriteria) -> Self {
        let patterns = FilterField::ALL
            .into_iter()
            .filter(|&field| !criteria.get(field).is_empty())
            .map(|field| (field, criteria.get(field).to_lowercase()))
            .collect();
        Self { patterns }
    }

    fn matches(&self, user: &UserRecord) -> bool {
        self.patterns
            .iter()
            .all(|(field, pattern)| field.value(user).to_lowercase().contains(pattern.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    #[default]
    Id,
    Name,
    Username,
    Email,
    Phone,
    Website,
    /// Sorts by `company.name`.
    Company,
}

impl SortField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Username => "Username",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Website => "Website",
            Self::Company => "Company",
        }
    }

    fn key(self, user: &UserRecord) -> SortKey {
        let text = |value: &str| SortKey::Text(value.to_lowercase());
        match self {
            Self::Id => SortKey::Number(user.id),
            Self::Name => text(&user.name),
            Self::Username => text(&user.username),
            Self::Email => text(&user.email),
            Self::Phone => text(&user.phone),
            Self::Website => text(&user.website),
            Self::Company => text(user.company_name()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Number(u64),
    Text(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortCriteria {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Page cursor plus totals derived from the filtered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
    total_items: usize,
    total_pages: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
            total_pages: 0,
        }
    }

    /// 1-based.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Half-open index range of the current page within the sorted collection.
    fn bounds(&self) -> (usize, usize) {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        (start, end)
    }

    fn set_total(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.total_pages = total_items.div_ceil(self.page_size);
        self.clamp();
    }

    fn clamp(&mut self) {
        self.current_page = if self.total_pages == 0 {
            1
        } else {
            self.current_page.clamp(1, self.total_pages)
        };
    }
}

/// 1-based, inclusive range of the rows on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\u{2013}{} of {}", self.start, self.end, self.total)
    }
}

#[derive(Debug, Clone)]
pub struct UserPipeline {
    source: Arc<Vec<UserRecord>>,
    source_generation: u64,
    filters: FilterCriteria,
    sort: SortCriteria,
    pagination: Pagination,
    /// Indices into `source` of matching records, in source order.
    filtered: Vec<usize>,
    /// `filtered`, reordered by `sort`.
    sorted: Vec<usize>,
}

impl Default for UserPipeline {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl UserPipeline {
    pub fn new(page_size: usize) -> Self {
        Self {
            source: Arc::default(),
            source_generation: 0,
            filters: FilterCriteria::default(),
            sort: SortCriteria::default(),
            pagination: Pagination::new(page_size),
            filtered: Vec::new(),
            sorted: Vec::new(),
        }
    }

    // =====================
    // Setters
    // =====================

    /// Replaces the whole collection. Criteria and page are kept, then re-clamped.
    pub fn set_source(&mut self, users: impl Into<Arc<Vec<UserRecord>>>) {
        self.source = users.into();
        self.refilter();
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        if self.filters.get(field) == value {
            return;
        }
        *self.filters.get_mut(field) = value;
        self.pagination.current_page = 1;
        self.refilter();
    }

    /// Replaces every pattern at once. Resets to page 1 when anything changed.
    pub fn set_filters(&mut self, filters: FilterCriteria) {
        if self.filters == filters {
            return;
        }
        self.filters = filters;
        self.pagination.current_page = 1;
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterCriteria::default();
        self.pagination.current_page = 1;
        self.refilter();
    }

    /// Same field toggles the direction and keeps the page. A new field sorts ascending from page 1.
    pub fn set_sort(&mut self, field: SortField) {
        if self.sort.field == field {
            self.sort.direction = self.sort.direction.toggled();
        } else {
            self.sort = SortCriteria {
                field,
                direction: SortDirection::Ascending,
            };
            self.pagination.current_page = 1;
        }
        self.resort();
        self.pagination.clamp();
    }

    /// Moves to `page`, clamped into `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.current_page = page;
        self.pagination.clamp();
    }

    pub fn next_page(&mut self) {
        if self.pagination.has_next() {
            self.pagination.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.pagination.has_prev() {
            self.pagination.current_page -= 1;
        }
    }

    /// Changes the page size (0 is treated as 1) and returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.page_size = page_size.max(1);
        self.pagination.current_page = 1;
        let total = self.filtered.len();
        self.pagination.set_total(total);
    }

    fn refilter(&mut self) {
        let matcher = Matcher::new(&self.filters);
        self.filtered = self
            .source
            .iter()
            .enumerate()
            .filter(|(_, user)| matcher.matches(user))
            .map(|(index, _)| index)
            .collect();
        self.resort();
        let total = self.filtered.len();
        self.pagination.set_total(total);
    }

    fn resort(&mut self) {
        let source = &self.source;
        let SortCriteria { field, direction } = self.sort;
        let mut sorted = self.filtered.clone();

        // Both arms are stable, so equal keys keep source order in either direction.
        match direction {
            SortDirection::Ascending => sorted.sort_by_cached_key(|&i| field.key(&source[i])),
            SortDirection::Descending => {
                sorted.sort_by_cached_key(|&i| Reverse(field.key(&source[i])));
            }
        }
        self.sorted = sorted;
    }

    // =====================
    // Readers
    // =====================

    /// The raw collection, in fetch order.
    pub fn users(&self) -> &[UserRecord] {
        &self.source
    }

    pub fn source_generation(&self) -> u64 {
        self.source_generation
    }

    pub fn filtered(&self) -> impl ExactSizeIterator<Item = &UserRecord> {
        self.filtered.iter().map(|&i| &self.source[i])
    }

    pub fn sorted(&self) -> impl ExactSizeIterator<Item = &UserRecord> {
        self.sorted.iter().map(|&i| &self.source[i])
    }

    /// The rows of the current page.
    pub fn page(&self) -> impl ExactSizeIterator<Item = &UserRecord> {
        let (start, end) = self.pagination.bounds();
        self.sorted[start..end].iter().map(|&i| &self.source[i])
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn sort(&self) -> SortCriteria {
        self.sort
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn is_filtered(&self) -> bool {
        self.filters.is_filtered()
    }

    /// Display range of the current page, or `None` when nothing matches.
    pub fn page_range(&self) -> Option<PageRange> {
        let (start, end) = self.pagination.bounds();
        (end > start).then_some(PageRange {
            start: start + 1,
            end,
            total: self.pagination.total_items,
        })
    }
}

impl SnapshotClone for UserPipeline {}

impl State for UserPipeline {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

/// Feeds a newly fetched payload into the pipeline.
///
/// Call once per frame after `StateCtx::sync_computes`. Returns true when the source was replaced.
pub fn sync_user_pipeline(ctx: &mut StateCtx) -> bool {
    let Some(cache) = ctx.cached::<UsersCompute>() else {
        return false;
    };
    let generation = cache.generation();
    let Some(users) = cache.users().cloned() else {
        return false;
    };

    let Ok(pipeline) = ctx.try_state::<UserPipeline>() else {
        return false;
    };
    if pipeline.source_generation == generation {
        return false;
    }

    debug!(
        "Replacing pipeline source with generation {generation} ({} users)",
        users.len()
    );
    let pipeline = ctx.state_mut::<UserPipeline>();
    pipeline.source_generation = generation;
    pipeline.set_source(users);
    true
}
