//! The searchable, category-filtered list of items users pick from.
//!
//! The view owns the last successful listing and publishes its load state on
//! a [`watch`] channel, so other components (deep-link intake) can await
//! readiness instead of polling.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::generation::{Generation, GenerationClock};
use crate::ids::{CategoryId, ItemId};
use crate::index::CategoryIndex;
use crate::item::CatalogItem;
use crate::source::{CatalogQuery, CatalogSource};

#[cfg(test)]
mod tests;

/// Shared, immutable catalog listing.
pub type Listing = Arc<[Arc<CatalogItem>]>;

/// Load state of the catalog view.
#[derive(Debug, Clone)]
pub enum CatalogState {
	/// A listing is being fetched.
	Loading,
	/// The latest listing finished loading.
	Ready(Listing),
	/// The latest fetch failed. The view shows no items.
	Unavailable(String),
}

impl CatalogState {
	/// Returns the listing when ready.
	pub fn listing(&self) -> Option<&Listing> {
		match self {
			Self::Ready(items) => Some(items),
			_ => None,
		}
	}

	/// Returns true when a listing is available.
	pub fn is_ready(&self) -> bool {
		matches!(self, Self::Ready(_))
	}
}

/// Catalog fetch behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewOptions {
	/// Scope refetches to the selected sub category on the server side.
	pub scoped_fetch: bool,
	/// Upper bound on pages concatenated per refresh.
	pub max_pages: u32,
}

impl Default for ViewOptions {
	fn default() -> Self {
		Self {
			scoped_fetch: true,
			max_pages: 50,
		}
	}
}

/// Active category filter.
///
/// A sub category admits only items in exactly that category. A main
/// category alone admits the main and its direct subs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFilter {
	/// Selected main category.
	pub main: Option<CategoryId>,
	/// Selected sub category.
	pub sub: Option<CategoryId>,
}

/// A refresh that has been started but not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
	/// Generation taken when the refresh started.
	pub generation: Generation,
	/// Scope the refresh fetches with.
	pub query: CatalogQuery,
}

/// Filterable catalog listing backed by a [`CatalogSource`].
#[derive(Debug)]
pub struct CatalogView {
	items: Listing,
	index: CategoryIndex,
	/// Lowercased search needle.
	search: String,
	filter: CategoryFilter,
	options: ViewOptions,
	clock: GenerationClock,
	state_tx: watch::Sender<CatalogState>,
}

impl Default for CatalogView {
	fn default() -> Self {
		Self::new(ViewOptions::default())
	}
}

impl CatalogView {
	/// Creates an empty view in the [`CatalogState::Loading`] state.
	pub fn new(options: ViewOptions) -> Self {
		let (state_tx, _) = watch::channel(CatalogState::Loading);
		Self {
			items: Arc::from(Vec::new()),
			index: CategoryIndex::default(),
			search: String::new(),
			filter: CategoryFilter::default(),
			options,
			clock: GenerationClock::new(),
			state_tx,
		}
	}

	/// Subscribes to load state changes.
	pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
		self.state_tx.subscribe()
	}

	/// Returns the current load state.
	pub fn state(&self) -> CatalogState {
		self.state_tx.borrow().clone()
	}

	/// Returns the fetch options.
	pub fn options(&self) -> ViewOptions {
		self.options
	}

	/// Returns the category index.
	pub fn categories(&self) -> &CategoryIndex {
		&self.index
	}

	/// Replaces the category index.
	pub fn set_categories(&mut self, index: CategoryIndex) {
		self.index = index;
	}

	/// Fetches the category tree once.
	///
	/// A failing collaborator leaves an empty index; filtering by category is
	/// then unavailable but the listing keeps working.
	pub async fn load_categories(&mut self, source: &dyn CatalogSource) {
		match source.list_categories().await {
			Ok(categories) => {
				self.index = CategoryIndex::build(categories);
				debug!(count = self.index.len(), "categories loaded");
			}
			Err(error) => {
				warn!(%error, "category listing failed");
				self.index = CategoryIndex::default();
			}
		}
	}

	/// Sets the free-text search. Empty text matches everything.
	pub fn set_search_text(&mut self, text: &str) {
		self.search = text.trim().to_lowercase();
	}

	/// Returns the active category filter.
	pub fn category_filter(&self) -> CategoryFilter {
		self.filter
	}

	/// Sets both category filters and returns the scope a refetch should use.
	pub fn set_category_filter(&mut self, main: Option<CategoryId>, sub: Option<CategoryId>) -> CatalogQuery {
		self.filter = CategoryFilter { main, sub };
		self.fetch_scope()
	}

	/// Picks a main category, clearing any sub category selection.
	pub fn select_main_category(&mut self, main: Option<CategoryId>) -> CatalogQuery {
		self.set_category_filter(main, None)
	}

	/// Picks a sub category under the current main category.
	pub fn select_sub_category(&mut self, sub: Option<CategoryId>) -> CatalogQuery {
		self.set_category_filter(self.filter.main, sub)
	}

	/// Scope for fetching the current filter.
	///
	/// Only an exact sub category is pushed to the server. Main categories
	/// include their subs, which a server-side category scope would drop, so
	/// they are fetched unscoped and filtered locally.
	pub fn fetch_scope(&self) -> CatalogQuery {
		match self.filter.sub {
			Some(sub) if self.options.scoped_fetch => CatalogQuery::in_category(sub),
			_ => CatalogQuery::all(),
		}
	}

	/// All loaded items, in fetch order.
	pub fn items(&self) -> &Listing {
		&self.items
	}

	/// Items passing both the search and the category filter, in fetch order.
	pub fn visible_items(&self) -> Vec<Arc<CatalogItem>> {
		let allowed = self.allowed_categories();
		self.items
			.iter()
			.filter(|item| self.matches_search(item) && Self::matches_category(item, &self.filter, allowed.as_deref()))
			.cloned()
			.collect()
	}

	/// Finds a loaded item by id.
	pub fn find(&self, id: ItemId) -> Option<Arc<CatalogItem>> {
		self.items.iter().find(|item| item.id == id).cloned()
	}

	/// Fetches the current scope and applies the result.
	///
	/// Returns the number of loaded items. On failure the view becomes
	/// unavailable and shows no items.
	pub async fn refresh(&mut self, source: &dyn CatalogSource) -> Result<usize, SourceError> {
		let ticket = self.begin_refresh();
		match fetch_all(source, ticket.query, self.options.max_pages).await {
			Ok(items) => {
				let count = items.len();
				self.apply_items(ticket, items);
				Ok(count)
			}
			Err(error) => {
				self.apply_failure(ticket, &error);
				Err(error)
			}
		}
	}

	/// Starts a refresh: takes a new generation and publishes `Loading`.
	///
	/// Pair with [`complete_refresh`](Self::complete_refresh) when the fetch
	/// runs elsewhere.
	pub fn begin_refresh(&mut self) -> RefreshTicket {
		let generation = self.clock.advance();
		let query = self.fetch_scope();
		debug!(generation = generation.get(), ?query, "catalog refresh started");
		self.state_tx.send_replace(CatalogState::Loading);
		RefreshTicket { generation, query }
	}

	/// Applies the outcome of a refresh.
	///
	/// Returns false, leaving the view untouched, when a newer refresh has
	/// started since `ticket` was issued.
	pub fn complete_refresh(&mut self, ticket: RefreshTicket, result: Result<Vec<CatalogItem>, SourceError>) -> bool {
		match result {
			Ok(items) => self.apply_items(ticket, items),
			Err(error) => self.apply_failure(ticket, &error),
		}
	}

	fn is_stale(&self, ticket: RefreshTicket) -> bool {
		let stale = !self.clock.is_current(ticket.generation);
		if stale {
			debug!(
				generation = ticket.generation.get(),
				latest = self.clock.latest().get(),
				"dropping stale catalog refresh"
			);
		}
		stale
	}

	fn apply_items(&mut self, ticket: RefreshTicket, items: Vec<CatalogItem>) -> bool {
		if self.is_stale(ticket) {
			return false;
		}
		self.items = items.into_iter().map(Arc::new).collect();
		debug!(generation = ticket.generation.get(), count = self.items.len(), "catalog ready");
		self.state_tx.send_replace(CatalogState::Ready(Arc::clone(&self.items)));
		true
	}

	fn apply_failure(&mut self, ticket: RefreshTicket, error: &SourceError) -> bool {
		if self.is_stale(ticket) {
			return false;
		}
		warn!(generation = ticket.generation.get(), %error, "catalog unavailable");
		self.items = Arc::from(Vec::new());
		self.state_tx.send_replace(CatalogState::Unavailable(error.to_string()));
		true
	}

	fn matches_search(&self, item: &CatalogItem) -> bool {
		if self.search.is_empty() {
			return true;
		}
		let needle = self.search.as_str();
		let category_name = item
			.category_name()
			.filter(|name| !name.is_empty())
			.or_else(|| item.category_id().and_then(|id| self.index.name_of(id)));

		item.brand.to_lowercase().contains(needle)
			|| item.model.to_lowercase().contains(needle)
			|| category_name.is_some_and(|name| name.to_lowercase().contains(needle))
	}

	/// Category ids admitted by a main-only filter.
	fn allowed_categories(&self) -> Option<Vec<CategoryId>> {
		match self.filter {
			CategoryFilter { sub: None, main: Some(main) } => Some(self.index.descendants_of(main)),
			_ => None,
		}
	}

	fn matches_category(item: &CatalogItem, filter: &CategoryFilter, allowed: Option<&[CategoryId]>) -> bool {
		if filter.main.is_none() && filter.sub.is_none() {
			return true;
		}
		let Some(category) = item.category_id() else {
			return false;
		};
		match (filter.sub, allowed) {
			(Some(sub), _) => category == sub,
			(None, Some(allowed)) => allowed.contains(&category),
			(None, None) => true,
		}
	}
}

/// Concatenates every page of a listing.
///
/// Stops after `max_pages` pages with a warning; the pages fetched so far are
/// still returned.
pub async fn fetch_all(source: &dyn CatalogSource, query: CatalogQuery, max_pages: u32) -> Result<Vec<CatalogItem>, SourceError> {
	let mut items = Vec::new();
	let mut page = 0;
	for _ in 0..max_pages.max(1) {
		let listing = source.list_page(query, page).await?;
		items.extend(listing.items);
		let Some(next) = listing.next_page else {
			return Ok(items);
		};
		page = next;
	}
	warn!(max_pages, count = items.len(), "catalog listing truncated at page limit");
	Ok(items)
}
