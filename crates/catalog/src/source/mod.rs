//! Contract for the remote catalog store and an in-memory implementation.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SourceError;
use crate::ids::CategoryId;
use crate::item::{CatalogItem, Category};


/// Server-side scoping for a catalog listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogQuery {
	/// Only list items whose category is exactly this one.
	pub category: Option<CategoryId>,
}

impl CatalogQuery {
	/// An unscoped listing.
	pub const fn all() -> Self {
		Self { category: None }
	}

	/// A listing scoped to one category.
	pub const fn in_category(category: CategoryId) -> Self {
		Self { category: Some(category) }
	}
}

/// One page of a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
	/// Items on this page, in store order.
	pub items: Vec<T>,
	/// Index of the next page, `None` on the last page.
	pub next_page: Option<u32>,
}

impl<T> Page<T> {
	/// A complete, unpaginated listing.
	pub fn single(items: Vec<T>) -> Self {
		Self { items, next_page: None }
	}
}

/// The external catalog collaborator.
///
/// Callers that need the full addressable set concatenate pages until
/// [`Page::next_page`] is `None`.
#[async_trait]
pub trait CatalogSource: Send + Sync {
	/// Lists one page of items matching `query`. Pages are zero-based.
	async fn list_page(&self, query: CatalogQuery, page: u32) -> Result<Page<CatalogItem>, SourceError>;

	/// Lists every category.
	async fn list_categories(&self) -> Result<Vec<Category>, SourceError>;
}

/// A catalog snapshot held in memory.
///
/// Honors category scoping and optionally splits listings into pages of
/// `page_size` items.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
	items: Vec<CatalogItem>,
	categories: Vec<Category>,
	page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
	#[serde(default)]
	categories: Vec<Category>,
	#[serde(default, alias = "products")]
	items: Vec<CatalogItem>,
}

impl StaticCatalog {
	/// Creates a snapshot over the given records.
	pub fn new(items: Vec<CatalogItem>, categories: Vec<Category>) -> Self {
		Self {
			items,
			categories,
			page_size: None,
		}
	}

	/// Splits listings into pages of `page_size` items (minimum 1).
	pub fn paginated(mut self, page_size: usize) -> Self {
		self.page_size = Some(page_size.max(1));
		self
	}

	/// Decodes a JSON snapshot of the form
	/// `{ "categories": [...], "products": [...] }`.
	pub fn from_json(input: &str) -> Result<Self, SourceError> {
		let snapshot: Snapshot = serde_json::from_str(input)?;
		Ok(Self::new(snapshot.items, snapshot.categories))
	}

	/// Reads and decodes a JSON snapshot file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| SourceError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_json(&content)
	}

	/// All items in the snapshot, unfiltered.
	pub fn items(&self) -> &[CatalogItem] {
		&self.items
	}
}

#[async_trait]
impl CatalogSource for StaticCatalog {
	async fn list_page(&self, query: CatalogQuery, page: u32) -> Result<Page<CatalogItem>, SourceError> {
		let matching: Vec<&CatalogItem> = self
			.items
			.iter()
			.filter(|item| query.category.is_none_or(|scope| item.category_id() == Some(scope)))
			.collect();

		let Some(size) = self.page_size else {
			let items = if page == 0 { matching.into_iter().cloned().collect() } else { Vec::new() };
			return Ok(Page::single(items));
		};

		let start = (page as usize).saturating_mul(size);
		let items: Vec<CatalogItem> = matching.iter().skip(start).take(size).map(|&item| item.clone()).collect();
		let next_page = (start + size < matching.len()).then(|| page + 1);
		Ok(Page { items, next_page })
	}

	async fn list_categories(&self) -> Result<Vec<Category>, SourceError> {
		Ok(self.categories.clone())
	}
}
