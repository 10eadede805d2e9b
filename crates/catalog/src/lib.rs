//! Catalog side of the comparison engine: item and category records, the
//! category index, the catalog collaborator contract and the filterable
//! catalog view that users pick comparison candidates from.
//!
//! Records are created by the remote catalog store and only ever read here.
//! Items are handed around as [`Arc<CatalogItem>`](std::sync::Arc) so that a
//! comparison can keep its members alive across catalog refreshes.

/// Error types for catalog collaborators.
pub mod error;
/// Monotonic refresh generations.
pub mod generation;
/// Identifier newtypes.
pub mod ids;
/// Main/sub category lookup.
pub mod index;
/// Item, attribute and category records.
pub mod item;
/// Catalog collaborator contract and the in-memory implementation.
pub mod source;
/// Searchable, category-filtered catalog view.
pub mod view;

pub use error::{ParseIdError, SourceError};
pub use ids::{CategoryId, ItemId};
pub use index::CategoryIndex;
pub use item::{Attribute, CatalogItem, Category, CategoryRef, Review};
pub use source::{CatalogQuery, CatalogSource, Page, StaticCatalog};
pub use view::{CatalogState, CatalogView, CategoryFilter, Listing, RefreshTicket, ViewOptions, fetch_all};
