//! Product comparison engine.
//!
//! A [`Comparison`] owns a bounded, category-consistent [`SelectionSet`] of
//! catalog items. From the selection it derives a dense [`SpecMatrix`] of
//! attribute values and [`DiffFlags`] marking rows whose values disagree.
//! Items arrive by click, by id, or through a [`DeepLinkIntake`] that waits
//! for the catalog view to load before feeding the same add path.
//!
//! ```
//! use std::sync::Arc;
//!
//! use vitrin_catalog::{Attribute, CatalogItem, ItemId};
//! use vitrin_compare::{Comparison, NoticeKind};
//!
//! let mut comparison = Comparison::default();
//! let x = CatalogItem::new(1, "Nova", "RX 8").in_category(1, "GPU").with_attribute(Attribute::new("RAM", "16GB"));
//! let y = CatalogItem::new(2, "Nova", "RX 9").in_category(1, "GPU").with_attribute(Attribute::new("CPU", "i7"));
//! assert_eq!(comparison.add(Arc::new(x)).kind, NoticeKind::Added);
//! assert_eq!(comparison.add(Arc::new(y)).kind, NoticeKind::Added);
//!
//! let matrix = comparison.matrix();
//! assert_eq!(matrix.rows(), ["CPU", "RAM"]);
//! assert_eq!(matrix.cell("RAM", ItemId(2)), Some("-"));
//! ```

/// Engine configuration.
pub mod config;
/// Difference flags and the rendered table view.
pub mod diff;
/// Deep-link intake.
pub mod intake;
/// Attribute matrix construction.
pub mod matrix;
/// User-facing outcome notices.
pub mod notice;
/// The bounded selection set.
pub mod selection;
/// The owned comparison session.
pub mod session;

pub use config::{CompareConfig, ConfigError, DeepLinkConfig, MatrixConfig};
pub use diff::{DiffFlags, MatrixRow, MatrixView, filter_to_differences_only};
pub use intake::{DeepLinkIntake, EntryPoint, IntakeResolution, UrlEntryPoint};
pub use matrix::{AttributeMatching, MISSING, SpecMatrix};
pub use notice::{Level, Notice, NoticeKind};
pub use selection::{AddError, CAPACITY, SelectionSet};
pub use session::{Comparison, ComparisonSnapshot};
