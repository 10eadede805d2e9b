use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use vitrin_catalog::{CatalogItem, CatalogState, CatalogView, ItemId};

use crate::config::CompareConfig;
use crate::diff::{DiffFlags, MatrixView};
use crate::intake::{DeepLinkIntake, IntakeResolution};
use crate::matrix::SpecMatrix;
use crate::notice::Notice;
use crate::selection::SelectionSet;


/// A user's comparison: the selection plus the "differences only" toggle.
///
/// This is the single owner of comparison state for a page. Every add path
/// (click, lookup by id, deep link) goes through [`add`](Self::add), so each
/// produces the same notice for the same outcome. Mutations take `&mut self`
/// and complete synchronously, in call order.
#[derive(Debug, Clone, Default)]
pub struct Comparison {
	selection: SelectionSet,
	differences_only: bool,
	config: CompareConfig,
}

/// Matrix and difference flags computed from one selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSnapshot {
	/// Attribute table.
	pub matrix: SpecMatrix,
	/// Per-row difference flags.
	pub flags: DiffFlags,
	/// Whether only differing rows are shown.
	pub differences_only: bool,
}

impl ComparisonSnapshot {
	/// Rows to render.
	pub fn view(&self) -> MatrixView<'_> {
		MatrixView::new(&self.matrix, &self.flags, self.differences_only)
	}
}

impl Comparison {
	/// Creates an empty comparison.
	pub fn new(config: CompareConfig) -> Self {
		Self {
			selection: SelectionSet::new(),
			differences_only: false,
			config,
		}
	}

	/// The active configuration.
	pub fn config(&self) -> &CompareConfig {
		&self.config
	}

	/// The current selection.
	pub fn selection(&self) -> &SelectionSet {
		&self.selection
	}

	/// Adds `item` and reports the outcome.
	pub fn add(&mut self, item: Arc<CatalogItem>) -> Notice {
		match self.selection.add(Arc::clone(&item)) {
			Ok(()) => Notice::added(&item),
			Err(error) => {
				debug!(id = %item.id, %error, "comparison add rejected");
				Notice::rejected(&error)
			}
		}
	}

	/// Adds the loaded catalog item with `id`.
	///
	/// Returns `None` when the view has no such item.
	pub fn add_by_id(&mut self, view: &CatalogView, id: ItemId) -> Option<Notice> {
		view.find(id).map(|item| self.add(item))
	}

	/// Removes the item with `id`, if selected.
	pub fn remove(&mut self, id: ItemId) -> Option<Notice> {
		self.selection.remove(id).map(|item| Notice::removed(&item))
	}

	/// Empties the selection and turns "differences only" off.
	pub fn clear(&mut self) -> Notice {
		self.selection.clear();
		self.differences_only = false;
		Notice::cleared()
	}

	/// Whether only differing rows are shown.
	pub fn differences_only(&self) -> bool {
		self.differences_only
	}

	/// Sets the "differences only" toggle.
	pub fn set_differences_only(&mut self, enabled: bool) {
		self.differences_only = enabled;
	}

	/// Flips the "differences only" toggle and returns the new value.
	pub fn toggle_differences_only(&mut self) -> bool {
		self.differences_only = !self.differences_only;
		self.differences_only
	}

	/// Builds the attribute table for the current selection.
	pub fn matrix(&self) -> SpecMatrix {
		SpecMatrix::build(self.selection.items(), self.config.matrix.attribute_matching)
	}

	/// Computes the difference flags for the current selection.
	pub fn diff_flags(&self) -> DiffFlags {
		DiffFlags::evaluate(&self.matrix())
	}

	/// Computes everything needed to render the table.
	pub fn snapshot(&self) -> ComparisonSnapshot {
		let matrix = self.matrix();
		let flags = DiffFlags::evaluate(&matrix);
		ComparisonSnapshot {
			matrix,
			flags,
			differences_only: self.differences_only,
		}
	}

	/// Applies a finished deep-link intake.
	///
	/// A found item goes through [`add`](Self::add). A missing item is
	/// dropped silently unless `deep_link.notify_missing` is set. An abandoned
	/// intake never produces a notice.
	pub fn accept_deep_link(&mut self, resolution: IntakeResolution) -> Option<Notice> {
		match resolution {
			IntakeResolution::Found(item) => Some(self.add(item)),
			IntakeResolution::NotFound(id) if self.config.deep_link.notify_missing => Some(Notice::deep_link_missing(id)),
			IntakeResolution::NotFound(id) => {
				debug!(%id, "discarding deep link to unknown item");
				None
			}
			IntakeResolution::Abandoned(_) => None,
		}
	}

	/// Waits for the catalog, resolves `intake` and applies it.
	pub async fn run_deep_link(&mut self, intake: DeepLinkIntake, catalog: watch::Receiver<CatalogState>, cancel: CancellationToken) -> Option<Notice> {
		let resolution = intake.resolve(catalog, cancel).await;
		self.accept_deep_link(resolution)
	}
}
