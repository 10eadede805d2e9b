use std::sync::Arc;

use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;
use vitrin_catalog::{CatalogItem, CategoryId, ItemId};

#[cfg(test)]
mod tests;

/// Maximum number of items compared at once.
pub const CAPACITY: usize = 4;

/// Reasons an item is refused by [`SelectionSet::add`].
///
/// Each variant maps to a distinct user-facing message. The selection is
/// unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddError {
	/// The selection already holds [`CAPACITY`] items.
	#[error("at most {capacity} products can be compared")]
	AtCapacity {
		/// The capacity that was reached.
		capacity: usize,
	},

	/// The item is already part of the selection.
	#[error("this product is already in the comparison")]
	Duplicate(ItemId),

	/// The item's category differs from the category of the first member.
	#[error("only products from the same category can be compared")]
	CategoryMismatch {
		/// Category of the first selected item.
		expected: Option<CategoryId>,
		/// Category of the refused item.
		found: Option<CategoryId>,
	},
}

/// The ordered set of items currently being compared.
///
/// Invariants, checked and applied atomically by [`add`](Self::add):
/// - at most [`CAPACITY`] members;
/// - no id appears twice;
/// - every member shares the first member's category id.
///
/// The category constraint exists only while the set is non-empty, so
/// removing the last member or clearing lets any category start over.
/// Insertion order is kept and drives column order in the comparison matrix.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
	items: SmallVec<[Arc<CatalogItem>; CAPACITY]>,
}

impl SelectionSet {
	/// Creates an empty selection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `item` if every invariant still holds afterwards.
	pub fn add(&mut self, item: Arc<CatalogItem>) -> Result<(), AddError> {
		if self.items.len() >= CAPACITY {
			return Err(AddError::AtCapacity { capacity: CAPACITY });
		}
		if self.contains(item.id) {
			return Err(AddError::Duplicate(item.id));
		}
		if let Some(expected) = self.constraint()
			&& expected != item.category_id()
		{
			return Err(AddError::CategoryMismatch {
				expected,
				found: item.category_id(),
			});
		}

		debug!(id = %item.id, len = self.items.len() + 1, "selection add");
		self.items.push(item);
		Ok(())
	}

	/// Removes the member with `id`. Returns the removed item, if any.
	pub fn remove(&mut self, id: ItemId) -> Option<Arc<CatalogItem>> {
		let pos = self.items.iter().position(|item| item.id == id)?;
		let removed = self.items.remove(pos);
		debug!(%id, len = self.items.len(), "selection remove");
		Some(removed)
	}

	/// Removes every member and lifts the category constraint.
	pub fn clear(&mut self) {
		self.items.clear();
	}

	/// Category every member must share, or `None` while empty.
	///
	/// The inner `None` means the first member is uncategorized.
	pub fn constraint(&self) -> Option<Option<CategoryId>> {
		self.items.first().map(|item| item.category_id())
	}

	/// Members in insertion order.
	pub fn items(&self) -> &[Arc<CatalogItem>] {
		&self.items
	}

	/// Member ids in insertion order.
	pub fn ids(&self) -> Vec<ItemId> {
		self.items.iter().map(|item| item.id).collect()
	}

	/// Returns true when `id` is a member.
	pub fn contains(&self, id: ItemId) -> bool {
		self.items.iter().any(|item| item.id == id)
	}

	/// Number of members.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Returns true when nothing is selected.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Free slots left.
	pub fn remaining(&self) -> usize {
		CAPACITY - self.items.len()
	}

	/// Returns true when no further item can be added.
	pub fn is_full(&self) -> bool {
		self.items.len() >= CAPACITY
	}
}
