use vitrin_catalog::{CatalogItem, ItemId};

use crate::selection::AddError;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
	/// The action succeeded.
	Success,
	/// Informational, nothing failed.
	Info,
	/// The action was refused.
	Error,
}

/// What a notice reports. Every add outcome has its own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
	/// An item joined the comparison.
	Added,
	/// Refused: the comparison is full.
	AtCapacity,
	/// Refused: the item is already compared.
	Duplicate,
	/// Refused: the item belongs to another category.
	CategoryMismatch,
	/// An item left the comparison.
	Removed,
	/// The comparison was emptied.
	Cleared,
	/// A deep-linked item is not in the catalog.
	DeepLinkMissing,
}

impl From<&AddError> for NoticeKind {
	fn from(error: &AddError) -> Self {
		match error {
			AddError::AtCapacity { .. } => Self::AtCapacity,
			AddError::Duplicate(_) => Self::Duplicate,
			AddError::CategoryMismatch { .. } => Self::CategoryMismatch,
		}
	}
}

/// A message surfaced to the user after a comparison action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	/// Severity.
	pub level: Level,
	/// Outcome kind.
	pub kind: NoticeKind,
	/// Display text.
	pub message: String,
}

impl Notice {
	pub(crate) fn added(item: &CatalogItem) -> Self {
		Self {
			level: Level::Success,
			kind: NoticeKind::Added,
			message: format!("{} added to comparison", item.display_name()),
		}
	}

	pub(crate) fn rejected(error: &AddError) -> Self {
		Self {
			level: Level::Error,
			kind: error.into(),
			message: capitalize(&error.to_string()),
		}
	}

	pub(crate) fn removed(item: &CatalogItem) -> Self {
		Self {
			level: Level::Info,
			kind: NoticeKind::Removed,
			message: format!("{} removed from comparison", item.display_name()),
		}
	}

	pub(crate) fn cleared() -> Self {
		Self {
			level: Level::Info,
			kind: NoticeKind::Cleared,
			message: "Comparison cleared".to_string(),
		}
	}

	pub(crate) fn deep_link_missing(id: ItemId) -> Self {
		Self {
			level: Level::Info,
			kind: NoticeKind::DeepLinkMissing,
			message: format!("Product {id} could not be found in the catalog"),
		}
	}

	/// Returns true for successful outcomes.
	pub fn is_success(&self) -> bool {
		self.level == Level::Success
	}
}

fn capitalize(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
