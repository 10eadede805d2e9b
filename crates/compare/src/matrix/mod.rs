//! Dense attribute table built from a sparse selection.
//!
//! Rows are the sorted union of attribute names across the selected items;
//! columns are the selected items in insertion order. A cell holds the
//! formatted attribute value or [`MISSING`] when the item lacks that row.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use vitrin_catalog::{Attribute, CatalogItem, ItemId};


/// Placeholder for an attribute the item does not have.
pub const MISSING: &str = "-";

/// How attribute names are matched when forming rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeMatching {
	/// Names must match byte for byte; `VRAM` and `vram` are separate rows.
	#[default]
	Exact,
	/// Names are trimmed and lowercased before matching. The row keeps the
	/// first spelling encountered in selection order.
	Normalized,
}

impl AttributeMatching {
	fn key<'a>(self, name: &'a str) -> std::borrow::Cow<'a, str> {
		match self {
			Self::Exact => name.into(),
			Self::Normalized => name.trim().to_lowercase().into(),
		}
	}

	fn find<'i>(self, item: &'i CatalogItem, key: &str) -> Option<&'i Attribute> {
		item.attributes.iter().find(|a| self.key(&a.name) == key)
	}
}

/// The comparison table for one selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecMatrix {
	rows: Vec<String>,
	columns: Vec<ItemId>,
	/// Row-major cells, `rows.len() * columns.len()` entries.
	cells: Vec<String>,
}

impl SpecMatrix {
	/// Builds the table for `selection`.
	pub fn build(selection: &[Arc<CatalogItem>], matching: AttributeMatching) -> Self {
		// key -> row label, ordered by key
		let mut keyed: BTreeMap<String, String> = BTreeMap::new();
		for item in selection {
			for attribute in &item.attributes {
				keyed
					.entry(matching.key(&attribute.name).into_owned())
					.or_insert_with(|| attribute.name.clone());
			}
		}

		let columns: Vec<ItemId> = selection.iter().map(|item| item.id).collect();
		let mut rows = Vec::with_capacity(keyed.len());
		let mut cells = Vec::with_capacity(keyed.len() * columns.len());
		for (key, label) in keyed {
			cells.extend(selection.iter().map(|item| {
				matching
					.find(item, &key)
					.map_or_else(|| MISSING.to_string(), Attribute::display_value)
			}));
			rows.push(label);
		}

		Self { rows, columns, cells }
	}

	/// Row labels in ascending order.
	pub fn rows(&self) -> &[String] {
		&self.rows
	}

	/// Item ids in selection order.
	pub fn columns(&self) -> &[ItemId] {
		&self.columns
	}

	/// Returns true when the selection has no attributes at all.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// The formatted value of `row` for `item`.
	///
	/// `None` only when the row or the item is not part of the table; a
	/// missing attribute resolves to [`MISSING`].
	pub fn cell(&self, row: &str, item: ItemId) -> Option<&str> {
		let r = self.row_index(row)?;
		let c = self.columns.iter().position(|&id| id == item)?;
		Some(self.cells[r * self.columns.len() + c].as_str())
	}

	/// All cells of `row`, in column order.
	pub fn row_cells(&self, row: &str) -> Option<&[String]> {
		self.row_index(row).map(|r| self.cells_at(r))
	}

	/// Iterates rows together with their cells.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.rows
			.iter()
			.enumerate()
			.map(|(r, label)| (label.as_str(), self.cells_at(r)))
	}

	fn row_index(&self, row: &str) -> Option<usize> {
		self.rows.iter().position(|label| label == row)
	}

	fn cells_at(&self, r: usize) -> &[String] {
		let width = self.columns.len();
		&self.cells[r * width..(r + 1) * width]
	}
}
