use rustc_hash::FxHashSet;

use crate::matrix::SpecMatrix;


/// Per-row difference flags for a [`SpecMatrix`].
///
/// A row differs when its formatted cells hold more than one distinct string.
/// With fewer than two columns nothing can differ.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffFlags {
	/// One flag per matrix row, same order.
	flags: Vec<bool>,
}

impl DiffFlags {
	/// Computes the flags for every row of `matrix`.
	pub fn evaluate(matrix: &SpecMatrix) -> Self {
		if matrix.columns().len() < 2 {
			return Self {
				flags: vec![false; matrix.rows().len()],
			};
		}
		let flags = matrix
			.iter()
			.map(|(_, cells)| cells.iter().map(String::as_str).collect::<FxHashSet<_>>().len() > 1)
			.collect();
		Self { flags }
	}

	/// Flags in row order.
	pub fn as_slice(&self) -> &[bool] {
		&self.flags
	}

	/// Flag of the row at `index`; out-of-range rows never differ.
	pub fn is_different_at(&self, index: usize) -> bool {
		self.flags.get(index).copied().unwrap_or(false)
	}

	/// Flag of the row labelled `row` in `matrix`.
	pub fn is_different(&self, matrix: &SpecMatrix, row: &str) -> bool {
		matrix
			.rows()
			.iter()
			.position(|label| label == row)
			.is_some_and(|index| self.is_different_at(index))
	}

	/// Number of differing rows.
	pub fn count(&self) -> usize {
		self.flags.iter().filter(|&&flag| flag).count()
	}

	/// Labels of the differing rows, in matrix order.
	pub fn differing_rows<'m>(&self, matrix: &'m SpecMatrix) -> Vec<&'m str> {
		filter_to_differences_only(matrix.rows(), self)
	}
}

/// Keeps only the rows flagged as different, preserving order.
pub fn filter_to_differences_only<'r>(rows: &'r [String], flags: &DiffFlags) -> Vec<&'r str> {
	rows.iter()
		.enumerate()
		.filter(|&(index, _)| flags.is_different_at(index))
		.map(|(_, row)| row.as_str())
		.collect()
}

/// One rendered row of the comparison table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow<'m> {
	/// Attribute label.
	pub label: &'m str,
	/// Cells in column order.
	pub cells: &'m [String],
	/// Whether the cells disagree.
	pub different: bool,
}

/// The rows a comparison table shows for a given "differences only" toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixView<'m> {
	/// Visible rows in matrix order.
	pub rows: Vec<MatrixRow<'m>>,
	/// Whether only differing rows are shown.
	pub differences_only: bool,
}

impl<'m> MatrixView<'m> {
	/// Builds the visible rows of `matrix`.
	pub fn new(matrix: &'m SpecMatrix, flags: &DiffFlags, differences_only: bool) -> Self {
		let rows = matrix
			.iter()
			.enumerate()
			.map(|(index, (label, cells))| MatrixRow {
				label,
				cells,
				different: flags.is_different_at(index),
			})
			.filter(|row| !differences_only || row.different)
			.collect();
		Self { rows, differences_only }
	}

	/// Returns true when no row is visible.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}
