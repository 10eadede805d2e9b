//! Plain-text rendering of listings, notices and comparison tables.

use std::fmt::Write;
use std::sync::Arc;

use vitrin_catalog::CatalogItem;
use vitrin_compare::{ComparisonSnapshot, Level, MISSING, Notice};

/// Marker printed in front of rows whose values differ.
const DIFF_MARK: char = '*';

/// One line per item: id, display name and category.
pub fn listing(items: &[Arc<CatalogItem>]) -> String {
	let mut out = String::new();
	for item in items {
		let category = item.category_name().unwrap_or("uncategorized");
		let _ = writeln!(out, "{:>6}  {}  [{category}]", item.id, item.display_name());
	}
	out
}

/// A single notice line.
pub fn notice(notice: &Notice) -> String {
	let tag = match notice.level {
		Level::Success => "ok",
		Level::Info => "info",
		Level::Error => "error",
	};
	format!("{tag}: {}", notice.message)
}

/// The comparison table: a header of item names, the category, release year
/// and average rating lines, then one line per visible attribute row.
pub fn matrix(snapshot: &ComparisonSnapshot, items: &[Arc<CatalogItem>]) -> String {
	let view = snapshot.view();

	let mut lines: Vec<(String, Vec<String>)> = Vec::with_capacity(view.rows.len() + 4);
	lines.push((String::new(), items.iter().map(|item| item.display_name()).collect()));
	lines.push((
		"  Category".to_string(),
		items.iter().map(|item| item.category_name().unwrap_or(MISSING).to_string()).collect(),
	));
	lines.push((
		"  Released".to_string(),
		items
			.iter()
			.map(|item| item.release_year.map_or_else(|| MISSING.to_string(), |year| year.to_string()))
			.collect(),
	));
	lines.push((
		"  Rating".to_string(),
		items
			.iter()
			.map(|item| item.average_rating().map_or_else(|| MISSING.to_string(), |r| format!("{r:.1}")))
			.collect(),
	));
	for row in &view.rows {
		let mark = if row.different { DIFF_MARK } else { ' ' };
		lines.push((format!("{mark} {}", row.label), row.cells.to_vec()));
	}

	let label_width = lines.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
	let widths: Vec<usize> = (0..items.len())
		.map(|col| {
			lines
				.iter()
				.filter_map(|(_, cells)| cells.get(col))
				.map(|cell| cell.chars().count())
				.max()
				.unwrap_or(0)
		})
		.collect();

	let mut out = String::new();
	for (label, cells) in &lines {
		let mut line = format!("{label:<label_width$}");
		for (cell, width) in cells.iter().zip(&widths) {
			let _ = write!(line, " | {cell:<width$}");
		}
		out.push_str(line.trim_end());
		out.push('\n');
	}
	if view.is_empty() && view.differences_only && items.len() > 1 {
		out.push_str("(no differing attributes)\n");
	}
	out
}
