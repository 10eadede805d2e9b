use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, ItemId};

/// A single named attribute of a catalog item, e.g. `VRAM = 8 GB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
	/// Attribute name as stored by the catalog. Matching is exact unless the
	/// caller opts into normalization.
	pub name: String,
	/// Raw display value.
	pub value: String,
	/// Optional unit appended after a single space when non-empty.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub unit: Option<String>,
}

impl Attribute {
	/// Creates an attribute without a unit.
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			unit: None,
		}
	}

	/// Creates an attribute carrying a unit.
	pub fn with_unit(name: impl Into<String>, value: impl Into<String>, unit: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			unit: Some(unit.into()),
		}
	}

	/// Formats the attribute for display: `value`, or `value unit` when the
	/// unit is a non-empty string.
	pub fn display_value(&self) -> String {
		match self.unit.as_deref() {
			Some(unit) if !unit.is_empty() => format!("{} {unit}", self.value),
			_ => self.value.clone(),
		}
	}
}

/// The category record embedded on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
	/// Category identifier.
	pub id: CategoryId,
	/// Category display name, searched by the catalog view.
	pub name: String,
}

/// One user review rating attached to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
	/// Star rating as stored by the review collaborator.
	pub rating: u8,
}

/// A comparable catalog record.
///
/// Attribute lists are ordered and sparse: two items may share none, some or
/// all attribute names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
	/// Unique, stable identifier.
	pub id: ItemId,
	/// Manufacturer name.
	pub brand: String,
	/// Model name.
	pub model: String,
	/// Release year, when known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub release_year: Option<u16>,
	/// Owning category. Items without one can only be compared with other
	/// uncategorized items.
	#[serde(default)]
	pub category: Option<CategoryRef>,
	/// Ordered attribute list.
	#[serde(default, alias = "product_specs")]
	pub attributes: Vec<Attribute>,
	/// User review ratings.
	#[serde(default, alias = "user_reviews")]
	pub reviews: Vec<Review>,
}

impl CatalogItem {
	/// Creates an item with no category, attributes or reviews.
	pub fn new(id: u64, brand: impl Into<String>, model: impl Into<String>) -> Self {
		Self {
			id: ItemId(id),
			brand: brand.into(),
			model: model.into(),
			release_year: None,
			category: None,
			attributes: Vec::new(),
			reviews: Vec::new(),
		}
	}

	/// Sets the owning category.
	pub fn in_category(mut self, id: u64, name: impl Into<String>) -> Self {
		self.category = Some(CategoryRef {
			id: CategoryId(id),
			name: name.into(),
		});
		self
	}

	/// Sets the release year.
	pub fn released(mut self, year: u16) -> Self {
		self.release_year = Some(year);
		self
	}

	/// Appends an attribute.
	pub fn with_attribute(mut self, attribute: Attribute) -> Self {
		self.attributes.push(attribute);
		self
	}

	/// Returns the owning category id, if any.
	pub fn category_id(&self) -> Option<CategoryId> {
		self.category.as_ref().map(|c| c.id)
	}

	/// Returns the owning category name, if any.
	pub fn category_name(&self) -> Option<&str> {
		self.category.as_ref().map(|c| c.name.as_str())
	}

	/// Human-readable name: brand followed by model.
	pub fn display_name(&self) -> String {
		format!("{} {}", self.brand.trim(), self.model.trim()).trim().to_string()
	}

	/// Returns the first attribute with exactly this name.
	pub fn attribute(&self, name: &str) -> Option<&Attribute> {
		self.attributes.iter().find(|a| a.name == name)
	}

	/// Mean review rating, or `None` without reviews.
	pub fn average_rating(&self) -> Option<f32> {
		if self.reviews.is_empty() {
			return None;
		}
		let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
		Some(total as f32 / self.reviews.len() as f32)
	}
}

/// A node of the category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
	/// Category identifier.
	pub id: CategoryId,
	/// Display name.
	pub name: String,
	/// Parent category. `None` marks a main category.
	#[serde(default)]
	pub parent: Option<CategoryId>,
}

impl Category {
	/// Creates a main category.
	pub fn main(id: u64, name: impl Into<String>) -> Self {
		Self {
			id: CategoryId(id),
			name: name.into(),
			parent: None,
		}
	}

	/// Creates a sub category under `parent`.
	pub fn sub(id: u64, name: impl Into<String>, parent: u64) -> Self {
		Self {
			parent: Some(CategoryId(parent)),
			..Self::main(id, name)
		}
	}
}
