use rustc_hash::FxHashMap;

use crate::ids::CategoryId;
use crate::item::Category;


/// Flattened view of the two-level category tree.
///
/// Categories without a parent are "main"; categories with a parent are
/// "sub". A sub whose parent is not part of the index is listed among the
/// mains and never appears in any [`subs_of`](Self::subs_of) result. Only one
/// level of nesting is modeled.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
	/// Categories in input order.
	categories: Vec<Category>,
	/// Position of each category in `categories`, keyed by id.
	by_id: FxHashMap<CategoryId, usize>,
}

impl CategoryIndex {
	/// Builds an index over `categories`, preserving input order.
	///
	/// Duplicate ids keep the first occurrence for lookups.
	pub fn build(categories: impl IntoIterator<Item = Category>) -> Self {
		let categories: Vec<Category> = categories.into_iter().collect();
		let mut by_id = FxHashMap::default();
		for (pos, category) in categories.iter().enumerate() {
			by_id.entry(category.id).or_insert(pos);
		}
		Self { categories, by_id }
	}

	/// Returns the number of indexed categories.
	pub fn len(&self) -> usize {
		self.categories.len()
	}

	/// Returns true when no categories are indexed.
	pub fn is_empty(&self) -> bool {
		self.categories.is_empty()
	}

	/// Looks up a category by id.
	pub fn get(&self, id: CategoryId) -> Option<&Category> {
		self.by_id.get(&id).map(|&pos| &self.categories[pos])
	}

	/// Returns the display name of a category.
	pub fn name_of(&self, id: CategoryId) -> Option<&str> {
		self.get(id).map(|c| c.name.as_str())
	}

	/// Returns true when `id` is indexed and iterates as a main category.
	pub fn is_main(&self, id: CategoryId) -> bool {
		self.get(id).is_some_and(|c| self.iterates_as_main(c))
	}

	/// Main categories in input order, dangling subs included.
	pub fn mains(&self) -> Vec<&Category> {
		self.categories.iter().filter(|c| self.iterates_as_main(c)).collect()
	}

	/// Direct children of `main_id` in input order.
	///
	/// Empty when `main_id` is not indexed, so dangling subs never show up.
	pub fn subs_of(&self, main_id: CategoryId) -> Vec<&Category> {
		if !self.by_id.contains_key(&main_id) {
			return Vec::new();
		}
		self.categories
			.iter()
			.filter(|c| c.parent == Some(main_id) && c.id != main_id)
			.collect()
	}

	/// Returns `main_id` followed by the ids of its direct children.
	pub fn descendants_of(&self, main_id: CategoryId) -> Vec<CategoryId> {
		std::iter::once(main_id)
			.chain(self.subs_of(main_id).into_iter().map(|c| c.id))
			.collect()
	}

	/// Returns true when `category` is `main_id` itself or one of its direct
	/// children.
	pub fn contains(&self, main_id: CategoryId, category: CategoryId) -> bool {
		category == main_id
			|| (self.by_id.contains_key(&main_id)
				&& self.get(category).is_some_and(|c| c.parent == Some(main_id)))
	}

	fn iterates_as_main(&self, category: &Category) -> bool {
		match category.parent {
			None => true,
			Some(parent) => !self.by_id.contains_key(&parent),
		}
	}
}
