use proptest::prelude::*;

use super::*;

fn item(id: u64, category: Option<u64>) -> Arc<CatalogItem> {
	let item = CatalogItem::new(id, "Brand", format!("Model {id}"));
	Arc::new(match category {
		Some(category) => item.in_category(category, format!("Category {category}")),
		None => item,
	})
}

#[test]
fn fifth_add_is_rejected_at_capacity() {
	let mut selection = SelectionSet::new();
	for id in 1..=4 {
		selection.add(item(id, Some(1))).unwrap();
	}
	assert!(selection.is_full());
	assert_eq!(selection.add(item(5, Some(1))), Err(AddError::AtCapacity { capacity: CAPACITY }));
	assert_eq!(selection.len(), 4);
}

#[test]
fn duplicate_add_is_rejected() {
	let mut selection = SelectionSet::new();
	selection.add(item(1, Some(1))).unwrap();
	assert_eq!(selection.add(item(1, Some(1))), Err(AddError::Duplicate(ItemId(1))));
	assert_eq!(selection.len(), 1);
}

#[test]
fn first_member_locks_the_category() {
	let mut selection = SelectionSet::new();
	selection.add(item(1, Some(1))).unwrap();
	assert_eq!(
		selection.add(item(2, Some(2))),
		Err(AddError::CategoryMismatch {
			expected: Some(CategoryId(1)),
			found: Some(CategoryId(2)),
		})
	);
	assert_eq!(selection.ids(), vec![ItemId(1)]);
}

#[test]
fn emptying_the_set_resets_the_constraint() {
	let mut selection = SelectionSet::new();
	selection.add(item(1, Some(1))).unwrap();
	assert!(selection.remove(ItemId(1)).is_some());
	assert_eq!(selection.constraint(), None);
	selection.add(item(2, Some(2))).unwrap();
	assert_eq!(selection.constraint(), Some(Some(CategoryId(2))));
}

#[test]
fn clear_resets_the_constraint() {
	let mut selection = SelectionSet::new();
	selection.add(item(1, Some(1))).unwrap();
	selection.add(item(2, Some(1))).unwrap();
	selection.clear();
	assert!(selection.is_empty());
	selection.add(item(3, Some(9))).unwrap();
	assert_eq!(selection.ids(), vec![ItemId(3)]);
}

#[test]
fn removing_an_absent_id_is_a_no_op() {
	let mut selection = SelectionSet::new();
	selection.add(item(1, Some(1))).unwrap();
	assert!(selection.remove(ItemId(42)).is_none());
	assert_eq!(selection.len(), 1);
}

#[test]
fn removing_the_first_member_keeps_the_constraint_of_the_new_head() {
	let mut selection = SelectionSet::new();
	selection.add(item(1, Some(1))).unwrap();
	selection.add(item(2, Some(1))).unwrap();
	selection.remove(ItemId(1));
	assert_eq!(selection.constraint(), Some(Some(CategoryId(1))));
	assert!(matches!(selection.add(item(3, Some(2))), Err(AddError::CategoryMismatch { .. })));
}

#[test]
fn uncategorized_items_only_join_each_other() {
	let mut selection = SelectionSet::new();
	selection.add(item(1, None)).unwrap();
	selection.add(item(2, None)).unwrap();
	assert_eq!(
		selection.add(item(3, Some(1))),
		Err(AddError::CategoryMismatch {
			expected: None,
			found: Some(CategoryId(1)),
		})
	);
}

#[test]
fn capacity_is_checked_before_duplicates() {
	let mut selection = SelectionSet::new();
	for id in 1..=4 {
		selection.add(item(id, Some(1))).unwrap();
	}
	assert!(matches!(selection.add(item(1, Some(1))), Err(AddError::AtCapacity { .. })));
}

#[test]
fn rejection_messages_are_distinct() {
	let messages = [
		AddError::AtCapacity { capacity: CAPACITY }.to_string(),
		AddError::Duplicate(ItemId(1)).to_string(),
		AddError::CategoryMismatch {
			expected: Some(CategoryId(1)),
			found: Some(CategoryId(2)),
		}
		.to_string(),
	];
	assert_ne!(messages[0], messages[1]);
	assert_ne!(messages[1], messages[2]);
	assert_ne!(messages[0], messages[2]);
}

#[test]
fn insertion_order_is_preserved() {
	let mut selection = SelectionSet::new();
	for id in [3, 1, 2] {
		selection.add(item(id, Some(1))).unwrap();
	}
	selection.remove(ItemId(1));
	selection.add(item(7, Some(1))).unwrap();
	assert_eq!(selection.ids(), vec![ItemId(3), ItemId(2), ItemId(7)]);
	assert_eq!(selection.remaining(), 1);
}

#[derive(Debug, Clone)]
enum Op {
	Add { id: u64, category: Option<u64> },
	Remove(u64),
	Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
	prop_oneof![
		6 => (0u64..8, prop::option::weighted(0.9, 0u64..3)).prop_map(|(id, category)| Op::Add { id, category }),
		2 => (0u64..8).prop_map(Op::Remove),
		1 => Just(Op::Clear),
	]
}

proptest! {
	/// Capacity, uniqueness and homogeneity hold after every operation, and a
	/// rejected add leaves the set untouched.
	#[test]
	fn invariants_hold_for_any_sequence(ops in prop::collection::vec(arb_op(), 0..64)) {
		let mut selection = SelectionSet::new();
		for op in ops {
			match op {
				Op::Add { id, category } => {
					let before = selection.ids();
					let was_full = selection.is_full();
					let was_member = selection.contains(ItemId(id));
					match selection.add(item(id, category)) {
						Ok(()) => prop_assert_eq!(selection.ids().last().copied(), Some(ItemId(id))),
						Err(err) => {
							prop_assert_eq!(selection.ids(), before);
							match err {
								AddError::AtCapacity { .. } => prop_assert!(was_full),
								AddError::Duplicate(dup) => {
									prop_assert!(was_member);
									prop_assert_eq!(dup, ItemId(id));
								}
								AddError::CategoryMismatch { expected, found } => prop_assert_ne!(expected, found),
							}
						}
					}
				}
				Op::Remove(id) => {
					selection.remove(ItemId(id));
					prop_assert!(!selection.contains(ItemId(id)));
				}
				Op::Clear => selection.clear(),
			}

			prop_assert!(selection.len() <= CAPACITY);
			let mut ids = selection.ids();
			ids.sort();
			ids.dedup();
			prop_assert_eq!(ids.len(), selection.len());
			if let Some(head) = selection.constraint() {
				prop_assert!(selection.items().iter().all(|i| i.category_id() == head));
			}
		}
	}
}
