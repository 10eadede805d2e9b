use async_trait::async_trait;
use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::item::{Attribute, Category};
use crate::source::{Page, StaticCatalog};

struct FailingSource;

#[async_trait]
impl CatalogSource for FailingSource {
	async fn list_page(&self, _query: CatalogQuery, _page: u32) -> Result<Page<CatalogItem>, SourceError> {
		Err(SourceError::Unavailable("connection refused".into()))
	}

	async fn list_categories(&self) -> Result<Vec<Category>, SourceError> {
		Err(SourceError::Unavailable("connection refused".into()))
	}
}

fn gpu_catalog() -> StaticCatalog {
	StaticCatalog::new(
		vec![
			CatalogItem::new(10, "Nova", "RX 8")
				.in_category(2, "GPU Sub")
				.with_attribute(Attribute::with_unit("VRAM", "8", "GB")),
			CatalogItem::new(11, "Zenith", "GT 12")
				.in_category(1, "GPU")
				.with_attribute(Attribute::with_unit("VRAM", "12", "GB")),
			CatalogItem::new(12, "Corex", "i7").in_category(3, "CPU"),
			CatalogItem::new(13, "Loose", "Cable"),
		],
		vec![Category::main(1, "GPU"), Category::sub(2, "GPU Sub", 1), Category::main(3, "CPU")],
	)
}

async fn loaded_view() -> CatalogView {
	let source = gpu_catalog();
	let mut view = CatalogView::default();
	view.load_categories(&source).await;
	view.refresh(&source).await.unwrap();
	view
}

fn visible_ids(view: &CatalogView) -> Vec<u64> {
	view.visible_items().iter().map(|i| i.id.get()).collect()
}

#[tokio::test]
async fn main_category_filter_includes_direct_subs() {
	let mut view = loaded_view().await;
	view.select_main_category(Some(CategoryId(1)));
	assert_eq!(visible_ids(&view), vec![10, 11]);
}

#[tokio::test]
async fn sub_category_filter_is_exact() {
	let mut view = loaded_view().await;
	view.select_main_category(Some(CategoryId(1)));
	view.select_sub_category(Some(CategoryId(2)));
	assert_eq!(visible_ids(&view), vec![10]);
}

#[tokio::test]
async fn picking_a_main_category_clears_the_sub() {
	let mut view = loaded_view().await;
	view.set_category_filter(Some(CategoryId(1)), Some(CategoryId(2)));
	view.select_main_category(Some(CategoryId(3)));
	assert_eq!(view.category_filter(), CategoryFilter {
		main: Some(CategoryId(3)),
		sub: None,
	});
	assert_eq!(visible_ids(&view), vec![12]);
}

#[tokio::test]
async fn no_filter_shows_everything_in_fetch_order() {
	let view = loaded_view().await;
	assert_eq!(visible_ids(&view), vec![10, 11, 12, 13]);
}

#[rstest]
#[case("nova", vec![10])]
#[case("GT 1", vec![11])]
#[case("gpu", vec![10, 11])]
#[case("  CPU ", vec![12])]
#[case("cable", vec![13])]
#[case("missing", vec![])]
#[tokio::test]
async fn search_matches_brand_model_or_category(#[case] text: &str, #[case] expected: Vec<u64>) {
	let mut view = loaded_view().await;
	view.set_search_text(text);
	assert_eq!(visible_ids(&view), expected);
}

#[tokio::test]
async fn search_ignores_surrounding_whitespace() {
	let mut view = loaded_view().await;
	view.set_search_text("nova ");
	assert_eq!(visible_ids(&view), vec![10]);
	view.set_search_text("\tzenith gt");
	assert_eq!(visible_ids(&view), Vec::<u64>::new());
	view.set_search_text(" zenith");
	assert_eq!(visible_ids(&view), vec![11]);
}

#[tokio::test]
async fn search_and_category_filters_intersect() {
	let mut view = loaded_view().await;
	view.select_main_category(Some(CategoryId(1)));
	view.set_search_text("zenith");
	assert_eq!(visible_ids(&view), vec![11]);
}

#[tokio::test]
async fn scope_is_pushed_to_server_only_for_sub_categories() {
	let mut view = loaded_view().await;
	assert_eq!(view.select_main_category(Some(CategoryId(1))), CatalogQuery::all());
	assert_eq!(view.select_sub_category(Some(CategoryId(2))), CatalogQuery::in_category(CategoryId(2)));

	let mut unscoped = CatalogView::new(ViewOptions {
		scoped_fetch: false,
		..ViewOptions::default()
	});
	assert_eq!(unscoped.set_category_filter(Some(CategoryId(1)), Some(CategoryId(2))), CatalogQuery::all());
}

#[tokio::test]
async fn scoped_refresh_still_filters_locally() {
	let source = gpu_catalog();
	let mut view = CatalogView::default();
	view.load_categories(&source).await;
	view.set_category_filter(Some(CategoryId(1)), Some(CategoryId(2)));
	view.refresh(&source).await.unwrap();
	assert_eq!(view.items().len(), 1);
	assert_eq!(visible_ids(&view), vec![10]);
}

#[tokio::test]
async fn refresh_concatenates_pages() {
	let source = gpu_catalog().paginated(1);
	let mut view = CatalogView::default();
	assert_eq!(view.refresh(&source).await.unwrap(), 4);
	assert_eq!(visible_ids(&view), vec![10, 11, 12, 13]);
}

#[tokio::test]
async fn page_limit_truncates_listing() {
	let source = gpu_catalog().paginated(1);
	let mut view = CatalogView::new(ViewOptions {
		max_pages: 2,
		..ViewOptions::default()
	});
	let rx = view.subscribe();
	assert_eq!(view.refresh(&source).await.unwrap(), 2);

	// the partial listing is still published as ready
	assert_eq!(rx.borrow().listing().map(|l| l.len()), Some(2));
	assert_eq!(visible_ids(&view), vec![10, 11]);
	assert!(view.find(ItemId(13)).is_none());
}

#[tokio::test]
async fn state_moves_from_loading_to_ready() {
	let source = gpu_catalog();
	let mut view = CatalogView::default();
	let rx = view.subscribe();
	assert!(matches!(*rx.borrow(), CatalogState::Loading));

	view.refresh(&source).await.unwrap();
	let state = rx.borrow().clone();
	assert!(state.is_ready());
	assert_eq!(state.listing().map(|l| l.len()), Some(4));
}

#[tokio::test]
async fn failed_refresh_marks_view_unavailable() {
	let mut view = loaded_view().await;
	let err = view.refresh(&FailingSource).await.unwrap_err();
	assert!(matches!(err, SourceError::Unavailable(_)));
	assert!(matches!(view.state(), CatalogState::Unavailable(_)));
	assert!(view.visible_items().is_empty());
}

#[tokio::test]
async fn failed_category_load_leaves_empty_index() {
	let mut view = CatalogView::default();
	view.load_categories(&FailingSource).await;
	assert!(view.categories().is_empty());
}

#[test]
fn stale_completion_is_dropped() {
	let mut view = CatalogView::default();
	let older = view.begin_refresh();
	let newer = view.begin_refresh();

	assert!(view.complete_refresh(newer, Ok(vec![CatalogItem::new(2, "New", "Listing")])));
	assert!(!view.complete_refresh(older, Ok(vec![CatalogItem::new(1, "Old", "Listing")])));
	assert!(!view.complete_refresh(older, Err(SourceError::Unavailable("late".into()))));

	assert_eq!(visible_ids(&view), vec![2]);
	assert!(view.state().is_ready());
}

#[test]
fn find_looks_up_loaded_items() {
	let mut view = CatalogView::default();
	let ticket = view.begin_refresh();
	view.complete_refresh(ticket, Ok(vec![CatalogItem::new(7, "A", "B")]));
	assert_eq!(view.find(ItemId(7)).map(|i| i.id), Some(ItemId(7)));
	assert!(view.find(ItemId(8)).is_none());
}

proptest! {
	#[test]
	fn blank_search_matches_everything(blank in "[ \t]{0,4}", count in 0usize..12) {
		let mut view = CatalogView::default();
		let ticket = view.begin_refresh();
		let items = (0..count as u64).map(|id| CatalogItem::new(id, "Brand", "Model")).collect();
		view.complete_refresh(ticket, Ok(items));
		view.set_search_text(&blank);
		prop_assert_eq!(view.visible_items().len(), count);
	}
}
