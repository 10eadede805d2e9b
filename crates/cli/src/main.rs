//! Vitrin command-line front end.
//!
//! Loads a catalog snapshot, applies listing filters and builds comparisons
//! through the same engine an interactive storefront would drive.

mod cli;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use vitrin_catalog::{CatalogView, CategoryId, ItemId, StaticCatalog};
use vitrin_compare::{CompareConfig, Comparison, DeepLinkIntake, UrlEntryPoint};

use crate::cli::{Cli, Command, FilterArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let config = match &cli.config {
		Some(path) => CompareConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
		None => CompareConfig::default(),
	};
	let catalog_path = cli.catalog;
	let source = StaticCatalog::load(&catalog_path).with_context(|| format!("loading catalog {}", catalog_path.display()))?;
	info!(path = %catalog_path.display(), items = source.items().len(), "catalog snapshot loaded");

	let mut view = CatalogView::new(config.catalog);
	view.load_categories(&source).await;

	match cli.command {
		Command::List { filter } => list(&mut view, &source, filter).await,
		Command::Compare {
			add,
			link,
			differences_only,
		} => compare(&mut view, &source, config, &add, link.as_deref(), differences_only).await,
	}
}

async fn list(view: &mut CatalogView, source: &StaticCatalog, filter: FilterArgs) -> Result<()> {
	if let Some(text) = &filter.search {
		view.set_search_text(text);
	}
	view.set_category_filter(filter.main.map(CategoryId), filter.sub.map(CategoryId));
	view.refresh(source).await.context("catalog unavailable")?;

	print!("{}", render::listing(&view.visible_items()));
	Ok(())
}

async fn compare(
	view: &mut CatalogView,
	source: &StaticCatalog,
	config: CompareConfig,
	add: &[u64],
	link: Option<&str>,
	differences_only: bool,
) -> Result<()> {
	let param = config.deep_link.param.clone();
	let mut comparison = Comparison::new(config);

	let intake = match link {
		Some(link) => {
			let mut entry = UrlEntryPoint::parse(link).with_context(|| format!("invalid link {link}"))?;
			let intake = DeepLinkIntake::from_entry_point(&mut entry, &param);
			info!(url = %entry.url(), "deep link consumed");
			intake
		}
		None => None,
	};

	let rx = view.subscribe();
	view.refresh(source).await.context("catalog unavailable")?;

	for &raw in add {
		match comparison.add_by_id(view, ItemId(raw)) {
			Some(notice) => eprintln!("{}", render::notice(&notice)),
			None => warn!(id = raw, "item not in catalog"),
		}
	}

	if let Some(intake) = intake
		&& let Some(notice) = comparison.run_deep_link(intake, rx, CancellationToken::new()).await
	{
		eprintln!("{}", render::notice(&notice));
	}

	comparison.set_differences_only(differences_only);
	let snapshot = comparison.snapshot();
	print!("{}", render::matrix(&snapshot, comparison.selection().items()));
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = EnvFilter::try_from_env("VITRIN_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("vitrin=debug,vitrin_catalog=debug,vitrin_compare=debug,warn")
		} else {
			EnvFilter::new("vitrin=info,vitrin_catalog=info,vitrin_compare=info,warn")
		}
	});

	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
		.init();
}
