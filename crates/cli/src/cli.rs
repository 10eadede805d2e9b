use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vitrin")]
#[command(about = "Compare catalog products side by side")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Catalog snapshot (JSON with `categories` and `products`)
	#[arg(long, short = 'c', value_name = "PATH", required = true)]
	pub catalog: PathBuf,

	/// Engine configuration (TOML)
	#[arg(long, value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// List catalog items matching the filters
	List {
		/// Filters applied to the listing.
		#[command(flatten)]
		filter: FilterArgs,
	},
	/// Build a comparison and print its attribute matrix
	Compare {
		/// Item ids to add, in order
		#[arg(long = "add", value_name = "ID")]
		add: Vec<u64>,

		/// Page address whose deep-link parameter is added after the clicks
		#[arg(long, value_name = "URL")]
		link: Option<String>,

		/// Only print rows whose values differ
		#[arg(long, short = 'd')]
		differences_only: bool,
	},
}

/// Catalog view filters.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
	/// Case-insensitive text matched against brand, model and category
	#[arg(long, short)]
	pub search: Option<String>,

	/// Main category id (includes its sub categories)
	#[arg(long, value_name = "ID")]
	pub main: Option<u64>,

	/// Sub category id (exact match)
	#[arg(long, value_name = "ID")]
	pub sub: Option<u64>,
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;
	use clap::error::ErrorKind;
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn command_definition_is_valid() {
		Cli::command().debug_assert();
	}

	#[test]
	fn catalog_is_required() {
		let error = Cli::try_parse_from(["vitrin", "list"]).unwrap_err();
		assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
	}

	#[test]
	fn compare_collects_ids_in_order() {
		let cli = Cli::try_parse_from(["vitrin", "-c", "catalog.json", "compare", "--add", "12", "--add", "10", "-d"]).unwrap();
		assert_eq!(cli.catalog, PathBuf::from("catalog.json"));
		match cli.command {
			Command::Compare { add, link, differences_only } => {
				assert_eq!(add, vec![12, 10]);
				assert_eq!(link, None);
				assert!(differences_only);
			}
			Command::List { .. } => panic!("expected compare"),
		}
	}
}
