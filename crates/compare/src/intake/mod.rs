//! One-shot intake of an item requested through the page address.
//!
//! The identifier is read and stripped from the entry point once. Resolution
//! waits for the catalog view to publish a ready listing, looks the item up
//! and hands it to the same add path a click uses.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;
use vitrin_catalog::{CatalogItem, CatalogState, ItemId};


/// The addressable location a page was entered through.
pub trait EntryPoint {
	/// Returns the value of parameter `name` and removes it from the
	/// location, so later reads and reloads no longer see it.
	fn take_param(&mut self, name: &str) -> Option<String>;
}

/// An [`EntryPoint`] over a URL's query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntryPoint {
	url: Url,
}

impl UrlEntryPoint {
	/// Wraps `url`.
	pub fn new(url: Url) -> Self {
		Self { url }
	}

	/// Parses `input` as an absolute URL.
	pub fn parse(input: &str) -> Result<Self, url::ParseError> {
		Url::parse(input).map(Self::new)
	}

	/// The location as it should now be displayed.
	pub fn url(&self) -> &Url {
		&self.url
	}
}

impl EntryPoint for UrlEntryPoint {
	fn take_param(&mut self, name: &str) -> Option<String> {
		let mut taken = None;
		let mut kept = Vec::new();
		for (key, value) in self.url.query_pairs() {
			if key == name {
				taken.get_or_insert_with(|| value.into_owned());
			} else {
				kept.push((key.into_owned(), value.into_owned()));
			}
		}
		if taken.is_none() {
			return None;
		}

		if kept.is_empty() {
			self.url.set_query(None);
		} else {
			self.url.query_pairs_mut().clear().extend_pairs(kept);
		}
		taken
	}
}

/// How a pending intake ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeResolution {
	/// The item is in the loaded catalog.
	Found(Arc<CatalogItem>),
	/// The catalog loaded without the item.
	NotFound(ItemId),
	/// The view went away before the catalog loaded.
	Abandoned(ItemId),
}

/// A deep-linked item waiting for the catalog to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeepLinkIntake {
	id: ItemId,
}

impl DeepLinkIntake {
	/// Creates an intake for `id`.
	pub fn new(id: ItemId) -> Self {
		Self { id }
	}

	/// Reads and strips parameter `param` from `entry`.
	///
	/// Returns `None` when the parameter is absent, empty or not an item id;
	/// the parameter is stripped in every case where it was present.
	pub fn from_entry_point(entry: &mut dyn EntryPoint, param: &str) -> Option<Self> {
		let raw = entry.take_param(param)?;
		if raw.trim().is_empty() {
			return None;
		}
		match raw.parse::<ItemId>() {
			Ok(id) => {
				debug!(%id, param, "deep link intake pending");
				Some(Self::new(id))
			}
			Err(error) => {
				warn!(%error, param, "ignoring deep link with invalid item id");
				None
			}
		}
	}

	/// The requested item id.
	pub fn id(&self) -> ItemId {
		self.id
	}

	/// Waits for a ready catalog and looks the item up.
	///
	/// An unavailable catalog keeps the intake pending until a later load
	/// succeeds. Cancellation or a dropped catalog view abandons the intake.
	pub async fn resolve(self, mut catalog: watch::Receiver<CatalogState>, cancel: CancellationToken) -> IntakeResolution {
		let listing = tokio::select! {
			biased;
			_ = cancel.cancelled() => None,
			state = catalog.wait_for(CatalogState::is_ready) => state.ok().and_then(|state| state.listing().cloned()),
		};

		let Some(listing) = listing else {
			debug!(id = %self.id, "deep link intake abandoned");
			return IntakeResolution::Abandoned(self.id);
		};

		match listing.iter().find(|item| item.id == self.id) {
			Some(item) => {
				debug!(id = %self.id, "deep link resolved");
				IntakeResolution::Found(Arc::clone(item))
			}
			None => {
				debug!(id = %self.id, "deep link target not in catalog");
				IntakeResolution::NotFound(self.id)
			}
		}
	}
}
