use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseIdError;

macro_rules! define_id {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub u64);

		impl $name {
			/// Returns the raw numeric identifier.
			pub const fn get(self) -> u64 {
				self.0
			}
		}

		impl From<u64> for $name {
			fn from(raw: u64) -> Self {
				Self(raw)
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				fmt::Display::fmt(&self.0, f)
			}
		}

		impl FromStr for $name {
			type Err = ParseIdError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				let trimmed = s.trim();
				trimmed
					.parse::<u64>()
					.map(Self)
					.map_err(|source| ParseIdError {
						input: trimmed.to_string(),
						source,
					})
			}
		}
	};
}

define_id!(
	/// Stable identifier of a catalog item.
	ItemId
);

define_id!(
	/// Identifier of a catalog category.
	CategoryId
);
