//! URL handling module for Wavefront
//!
//! This module turns raw links into the normalized absolute URLs used as
//! frontier entries and visited-set keys, and derives the origin a URL
//! belongs to for robots.txt lookups.

mod normalize;
mod origin;

pub use normalize::{normalize_url, resolve_link};
pub use origin::{origin_of, robots_url};
