//! Element locator - multi-strategy candidate search
//!
//! A descriptor (`#id`, `.class` or a bare identifier, plus an optional title)
//! is resolved in one page query that runs every applicable strategy:
//! - exact id lookup (unprefixed identifiers only)
//! - the identifier as a selector
//! - class-name lookup for `.`-prefixed identifiers
//! - `data-id`, `data-game-id`, id-substring and class-substring attribute selectors
//!
//! Matches are pooled in strategy order, de-duplicated per element, and ranked
//! by title.

pub mod errors;
pub mod resolver;
pub mod strategies;
pub mod types;

pub use errors::*;
pub use resolver::*;
pub use strategies::*;
pub use types::*;
