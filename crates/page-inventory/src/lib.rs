//! Page inventory - what is on the page right now
//!
//! Lists addressable elements (anything with an id or a class) and every URL
//! the document references, normalized against the page base URL. Also maps
//! a URL back to a clickable anchor.

pub mod errors;
pub mod identity;
pub mod inventory;
pub mod normalize;

pub use errors::*;
pub use identity::element_identifier;
pub use inventory::*;
pub use normalize::normalize_urls;
