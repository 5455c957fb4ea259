//! Chromium DevTools Protocol backend.
//!
//! Launches (or attaches to) a Chromium instance through chromiumoxide, pins
//! the page to a mobile surface with touch emulation, and implements the
//! page ports on top of it:
//! - queries run through `Runtime.evaluate`
//! - taps and swipes are synthesized with `Input.dispatchTouchEvent`
//! - navigation uses `Page.navigate` / `Page.reload`

pub mod config;
pub mod error;
pub mod touch;

mod detect;
mod session;

pub use config::{CdpConfig, SurfaceConfig};
pub use detect::detect_chrome_executable;
pub use error::{AdapterError, AdapterErrorKind};
pub use session::CdpSession;
pub use touch::{swipe_sequence, tap_sequence, TouchPhase, TouchStep};
