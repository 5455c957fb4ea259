use std::env;
use std::path::PathBuf;
use std::time::Duration;

use autoweb_core_types::Viewport;
use serde::{Deserialize, Serialize};

/// Configuration for launching and driving the browser.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdpConfig {
    /// Chromium binary. Detected from `AUTOWEB_CHROME`, `PATH` and the usual
    /// install locations when unset.
    pub executable: Option<PathBuf>,
    pub user_data_dir: Option<PathBuf>,
    pub headless: bool,
    /// Attach to an already running browser instead of launching one.
    pub websocket_url: Option<String>,
    /// Upper bound for any single DevTools command.
    pub default_deadline_ms: u64,
    pub surface: SurfaceConfig,
    pub touch_emulation: bool,
    /// Extra command-line switches passed to Chromium on launch.
    pub extra_args: Vec<String>,
}

impl Default for CdpConfig {
    fn default() -> Self {
        Self {
            executable: None,
            user_data_dir: None,
            headless: resolve_headless_default(),
            websocket_url: None,
            default_deadline_ms: 30_000,
            surface: SurfaceConfig::default(),
            touch_emulation: true,
            extra_args: Vec::new(),
        }
    }
}

impl CdpConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.default_deadline_ms)
    }
}

/// Device metrics the page is pinned to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    pub device_scale_factor: f64,
    pub mobile: bool,
}

impl SurfaceConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(f64::from(self.width), f64::from(self.height))
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 375,
            height: 667,
            device_scale_factor: 2.0,
            mobile: true,
        }
    }
}

fn resolve_headless_default() -> bool {
    // "0", "false", "no", "off" means headful
    match env::var("AUTOWEB_HEADLESS") {
        Ok(value) => {
            let lower = value.to_ascii_lowercase();
            !matches!(lower.as_str(), "0" | "false" | "no" | "off")
        }
        Err(_) => true,
    }
}
