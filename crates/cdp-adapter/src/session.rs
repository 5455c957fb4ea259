use std::future::Future;

use action_primitives::{
    ActionError, GestureAck, GestureActuator, PageNavigator, PageQuery, PageQueryChannel,
    SurfaceMetrics, Swipe,
};
use async_trait::async_trait;
use autoweb_core_types::{Point, Viewport};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::{
    SetDeviceMetricsOverrideParams, SetTouchEmulationEnabledParams,
};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchTouchEventParams, DispatchTouchEventType, TouchPoint,
};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::config::CdpConfig;
use crate::detect::detect_chrome_executable;
use crate::error::{AdapterError, AdapterErrorKind};
use crate::touch::{swipe_sequence, tap_sequence, TouchPhase, TouchStep};

/// One browser page pinned to the configured mobile surface.
pub struct CdpSession {
    config: CdpConfig,
    browser: Mutex<Browser>,
    page: Page,
    handler_task: JoinHandle<()>,
    launched: bool,
}

impl CdpSession {
    /// Launches Chromium (or attaches to `websocket_url`) and opens a blank page.
    pub async fn start(config: CdpConfig) -> Result<Self, AdapterError> {
        let launched = config.websocket_url.is_none();
        let (browser, mut handler) = match &config.websocket_url {
            Some(url) => Browser::connect(url.clone())
                .await
                .map_err(|err| AdapterError::cdp(AdapterErrorKind::CdpIo, err))?,
            None => Browser::launch(browser_config(&config)?)
                .await
                .map_err(|err| AdapterError::cdp(AdapterErrorKind::Launch, err))?,
        };

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    debug!(error = %err, "browser handler error");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(err) => {
                handler_task.abort();
                return Err(AdapterError::cdp(AdapterErrorKind::CdpIo, err));
            }
        };

        let session = Self {
            config,
            browser: Mutex::new(browser),
            page,
            handler_task,
            launched,
        };
        session.pin_surface().await?;
        info!(
            width = session.config.surface.width,
            height = session.config.surface.height,
            launched,
            "cdp session ready"
        );
        Ok(session)
    }

    /// Closes the browser when this session launched it; otherwise detaches.
    pub async fn close(&self) -> Result<(), AdapterError> {
        if self.launched {
            let mut browser = self.browser.lock().await;
            browser
                .close()
                .await
                .map_err(|err| AdapterError::cdp(AdapterErrorKind::CdpIo, err))?;
        }
        Ok(())
    }

    async fn pin_surface(&self) -> Result<(), AdapterError> {
        let surface = self.config.surface;
        let metrics = SetDeviceMetricsOverrideParams::builder()
            .width(i64::from(surface.width))
            .height(i64::from(surface.height))
            .device_scale_factor(surface.device_scale_factor)
            .mobile(surface.mobile)
            .build()
            .map_err(|err| AdapterError::new(AdapterErrorKind::Internal).with_hint(err))?;
        self.bounded(
            AdapterErrorKind::CdpIo,
            "Emulation.setDeviceMetricsOverride",
            self.page.execute(metrics),
        )
        .await?;

        if self.config.touch_emulation {
            let touch = SetTouchEmulationEnabledParams::builder()
                .enabled(true)
                .max_touch_points(1)
                .build()
                .map_err(|err| AdapterError::new(AdapterErrorKind::Internal).with_hint(err))?;
            self.bounded(
                AdapterErrorKind::CdpIo,
                "Emulation.setTouchEmulationEnabled",
                self.page.execute(touch),
            )
            .await?;
        }
        Ok(())
    }

    async fn bounded<T, F>(
        &self,
        kind: AdapterErrorKind,
        method: &str,
        command: F,
    ) -> Result<T, AdapterError>
    where
        F: Future<Output = Result<T, CdpError>>,
    {
        match tokio::time::timeout(self.config.deadline(), command).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(AdapterError::cdp(kind, err)),
            Err(_) => Err(AdapterError::new(AdapterErrorKind::Timeout).with_hint(method.to_string())),
        }
    }

    async fn dispatch(&self, steps: Vec<TouchStep>) -> Result<(), AdapterError> {
        for step in steps {
            if !step.delay.is_zero() {
                tokio::time::sleep(step.delay).await;
            }
            let kind = match step.phase {
                TouchPhase::Start => DispatchTouchEventType::TouchStart,
                TouchPhase::Move => DispatchTouchEventType::TouchMove,
                TouchPhase::End => DispatchTouchEventType::TouchEnd,
            };
            let points: Vec<TouchPoint> = step
                .at
                .map(|at| TouchPoint::new(at.x, at.y))
                .into_iter()
                .collect();
            let params = DispatchTouchEventParams::builder()
                .r#type(kind)
                .touch_points(points)
                .build()
                .map_err(|err| AdapterError::new(AdapterErrorKind::Internal).with_hint(err))?;
            self.bounded(
                AdapterErrorKind::CdpIo,
                "Input.dispatchTouchEvent",
                self.page.execute(params),
            )
            .await?;
        }
        Ok(())
    }
}

impl Drop for CdpSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

fn browser_config(config: &CdpConfig) -> Result<BrowserConfig, AdapterError> {
    let mut builder =
        BrowserConfig::builder().window_size(config.surface.width, config.surface.height);
    if !config.headless {
        builder = builder.with_head();
    }
    match config.executable.clone().or_else(detect_chrome_executable) {
        Some(executable) => builder = builder.chrome_executable(executable),
        None => warn!("no chromium executable detected; relying on chromiumoxide lookup"),
    }
    if let Some(dir) = &config.user_data_dir {
        builder = builder.user_data_dir(dir);
    }
    if config.touch_emulation {
        builder = builder.arg("--touch-events=enabled");
    }
    for arg in &config.extra_args {
        builder = builder.arg(arg.clone());
    }
    builder
        .build()
        .map_err(|err| AdapterError::new(AdapterErrorKind::Launch).with_hint(err))
}

#[async_trait]
impl PageQueryChannel for CdpSession {
    #[instrument(skip_all, fields(query = query.name()))]
    async fn evaluate(&self, query: &PageQuery) -> Result<String, ActionError> {
        let result = self
            .bounded(
                AdapterErrorKind::Evaluation,
                "Runtime.evaluate",
                self.page.evaluate(query.script()),
            )
            .await?;
        match result.value() {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err(ActionError::Decode("script returned no value".into())),
        }
    }
}

#[async_trait]
impl GestureActuator for CdpSession {
    async fn tap(&self, at: Point) -> Result<GestureAck, ActionError> {
        debug!(%at, "tap");
        self.dispatch(tap_sequence(at))
            .await
            .map_err(|err| ActionError::Gesture(err.to_string()))?;
        Ok(GestureAck::new(format!("tap at {at}")))
    }

    async fn swipe(&self, swipe: &Swipe) -> Result<GestureAck, ActionError> {
        debug!(from = %swipe.from, to = %swipe.to, duration_ms = swipe.duration.as_millis() as u64, "swipe");
        self.dispatch(swipe_sequence(swipe))
            .await
            .map_err(|err| ActionError::Gesture(err.to_string()))?;
        Ok(GestureAck::new(format!("swipe {} -> {}", swipe.from, swipe.to)))
    }
}

impl SurfaceMetrics for CdpSession {
    /// The configured surface; `start` pins the page to it with a device metrics override.
    fn viewport(&self) -> Viewport {
        self.config.surface.viewport()
    }
}

#[async_trait]
impl PageNavigator for CdpSession {
    #[instrument(skip(self))]
    async fn load_url(&self, url: &str) -> Result<(), ActionError> {
        self.bounded(AdapterErrorKind::Navigation, "Page.navigate", self.page.goto(url))
            .await?;
        info!("page loaded");
        Ok(())
    }

    async fn reload(&self) -> Result<(), ActionError> {
        self.bounded(AdapterErrorKind::Navigation, "Page.reload", self.page.reload())
            .await?;
        info!("page reloaded");
        Ok(())
    }
}
