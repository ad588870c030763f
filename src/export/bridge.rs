//! Export handoff between the renderer and an out-of-process capture driver
//!
//! The bridge owns the export view; the driver is the external side that
//! injects data and waits for a capturable surface. Two observable markers
//! connect them, both carried on `watch` channels so a slow or repeated poll
//! always sees the latest value:
//!
//! - "ready for data": raised once the bridge is listening
//! - render status: `Loading` until the injected data has been laid out, then
//!   `Ready`, never back
//!
//! The data itself travels over a `oneshot` channel, so it can be delivered at
//! most once.

use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;
use tokio::sync::{oneshot, watch};

use crate::image::ImageResourceManager;
use crate::layout::{compute, RenderContext, SlideTree};
use crate::renderer::{render_html, render_loading, HtmlConfig};

use super::payload::ExportPayload;

/// Pause between layout and the ready signal, letting the surface settle
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Externally observable render status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStatus {
    #[default]
    Loading,
    Ready,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::Loading => "loading",
            RenderStatus::Ready => "ready",
        }
    }
}

impl fmt::Display for RenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the bridge produced no surface
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("export data was never delivered")]
    PayloadNeverDelivered,
}

/// Why an injection was refused; the payload is handed back
#[derive(Debug, Error)]
pub enum InjectError {
    #[error("export view is not ready for data yet")]
    NotReady(Box<ExportPayload>),

    #[error("export data was already injected")]
    AlreadyInjected,

    #[error("export view has gone away")]
    BridgeClosed(Box<ExportPayload>),
}

impl InjectError {
    /// Recover the refused payload, if it was handed back
    pub fn into_payload(self) -> Option<ExportPayload> {
        match self {
            InjectError::NotReady(p) | InjectError::BridgeClosed(p) => Some(*p),
            InjectError::AlreadyInjected => None,
        }
    }
}

/// Why a driver wait ended without the awaited marker
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("export view closed before the marker was raised")]
    BridgeClosed,
}

/// The export view's side of the handoff
#[derive(Debug)]
pub struct ExportBridge {
    ready_tx: watch::Sender<bool>,
    status_tx: watch::Sender<RenderStatus>,
    payload_rx: Option<oneshot::Receiver<ExportPayload>>,
    preloaded: Option<ExportPayload>,
    settle: Duration,
    html: HtmlConfig,
}

/// The capture driver's side of the handoff
#[derive(Debug)]
pub struct ExportDriver {
    ready_rx: watch::Receiver<bool>,
    status_rx: watch::Receiver<RenderStatus>,
    payload_tx: Option<oneshot::Sender<ExportPayload>>,
}

/// A rendered export surface, ready for capture
///
/// Holds the image reference for as long as the surface is alive.
#[derive(Debug)]
pub struct ExportSurface {
    pub tree: SlideTree,
    pub html: String,
    images: ImageResourceManager,
    status_tx: watch::Sender<RenderStatus>,
}

impl ExportSurface {
    pub fn status(&self) -> RenderStatus {
        *self.status_tx.borrow()
    }

    pub fn images(&self) -> &ImageResourceManager {
        &self.images
    }
}

impl ExportBridge {
    /// A bridge whose data will be delivered through the driver
    pub fn new() -> (Self, ExportDriver) {
        let (payload_tx, payload_rx) = oneshot::channel();
        Self::with_channels(Some(payload_tx), Some(payload_rx), None)
    }

    /// A bridge whose data was already present when the view loaded
    ///
    /// The ready-for-data marker is never raised, and the driver cannot
    /// inject.
    pub fn preloaded(payload: ExportPayload) -> (Self, ExportDriver) {
        Self::with_channels(None, None, Some(payload))
    }

    fn with_channels(
        payload_tx: Option<oneshot::Sender<ExportPayload>>,
        payload_rx: Option<oneshot::Receiver<ExportPayload>>,
        preloaded: Option<ExportPayload>,
    ) -> (Self, ExportDriver) {
        let (ready_tx, ready_rx) = watch::channel(false);
        let (status_tx, status_rx) = watch::channel(RenderStatus::Loading);
        let bridge = Self {
            ready_tx,
            status_tx,
            payload_rx,
            preloaded,
            settle: DEFAULT_SETTLE_DELAY,
            html: HtmlConfig::default(),
        };
        let driver = ExportDriver {
            ready_rx,
            status_rx,
            payload_tx,
        };
        (bridge, driver)
    }

    /// Set the pause between layout and the ready signal
    pub fn with_settle_delay(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_html(mut self, html: HtmlConfig) -> Self {
        self.html = html;
        self
    }

    /// Raise the ready-for-data marker
    ///
    /// Idempotent, and a no-op for a preloaded bridge.
    pub fn listen(&self) {
        if self.preloaded.is_some() {
            return;
        }
        let raised = self.ready_tx.send_if_modified(|ready| !std::mem::replace(ready, true));
        if raised {
            debug!("export view listening for data");
        }
    }

    pub fn is_listening(&self) -> bool {
        *self.ready_tx.borrow()
    }

    pub fn status(&self) -> RenderStatus {
        *self.status_tx.borrow()
    }

    /// Watch the render status
    pub fn subscribe_status(&self) -> watch::Receiver<RenderStatus> {
        self.status_tx.subscribe()
    }

    /// The surface shown until data has been rendered
    pub fn loading_html(&self) -> String {
        render_loading(&self.html)
    }

    /// Wait for data, lay it out in the export context and signal readiness
    pub async fn run(mut self) -> Result<ExportSurface, BridgeError> {
        let payload = match self.preloaded.take() {
            Some(payload) => payload,
            None => {
                self.listen();
                let rx = self
                    .payload_rx
                    .take()
                    .ok_or(BridgeError::PayloadNeverDelivered)?;
                rx.await.map_err(|_| {
                    warn!("export driver went away without injecting data");
                    BridgeError::PayloadNeverDelivered
                })?
            }
        };

        let content = payload.content();
        let style = payload.style();

        let mut images = ImageResourceManager::new();
        if images.set_image(content.image.as_deref()).is_err() {
            debug!("export continues with the no-image treatment");
        }
        let tree = compute(
            &content,
            images.current().map(|h| h.source()),
            &style,
            RenderContext::Export,
        );
        let html = render_html(&tree, &self.html);

        if !self.settle.is_zero() {
            tokio::time::sleep(self.settle).await;
        }
        if mark_ready(&self.status_tx) {
            info!("export surface ready ({})", tree.layout);
        }

        Ok(ExportSurface {
            tree,
            html,
            images,
            status_tx: self.status_tx,
        })
    }
}

// Loading → Ready; returns false if already ready.
fn mark_ready(status: &watch::Sender<RenderStatus>) -> bool {
    status.send_if_modified(|s| {
        if *s == RenderStatus::Ready {
            false
        } else {
            *s = RenderStatus::Ready;
            true
        }
    })
}

impl ExportDriver {
    /// Whether the view has raised its ready-for-data marker
    pub fn is_ready_for_data(&self) -> bool {
        *self.ready_rx.borrow()
    }

    pub fn status(&self) -> RenderStatus {
        *self.status_rx.borrow()
    }

    /// Deliver the payload
    pub fn inject(&mut self, payload: ExportPayload) -> Result<(), InjectError> {
        if self.payload_tx.is_none() {
            return Err(InjectError::AlreadyInjected);
        }
        if !self.is_ready_for_data() {
            return Err(InjectError::NotReady(Box::new(payload)));
        }
        let tx = self.payload_tx.take().ok_or(InjectError::AlreadyInjected)?;
        tx.send(payload)
            .map_err(|payload| InjectError::BridgeClosed(Box::new(payload)))
    }

    /// Wait until the view is listening for data
    pub async fn wait_ready_for_data(&mut self, timeout: Duration) -> Result<(), DriverError> {
        wait_until(&mut self.ready_rx, timeout, |ready| *ready).await
    }

    /// Wait until the surface reports `Ready`
    pub async fn wait_rendered(&mut self, timeout: Duration) -> Result<(), DriverError> {
        wait_until(&mut self.status_rx, timeout, |s| *s == RenderStatus::Ready).await
    }
}

async fn wait_until<T>(
    rx: &mut watch::Receiver<T>,
    timeout: Duration,
    condition: impl FnMut(&T) -> bool,
) -> Result<(), DriverError> {
    match tokio::time::timeout(timeout, rx.wait_for(condition)).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(_)) => Err(DriverError::BridgeClosed),
        Err(_) => Err(DriverError::Timeout(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Slot;

    fn payload(headline: &str) -> ExportPayload {
        ExportPayload {
            headline: Some(headline.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_inject_before_listen_is_refused() {
        let (bridge, mut driver) = ExportBridge::new();
        let err = driver.inject(payload("Early")).unwrap_err();
        assert_eq!(err.into_payload().and_then(|p| p.headline).as_deref(), Some("Early"));

        bridge.listen();
        assert!(driver.is_ready_for_data());
        driver.inject(payload("On time")).unwrap();
        assert!(matches!(
            driver.inject(payload("Again")),
            Err(InjectError::AlreadyInjected)
        ));
    }

    #[test]
    fn test_listen_is_idempotent() {
        let (bridge, driver) = ExportBridge::new();
        let mut rx = driver.ready_rx.clone();
        bridge.listen();
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();
        bridge.listen();
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_status_is_monotonic() {
        let (tx, rx) = watch::channel(RenderStatus::Loading);
        assert!(mark_ready(&tx));
        assert!(!mark_ready(&tx));
        assert_eq!(*rx.borrow(), RenderStatus::Ready);
    }

    #[tokio::test]
    async fn test_round_trip() {
        let (bridge, mut driver) = ExportBridge::new();
        let bridge = bridge.with_settle_delay(Duration::ZERO);
        let task = tokio::spawn(bridge.run());

        driver.wait_ready_for_data(Duration::from_secs(1)).await.unwrap();
        assert_eq!(driver.status(), RenderStatus::Loading);
        driver.inject(payload("Q3 Results")).unwrap();
        driver.wait_rendered(Duration::from_secs(1)).await.unwrap();

        let surface = task.await.unwrap().unwrap();
        assert_eq!(surface.status(), RenderStatus::Ready);
        assert_eq!(surface.tree.text(Slot::Headline).as_deref(), Some("Q3 Results"));
        assert!(surface.html.contains(r#"data-status="ready""#));
    }

    #[tokio::test]
    async fn test_preloaded_never_raises_ready_flag() {
        let (bridge, mut driver) = ExportBridge::preloaded(payload("Preloaded"));
        bridge.listen();
        assert!(!driver.is_ready_for_data());
        assert!(matches!(
            driver.inject(payload("x")),
            Err(InjectError::AlreadyInjected)
        ));

        let surface = bridge
            .with_settle_delay(Duration::ZERO)
            .run()
            .await
            .unwrap();
        assert_eq!(surface.status(), RenderStatus::Ready);
        assert!(!driver.is_ready_for_data());
    }

    #[tokio::test]
    async fn test_driver_dropped_without_injecting() {
        let (bridge, driver) = ExportBridge::new();
        let status = bridge.subscribe_status();
        drop(driver);
        let result = bridge.run().await;
        assert!(matches!(result, Err(BridgeError::PayloadNeverDelivered)));
        assert_eq!(*status.borrow(), RenderStatus::Loading);
    }

    #[tokio::test]
    async fn test_never_injected_times_out() {
        let (bridge, mut driver) = ExportBridge::new();
        bridge.listen();
        let result = driver.wait_rendered(Duration::from_millis(20)).await;
        assert_eq!(result, Err(DriverError::Timeout(Duration::from_millis(20))));
        assert_eq!(bridge.status(), RenderStatus::Loading);
    }

    #[test]
    fn test_loading_surface() {
        let (bridge, _driver) = ExportBridge::new();
        let bridge = bridge.with_html(HtmlConfig::fragment());
        assert!(bridge.loading_html().contains(r#"id="slide-render-status" data-status="loading""#));
    }
}
