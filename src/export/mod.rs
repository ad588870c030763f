//! Export handoff: data injection by an external capture driver

pub mod bridge;
pub mod payload;

pub use bridge::{
    BridgeError, DriverError, ExportBridge, ExportDriver, ExportSurface, InjectError,
    RenderStatus, DEFAULT_SETTLE_DELAY,
};
pub use payload::{ExportPayload, PayloadError};
