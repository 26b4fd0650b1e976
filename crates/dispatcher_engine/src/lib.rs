//! Dispatcher engine: batch POST transport and effect execution.
mod engine;
mod payload;
mod post;
mod types;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use payload::{encode_batch, WireContact};
pub use post::{BatchPoster, DispatchSettings, ReqwestPoster};
pub use types::{BatchId, DeliveryReceipt, DispatchError, EngineEvent, FailureKind};
