use std::fs;
use std::sync::{mpsc, Arc};

use dispatch_logging::{dispatch_info, dispatch_warn};
use dispatcher_core::{BatchOutcome, Effect, Msg, OutboundContact, TransportFailure};
use dispatcher_engine::{
    DeliveryReceipt, DispatchError, DispatchSettings, EngineEvent, EngineHandle, EventSink,
    FailureKind, WireContact,
};

use super::decode::decode_import;

pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        settings: DispatchSettings,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Result<Self, DispatchError> {
        let sink = Arc::new(MsgSink {
            tx: msg_tx.clone(),
        });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self { engine, msg_tx })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ReadImportFile { path } => {
                    let _ = self.msg_tx.send(read_import(&path));
                }
                Effect::PostBatch {
                    batch_id,
                    endpoint,
                    contacts,
                } => {
                    dispatch_info!(
                        "PostBatch batch_id={} contacts={} endpoint={}",
                        batch_id,
                        contacts.len(),
                        endpoint
                    );
                    let wire = contacts.into_iter().map(to_wire).collect();
                    self.engine.dispatch(batch_id, endpoint, wire);
                }
            }
        }
    }
}

/// Turns engine completions into messages for the UI loop.
struct MsgSink {
    tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(batch_msg(event));
    }
}

fn batch_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::BatchCompleted { batch_id, result } => Msg::BatchFinished {
            batch_id,
            outcome: outcome_from(result),
        },
    }
}

fn outcome_from(result: Result<DeliveryReceipt, DispatchError>) -> BatchOutcome {
    match result {
        Ok(_) => BatchOutcome::Delivered,
        Err(DispatchError {
            kind: FailureKind::HttpStatus { status, reason },
            ..
        }) => BatchOutcome::Rejected {
            status,
            status_text: reason,
        },
        Err(DispatchError {
            kind: FailureKind::Network,
            message,
        }) => {
            dispatch_warn!("Network failure: {}", message);
            BatchOutcome::Failed(TransportFailure::Network)
        }
        Err(err) => BatchOutcome::Failed(TransportFailure::Other(err.message)),
    }
}

fn to_wire(contact: OutboundContact) -> WireContact {
    WireContact {
        name: contact.name,
        phone: contact.phone,
        campaign: contact.campaign,
        template: contact.template,
    }
}

fn read_import(path: &str) -> Msg {
    let failed = |message: String| Msg::ImportFailed {
        source: path.to_string(),
        message,
    };
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => return failed(err.to_string()),
    };
    match decode_import(&bytes) {
        Ok(decoded) => {
            dispatch_info!(
                "Read {} ({} bytes, {})",
                path,
                bytes.len(),
                decoded.encoding_label
            );
            Msg::ImportLoaded {
                source: path.to_string(),
                content: decoded.text,
            }
        }
        Err(err) => {
            dispatch_warn!("Could not decode {}: {}", path, err);
            failed(err.to_string())
        }
    }
}
