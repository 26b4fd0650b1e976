use std::sync::{mpsc, Arc};
use std::thread;

use dispatch_logging::{dispatch_error, dispatch_info, dispatch_warn};

use crate::payload::WireContact;
use crate::post::{BatchPoster, DispatchSettings, ReqwestPoster};
use crate::{BatchId, DispatchError, EngineEvent, FailureKind};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Dispatch {
        batch_id: BatchId,
        endpoint: String,
        contacts: Vec<WireContact>,
    },
}

/// Runs batch requests on a background thread with its own tokio runtime.
/// Results are reported through the sink in completion order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        settings: DispatchSettings,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, DispatchError> {
        let poster = ReqwestPoster::new(&settings)?;
        Ok(Self::with_poster(Arc::new(poster), sink))
    }

    pub fn with_poster(poster: Arc<dyn BatchPoster>, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    dispatch_error!("dispatch runtime failed to start: {}", err);
                    reject_all(&cmd_rx, sink.as_ref(), &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let poster = poster.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(poster.as_ref(), command, sink.as_ref()).await;
                });
            }
        });

        Self { cmd_tx }
    }

    pub fn dispatch(&self, batch_id: BatchId, endpoint: impl Into<String>, contacts: Vec<WireContact>) {
        let _ = self.cmd_tx.send(EngineCommand::Dispatch {
            batch_id,
            endpoint: endpoint.into(),
            contacts,
        });
    }
}

async fn handle_command(poster: &dyn BatchPoster, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Dispatch {
            batch_id,
            endpoint,
            contacts,
        } => {
            let result = poster.post(batch_id, &endpoint, &contacts).await;
            match &result {
                Ok(receipt) => dispatch_info!("batch {} accepted with {}", batch_id, receipt.status),
                Err(err) => dispatch_warn!("batch {} failed: {}", batch_id, err),
            }
            sink.emit(EngineEvent::BatchCompleted { batch_id, result });
        }
    }
}

fn reject_all(cmd_rx: &mpsc::Receiver<EngineCommand>, sink: &dyn EventSink, reason: &str) {
    while let Ok(EngineCommand::Dispatch { batch_id, .. }) = cmd_rx.recv() {
        sink.emit(EngineEvent::BatchCompleted {
            batch_id,
            result: Err(DispatchError::new(FailureKind::Unavailable, reason)),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_batches_are_rejected_when_runtime_is_missing() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        for batch_id in [3, 4] {
            cmd_tx
                .send(EngineCommand::Dispatch {
                    batch_id,
                    endpoint: "http://localhost/hook".to_string(),
                    contacts: Vec::new(),
                })
                .expect("queue");
        }
        drop(cmd_tx);

        reject_all(&cmd_rx, &ChannelEventSink::new(event_tx), "no threads");

        let ids: Vec<BatchId> = event_rx
            .try_iter()
            .map(|event| match event {
                EngineEvent::BatchCompleted { batch_id, result } => {
                    let err = result.expect_err("rejected");
                    assert_eq!(err.kind, FailureKind::Unavailable);
                    assert_eq!(err.message, "no threads");
                    batch_id
                }
            })
            .collect();
        assert_eq!(ids, vec![3, 4]);
    }
}
