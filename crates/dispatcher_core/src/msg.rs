use crate::{BatchId, BatchOutcome, FormField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User opened or closed the endpoint configuration panel.
    ConfigToggled,
    /// User edited the endpoint URL.
    EndpointChanged(String),
    /// User asked to import a file.
    ImportPromptOpened,
    ImportPathChanged(String),
    ImportPathSubmitted,
    /// File content read on behalf of `Effect::ReadImportFile`.
    ImportLoaded { source: String, content: String },
    ImportFailed { source: String, message: String },
    ManualFormOpened,
    ManualFieldChanged { field: FormField, value: String },
    ManualFocusMoved { forward: bool },
    ManualSubmitted,
    /// Closes whichever panel has focus.
    PanelClosed,
    ClearClicked,
    SendClicked,
    /// Engine result for a `Effect::PostBatch`.
    BatchFinished {
        batch_id: BatchId,
        outcome: BatchOutcome,
    },
    NoticeDismissed,
    /// Input poll elapsed with no event.
    Tick,
}
