use std::collections::BTreeSet;

use crate::view_model::{AppViewModel, ContactRowView, SendControl};
use crate::{BatchId, ContactId, ContactStore, ManualForm};

/// Which part of the interface receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    List,
    Endpoint,
    ImportPrompt,
    ManualForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

/// The batch currently on the wire. The endpoint is captured when the cycle
/// starts; later edits to the configured URL do not reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCycle {
    pub batch_id: BatchId,
    pub endpoint: String,
    pub ids: BTreeSet<ContactId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) store: ContactStore,
    pub(crate) endpoint: String,
    pub(crate) panel: Panel,
    pub(crate) form: ManualForm,
    pub(crate) import_path: String,
    pub(crate) cycle: Option<SendCycle>,
    pub(crate) next_batch_id: BatchId,
    pub(crate) notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the endpoint, typically from configuration.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn form(&self) -> &ManualForm {
        &self.form
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn cycle(&self) -> Option<&SendCycle> {
        self.cycle.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.cycle.is_some()
    }

    pub fn view(&self) -> AppViewModel {
        let stats = self.store.stats();
        let busy = self.is_busy();
        let send = SendControl {
            label: if busy {
                "Sending..."
            } else if stats.success > 0 || stats.error > 0 {
                "Resend pending"
            } else {
                "Create list on webhook"
            },
            enabled: !busy && stats.resendable() > 0,
        };
        AppViewModel {
            stats,
            progress_percent: stats.progress_percent(),
            busy,
            endpoint: self.endpoint.clone(),
            panel: self.panel,
            form: self.form.clone(),
            import_path: self.import_path.clone(),
            notice: self.notice.clone(),
            send,
            rows: self
                .store
                .iter()
                .map(|contact| ContactRowView {
                    id: contact.id,
                    status: contact.status,
                    error_message: contact.error_message.clone(),
                    name: contact.name.clone(),
                    phone: contact.phone.clone(),
                    campaign: contact.campaign.clone(),
                    template: contact.template.clone(),
                })
                .collect(),
        }
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, severity: Severity, text: impl Into<String>) {
        self.notice = Some(Notice {
            severity,
            text: text.into(),
        });
        self.mark_dirty();
    }

    pub(crate) fn allocate_batch_id(&mut self) -> BatchId {
        self.next_batch_id += 1;
        self.next_batch_id
    }
}
