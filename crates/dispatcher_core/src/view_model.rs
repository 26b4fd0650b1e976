use crate::{ContactId, ManualForm, Notice, Panel, SendStatus, Stats};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub stats: Stats,
    pub progress_percent: u8,
    pub busy: bool,
    pub endpoint: String,
    pub panel: Panel,
    pub form: ManualForm,
    pub import_path: String,
    pub notice: Option<Notice>,
    pub send: SendControl,
    pub rows: Vec<ContactRowView>,
}

impl AppViewModel {
    /// Import, manual entry and clear share one rule: never during a send.
    pub fn editing_enabled(&self) -> bool {
        !self.busy
    }

    pub fn clear_enabled(&self) -> bool {
        !self.busy && !self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendControl {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRowView {
    pub id: ContactId,
    pub status: SendStatus,
    pub error_message: Option<String>,
    pub name: String,
    pub phone: String,
    pub campaign: String,
    pub template: String,
}
