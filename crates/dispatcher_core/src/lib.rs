//! Dispatcher core: contact model, import parsing and the pure send-cycle state machine.
mod contact;
mod effect;
mod form;
mod msg;
mod records;
mod state;
mod store;
mod update;
mod view_model;

pub use contact::{
    digits_only, Contact, ContactId, NewContact, OutboundContact, SendStatus, DEFAULT_CAMPAIGN,
    DEFAULT_NAME, DEFAULT_TEMPLATE,
};
pub use effect::{BatchId, BatchOutcome, Effect, TransportFailure};
pub use form::{FormError, FormField, ManualForm};
pub use msg::Msg;
pub use records::parse_contacts;
pub use state::{AppState, Notice, Panel, SendCycle, Severity};
pub use store::{ContactStore, Stats};
pub use update::update;
pub use view_model::{AppViewModel, ContactRowView, SendControl};
