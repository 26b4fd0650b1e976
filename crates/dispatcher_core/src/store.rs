use std::collections::{BTreeMap, BTreeSet};

use crate::contact::{Contact, ContactId, NewContact, SendStatus};

/// Counts derived from the store on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    /// Idle plus Sending.
    pub pending: usize,
    pub success: usize,
    pub error: usize,
}

impl Stats {
    /// Share of records with a terminal outcome, rounded half up.
    pub fn progress_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let done = (self.success + self.error) as u64;
        let total = self.total as u64;
        ((200 * done + total) / (2 * total)) as u8
    }

    /// Records a send cycle would pick up.
    pub fn resendable(&self) -> usize {
        self.total - self.success
    }
}

/// Ordered contact list. Ids come from a counter that is never reset, so the
/// map's key order is insertion order and lookups by id are direct.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactStore {
    contacts: BTreeMap<ContactId, Contact>,
    next_id: u64,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends drafts in order and returns how many were added.
    pub fn import(&mut self, drafts: Vec<NewContact>) -> usize {
        let count = drafts.len();
        for draft in drafts {
            self.push(draft);
        }
        count
    }

    pub fn push(&mut self, draft: NewContact) -> ContactId {
        self.next_id += 1;
        let id = ContactId(self.next_id);
        self.contacts.insert(id, Contact::from_new(id, draft));
        id
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    /// Updates exactly the listed records. Unknown ids are skipped. Any status
    /// other than `Error` drops the previous error message.
    pub fn set_status(
        &mut self,
        ids: &BTreeSet<ContactId>,
        status: SendStatus,
        error_message: Option<&str>,
    ) -> usize {
        let mut touched = 0;
        for id in ids {
            if let Some(contact) = self.contacts.get_mut(id) {
                contact.status = status;
                contact.error_message = match status {
                    SendStatus::Error => error_message.map(ToOwned::to_owned),
                    _ => None,
                };
                touched += 1;
            }
        }
        touched
    }

    /// Ids of every record not yet delivered, in store order.
    pub fn pending_ids(&self) -> Vec<ContactId> {
        self.contacts
            .values()
            .filter(|c| c.status != SendStatus::Success)
            .map(|c| c.id)
            .collect()
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.values()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn stats(&self) -> Stats {
        self.contacts
            .values()
            .fold(Stats::default(), |mut acc, contact| {
                acc.total += 1;
                match contact.status {
                    SendStatus::Success => acc.success += 1,
                    SendStatus::Error => acc.error += 1,
                    SendStatus::Idle | SendStatus::Sending => acc.pending += 1,
                }
                acc
            })
    }
}
