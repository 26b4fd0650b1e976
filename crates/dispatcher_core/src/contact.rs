use std::fmt;

pub const DEFAULT_NAME: &str = "Unknown";
pub const DEFAULT_CAMPAIGN: &str = "General";
pub const DEFAULT_TEMPLATE: &str = "welcome";

/// Store-assigned identity of a contact. Allocated from a counter that never
/// rewinds, so ordering by id is insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactId(pub u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error,
}

impl SendStatus {
    pub fn label(self) -> &'static str {
        match self {
            SendStatus::Idle => "Pending",
            SendStatus::Sending => "Sending...",
            SendStatus::Success => "Sent",
            SendStatus::Error => "Error",
        }
    }
}

/// A contact that has not been added to the store yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub campaign: String,
    pub template: String,
}

impl NewContact {
    /// Builds a draft from raw field values: trims text, strips non-digits from
    /// the phone and substitutes defaults for blank optional fields.
    pub fn from_raw(name: &str, phone: &str, campaign: Option<&str>, template: Option<&str>) -> Self {
        Self {
            name: or_default(name, DEFAULT_NAME),
            phone: digits_only(phone),
            campaign: or_default(campaign.unwrap_or_default(), DEFAULT_CAMPAIGN),
            template: or_default(template.unwrap_or_default(), DEFAULT_TEMPLATE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub campaign: String,
    pub template: String,
    pub status: SendStatus,
    pub error_message: Option<String>,
}

impl Contact {
    pub(crate) fn from_new(id: ContactId, draft: NewContact) -> Self {
        Self {
            id,
            name: draft.name,
            phone: draft.phone,
            campaign: draft.campaign,
            template: draft.template,
            status: SendStatus::Idle,
            error_message: None,
        }
    }

    pub fn to_outbound(&self) -> OutboundContact {
        OutboundContact {
            name: self.name.clone(),
            phone: self.phone.clone(),
            campaign: self.campaign.clone(),
            template: self.template.clone(),
        }
    }
}

/// The fields of a contact that leave the process. Ids and status stay local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundContact {
    pub name: String,
    pub phone: String,
    pub campaign: String,
    pub template: String,
}

pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
