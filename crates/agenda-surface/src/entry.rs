use agenda_bridge::notification::{NotificationKind, NotificationPayload};

/// Identity of a visible notification, unique for the lifetime of the
/// surface that assigned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw counter value, as shown next to the dismiss control.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A notification currently shown by the surface.
///
/// Entries are never mutated after creation; they are only appended and
/// removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEntry {
    id: EntryId,
    kind: NotificationKind,
    text: String,
}

impl NotificationEntry {
    pub(crate) fn from_payload(id: EntryId, payload: &NotificationPayload) -> Self {
        Self {
            id,
            kind: payload.kind,
            text: payload.text.clone(),
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
