use serde::{Deserialize, Serialize};

use crate::EventBridge;

/// Event name under which notification payloads are published.
pub const SHOW_NOTIFICATION: &str = "notification:show";

/// Severity or category for user-visible notifications.
///
/// This enum classifies notifications by their intent and visual styling,
/// allowing the surface to render them appropriately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Indicates a successful operation or positive outcome.
    Success,
    /// Indicates an error or failure that may affect functionality.
    Error,
    /// Neutral informational message that does not indicate success or failure.
    Info,
    /// Indicates a non-critical issue that the user should be aware of, but
    /// does not prevent normal operation.
    Warning,
}

impl NotificationKind {
    /// Lowercase label of the kind.
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A notification payload as published on the bridge, before the surface
/// gives it an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    /// The kind of the notification, determining its visual style.
    pub kind: NotificationKind,
    /// The text content to display to the user.
    pub text: String,
}

/// Fire-and-forget helpers that publish [`NotificationPayload`]s under
/// [`SHOW_NOTIFICATION`].
#[derive(Debug, Clone)]
pub struct Notifier {
    bridge: EventBridge<NotificationPayload>,
}

impl Notifier {
    pub fn new(bridge: EventBridge<NotificationPayload>) -> Self {
        Self { bridge }
    }

    /// Publishes a notification of the given kind. Nothing is reported back,
    /// even when no surface is listening.
    pub fn notify(&self, kind: NotificationKind, text: impl Into<String>) {
        let payload = NotificationPayload {
            kind,
            text: text.into(),
        };
        self.bridge.publish(SHOW_NOTIFICATION, &payload);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify(NotificationKind::Success, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(NotificationKind::Error, text);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.notify(NotificationKind::Info, text);
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.notify(NotificationKind::Warning, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_bridge() -> (Notifier, Arc<Mutex<Vec<NotificationPayload>>>) {
        let bridge = EventBridge::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        bridge.subscribe(SHOW_NOTIFICATION, move |payload: &NotificationPayload| {
            sink.lock().unwrap().push(payload.clone());
        });
        (Notifier::new(bridge), received)
    }

    #[test]
    fn helpers_publish_matching_kind() {
        let (notifier, received) = recording_bridge();
        notifier.success("saved");
        notifier.error("failed");
        notifier.info("fyi");
        notifier.warning("careful");

        let kinds: Vec<NotificationKind> =
            received.lock().unwrap().iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NotificationKind::Success,
                NotificationKind::Error,
                NotificationKind::Info,
                NotificationKind::Warning,
            ]
        );
    }

    #[test]
    fn notify_carries_text_verbatim() {
        let (notifier, received) = recording_bridge();
        notifier.notify(NotificationKind::Success, "Contato deletado com sucesso!");

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].text, "Contato deletado com sucesso!");
    }

    #[test]
    fn notify_without_surface_does_nothing() {
        let notifier = Notifier::new(EventBridge::new());
        notifier.error("Erro ao deletar contato");
    }

    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    struct KindField {
        kind: NotificationKind,
    }

    #[test]
    fn kind_is_stored_as_lowercase_label() {
        let parsed: KindField = toml::from_str("kind = \"warning\"").unwrap();
        assert_eq!(parsed.kind, NotificationKind::Warning);

        for kind in [
            NotificationKind::Success,
            NotificationKind::Error,
            NotificationKind::Info,
            NotificationKind::Warning,
        ] {
            let written = toml::to_string(&KindField { kind }).unwrap();
            assert_eq!(written.trim(), format!("kind = \"{}\"", kind.label()));
            let read: KindField = toml::from_str(&written).unwrap();
            assert_eq!(read.kind, kind);
        }
    }

    #[test]
    fn unknown_kind_label_is_rejected() {
        assert!(toml::from_str::<KindField>("kind = \"fatal\"").is_err());
        assert!(toml::from_str::<KindField>("kind = \"Warning\"").is_err());
    }

    #[test]
    fn kind_labels_are_distinct() {
        let labels = [
            NotificationKind::Success.label(),
            NotificationKind::Error.label(),
            NotificationKind::Info.label(),
            NotificationKind::Warning.label(),
        ];
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(NotificationKind::Warning.to_string(), "warning");
    }
}
