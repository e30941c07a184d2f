use agenda_bridge::notification::NotificationKind;
use agenda_surface::NotificationEntry;
use tokio::sync::watch;

/// Placeholder line shown when no notification is visible.
pub const EMPTY_LIST: &str = "(no notifications)";

/// Kind-dependent marker printed in front of every toast.
pub fn marker(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "✔",
        NotificationKind::Error => "✖",
        NotificationKind::Info => "ℹ",
        NotificationKind::Warning => "⚠",
    }
}

/// Renders one toast as `<marker> <kind>  <text>  [x #<id>]`, the trailing
/// part being the dismiss control.
pub fn render_entry(entry: &NotificationEntry) -> String {
    format!(
        "{} {:<7}  {}  [x {}]",
        marker(entry.kind()),
        entry.kind().label(),
        entry.text(),
        entry.id(),
    )
}

/// Renders the visible list top to bottom in display order.
pub fn render_list(entries: &[NotificationEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec![EMPTY_LIST.to_owned()];
    }
    entries.iter().map(render_entry).collect()
}

/// Renders the list currently held by `rx` and marks it as seen.
pub fn render_current(rx: &mut watch::Receiver<Vec<NotificationEntry>>) -> Vec<String> {
    render_list(&rx.borrow_and_update())
}
