use std::time::Duration;

use agenda_bridge::{
    EventBridge,
    config::NotificationsConfig,
    notification::{NotificationKind, NotificationPayload, Notifier},
};
use agenda_surface::NotificationSurface;

fn mounted() -> (NotificationSurface, Notifier) {
    let bridge = EventBridge::<NotificationPayload>::new();
    let surface = NotificationSurface::mount(&bridge, &NotificationsConfig::default())
        .expect("surface should mount inside a runtime");
    (surface, Notifier::new(bridge))
}

#[tokio::test(start_paused = true)]
async fn deleted_contact_toast_is_shown_then_dismissed() {
    let (surface, notifier) = mounted();
    notifier.notify(NotificationKind::Success, "Contato deletado com sucesso!");

    let entries = surface.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind(), NotificationKind::Success);
    assert_eq!(entries[0].text(), "Contato deletado com sucesso!");

    assert!(surface.remove(entries[0].id()));
    assert!(surface.is_empty());
}

#[tokio::test(start_paused = true)]
async fn entries_keep_publish_order() {
    let (surface, notifier) = mounted();
    notifier.info("A");
    notifier.error("B");
    notifier.warning("C");

    let entries = surface.entries();
    let texts: Vec<&str> = entries.iter().map(|entry| entry.text()).collect();
    assert_eq!(texts, vec!["A", "B", "C"]);
}

#[tokio::test(start_paused = true)]
async fn n_publishes_yield_n_entries() {
    let (surface, notifier) = mounted();
    for i in 0..10 {
        notifier.info(format!("message {i}"));
    }

    let entries = surface.entries();
    assert_eq!(entries.len(), 10);
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.text(), format!("message {i}"));
    }
}

#[tokio::test(start_paused = true)]
async fn removing_twice_equals_removing_once() {
    let (surface, notifier) = mounted();
    notifier.success("one");
    notifier.success("two");
    let id = surface.entries()[0].id();

    assert!(surface.remove(id));
    assert_eq!(surface.len(), 1);
    assert!(!surface.remove(id));
    assert_eq!(surface.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn timer_after_dismissal_leaves_list_unchanged() {
    let (surface, notifier) = mounted();
    let delay = NotificationsConfig::default().dismiss_after();
    notifier.success("dismissed early");
    let id = surface.entries()[0].id();
    surface.remove(id);

    tokio::time::sleep(delay / 2).await;
    notifier.info("still here");

    // past the deadline of the dismissed entry, before the second one's
    tokio::time::sleep(delay / 2 + Duration::from_millis(1)).await;
    assert_eq!(surface.len(), 1);
    assert_eq!(surface.entries()[0].text(), "still here");
}

#[tokio::test(start_paused = true)]
async fn every_entry_expires_after_the_same_delay() {
    let (surface, notifier) = mounted();
    let delay = NotificationsConfig::default().dismiss_after();

    notifier.success("first");
    tokio::time::sleep(delay / 2).await;
    notifier.success("second");

    tokio::time::sleep(delay / 2 + Duration::from_millis(1)).await;
    let texts: Vec<String> = surface.entries().iter().map(|e| e.text().to_owned()).collect();
    assert_eq!(texts, vec!["second".to_owned()]);

    tokio::time::sleep(delay).await;
    assert!(surface.is_empty());
}

#[tokio::test(start_paused = true)]
async fn publishing_before_mount_is_not_replayed() {
    let bridge = EventBridge::<NotificationPayload>::new();
    let notifier = Notifier::new(bridge.clone());
    notifier.error("nobody listening");

    let surface = NotificationSurface::mount(&bridge, &NotificationsConfig::default())
        .expect("surface should mount inside a runtime");
    assert!(surface.is_empty());
}
