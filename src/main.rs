mod render;

use std::time::Duration;

use agenda_bridge::{
    EventBridge,
    notification::{NotificationKind, NotificationPayload, Notifier},
};
use agenda_surface::NotificationSurface;
use anyhow::Context;
use tokio::sync::watch;

/// Re-renders the visible list every time the surface reports a change, until
/// the surface is unmounted.
async fn render_loop(mut rx: watch::Receiver<Vec<agenda_surface::NotificationEntry>>) {
    loop {
        let lines = render::render_current(&mut rx);
        log::info!("Visible notifications:");
        for line in lines {
            log::info!("  {line}");
        }
        if rx.changed().await.is_err() {
            break;
        }
    }
}

/// Plays a short contact-deletion session against the surface.
async fn run_demo(notifier: &Notifier, surface: &NotificationSurface, dismiss_after: Duration) {
    let contacts = ["Ana Souza", "Bruno Lima", "Carla Dias"];
    for (index, name) in contacts.iter().enumerate() {
        log::debug!("Deleting contact {name}");
        // the last request is treated as rejected by the API
        if index + 1 < contacts.len() {
            notifier.success("Contato deletado com sucesso!");
        } else {
            notifier.error(format!("Erro ao deletar o contato {name}"));
        }
        tokio::task::yield_now().await;
    }
    notifier.notify(NotificationKind::Info, "2 contatos restantes");
    tokio::task::yield_now().await;

    // the user closes the error toast by hand
    if let Some(error) = surface
        .entries()
        .into_iter()
        .find(|entry| entry.kind() == NotificationKind::Error)
    {
        surface.remove(error.id());
    }

    tokio::time::sleep(dismiss_after + Duration::from_millis(100)).await;
}

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()
        .context("failed to build logger instance")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(async {
        let config = agenda_surface::config::load_config()
            .await
            .context("failed to load config")?;

        let bridge = EventBridge::<NotificationPayload>::new();
        let surface = NotificationSurface::mount(&bridge, &config.notifications)?;
        let renderer = tokio::spawn(render_loop(surface.watch()));

        let notifier = Notifier::new(bridge);
        run_demo(&notifier, &surface, config.notifications.dismiss_after()).await;

        surface.unmount();
        renderer.await.context("render loop panicked")?;
        Ok::<_, anyhow::Error>(())
    })
}
