use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Result;
use log::{error, info, warn};
use signal_hook::{consts::TERM_SIGNALS, flag, iterator::Signals};
use tokio::sync::broadcast;

use keksobooking::{
    api::keksobooking_client::KeksobookingClient,
    config::{self, Config},
    console::console::Console,
    logger::setup_logger,
    page::{
        controller::{add_cards_in_marker, filters_map, Page},
        state::PageState,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    setup_logger()?;

    let config: Arc<Config> = Arc::new(config::read_config());

    // First signal asks the console to stop, a second one exits right away
    let shutdown = Arc::new(AtomicBool::new(false));
    for signal in TERM_SIGNALS {
        flag::register_conditional_shutdown(*signal, 1, shutdown.clone())?;
    }
    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let mut signals = Signals::new(TERM_SIGNALS)?;
    std::thread::spawn(move || {
        if let Some(signal) = signals.forever().next() {
            info!("Received signal {}, shutting down", signal);
            shutdown.store(true, Ordering::Release);
            let _ = shutdown_tx.send(());
        }
    });

    let client = KeksobookingClient::new(&config);
    let page = Page::mount(&config).into_shared();
    page.lock().await.load_map();

    add_cards_in_marker(&page, &client).await;

    let (changes_tx, changes_rx) = async_channel::unbounded();
    let listener = if page.lock().await.state() == PageState::Loaded {
        Some(filters_map(
            page.clone(),
            changes_rx,
            Duration::from_millis(config.debounce_ms),
        ))
    } else {
        warn!("No offers loaded, filters stay disabled");
        changes_rx.close();
        None
    };

    let console = Console::new(page.clone(), client, changes_tx);
    let listener = async move {
        match listener {
            Some(handle) => handle.await,
            None => Ok(()),
        }
    };

    let (console_result, listener_result) = futures::join!(console.run(shutdown_rx), listener);
    if let Err(err) = console_result {
        error!("Error: {:?}", err)
    }
    if let Err(err) = listener_result {
        error!("Error: {:?}", err)
    }

    info!("Bye");
    Ok(())
}
