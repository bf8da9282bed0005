use crate::config;
use crate::events::AppEvent;
use crate::sys::server;
use async_channel::Sender;
use std::thread;

/// Runs the control socket and the config watcher on their own thread. Both
/// loops live for the rest of the process; either one giving up leaves the
/// other running.
pub fn start_background_services(tx: Sender<AppEvent>) -> std::io::Result<()> {
    thread::Builder::new()
        .name("timewheel-services".into())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime: {}", e);
                    return;
                }
            };

            rt.block_on(async move {
                tokio::join!(server::run_server(tx.clone()), config::run_async_watcher(tx));
            });
            log::warn!("Background services stopped");
        })?;
    Ok(())
}
