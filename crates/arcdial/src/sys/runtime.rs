use crate::config;
use crate::events::AppEvent;
use crate::sys::server;
use async_channel::Sender;
use std::io;
use std::thread::{self, JoinHandle};
use tokio::runtime::Builder;

/// Starts the socket server, and the config watcher when `watch_config` is
/// set, on a dedicated IO thread. The thread ends once every service has
/// stopped, which drops `tx` and closes the caller's receiver.
pub fn start_background_services(
    tx: Sender<AppEvent>,
    watch_config: bool,
) -> io::Result<JoinHandle<()>> {
    let rt = Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("arcdial-io")
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("arcdial-services".into())
        .spawn(move || {
            rt.block_on(async move {
                if watch_config {
                    tokio::join!(
                        server::run_server(tx.clone()),
                        config::run_async_watcher(tx)
                    );
                } else {
                    server::run_server(tx).await;
                }
            });
            log::info!("Background services stopped");
        })
}
