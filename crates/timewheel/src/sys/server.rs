use crate::events::AppEvent;
use async_channel::Sender;
use epochs::control::{self, Command};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub async fn run_server(tx: Sender<AppEvent>) {
    let socket_path = control::socket_path();

    // Cleanup old socket if it exists
    if fs_err::metadata(&socket_path).is_ok() {
        let _ = fs_err::remove_file(&socket_path);
    }

    let listener = match UnixListener::bind(&socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!(
                "Failed to bind control socket {}: {}",
                socket_path.display(),
                e
            );
            return;
        }
    };
    log::info!("Listening for commands on {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match line.parse::<Command>() {
                            Ok(command) => {
                                if tx.send(AppEvent::Command(command)).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => log::warn!("Ignoring control command: {}", e),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
