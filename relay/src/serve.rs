use axum::Router;
use if_addrs::get_if_addrs;
use std::net::{IpAddr, SocketAddr};
use tokio::net::{TcpListener, ToSocketAddrs};

use crate::routing::SEND_PATH;

/// Serve the relay until Ctrl+C or SIGTERM, letting in-flight deliveries finish.
pub async fn serve<S: ToSocketAddrs>(addr: S, router: Router) -> std::io::Result<()> {
    let tcp_listener = TcpListener::bind(addr).await?;
    log_webhook_urls(&tcp_listener);

    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

fn log_webhook_urls(listener: &TcpListener) {
    let addr = match listener.local_addr() {
        Ok(addr) => addr,
        Err(e) => {
            log::warn!("could not determine listen address: {}", e);
            return;
        }
    };

    let port = addr.port();
    log::info!("Listening on port {}", port);
    match addr {
        SocketAddr::V4(addr4) if addr4.ip().is_unspecified() => {
            for ip in interface_ips(false) {
                log_url(ip, port)
            }
        }
        SocketAddr::V6(addr6) if addr6.ip().is_unspecified() => {
            for ip in interface_ips(true) {
                log_url(ip, port)
            }
        }
        _ => log_url(addr.ip(), port),
    }
}

fn interface_ips(ipv6: bool) -> Vec<IpAddr> {
    get_if_addrs()
        .into_iter()
        .flatten()
        .map(|i| i.ip())
        .filter(|ip| ip.is_ipv6() == ipv6)
        .collect()
}

fn log_url(addr: IpAddr, port: u16) {
    match addr {
        _ if addr.is_loopback() => {
            log::info!("➜  Local:   http://localhost:{}{}?key=...", port, SEND_PATH)
        }
        IpAddr::V4(_) => log::info!("➜  Network: http://{}:{}{}?key=...", addr, port, SEND_PATH),
        IpAddr::V6(_) => {
            log::info!("➜  Network: http://[{}]:{}{}?key=...", addr, port, SEND_PATH)
        }
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutting down");
}
