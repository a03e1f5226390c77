use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::Parser;
use mailhook::mail::SmtpMailer;
use mailhook::{AppState, Config};
use tracing_subscriber::EnvFilter;

/// Relay webhook messages to email over SMTP.
///
/// Settings are read from `MAILHOOK_*` environment variables; flags take precedence.
#[derive(Parser)]
#[command(name = "mailhook", version, about)]
struct Cli {
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbosity: u8,

    /// Port to listen on [default: 8080]
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(long)]
    host: Option<IpAddr>,

    /// SMTP timeout in seconds [default: 10]
    #[arg(long)]
    smtp_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let default_level = match cli.verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load().context("loading MAILHOOK_* configuration")?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(timeout) = cli.smtp_timeout {
        config.smtp_timeout = timeout;
    }

    if !config.verify_certs {
        tracing::warn!("SMTP certificate verification is disabled");
    }
    tracing::debug!(?config, "configuration loaded");

    let addr = config.socket_addr();
    let mailer = SmtpMailer::new(config.mailer_config());
    let routes = mailhook::router(AppState::new(config, mailer));

    mailhook::serve(addr, routes)
        .await
        .context("error running HTTP server")?;
    Ok(())
}
