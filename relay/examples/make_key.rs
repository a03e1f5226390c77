//! Print a routing key for the webhook URL.
//!
//! ```text
//! cargo run --example make_key -- smtp.example.com:465 bot@example.com app-password --to ops@example.com
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use mailhook::RoutingSpec;

#[derive(Parser)]
struct Args {
    /// SMTP server as host:port (implicit TLS, usually 465)
    server: String,
    user: String,
    password: String,
    #[arg(long)]
    from: Option<String>,
    #[arg(long)]
    to: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (host, port) = args
        .server
        .rsplit_once(':')
        .context("server must be host:port")?;
    let spec = RoutingSpec {
        smtp_host: host.to_string(),
        smtp_port: port.parse().context("invalid port")?,
        from_address: args.from.unwrap_or_else(|| args.user.clone()),
        to_address: args.to.unwrap_or_else(|| args.user.clone()),
        auth_user: args.user,
        auth_password: args.password,
    };

    // Decode again so a key that routes elsewhere is never printed.
    let key = spec.encode()?;
    let decoded = RoutingSpec::decode(&key).context("generated key does not decode")?;
    anyhow::ensure!(decoded == spec, "generated key does not round-trip");

    println!("/cgi-bin/webhook/send?key={}", key.replace('+', "%2B"));
    Ok(())
}
