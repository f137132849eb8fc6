// ABOUTME: Example application that surveys a router's identity and clock settings
// ABOUTME: Shows typed query results including booleans and cluster lists

use argh::FromArgs;
use helvarnet::{DEFAULT_PORT, RouterClient};
use std::error::Error;
use std::net::Ipv4Addr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Print a router's version, clock, and reachable clusters
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debug logging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// the router's IPv4 address
    #[argh(option, short = 'r')]
    router: String,

    /// the TCP port the router listens on (default: 50000)
    #[argh(option, short = 'p')]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let level = if cli_args.debugging {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let router: Ipv4Addr = cli_args.router.parse()?;
    let port = cli_args.port.unwrap_or(DEFAULT_PORT);

    let client = RouterClient::new(router, port);
    println!(
        "Router {router} (cluster {}, member {})",
        client.cluster(),
        client.member()
    );

    let software = client.query_software_version().await?;
    let protocol = client.query_protocol_version().await?;
    println!("Firmware {software}, protocol version {protocol}");

    let time = client.query_time().await?;
    let zone = client.query_time_zone().await?;
    let dst = client.query_daylight_saving().await?;
    println!("Clock: {time}s since epoch, UTC offset {zone}s, daylight saving {dst}");

    let clusters = client.query_clusters().await?;
    println!("Reachable clusters: {}", clusters.join(", "));

    let members = client.query_routers().await?;
    println!("Routers in this cluster: {}", members.join(", "));

    Ok(())
}
