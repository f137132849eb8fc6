// ABOUTME: Example application that recalls a lighting scene on a group
// ABOUTME: Shows client construction from a router address and a fire-and-forget action

use argh::FromArgs;
use helvarnet::{DEFAULT_PORT, RouterClient};
use std::error::Error;
use std::net::Ipv4Addr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Recall a scene on a group of devices
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

    /// the group to control
    #[argh(option, short = 'g')]
    group: u16,

    /// the scene block (default: 1)
    #[argh(option, short = 'b')]
    block: Option<u8>,

    /// the scene to recall
    #[argh(option, short = 's')]
    scene: u8,

    /// the fade time in hundredths of a second (default: 0)
    #[argh(option, short = 'f')]
    fade: Option<u32>,
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
    let block = cli_args.block.unwrap_or(1);
    let fade = cli_args.fade.unwrap_or(0);

    let client = RouterClient::new(router, port);

    match client
        .recall_scene_on_group(cli_args.group, block, cli_args.scene, fade)
        .await
    {
        Ok(()) => {
            println!(
                "Recalled scene {}.{} on group {}",
                block, cli_args.scene, cli_args.group
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to recall scene: {e}");
            Err(Box::<dyn Error>::from(e.to_string()))
        }
    }
}
