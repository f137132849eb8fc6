pub mod client;
pub mod codec;
pub mod command;
pub mod datatypes;
pub mod transport;

mod macros;

#[cfg(test)]
mod tests;

// Re-export codec types for direct frame work
pub use codec::{DecodeError, EncodeError, FrameType, ReplyShape, ReplyValue};

// Re-export the command table for introspection
pub use command::{Addressing, CommandDescriptor, CommandId, CommandKind};

// Re-export the main client API for easy access
pub use client::{Error, ErrorKind, RouterClient};

// Re-export addressing and parameter types
pub use datatypes::{DeviceAddress, ParamKey, Parameter};

// Re-export the transport layer
pub use transport::{TcpTransport, Transport, DEFAULT_PORT, DEFAULT_TIMEOUT};

/// A specialized `Result` type for router operations.
///
/// Every client method returns this; the [`Error`] inside is a closed enum,
/// so callers can match on [`Error::kind`] instead of downcasting.
///
/// # Examples
///
/// ## Recalling a Scene
///
/// The shortest useful program: point the client at a router and bring up a
/// scene on a group:
///
/// ```rust,no_run
/// use helvarnet::{RouterClient, DEFAULT_PORT};
/// use std::net::Ipv4Addr;
///
/// #[tokio::main]
/// async fn main() -> helvarnet::Result<()> {
///     let client = RouterClient::new(Ipv4Addr::new(10, 254, 1, 2), DEFAULT_PORT);
///
///     // Scene 4 of block 1 on group 17, fading over three seconds
///     client.recall_scene_on_group(17, 1, 4, 300).await?;
///
///     Ok(())
/// }
/// ```
///
/// ## Sweeping Device Health
///
/// Queries wait for and decode the router's reply, so results come back
/// typed:
///
/// ```rust,no_run
/// use helvarnet::{RouterClient, DEFAULT_PORT};
/// use std::net::Ipv4Addr;
///
/// #[tokio::main]
/// async fn main() -> helvarnet::Result<()> {
///     let client = RouterClient::new(Ipv4Addr::new(10, 254, 1, 2), DEFAULT_PORT);
///
///     let version = client.query_software_version().await?;
///     println!("router firmware: {version}");
///
///     for device in 1..=4u16 {
///         if client.query_device_faulty(1, device).await? {
///             let description = client.query_device_description(1, device).await?;
///             println!("device 1.{device} ({description}) reports a fault");
///         }
///     }
///
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, client::Error>;
