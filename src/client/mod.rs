// ABOUTME: Client module wiring the command table to a transport
// ABOUTME: Exports the router client and the error taxonomy for its operations

//! Router Client Module
//!
//! This module provides the high-level client surface. One method per
//! protocol command, with the following properties:
//!
//! * **Stateless calls** - each operation opens its own connection, so there
//!   is no session to manage and no connection to poison
//! * **Table-driven frames** - parameter order and reply shape come from the
//!   command table, never from per-method string formatting
//! * **Typed results** - boolean queries return `bool`, list queries return
//!   `Vec<String>`, everything else returns the payload text untouched
//! * **Closed errors** - every failure is an [`Error`] carrying the failed
//!   operation's name, with an [`ErrorKind`] for coarse matching
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use helvarnet::{RouterClient, DEFAULT_PORT};
//! use std::net::Ipv4Addr;
//!
//! # async fn example() -> helvarnet::Result<()> {
//! let client = RouterClient::new(Ipv4Addr::new(10, 254, 1, 2), DEFAULT_PORT);
//!
//! // Look around
//! let clusters = client.query_clusters().await?;
//! println!("reachable clusters: {clusters:?}");
//!
//! // Bring up scene 4 of block 1 on group 17 over three seconds
//! client.recall_scene_on_group(17, 1, 4, 300).await?;
//!
//! // Health-check one fixture
//! if client.query_device_faulty(1, 63).await? {
//!     println!("fixture 1.63 reports a fault");
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
mod params;
mod router;

pub use error::{Error, ErrorKind, Result};
pub use router::RouterClient;
