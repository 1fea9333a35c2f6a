//! Backend reachability probe and local network address resolution.
//!
//! The two thin I/O wrappers the front end runs at startup next to the
//! catalog scan:
//!
//! - [`BackendProber`]: One `GET` against the ComfyUI URL, classified into a
//!   [`HealthStatus`](cc_core::HealthStatus)
//! - [`resolve`]: The first external, non-virtual IPv4 address of the host
//!
//! # Usage
//!
//! ```no_run
//! use cc_probe::BackendProber;
//!
//! #[tokio::main]
//! async fn main() {
//!     let status = BackendProber::new("http://127.0.0.1:8188").probe().await;
//!     println!("{status}");
//!     println!("Reachable at http://{}:3000", cc_probe::resolve());
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod address;
mod health;

pub use address::{
    FALLBACK_ADDRESS, InterfaceAddress, VIRTUAL_ADAPTER_PREFIXES, interface_table,
    is_virtual_adapter, resolve, select_address,
};
pub use health::{BackendProber, probe};
