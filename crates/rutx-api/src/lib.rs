// rutx-api: Async Rust client for the Teltonika RUTX11 REST API

pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod transport;

mod auth;
mod dhcp;
mod system;
mod wireless;

pub use client::{DeviceClient, Method};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
