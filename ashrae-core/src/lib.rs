//! Core library for the `ashrae` CLI.
//!
//! This crate defines:
//! - ASHRAE standard revisions, unit systems and the station / design-data models
//! - The two-step lookup against ashrae-meteo.info (nearest station, then
//!   design parameters)
//! - Error types for transport, status, and payload failures
//! - Configuration handling
//!
//! It is used by `ashrae-cli`, but can also be embedded in building-design tools.

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod transport;

pub use client::{AshraeClient, ClientConfig, fetch_design_data, resolve_station};
pub use config::Config;
pub use error::{DecodeError, FetchError};
pub use model::{AshraeVersion, Coordinate, DesignData, MeteoStation, UnitSystem};
pub use transport::{HttpTransport, RawResponse, Transport};
