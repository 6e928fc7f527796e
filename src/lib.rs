//! # Simple and type-safe client for the Hetzner DNS API.
//!
//! Manage zones, records and the primary servers of secondary zones through
//! the [Hetzner DNS API]. Every call is a single blocking HTTP round trip;
//! nothing is cached or retried.
//!
//! Options are validated before anything is sent, and every successful call
//! returns the decoded value together with the [Response], which carries the
//! status, the raw body and any pagination meta data.
//!
//! ## Examples
//!
//! ```no_run
//! use hdns::Client;
//! use hdns::record::{RecordCreateOpts, Type};
//! use hdns::zone::ZoneListOpts;
//!
//! let client = Client::builder()
//!     .token("<32 CHARACTER TOKEN>")
//!     .application("my-app", "1.0")
//!     .build()
//!     .unwrap();
//!
//! let (zones, _) = client.zone().list(&ZoneListOpts::default()).unwrap();
//! let (record, _) = client
//!     .record()
//!     .create(&RecordCreateOpts {
//!         name: "www".to_string(),
//!         type_: Some(Type::A),
//!         value: "127.0.0.1".to_string(),
//!         zone: Some((&zones[0]).into()),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! ```
//!
//! [Hetzner DNS API]: https://dns.hetzner.com/api-docs

mod client;
mod errors;
pub mod primary_server;
mod query;
pub mod record;
mod schema;
mod time;
pub mod zone;

pub use client::*;
pub use errors::*;
pub(crate) use query::*;
pub use time::*;
