//! Item collection core for the discarded-items list.
//!
//! # Overview
//! Keeps a client-side list of discarded items in step with a remote item
//! store. `ItemCollectionManager` owns the list and drives list/add/delete
//! through a `RemoteItemClient`.
//!
//! # Design
//! - `ItemClient` is stateless and sans-io: it holds only `base_url` and
//!   splits every operation into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`).
//! - A `Transport` performs the round-trip. `HttpItemClient` pairs the two and
//!   implements `RemoteItemClient`.
//! - New ids are generated client-side as max-plus-one over the current list
//!   (see `id`).
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod id;
pub mod manager;
pub mod remote;
pub mod transport;
pub mod types;

pub use client::ItemClient;
pub use config::ClientConfig;
pub use error::{ApiError, IdError, SyncError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use id::next_id;
pub use manager::ItemCollectionManager;
pub use remote::{HttpItemClient, RemoteItemClient};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Item, RemovalMethod};
