//! Launch record acquisition over HTTP.
//!
//! Two variants: a resumable offset-paginated loop (`paginated`) and a
//! one-shot unpaginated list fetch (`spacex`). Both are fully sequential —
//! one request in flight at a time.

pub mod http_client;
pub mod paginated;
pub mod spacex;

pub use http_client::HttpClient;
pub use paginated::fetch_paginated;
