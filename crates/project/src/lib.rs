//! Project listing API for scout.
//!
//! * [`types`]: wire types for `/project/list` and `/project/{id}` and the
//!   `{code, data, msg}` envelope that wraps every body.
//! * [`transport`]: the [`Transport`] seam requests travel through.
//! * [`ProjectClient`]: unwraps envelopes into typed results and exposes a
//!   [`ProjectSearch`] fetcher for [`scout_search::SearchController`].

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{API_BASE, ProjectClient, ProjectSearch};
pub use error::{ApiError, Result};
pub use transport::{Method, Request, Transport, TransportError};
pub use types::{ApiResponse, CODE_OK, ParseKindError, ProjectItem, ProjectKind, ProjectListParams, ProjectListRes};
