//! Resource model for the Invoiced REST API.
//!
//! This module provides:
//!
//! - **[`RemoteObject`]**: a server-side object with dirty-field tracking
//! - **[`Resource`] and capability traits**: [`List`], [`Create`], [`Update`]
//!   and [`Delete`] decide which operations a resource type supports
//! - **[`Collection<R>`]**: a handle for one collection endpoint
//! - **[`ListParams`]**: typed list options
//! - **[`resources`]**: the Invoiced resource types
//!
//! # Example
//!
//! ```rust,ignore
//! use invoiced::rest::{ListParams, Update};
//! use serde_json::json;
//!
//! let customer = client
//!     .customers
//!     .create(&json!({"name": "Test Customer"}))
//!     .await?;
//!
//! let params = ListParams {
//!     per_page: Some(10),
//!     ..ListParams::default()
//! };
//! let (customers, metadata) = client.customers.list(&params).await?;
//! if metadata.has_next_page() {
//!     // ...
//! }
//! ```

pub(crate) mod object;
mod params;
mod resource;
pub mod resources;

pub use object::RemoteObject;
pub use params::ListParams;
pub use resource::{to_params, Collection, Create, Delete, List, Resource, Update};
