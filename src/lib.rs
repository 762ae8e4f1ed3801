//! # Invoiced API Rust Client
//!
//! An async Rust client for the [Invoiced](https://invoiced.com) billing API,
//! providing type-safe configuration, an authenticated request dispatcher and
//! a resource model with dirty tracking for partial updates.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`InvoicedConfig`] and [`InvoicedConfigBuilder`]
//! - Validated newtypes for the API key and base URL
//! - An explicit [`Client`] holding one collection handle per resource type
//! - Capability traits ([`List`], [`Create`], [`Update`], [`Delete`]) deciding
//!   which operations each resource supports
//! - Pagination metadata parsed from `Link` and `X-Total-Count` headers
//! - Optional request serialization through named locks
//!   ([`clients::LockBackend`])
//!
//! ## Quick Start
//!
//! ```rust
//! use invoiced::{ApiKey, Client, InvoicedConfig};
//!
//! let config = InvoicedConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .sandbox(true)
//!     .build()
//!     .unwrap();
//!
//! let client = Client::new(config).unwrap();
//! assert_eq!(client.invoices.path(), "/invoices");
//! ```
//!
//! ## Working with Resources
//!
//! ```rust,ignore
//! use invoiced::rest::ListParams;
//! use invoiced::{Delete, Update};
//! use serde_json::json;
//!
//! // Create
//! let mut customer = client
//!     .customers
//!     .create(&json!({"name": "Acme", "email": "billing@acmecorp.com"}))
//!     .await?;
//!
//! // Partial update: only `notes` is sent
//! customer.set("notes", "Net 30 customer");
//! customer.save().await?;
//!
//! // List with pagination metadata
//! let (invoices, metadata) = client
//!     .invoices
//!     .list(&ListParams { per_page: Some(25), ..Default::default() })
//!     .await?;
//! println!("{} of {}", invoices.len(), metadata.total_count());
//!
//! // Sub-actions
//! let balance = customer.balance().await?;
//! let emails = invoices[0].send(&json!({"to": [{"email": "ap@acmecorp.com"}]})).await?;
//!
//! customer.delete().await?;
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`InvoicedError`]; construction returns [`ConfigError`].
//!
//! ```rust,ignore
//! use invoiced::clients::ErrorKind;
//!
//! match client.invoices.retrieve(42).await {
//!     Ok(invoice) => println!("{:?}", invoice.number()),
//!     Err(e) if e.kind() == Some(ErrorKind::InvalidRequest) => println!("not found"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is passed explicitly to [`Client::new`]
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Thread-safe**: all client types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use client::Client;
pub use config::{ApiBase, ApiKey, Environment, InvoicedConfig, InvoicedConfigBuilder};
pub use error::ConfigError;

// Re-export the operation surface
pub use clients::{ErrorKind, InvoicedError, ListMetadata};
pub use rest::{Collection, Create, Delete, List, ListParams, RemoteObject, Resource, Update};
