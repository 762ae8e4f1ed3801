//! The Invoiced API client.
//!
//! This module provides the [`Client`] type, the entry point for every API
//! operation.

use std::sync::Arc;

use crate::clients::HttpClient;
use crate::config::InvoicedConfig;
use crate::error::ConfigError;
use crate::rest::resources::{
    CatalogItem, CreditNote, Customer, Estimate, Event, File, Invoice, Plan, Subscription,
    Transaction,
};
use crate::rest::Collection;

/// Client for the Invoiced API.
///
/// Holds one [`Collection`] handle per top-level resource type. Nested
/// collections (contacts, line items, payment plans) are reached through
/// their parent objects.
///
/// # Thread Safety
///
/// `Client` is `Send + Sync`. Every handle shares one [`HttpClient`] behind an
/// `Arc`, so a client can be shared across tasks or cloned cheaply.
///
/// # Example
///
/// ```rust,ignore
/// use invoiced::{ApiKey, Client, InvoicedConfig};
/// use invoiced::rest::Update;
///
/// let config = InvoicedConfig::builder()
///     .api_key(ApiKey::new("your-api-key")?)
///     .sandbox(true)
///     .build()?;
/// let client = Client::new(config)?;
///
/// let mut invoice = client.invoices.retrieve(46225).await?;
/// invoice.set("notes", "Thanks for your business");
/// invoice.save().await?;
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    pub catalog_items: Collection<CatalogItem>,
    pub credit_notes: Collection<CreditNote>,
    pub customers: Collection<Customer>,
    pub estimates: Collection<Estimate>,
    pub events: Collection<Event>,
    pub files: Collection<File>,
    pub invoices: Collection<Invoice>,
    pub plans: Collection<Plan>,
    pub subscriptions: Collection<Subscription>,
    pub transactions: Collection<Transaction>,
    http_client: Arc<HttpClient>,
    config: InvoicedConfig,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the HTTP transport cannot
    /// be constructed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use invoiced::{ApiKey, Client, InvoicedConfig};
    ///
    /// let config = InvoicedConfig::builder()
    ///     .api_key(ApiKey::new("test").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = Client::new(config).unwrap();
    /// assert_eq!(client.customers.path(), "/customers");
    /// assert_eq!(client.http_client().api_url(), "https://api.invoiced.com");
    /// ```
    pub fn new(config: InvoicedConfig) -> Result<Self, ConfigError> {
        let http_client = Arc::new(HttpClient::new(&config)?);

        Ok(Self {
            catalog_items: Collection::new(Arc::clone(&http_client)),
            credit_notes: Collection::new(Arc::clone(&http_client)),
            customers: Collection::new(Arc::clone(&http_client)),
            estimates: Collection::new(Arc::clone(&http_client)),
            events: Collection::new(Arc::clone(&http_client)),
            files: Collection::new(Arc::clone(&http_client)),
            invoices: Collection::new(Arc::clone(&http_client)),
            plans: Collection::new(Arc::clone(&http_client)),
            subscriptions: Collection::new(Arc::clone(&http_client)),
            transactions: Collection::new(Arc::clone(&http_client)),
            http_client,
            config,
        })
    }

    /// Returns the shared dispatcher.
    #[must_use]
    pub const fn http_client(&self) -> &Arc<HttpClient> {
        &self.http_client
    }

    /// Returns the configuration the client was built from.
    #[must_use]
    pub const fn config(&self) -> &InvoicedConfig {
        &self.config
    }
}
