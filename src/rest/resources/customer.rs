//! Customer resource implementation.

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, InvoicedError};
use crate::rest::resource::{to_params, Collection, Create, Delete, List, Resource, Update};
use crate::rest::RemoteObject;

use super::{member_action, send_emails, Contact, Email, Invoice, LineItem};

/// A customer account.
///
/// # Example
///
/// ```rust,ignore
/// let customer = client.customers.create(&json!({"name": "Pied Piper"})).await?;
/// let balance = customer.balance().await?;
/// if balance.past_due {
///     customer.send_statement(&()).await?;
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Customer(RemoteObject);

impl Resource for Customer {
    const NAME: &'static str = "Customer";
    const ENDPOINT: &'static str = "/customers";

    fn from_object(object: RemoteObject) -> Self {
        Self(object)
    }

    fn object(&self) -> &RemoteObject {
        &self.0
    }

    fn object_mut(&mut self) -> &mut RemoteObject {
        &mut self.0
    }

    fn into_object(self) -> RemoteObject {
        self.0
    }
}

impl Deref for Customer {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Customer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl List for Customer {}
impl Create for Customer {}
impl Update for Customer {}
impl Delete for Customer {}

/// A customer's account balance.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Balance {
    #[serde(default)]
    pub available_credits: f64,
    #[serde(default)]
    pub past_due: bool,
    #[serde(default)]
    pub total_outstanding: f64,
    /// Credit balance history entries, when returned.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<serde_json::Value>,
}

impl Customer {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.get_str("name")
    }

    #[must_use]
    pub fn number(&self) -> Option<&str> {
        self.0.get_str("number")
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.0.get_str("email")
    }

    /// `company` or `person`.
    #[must_use]
    pub fn customer_type(&self) -> Option<&str> {
        self.0.get_str("type")
    }

    #[must_use]
    pub fn autopay(&self) -> Option<bool> {
        self.0.get_bool("autopay")
    }

    #[must_use]
    pub fn payment_terms(&self) -> Option<&str> {
        self.0.get_str("payment_terms")
    }

    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.0.get_str("currency")
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.0.get_str("country")
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.0.get_str("notes")
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("created_at")
    }

    /// Emails an account statement: POST `{endpoint}/emails`.
    ///
    /// `opts` may name recipients (`to`), a `subject`, a `message` or the
    /// statement `type` (`open_item` or `balance_forward`).
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for a customer without an id, or
    /// any dispatch error.
    pub async fn send_statement<P: Serialize + ?Sized>(
        &self,
        opts: &P,
    ) -> Result<Vec<Email>, InvoicedError> {
        send_emails(&self.0, opts).await
    }

    /// Fetches the account balance: GET `{endpoint}/balance`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::Decode`] if the body is not a balance, or any
    /// dispatch error.
    pub async fn balance(&self) -> Result<Balance, InvoicedError> {
        let endpoint = format!("{}/balance", self.0.member_endpoint("balance")?);
        let response = self
            .0
            .client()
            .dispatch(HttpMethod::Get, &endpoint, None)
            .await?;

        serde_json::from_value(response.into_body())
            .map_err(|source| InvoicedError::Decode { what: "balance", source })
    }

    /// Invoices the customer's pending line items: POST `{endpoint}/invoices`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for a customer without an id, or
    /// any dispatch error.
    pub async fn invoice<P: Serialize + ?Sized>(&self, opts: &P) -> Result<Invoice, InvoicedError> {
        member_action(&self.0, "invoice", HttpMethod::Post, "invoices", to_params(opts)?).await
    }

    /// Returns the customer's contacts collection.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for a customer without an id.
    pub fn contacts(&self) -> Result<Collection<Contact>, InvoicedError> {
        Collection::nested(&self.0, "contacts")
    }

    /// Returns the customer's pending line items collection.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for a customer without an id.
    pub fn line_items(&self) -> Result<Collection<LineItem>, InvoicedError> {
        Collection::nested(&self.0, "line_items")
    }
}
