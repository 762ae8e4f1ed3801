//! Transaction resource implementation.

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::clients::{HttpMethod, InvoicedError};
use crate::rest::resource::{Create, Delete, List, Resource, Update};
use crate::rest::RemoteObject;

use super::{member_action, send_emails, Email};

/// A payment, charge, refund or adjustment.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction(RemoteObject);

impl Resource for Transaction {
    const NAME: &'static str = "Transaction";
    const ENDPOINT: &'static str = "/transactions";

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

impl Deref for Transaction {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Transaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl List for Transaction {}
impl Create for Transaction {}
impl Update for Transaction {}
impl Delete for Transaction {}

impl Transaction {
    #[must_use]
    pub fn customer_id(&self) -> Option<i64> {
        self.0.get_i64("customer")
    }

    #[must_use]
    pub fn invoice_id(&self) -> Option<i64> {
        self.0.get_i64("invoice")
    }

    /// `charge`, `payment`, `refund` or `adjustment`.
    #[must_use]
    pub fn transaction_type(&self) -> Option<&str> {
        self.0.get_str("type")
    }

    /// Payment method, e.g. `credit_card` or `check`.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.0.get_str("method")
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.0.get_str("status")
    }

    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.0.get_str("currency")
    }

    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        self.0.get_f64("amount")
    }

    #[must_use]
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("date")
    }

    /// Id of the transaction this one refunds or adjusts.
    #[must_use]
    pub fn parent_transaction(&self) -> Option<i64> {
        self.0.get_i64("parent_transaction")
    }

    /// Emails a payment receipt: POST `{endpoint}/emails`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for a transaction without an id,
    /// or any dispatch error.
    pub async fn send<P: Serialize + ?Sized>(&self, opts: &P) -> Result<Vec<Email>, InvoicedError> {
        send_emails(&self.0, opts).await
    }

    /// Refunds `amount` of this charge: POST `{endpoint}/refunds`.
    ///
    /// Returns the refund transaction.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for a transaction without an id,
    /// or any dispatch error.
    pub async fn refund(&self, amount: f64) -> Result<Self, InvoicedError> {
        member_action(
            &self.0,
            "refund",
            HttpMethod::Post,
            "refunds",
            Some(json!({ "amount": amount })),
        )
        .await
    }
}
