//! Credit note resource implementation.

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clients::{InvoicedError, ListMetadata};
use crate::rest::resource::{Create, Delete, List, Resource, Update};
use crate::rest::RemoteObject;

use super::{list_attachments, send_emails, Attachment, Email};

/// A credit issued to a customer.
#[derive(Clone, Debug, PartialEq)]
pub struct CreditNote(RemoteObject);

impl Resource for CreditNote {
    const NAME: &'static str = "CreditNote";
    const ENDPOINT: &'static str = "/credit_notes";

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

impl Deref for CreditNote {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CreditNote {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl List for CreditNote {}
impl Create for CreditNote {}
impl Update for CreditNote {}
impl Delete for CreditNote {}

impl CreditNote {
    #[must_use]
    pub fn customer_id(&self) -> Option<i64> {
        self.0.get_i64("customer")
    }

    /// Id of the invoice the credit applies to.
    #[must_use]
    pub fn invoice_id(&self) -> Option<i64> {
        self.0.get_i64("invoice")
    }

    #[must_use]
    pub fn number(&self) -> Option<&str> {
        self.0.get_str("number")
    }

    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.0.get_str("currency")
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.0.get_str("status")
    }

    #[must_use]
    pub fn total(&self) -> Option<f64> {
        self.0.get_f64("total")
    }

    #[must_use]
    pub fn balance(&self) -> Option<f64> {
        self.0.get_f64("balance")
    }

    #[must_use]
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("date")
    }

    /// Emails the credit note: POST `{endpoint}/emails`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for a credit note without an id,
    /// or any dispatch error.
    pub async fn send<P: Serialize + ?Sized>(&self, opts: &P) -> Result<Vec<Email>, InvoicedError> {
        send_emails(&self.0, opts).await
    }

    /// Lists the credit note's attachments: GET `{endpoint}/attachments`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for a credit note without an id,
    /// or any dispatch error.
    pub async fn attachments<P: Serialize + ?Sized>(
        &self,
        opts: &P,
    ) -> Result<(Vec<Attachment>, ListMetadata), InvoicedError> {
        list_attachments(&self.0, opts).await
    }
}
