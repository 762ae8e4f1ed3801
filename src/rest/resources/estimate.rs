//! Estimate resource implementation.

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clients::{HttpMethod, InvoicedError, ListMetadata};
use crate::rest::resource::{Create, Delete, List, Resource, Update};
use crate::rest::RemoteObject;

use super::{list_attachments, member_action, send_emails, Attachment, Email, Invoice};

/// A quote that can be converted into an invoice once approved.
#[derive(Clone, Debug, PartialEq)]
pub struct Estimate(RemoteObject);

impl Resource for Estimate {
    const NAME: &'static str = "Estimate";
    const ENDPOINT: &'static str = "/estimates";

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

impl Deref for Estimate {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Estimate {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl List for Estimate {}
impl Create for Estimate {}
impl Update for Estimate {}
impl Delete for Estimate {}

impl Estimate {
    #[must_use]
    pub fn customer_id(&self) -> Option<i64> {
        self.0.get_i64("customer")
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
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("date")
    }

    #[must_use]
    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("expiration_date")
    }

    /// Id of the invoice generated from this estimate.
    #[must_use]
    pub fn invoice_id(&self) -> Option<i64> {
        self.0.get_i64("invoice")
    }

    #[must_use]
    pub fn pdf_url(&self) -> Option<&str> {
        self.0.get_str("pdf_url")
    }

    /// Emails the estimate: POST `{endpoint}/emails`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for an estimate without an id, or
    /// any dispatch error.
    pub async fn send<P: Serialize + ?Sized>(&self, opts: &P) -> Result<Vec<Email>, InvoicedError> {
        send_emails(&self.0, opts).await
    }

    /// Lists the estimate's attachments: GET `{endpoint}/attachments`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for an estimate without an id, or
    /// any dispatch error.
    pub async fn attachments<P: Serialize + ?Sized>(
        &self,
        opts: &P,
    ) -> Result<(Vec<Attachment>, ListMetadata), InvoicedError> {
        list_attachments(&self.0, opts).await
    }

    /// Converts the estimate into an invoice: POST `{endpoint}/invoice`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for an estimate without an id, or
    /// any dispatch error.
    pub async fn invoice(&self) -> Result<Invoice, InvoicedError> {
        member_action(&self.0, "invoice", HttpMethod::Post, "invoice", None).await
    }
}
