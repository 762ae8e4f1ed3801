//! Invoice resource implementation.

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::clients::{HttpMethod, InvoicedError, ListMetadata};
use crate::rest::resource::{Create, Delete, List, Resource, Update};
use crate::rest::RemoteObject;

use super::{list_attachments, send_emails, Attachment, Email, PaymentPlans};

/// An invoice.
///
/// Besides the CRUD operations an invoice can be emailed, paid with the
/// customer's payment source, and given a payment plan.
///
/// # Example
///
/// ```rust,ignore
/// use invoiced::rest::Update;
///
/// let mut invoice = client.invoices.retrieve(46225).await?;
/// invoice.set("notes", "Thanks for your business");
/// invoice.save().await?;
///
/// let emails = invoice.send(&json!({"to": [{"email": "billing@acme.com"}]})).await?;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Invoice(RemoteObject);

impl Resource for Invoice {
    const NAME: &'static str = "Invoice";
    const ENDPOINT: &'static str = "/invoices";

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

impl Deref for Invoice {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Invoice {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl List for Invoice {}
impl Create for Invoice {}
impl Update for Invoice {}
impl Delete for Invoice {}

impl Invoice {
    /// The customer id, when not expanded.
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

    /// `draft`, `not_sent`, `sent`, `viewed`, `past_due`, `pending`, `paid` or `voided`.
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
    pub fn paid(&self) -> Option<bool> {
        self.0.get_bool("paid")
    }

    #[must_use]
    pub fn closed(&self) -> Option<bool> {
        self.0.get_bool("closed")
    }

    #[must_use]
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("date")
    }

    #[must_use]
    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("due_date")
    }

    #[must_use]
    pub fn items(&self) -> Option<&Vec<Value>> {
        self.0.get("items").and_then(Value::as_array)
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.0.get_str("url")
    }

    #[must_use]
    pub fn pdf_url(&self) -> Option<&str> {
        self.0.get_str("pdf_url")
    }

    #[must_use]
    pub fn payment_url(&self) -> Option<&str> {
        self.0.get_str("payment_url")
    }

    /// Emails the invoice: POST `{endpoint}/emails`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for an invoice without an id, or
    /// any dispatch error.
    pub async fn send<P: Serialize + ?Sized>(&self, opts: &P) -> Result<Vec<Email>, InvoicedError> {
        send_emails(&self.0, opts).await
    }

    /// Charges the customer's payment source: POST `{endpoint}/pay`.
    ///
    /// The invoice is refreshed from the response.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for an invoice without an id, or
    /// any dispatch error.
    pub async fn pay(&mut self) -> Result<bool, InvoicedError> {
        let endpoint = format!("{}/pay", self.0.member_endpoint("pay")?);
        let response = self
            .0
            .client()
            .dispatch(HttpMethod::Post, &endpoint, None)
            .await?;

        if let Some(body) = response.body {
            self.0.refresh_from(body);
        }
        Ok(true)
    }

    /// Lists the invoice's attachments: GET `{endpoint}/attachments`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for an invoice without an id, or
    /// any dispatch error.
    pub async fn attachments<P: Serialize + ?Sized>(
        &self,
        opts: &P,
    ) -> Result<(Vec<Attachment>, ListMetadata), InvoicedError> {
        list_attachments(&self.0, opts).await
    }

    /// Returns the handle for the invoice's payment plan.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for an invoice without an id.
    pub fn payment_plan(&self) -> Result<PaymentPlans, InvoicedError> {
        PaymentPlans::for_invoice(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::object::tests::test_client;
    use serde_json::json;

    #[test]
    fn test_typed_getters() {
        let invoice = Invoice::from_object(RemoteObject::from_value(
            test_client(),
            Invoice::NAME,
            Invoice::ENDPOINT,
            json!({
                "id": 46225,
                "customer": 15444,
                "number": "INV-0016",
                "currency": "usd",
                "status": "not_sent",
                "paid": false,
                "closed": false,
                "total": 51.15,
                "balance": 51.15,
                "date": 1_416_290_400,
                "due_date": 1_417_500_000,
                "items": [{"id": 7, "name": "Copy paper", "quantity": 1}],
                "url": "https://dundermifflin.invoiced.com/invoices/IZmXbVOPyvfD3GPBmyd6FwXY",
                "pdf_url": "https://dundermifflin.invoiced.com/invoices/IZmXbVOPyvfD3GPBmyd6FwXY/pdf"
            }),
        ));

        assert_eq!(invoice.endpoint(), "/invoices/46225");
        assert_eq!(invoice.customer_id(), Some(15444));
        assert_eq!(invoice.number(), Some("INV-0016"));
        assert_eq!(invoice.status(), Some("not_sent"));
        assert_eq!(invoice.paid(), Some(false));
        assert_eq!(invoice.closed(), Some(false));
        assert_eq!(invoice.total(), Some(51.15));
        assert_eq!(invoice.balance(), Some(51.15));
        assert_eq!(invoice.date().map(|d| d.timestamp()), Some(1_416_290_400));
        assert_eq!(invoice.due_date().map(|d| d.timestamp()), Some(1_417_500_000));
        assert_eq!(invoice.items().map(Vec::len), Some(1));
        assert!(invoice.pdf_url().unwrap().ends_with("/pdf"));
        assert!(invoice.payment_url().is_none());
    }

    #[test]
    fn test_payment_plan_handle_path() {
        let invoice = Invoice::from_object(RemoteObject::from_value(
            test_client(),
            Invoice::NAME,
            Invoice::ENDPOINT,
            json!({"id": 1234}),
        ));
        assert_eq!(invoice.payment_plan().unwrap().path(), "/invoices/1234/payment_plan");
    }
}
