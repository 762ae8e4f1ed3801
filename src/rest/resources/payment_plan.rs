//! Payment plan resource implementation.
//!
//! An invoice has at most one payment plan, addressed as a singular
//! resource at `/invoices/{id}/payment_plan`. The plan's own identifier never
//! appears in its path.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::clients::{HttpClient, HttpMethod, HttpResponse, InvoicedError};
use crate::rest::resource::{to_params, Resource};
use crate::rest::RemoteObject;

/// An installment schedule for an invoice.
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentPlan(RemoteObject);

impl Resource for PaymentPlan {
    const NAME: &'static str = "PaymentPlan";
    const ENDPOINT: &'static str = "/payment_plan";

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

impl Deref for PaymentPlan {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PaymentPlan {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl PaymentPlan {
    /// The singular endpoint, e.g. `/invoices/1234/payment_plan`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        self.0.collection().to_string()
    }

    /// `pending_signup`, `active`, `finished` or `canceled`.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.0.get_str("status")
    }

    #[must_use]
    pub fn installments(&self) -> Option<&Vec<Value>> {
        self.0.get("installments").and_then(Value::as_array)
    }

    #[must_use]
    pub fn approval(&self) -> Option<&Value> {
        self.0.get("approval").filter(|approval| !approval.is_null())
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("created_at")
    }

    /// Cancels this plan: DELETE on its endpoint.
    ///
    /// # Errors
    ///
    /// Returns any dispatch error.
    pub async fn cancel(&self) -> Result<bool, InvoicedError> {
        let response = self
            .0
            .client()
            .dispatch(HttpMethod::Delete, self.0.collection(), None)
            .await?;
        Ok(response.is_no_content())
    }
}

/// Handle for the payment plan of one invoice.
///
/// Obtained from [`Invoice::payment_plan`](super::Invoice::payment_plan).
#[derive(Clone, Debug)]
pub struct PaymentPlans {
    client: Arc<HttpClient>,
    path: String,
}

impl PaymentPlans {
    pub(crate) fn for_invoice(invoice: &RemoteObject) -> Result<Self, InvoicedError> {
        let invoice_endpoint = invoice.member_endpoint("payment_plan")?;
        Ok(Self {
            client: Arc::clone(invoice.client()),
            path: format!("{invoice_endpoint}{}", PaymentPlan::ENDPOINT),
        })
    }

    /// Returns the singular endpoint.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Creates or replaces the plan: PUT on the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::InvalidParams`] if `attrs` cannot be
    /// serialized, or any dispatch error.
    pub async fn create<P: Serialize + ?Sized>(&self, attrs: &P) -> Result<PaymentPlan, InvoicedError> {
        let response = self
            .client
            .dispatch(HttpMethod::Put, &self.path, to_params(attrs)?)
            .await?;
        Ok(self.plan_from_response(response))
    }

    /// Fetches the plan: GET on the endpoint.
    ///
    /// # Errors
    ///
    /// Returns any dispatch error (404 when the invoice has no plan).
    pub async fn retrieve(&self) -> Result<PaymentPlan, InvoicedError> {
        let response = self.client.dispatch(HttpMethod::Get, &self.path, None).await?;
        Ok(self.plan_from_response(response))
    }

    /// Cancels the plan: DELETE on the endpoint. `true` on 204.
    ///
    /// # Errors
    ///
    /// Returns any dispatch error.
    pub async fn cancel(&self) -> Result<bool, InvoicedError> {
        let response = self
            .client
            .dispatch(HttpMethod::Delete, &self.path, None)
            .await?;
        Ok(response.is_no_content())
    }

    fn plan_from_response(&self, response: HttpResponse) -> PaymentPlan {
        PaymentPlan::from_object(RemoteObject::from_value(
            Arc::clone(&self.client),
            PaymentPlan::NAME,
            self.path.clone(),
            response.into_body(),
        ))
    }
}
