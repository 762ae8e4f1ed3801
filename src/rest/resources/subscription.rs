//! Subscription resource implementation.

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::clients::{HttpMethod, InvoicedError};
use crate::rest::resource::{to_params, Collection, Create, Delete, List, Resource, Update};
use crate::rest::RemoteObject;

/// A customer's recurring billing on a plan.
#[derive(Clone, Debug, PartialEq)]
pub struct Subscription(RemoteObject);

impl Resource for Subscription {
    const NAME: &'static str = "Subscription";
    const ENDPOINT: &'static str = "/subscriptions";

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

impl Deref for Subscription {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Subscription {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl List for Subscription {}
impl Create for Subscription {}
impl Update for Subscription {}
impl Delete for Subscription {}

impl Subscription {
    #[must_use]
    pub fn customer_id(&self) -> Option<i64> {
        self.0.get_i64("customer")
    }

    #[must_use]
    pub fn plan(&self) -> Option<&str> {
        self.0.get_str("plan")
    }

    #[must_use]
    pub fn quantity(&self) -> Option<i64> {
        self.0.get_i64("quantity")
    }

    /// `not_started`, `active`, `past_due`, `finished` or `canceled`.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.0.get_str("status")
    }

    #[must_use]
    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("start_date")
    }

    #[must_use]
    pub fn period_start(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("period_start")
    }

    #[must_use]
    pub fn period_end(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("period_end")
    }

    #[must_use]
    pub fn cancel_at_period_end(&self) -> Option<bool> {
        self.0.get_bool("cancel_at_period_end")
    }

    #[must_use]
    pub fn canceled_at(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("canceled_at")
    }

    #[must_use]
    pub fn recurring_total(&self) -> Option<f64> {
        self.0.get_f64("recurring_total")
    }

    /// Monthly recurring revenue.
    #[must_use]
    pub fn mrr(&self) -> Option<f64> {
        self.0.get_f64("mrr")
    }

    /// Cancels the subscription: DELETE on its endpoint. `true` on 204.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] for a subscription without an id,
    /// or any dispatch error.
    pub async fn cancel(&self) -> Result<bool, InvoicedError> {
        let endpoint = self.0.member_endpoint("cancel")?;
        let response = self
            .0
            .client()
            .dispatch(HttpMethod::Delete, &endpoint, None)
            .await?;
        Ok(response.is_no_content())
    }
}

impl Collection<Subscription> {
    /// Previews the first invoice of a subscription without creating it:
    /// POST `/subscriptions/preview`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::InvalidParams`] if `attrs` cannot be
    /// serialized, or any dispatch error.
    pub async fn preview<P: Serialize + ?Sized>(&self, attrs: &P) -> Result<Value, InvoicedError> {
        let endpoint = format!("{}/preview", self.path());
        let response = self
            .client()
            .dispatch(HttpMethod::Post, &endpoint, to_params(attrs)?)
            .await?;
        Ok(response.into_body())
    }
}
