//! Invoiced resource types.
//!
//! Each type wraps a [`RemoteObject`] and derefs to it, so generic field
//! access (`get`, `set`, `endpoint`, ...) works on every resource alongside
//! the typed getters each type adds.
//!
//! # Available Resources
//!
//! | Type | Collection | Operations |
//! |---|---|---|
//! | [`CatalogItem`] | `/catalog_items` | list, create, retrieve, save, delete |
//! | [`Contact`] | `/customers/{id}/contacts` | list, create, retrieve, save, delete |
//! | [`CreditNote`] | `/credit_notes` | list, create, retrieve, save, delete, send, attachments |
//! | [`Customer`] | `/customers` | list, create, retrieve, save, delete, send_statement, balance, invoice |
//! | [`Estimate`] | `/estimates` | list, create, retrieve, save, delete, send, attachments, invoice |
//! | [`Event`] | `/events` | list, retrieve |
//! | [`File`] | `/files` | create, retrieve, delete |
//! | [`Invoice`] | `/invoices` | list, create, retrieve, save, delete, send, pay, attachments |
//! | [`LineItem`] | `/customers/{id}/line_items` | list, create, retrieve, save, delete |
//! | [`PaymentPlan`] | `/invoices/{id}/payment_plan` | create, retrieve, cancel |
//! | [`Plan`] | `/plans` | list, create, retrieve, save, delete |
//! | [`Subscription`] | `/subscriptions` | list, create, retrieve, save, delete, cancel, preview |
//! | [`Transaction`] | `/transactions` | list, create, retrieve, save, delete, send, refund |
//!
//! [`Email`] and [`Attachment`] are returned by sub-actions and carry no
//! operations of their own.
//!
//! # Example
//!
//! ```rust,ignore
//! use invoiced::rest::Update;
//!
//! let customer = client.customers.build(456);
//! let line_item = customer
//!     .line_items()?
//!     .create(&json!({"unit_cost": 500}))
//!     .await?;
//! assert_eq!(line_item.endpoint(), "/customers/456/line_items/123");
//! ```

mod attachment;
mod catalog_item;
mod contact;
mod credit_note;
mod customer;
mod email;
mod estimate;
mod event;
mod file;
mod invoice;
mod line_item;
mod payment_plan;
mod plan;
mod subscription;
mod transaction;

pub use attachment::Attachment;
pub use catalog_item::CatalogItem;
pub use contact::Contact;
pub use credit_note::CreditNote;
pub use customer::{Balance, Customer};
pub use email::Email;
pub use estimate::Estimate;
pub use event::Event;
pub use file::File;
pub use invoice::Invoice;
pub use line_item::LineItem;
pub use payment_plan::{PaymentPlan, PaymentPlans};
pub use plan::Plan;
pub use subscription::Subscription;
pub use transaction::Transaction;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::clients::{HttpMethod, InvoicedError, ListMetadata};
use crate::rest::resource::{objects_from_body, to_params, Resource};
use crate::rest::RemoteObject;

/// Sends `object` by email: POST `{endpoint}/emails`.
pub(crate) async fn send_emails<P: Serialize + ?Sized>(
    object: &RemoteObject,
    opts: &P,
) -> Result<Vec<Email>, InvoicedError> {
    let endpoint = format!("{}/emails", object.member_endpoint("send")?);
    let response = object
        .client()
        .dispatch(HttpMethod::Post, &endpoint, to_params(opts)?)
        .await?;
    Ok(objects_from_body(object.client(), Email::ENDPOINT, response.body))
}

/// Lists the files attached to `object`: GET `{endpoint}/attachments`.
pub(crate) async fn list_attachments<P: Serialize + ?Sized>(
    object: &RemoteObject,
    opts: &P,
) -> Result<(Vec<Attachment>, ListMetadata), InvoicedError> {
    let endpoint = format!("{}/attachments", object.member_endpoint("attachments")?);
    let response = object
        .client()
        .dispatch(HttpMethod::Get, &endpoint, to_params(opts)?)
        .await?;

    let metadata = response.list_metadata();
    let attachments = objects_from_body(object.client(), Attachment::ENDPOINT, response.body);
    Ok((attachments, metadata))
}

/// Runs a sub-action on `object` that answers with a single `R`.
///
/// The request goes to `{endpoint}/{segment}` and the returned object belongs
/// to the top-level collection of `R`.
pub(crate) async fn member_action<R: Resource>(
    object: &RemoteObject,
    operation: &'static str,
    method: HttpMethod,
    segment: &str,
    params: Option<Value>,
) -> Result<R, InvoicedError> {
    let endpoint = format!("{}/{segment}", object.member_endpoint(operation)?);
    let response = object.client().dispatch(method, &endpoint, params).await?;

    Ok(R::from_object(RemoteObject::from_value(
        Arc::clone(object.client()),
        R::NAME,
        R::ENDPOINT,
        response.into_body(),
    )))
}
