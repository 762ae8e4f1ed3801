//! Resource traits and collection handles for CRUD operations.
//!
//! Every resource type implements [`Resource`], which ties it to a
//! [`RemoteObject`] and names its collection path. The operations a type
//! supports are opted into with capability traits:
//!
//! - [`List`]: enables [`Collection::list`] and [`Collection::list_all`]
//! - [`Create`]: enables [`Collection::create`]
//! - [`Update`]: provides `save()`, a partial update of the dirty fields
//! - [`Delete`]: provides `delete()`
//!
//! [`Collection::retrieve`] is available for every resource type.
//!
//! # Example
//!
//! ```rust,ignore
//! use invoiced::rest::{Delete, Update};
//!
//! let (customers, metadata) = client.customers.list(&ListParams::default()).await?;
//! println!("{} of {}", customers.len(), metadata.total_count());
//!
//! let mut customer = client.customers.retrieve(123).await?;
//! customer.set("notes", "Terrible customer");
//! assert!(customer.save().await?);
//!
//! assert!(customer.delete().await?);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::clients::{HttpClient, HttpMethod, HttpResponse, InvoicedError, ListMetadata};
use crate::rest::object::{id_segment, RemoteObject};

/// A typed wrapper around a [`RemoteObject`].
///
/// # Associated Constants
///
/// - `NAME`: The resource name used in errors and logs (e.g., "Customer")
/// - `ENDPOINT`: The collection path segment (e.g., "/customers"); nested
///   resources append it to their parent's endpoint
pub trait Resource: Sized + Send + Sync {
    /// The resource name (e.g., "Customer").
    const NAME: &'static str;

    /// The collection path segment (e.g., "/customers").
    const ENDPOINT: &'static str;

    /// Wraps an object.
    fn from_object(object: RemoteObject) -> Self;

    /// Returns the wrapped object.
    fn object(&self) -> &RemoteObject;

    /// Returns the wrapped object mutably.
    fn object_mut(&mut self) -> &mut RemoteObject;

    /// Unwraps the object.
    fn into_object(self) -> RemoteObject;
}

/// Marker for resources that can be listed.
pub trait List: Resource {}

/// Marker for resources that can be created.
pub trait Create: Resource {}

/// Resources that can be updated in place.
#[allow(async_fn_in_trait)]
pub trait Update: Resource {
    /// Sends the changed fields as a PATCH and refreshes from the response.
    ///
    /// Returns `Ok(false)` without any request when nothing changed.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] when the object has no identifier,
    /// or any dispatch error.
    async fn save(&mut self) -> Result<bool, InvoicedError> {
        let object = self.object_mut();

        if !object.is_dirty() {
            tracing::debug!(resource = Self::NAME, "Nothing to save");
            return Ok(false);
        }

        let endpoint = object.member_endpoint("save")?;
        let response = object
            .client()
            .dispatch(HttpMethod::Patch, &endpoint, Some(object.dirty_payload()))
            .await?;

        match response.body {
            Some(body) => object.refresh_from(body),
            None => object.mark_clean(),
        }
        Ok(true)
    }
}

/// Resources that can be deleted.
#[allow(async_fn_in_trait)]
pub trait Delete: Resource {
    /// Deletes the object.
    ///
    /// Returns `true` iff the API answered 204 No Content. Error statuses are
    /// returned as errors, never as `false`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] when the object has no identifier,
    /// or any dispatch error.
    async fn delete(&self) -> Result<bool, InvoicedError> {
        let object = self.object();
        let endpoint = object.member_endpoint("delete")?;
        let response = object
            .client()
            .dispatch(HttpMethod::Delete, &endpoint, None)
            .await?;
        Ok(response.is_no_content())
    }
}

/// Converts caller-supplied options into request parameters.
///
/// `null` (from `()` or `None`) means no parameters.
///
/// # Errors
///
/// Returns [`InvoicedError::InvalidParams`] if `params` cannot be serialized.
pub fn to_params<P: Serialize + ?Sized>(params: &P) -> Result<Option<Value>, InvoicedError> {
    let value = serde_json::to_value(params)?;
    Ok(if value.is_null() { None } else { Some(value) })
}

/// Converts a response body into resource instances.
///
/// An array yields one instance per element in order; any other body yields
/// nothing.
pub(crate) fn objects_from_body<R: Resource>(
    client: &Arc<HttpClient>,
    collection: &str,
    body: Option<Value>,
) -> Vec<R> {
    match body {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| {
                R::from_object(RemoteObject::from_value(
                    Arc::clone(client),
                    R::NAME,
                    collection,
                    item,
                ))
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Handle for one collection endpoint, e.g. `/invoices` or
/// `/customers/456/line_items`.
///
/// Collections are cheap to clone and never hold per-request state.
pub struct Collection<R> {
    client: Arc<HttpClient>,
    path: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for Collection<R> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            path: self.path.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for Collection<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("resource", &R::NAME)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

// Verify Collection is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Collection<crate::rest::resources::Customer>>();
};

impl<R: Resource> Collection<R> {
    /// Creates a handle for a top-level collection at `R::ENDPOINT`.
    #[must_use]
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self::at(client, R::ENDPOINT)
    }

    /// Creates a handle for a collection at an explicit path.
    #[must_use]
    pub fn at(client: Arc<HttpClient>, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _resource: PhantomData,
        }
    }

    /// Creates a handle nested under `parent`'s endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] when `parent` has no identifier.
    pub fn nested(parent: &RemoteObject, operation: &'static str) -> Result<Self, InvoicedError> {
        let parent_endpoint = parent.member_endpoint(operation)?;
        Ok(Self::at(
            Arc::clone(parent.client()),
            format!("{parent_endpoint}{}", R::ENDPOINT),
        ))
    }

    /// Returns the collection path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the dispatcher.
    #[must_use]
    pub const fn client(&self) -> &Arc<HttpClient> {
        &self.client
    }

    /// Returns a local object bound to `id` without fetching it.
    ///
    /// Useful for operating on a known object without a retrieve round trip:
    ///
    /// ```rust,ignore
    /// let mut customer = client.customers.build(123);
    /// customer.set("notes", "Terrible customer");
    /// customer.save().await?;
    /// ```
    #[must_use]
    pub fn build(&self, id: impl Into<Value>) -> R {
        R::from_object(RemoteObject::new(
            Arc::clone(&self.client),
            R::NAME,
            self.path.clone(),
            Some(id.into()),
        ))
    }

    /// Fetches one object by identifier.
    ///
    /// # Errors
    ///
    /// Returns any dispatch error (404 is `InvalidRequest`).
    pub async fn retrieve(&self, id: impl Into<Value>) -> Result<R, InvoicedError> {
        self.retrieve_with(id, &()).await
    }

    /// Fetches one object by identifier with query options such as `expand`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::InvalidParams`] if `opts` cannot be
    /// serialized, or any dispatch error.
    pub async fn retrieve_with<P: Serialize + ?Sized>(
        &self,
        id: impl Into<Value>,
        opts: &P,
    ) -> Result<R, InvoicedError> {
        let id = id.into();
        let endpoint = format!("{}/{}", self.path, id_segment(&id));
        let params = to_params(opts)?;

        let response = self.client.dispatch(HttpMethod::Get, &endpoint, params).await?;
        Ok(self.object_from_response(response))
    }

    fn object_from_response(&self, response: HttpResponse) -> R {
        R::from_object(RemoteObject::from_value(
            Arc::clone(&self.client),
            R::NAME,
            self.path.clone(),
            response.into_body(),
        ))
    }
}

impl<R: List> Collection<R> {
    /// Lists one page of the collection.
    ///
    /// `opts` are sent as query parameters (filters, `page`, `per_page`,
    /// `sort`, ...). Pass `&()` for none.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::InvalidParams`] if `opts` cannot be
    /// serialized, or any dispatch error.
    pub async fn list<P: Serialize + ?Sized>(
        &self,
        opts: &P,
    ) -> Result<(Vec<R>, ListMetadata), InvoicedError> {
        let params = to_params(opts)?;
        let response = self.client.dispatch(HttpMethod::Get, &self.path, params).await?;

        let metadata = response.list_metadata();
        let objects = objects_from_body(&self.client, &self.path, response.body);
        Ok((objects, metadata))
    }

    /// Lists every page of the collection, following `next` links.
    ///
    /// `opts` are sent with every page request; its `page` parameter is
    /// overwritten per page. Listing stops early if a `next` link does not
    /// point past the page just fetched.
    ///
    /// # Errors
    ///
    /// Returns the first error any page request fails with.
    pub async fn list_all<P: Serialize + ?Sized>(&self, opts: &P) -> Result<Vec<R>, InvoicedError> {
        let mut params = match to_params(opts)? {
            Some(Value::Object(map)) => map,
            None => Map::new(),
            // rejected by request validation
            Some(_) => return self.list(opts).await.map(|(objects, _)| objects),
        };

        let mut current = params.get("page").and_then(page_number).unwrap_or(1);
        let mut all = Vec::new();
        loop {
            let (mut page, metadata) = self.list(&params).await?;
            all.append(&mut page);

            let Some(next) = metadata.next_page() else {
                break;
            };
            if next <= current {
                tracing::warn!(
                    resource = R::NAME,
                    page = current,
                    next,
                    "Next page link does not advance, stopping"
                );
                break;
            }
            tracing::debug!(resource = R::NAME, page = next, "Fetching next page");
            params.insert("page".to_string(), Value::from(next));
            current = next;
        }

        Ok(all)
    }
}

fn page_number(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|page| page.parse().ok()))
}

impl<R: Create> Collection<R> {
    /// Creates an object from `attrs`.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::InvalidParams`] if `attrs` cannot be
    /// serialized, or any dispatch error.
    pub async fn create<P: Serialize + ?Sized>(&self, attrs: &P) -> Result<R, InvoicedError> {
        let params = to_params(attrs)?;
        let response = self.client.dispatch(HttpMethod::Post, &self.path, params).await?;
        Ok(self.object_from_response(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::object::tests::test_client;
    use crate::rest::resources::{Customer, LineItem};
    use serde_json::json;

    #[test]
    fn test_to_params() {
        assert_eq!(to_params(&()).unwrap(), None);
        assert_eq!(to_params(&None::<u8>).unwrap(), None);
        assert_eq!(
            to_params(&json!({"page": 2})).unwrap(),
            Some(json!({"page": 2}))
        );
    }

    #[test]
    fn test_collection_paths() {
        let customers: Collection<Customer> = Collection::new(test_client());
        assert_eq!(customers.path(), "/customers");

        let customer = customers.build(456);
        let line_items: Collection<LineItem> =
            Collection::nested(customer.object(), "line_items").unwrap();
        assert_eq!(line_items.path(), "/customers/456/line_items");
        assert_eq!(line_items.build(123).endpoint(), "/customers/456/line_items/123");
    }

    #[test]
    fn test_nested_requires_parent_id() {
        let parent = RemoteObject::new(test_client(), "Customer", "/customers", None);
        let result: Result<Collection<LineItem>, _> = Collection::nested(&parent, "line_items");
        assert!(matches!(
            result,
            Err(InvoicedError::MissingId {
                operation: "line_items",
                ..
            })
        ));
    }

    #[test]
    fn test_objects_from_body_keeps_order() {
        let client = test_client();
        let items: Vec<Customer> = objects_from_body(
            &client,
            "/customers",
            Some(json!([{"id": 2}, {"id": 1}, {"id": 3}])),
        );
        let ids: Vec<_> = items.iter().map(|c| c.endpoint()).collect();
        assert_eq!(ids, vec!["/customers/2", "/customers/1", "/customers/3"]);

        let none: Vec<Customer> = objects_from_body(&client, "/customers", None);
        assert!(none.is_empty());
    }

    #[test]
    fn test_collection_debug() {
        let customers: Collection<Customer> = Collection::new(test_client());
        let debug_str = format!("{customers:?}");
        assert!(debug_str.contains("Customer"));
        assert!(debug_str.contains("/customers"));
    }
}
