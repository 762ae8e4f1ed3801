//! The attribute bag behind every resource instance.
//!
//! A [`RemoteObject`] keeps the fields of one API object in an ordered map,
//! remembers which fields were changed locally since the last sync, and
//! derives the endpoint the object lives at.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use invoiced::{ApiKey, InvoicedConfig};
//! use invoiced::clients::HttpClient;
//! use invoiced::rest::RemoteObject;
//!
//! let config = InvoicedConfig::builder()
//!     .api_key(ApiKey::new("key").unwrap())
//!     .build()
//!     .unwrap();
//! let client = Arc::new(HttpClient::new(&config).unwrap());
//!
//! let mut customer = RemoteObject::new(client, "Customer", "/customers", Some(123.into()));
//! assert_eq!(customer.endpoint(), "/customers/123");
//! assert!(!customer.is_dirty());
//!
//! customer.set("notes", "Terrible customer");
//! assert_eq!(customer.dirty_fields(), vec!["notes"]);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::clients::{HttpClient, InvoicedError};

/// One API object: identifier, ordered fields and the dirty set.
///
/// The collection path is fixed at construction and already includes the
/// parent's endpoint for nested resources (e.g. `/customers/456/line_items`).
#[derive(Clone)]
pub struct RemoteObject {
    client: Arc<HttpClient>,
    name: &'static str,
    collection: String,
    id: Option<Value>,
    values: Map<String, Value>,
    dirty: BTreeSet<String>,
}

impl fmt::Debug for RemoteObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.name)
            .field("endpoint", &self.endpoint())
            .field("values", &self.values)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl PartialEq for RemoteObject {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.collection == other.collection
            && self.id == other.id
            && self.values == other.values
    }
}

impl RemoteObject {
    /// Creates an empty object, optionally bound to an identifier.
    #[must_use]
    pub fn new(
        client: Arc<HttpClient>,
        name: &'static str,
        collection: impl Into<String>,
        id: Option<Value>,
    ) -> Self {
        let id = id.filter(|id| !id.is_null());
        let mut values = Map::new();
        if let Some(id) = &id {
            values.insert("id".to_string(), id.clone());
        }

        Self {
            client,
            name,
            collection: collection.into(),
            id,
            values,
            dirty: BTreeSet::new(),
        }
    }

    /// Builds an object from a response payload.
    ///
    /// A payload that is not a JSON object yields an object without fields.
    #[must_use]
    pub fn from_value(
        client: Arc<HttpClient>,
        name: &'static str,
        collection: impl Into<String>,
        value: Value,
    ) -> Self {
        let mut object = Self::new(client, name, collection, None);
        object.refresh_from(value);
        object
    }

    /// Returns the dispatcher this object sends requests through.
    #[must_use]
    pub const fn client(&self) -> &Arc<HttpClient> {
        &self.client
    }

    /// Returns the resource type name (e.g. `Customer`).
    #[must_use]
    pub const fn resource_name(&self) -> &'static str {
        self.name
    }

    /// Returns the collection path the object belongs to.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the identifier, if the object has one.
    #[must_use]
    pub const fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    /// Returns the identifier as a path segment.
    ///
    /// Strings are percent-encoded, every other JSON value is used in its
    /// JSON form.
    #[must_use]
    pub fn id_segment(&self) -> Option<String> {
        self.id.as_ref().map(id_segment)
    }

    /// Returns the endpoint: the collection path, followed by `/{id}` when
    /// the object has an identifier.
    #[must_use]
    pub fn endpoint(&self) -> String {
        match self.id_segment() {
            Some(id) => format!("{}/{id}", self.collection),
            None => self.collection.clone(),
        }
    }

    /// Returns the endpoint of this specific object.
    ///
    /// # Errors
    ///
    /// Returns [`InvoicedError::MissingId`] naming `operation` when the object
    /// has no identifier. No request is made in that case.
    pub fn member_endpoint(&self, operation: &'static str) -> Result<String, InvoicedError> {
        self.id_segment()
            .map(|id| format!("{}/{id}", self.collection))
            .ok_or(InvoicedError::MissingId {
                resource: self.name,
                operation,
            })
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Sets a field.
    ///
    /// The field is marked dirty unless the value is unchanged. Setting `id`
    /// rebinds the object to a new identifier and never marks it dirty.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();

        if field == "id" {
            self.id = Some(value.clone()).filter(|id| !id.is_null());
            self.values.insert(field, value);
            return;
        }

        if self.values.get(&field) == Some(&value) {
            return;
        }

        self.values.insert(field.clone(), value);
        self.dirty.insert(field);
    }

    /// Replaces every field from a response payload and clears the dirty set.
    ///
    /// The identifier is taken from the payload's `id`; a payload without one
    /// keeps the current identifier.
    pub fn refresh_from(&mut self, value: Value) {
        let values = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        if let Some(id) = values.get("id").filter(|id| !id.is_null()) {
            self.id = Some(id.clone());
        }
        self.values = values;
        if let (Some(id), false) = (&self.id, self.values.contains_key("id")) {
            self.values.insert("id".to_string(), id.clone());
        }
        self.dirty.clear();
    }

    /// Forgets local changes without touching field values.
    pub fn mark_clean(&mut self) {
        self.dirty.clear();
    }

    /// Returns `true` if any field changed since the last sync.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns the names of the changed fields, sorted.
    #[must_use]
    pub fn dirty_fields(&self) -> Vec<&str> {
        self.dirty.iter().map(String::as_str).collect()
    }

    /// Returns the changed fields as a JSON object, for partial updates.
    #[must_use]
    pub fn dirty_payload(&self) -> Value {
        let payload: Map<String, Value> = self
            .dirty
            .iter()
            .filter_map(|field| {
                self.values
                    .get(field)
                    .map(|value| (field.clone(), value.clone()))
            })
            .collect();
        Value::Object(payload)
    }

    /// Returns every field except `id` as a JSON object, for creation.
    #[must_use]
    pub fn create_payload(&self) -> Value {
        let payload: Map<String, Value> = self
            .values
            .iter()
            .filter(|(field, _)| field.as_str() != "id")
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();
        Value::Object(payload)
    }

    /// Returns all fields.
    #[must_use]
    pub const fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Consumes the object and returns its fields.
    #[must_use]
    pub fn into_values(self) -> Map<String, Value> {
        self.values
    }

    /// Returns a string field.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Returns an integer field.
    #[must_use]
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    /// Returns a numeric field as a float (integers included).
    #[must_use]
    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    /// Returns a boolean field.
    #[must_use]
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    /// Returns a unix timestamp field as a UTC datetime.
    #[must_use]
    pub fn get_timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        self.get_i64(field)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Returns the `metadata` object.
    #[must_use]
    pub fn get_metadata(&self) -> Option<&Map<String, Value>> {
        self.get("metadata").and_then(Value::as_object)
    }

    /// Deserializes a field into `T`, `None` when absent or mismatched.
    #[must_use]
    pub fn get_as<T: DeserializeOwned>(&self, field: &str) -> Option<T> {
        self.get(field)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// Renders an identifier as a path segment.
pub(crate) fn id_segment(id: &Value) -> String {
    match id {
        Value::String(s) => urlencoding::encode(s).into_owned(),
        other => other.to_string(),
    }
}
