//! Event resource implementation.

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::rest::resource::{List, Resource};
use crate::rest::RemoteObject;

/// A record of something that happened on the account, e.g.
/// `invoice.paid`. Events are read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct Event(RemoteObject);

impl Resource for Event {
    const NAME: &'static str = "Event";
    const ENDPOINT: &'static str = "/events";

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

impl Deref for Event {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Event {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl List for Event {}

impl Event {
    /// The event type, e.g. `customer.created`.
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        self.0.get_str("type")
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("timestamp")
    }

    /// The `data.object` snapshot the event refers to.
    #[must_use]
    pub fn data_object(&self) -> Option<&Value> {
        self.0.get("data").and_then(|data| data.get("object"))
    }

    /// The `data.previous` values for update events.
    #[must_use]
    pub fn previous(&self) -> Option<&Value> {
        self.0.get("data").and_then(|data| data.get("previous"))
    }
}
