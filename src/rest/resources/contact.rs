//! Contact resource implementation.
//!
//! Contacts only exist under a customer, so their collection is always
//! obtained through [`Customer::contacts`](super::Customer::contacts).

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};

use crate::rest::resource::{Create, Delete, List, Resource, Update};
use crate::rest::RemoteObject;

/// A person to reach at a customer.
#[derive(Clone, Debug, PartialEq)]
pub struct Contact(RemoteObject);

impl Resource for Contact {
    const NAME: &'static str = "Contact";
    const ENDPOINT: &'static str = "/contacts";

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

impl Deref for Contact {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Contact {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl List for Contact {}
impl Create for Contact {}
impl Update for Contact {}
impl Delete for Contact {}

impl Contact {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.get_str("name")
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.0.get_str("email")
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.0.get_str("phone")
    }

    /// Whether the contact receives billing communications.
    #[must_use]
    pub fn primary(&self) -> Option<bool> {
        self.0.get_bool("primary")
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("created_at")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::object::tests::test_client;
    use serde_json::json;

    #[test]
    fn test_contact_under_customer() {
        let contact = Contact::from_object(RemoteObject::from_value(
            test_client(),
            Contact::NAME,
            "/customers/456/contacts",
            json!({"id": 10403, "name": "Nancy Talty", "email": "nancy@example.com", "primary": true}),
        ));

        assert_eq!(contact.endpoint(), "/customers/456/contacts/10403");
        assert_eq!(contact.name(), Some("Nancy Talty"));
        assert_eq!(contact.email(), Some("nancy@example.com"));
        assert_eq!(contact.primary(), Some(true));
        assert_eq!(contact.phone(), None);
    }
}
