//! Email resource implementation.

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};

use crate::rest::resource::Resource;
use crate::rest::RemoteObject;

/// A sent email, returned by the `send` sub-actions.
#[derive(Clone, Debug, PartialEq)]
pub struct Email(RemoteObject);

impl Resource for Email {
    const NAME: &'static str = "Email";
    const ENDPOINT: &'static str = "/emails";

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

impl Deref for Email {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Email {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Email {
    /// Recipient address.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.0.get_str("email")
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.0.get_str("subject")
    }

    /// Delivery state, e.g. `sent` or `bounced`.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.0.get_str("state")
    }

    #[must_use]
    pub fn opens(&self) -> Option<i64> {
        self.0.get_i64("opens")
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("created_at")
    }
}
