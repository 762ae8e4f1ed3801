//! Plan resource implementation.

use std::ops::{Deref, DerefMut};

use crate::rest::resource::{Create, Delete, List, Resource, Update};
use crate::rest::RemoteObject;

/// A subscription plan: price and billing interval for a catalog item.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan(RemoteObject);

impl Resource for Plan {
    const NAME: &'static str = "Plan";
    const ENDPOINT: &'static str = "/plans";

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

impl Deref for Plan {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Plan {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl List for Plan {}
impl Create for Plan {}
impl Update for Plan {}
impl Delete for Plan {}

impl Plan {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.get_str("name")
    }

    #[must_use]
    pub fn catalog_item(&self) -> Option<&str> {
        self.0.get_str("catalog_item")
    }

    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.0.get_str("currency")
    }

    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        self.0.get_f64("amount")
    }

    /// `day`, `week`, `month` or `year`.
    #[must_use]
    pub fn interval(&self) -> Option<&str> {
        self.0.get_str("interval")
    }

    #[must_use]
    pub fn interval_count(&self) -> Option<i64> {
        self.0.get_i64("interval_count")
    }
}
