//! Pending line item resource implementation.
//!
//! Pending line items are charges queued on a customer until the next
//! invoice is generated; see [`Customer::line_items`](super::Customer::line_items)
//! and [`Customer::invoice`](super::Customer::invoice).

use std::ops::{Deref, DerefMut};

use crate::rest::resource::{Create, Delete, List, Resource, Update};
use crate::rest::RemoteObject;

/// A pending charge on a customer.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem(RemoteObject);

impl Resource for LineItem {
    const NAME: &'static str = "LineItem";
    const ENDPOINT: &'static str = "/line_items";

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

impl Deref for LineItem {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for LineItem {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl List for LineItem {}
impl Create for LineItem {}
impl Update for LineItem {}
impl Delete for LineItem {}

impl LineItem {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.get_str("name")
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.get_str("description")
    }

    #[must_use]
    pub fn catalog_item(&self) -> Option<&str> {
        self.0.get_str("catalog_item")
    }

    #[must_use]
    pub fn quantity(&self) -> Option<f64> {
        self.0.get_f64("quantity")
    }

    #[must_use]
    pub fn unit_cost(&self) -> Option<f64> {
        self.0.get_f64("unit_cost")
    }

    /// `quantity * unit_cost`, as computed by the API.
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        self.0.get_f64("amount")
    }
}
