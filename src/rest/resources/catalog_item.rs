//! Catalog item resource implementation.

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};

use crate::rest::resource::{Create, Delete, List, Resource, Update};
use crate::rest::RemoteObject;

/// A product or service in the catalog.
///
/// Catalog item identifiers are caller-chosen strings.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogItem(RemoteObject);

impl Resource for CatalogItem {
    const NAME: &'static str = "CatalogItem";
    const ENDPOINT: &'static str = "/catalog_items";

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

impl Deref for CatalogItem {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CatalogItem {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl List for CatalogItem {}
impl Create for CatalogItem {}
impl Update for CatalogItem {}
impl Delete for CatalogItem {}

impl CatalogItem {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.get_str("name")
    }

    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.0.get_str("currency")
    }

    #[must_use]
    pub fn unit_cost(&self) -> Option<f64> {
        self.0.get_f64("unit_cost")
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.get_str("description")
    }

    /// `product` or `service`.
    #[must_use]
    pub fn item_type(&self) -> Option<&str> {
        self.0.get_str("type")
    }

    #[must_use]
    pub fn taxable(&self) -> Option<bool> {
        self.0.get_bool("taxable")
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("created_at")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::resource::Collection;
    use crate::rest::object::tests::test_client;

    #[test]
    fn test_string_identifier_endpoint() {
        let items: Collection<CatalogItem> = Collection::new(test_client());
        let item = items.build("delivery");
        assert_eq!(item.endpoint(), "/catalog_items/delivery");
    }
}
