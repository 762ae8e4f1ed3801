//! File resource implementation.

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};

use crate::rest::resource::{Create, Delete, Resource};
use crate::rest::RemoteObject;

/// An uploaded file, referenced by attachments.
///
/// Files are created from a public URL, not uploaded as bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct File(RemoteObject);

impl Resource for File {
    const NAME: &'static str = "File";
    const ENDPOINT: &'static str = "/files";

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

impl Deref for File {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for File {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Create for File {}
impl Delete for File {}

impl File {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.get_str("name")
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> Option<i64> {
        self.0.get_i64("size")
    }

    /// MIME type.
    #[must_use]
    pub fn file_type(&self) -> Option<&str> {
        self.0.get_str("type")
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.0.get_str("url")
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("created_at")
    }
}
