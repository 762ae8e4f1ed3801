//! Attachment resource implementation.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::rest::resource::Resource;
use crate::rest::RemoteObject;

use super::File;

/// A file attached to an invoice, estimate or credit note.
#[derive(Clone, Debug, PartialEq)]
pub struct Attachment(RemoteObject);

impl Resource for Attachment {
    const NAME: &'static str = "Attachment";
    const ENDPOINT: &'static str = "/attachments";

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

impl Deref for Attachment {
    type Target = RemoteObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Attachment {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Attachment {
    /// The attached file, when the payload embeds it.
    #[must_use]
    pub fn file(&self) -> Option<File> {
        self.0
            .get("file")
            .filter(|file| file.is_object())
            .map(|file| {
                File::from_object(RemoteObject::from_value(
                    Arc::clone(self.0.client()),
                    File::NAME,
                    File::ENDPOINT,
                    file.clone(),
                ))
            })
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp("created_at")
    }
}
