//! Request payloads: `application/x-www-form-urlencoded` for the plain pet
//! endpoints and a structured `multipart/form-data` description for photo
//! uploads, which `transport` hands to reqwest for encoding.

use crate::types::PhotoFile;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Encode `fields` as a URL-encoded form body.
pub fn urlencoded(fields: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

/// One named part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, photo: PhotoFile },
}

/// Ordered multipart form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.push(FormPart::Text {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn file(mut self, name: &str, photo: &PhotoFile) -> Self {
        self.parts.push(FormPart::File {
            name: name.to_string(),
            photo: photo.clone(),
        });
        self
    }

    /// Value of the first text part called `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Photo of the first file part called `name`.
    pub fn file_value(&self, name: &str) -> Option<&PhotoFile> {
        self.parts.iter().find_map(|part| match part {
            FormPart::File { name: n, photo } if n == name => Some(photo),
            _ => None,
        })
    }
}
