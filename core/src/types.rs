//! Domain DTOs for the Pet Friends API.
//!
//! # Design
//! These types mirror the service's JSON but are defined independently from
//! the mock-server crate; the scenario suite catches schema drift. Pet
//! records are never cached or mutated locally, every read re-fetches.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Credential returned by `GET api/key`, sent back in the `auth_key` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub key: String,
}

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

/// Pet age. The service stores whatever it is given, so integers, floats,
/// free text and `null` all show up in responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Age {
    Number(serde_json::Number),
    Text(String),
    #[default]
    Missing,
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Age::Number(n) => write!(f, "{n}"),
            Age::Text(s) => f.write_str(s),
            Age::Missing => Ok(()),
        }
    }
}

impl From<i64> for Age {
    fn from(n: i64) -> Self {
        Age::Number(n.into())
    }
}

impl From<u32> for Age {
    fn from(n: u32) -> Self {
        Age::Number(n.into())
    }
}

impl From<i32> for Age {
    fn from(n: i32) -> Self {
        Age::Number(n.into())
    }
}

impl From<&str> for Age {
    fn from(s: &str) -> Self {
        Age::Text(s.to_string())
    }
}

impl From<String> for Age {
    fn from(s: String) -> Self {
        Age::Text(s)
    }
}

/// A pet record as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    #[serde(default)]
    pub age: Age,
    /// Data URI of the photo; empty or absent when none was uploaded.
    #[serde(rename = "pet_photo", default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of `GET api/pets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

impl PetList {
    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    pub fn first(&self) -> Option<&Pet> {
        self.pets.first()
    }

    pub fn contains(&self, pet_id: &str) -> bool {
        self.pets.iter().any(|pet| pet.id == pet_id)
    }
}

/// Which slice of the collection `GET api/pets` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PetFilter {
    #[default]
    All,
    MyPets,
}

impl PetFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            PetFilter::All => "",
            PetFilter::MyPets => "my_pets",
        }
    }
}

impl fmt::Display for PetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The mutable fields shared by create, create-simple and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetFields {
    pub name: String,
    pub animal_type: String,
    pub age: Age,
}

impl PetFields {
    pub fn new(name: impl Into<String>, animal_type: impl Into<String>, age: impl Into<Age>) -> Self {
        Self {
            name: name.into(),
            animal_type: animal_type.into(),
            age: age.into(),
        }
    }
}

/// A photo asset loaded into memory for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoFile {
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ApiError::Photo {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        Ok(Self::from_bytes(file_name, bytes))
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

/// Response payload: JSON when it parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(serde_json::Value),
    Text(String),
}

impl Body {
    pub fn parse(raw: String) -> Self {
        match serde_json::from_str(&raw) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Text(raw),
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Text(_) => None,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Json(value) => write!(f, "{value}"),
            Body::Text(text) => f.write_str(text),
        }
    }
}

/// Normalized result of one call: the status code and the parsed body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Body,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Top-level field of a JSON object body.
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.body.as_json()?.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Typed view of a successful response.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(ApiError::HttpError {
                status: self.status,
                body: self.body.to_string(),
            });
        }
        match &self.body {
            Body::Json(value) => serde_json::from_value(value.clone())
                .map_err(|e| ApiError::DeserializationError(e.to_string())),
            Body::Text(text) => Err(ApiError::DeserializationError(format!(
                "expected a JSON body, got {text:?}"
            ))),
        }
    }
}

impl From<HttpResponse> for ApiResponse {
    fn from(response: HttpResponse) -> Self {
        Self {
            status: response.status,
            body: Body::parse(response.body),
        }
    }
}
