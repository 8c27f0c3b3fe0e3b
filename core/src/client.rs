//! Stateless HTTP request builder and response parser for the Pet Friends API.
//!
//! # Design
//! `PetFriendsClient` holds only the base URL and carries no mutable state
//! between calls. Each endpoint has a `build_*` method producing an
//! `HttpRequest`; every response goes through the same `parse_response`,
//! because the service's status and body are reported as-is rather than
//! mapped to errors. Nothing is validated locally: whatever the caller
//! passes is forwarded to the server.

use url::Url;

use crate::error::ApiError;
use crate::form::{self, MultipartForm, FORM_CONTENT_TYPE};
use crate::http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ApiKey, ApiResponse, PetFields, PetFilter, PhotoFile};

pub const DEFAULT_BASE_URL: &str = "https://petfriends.skillfactory.ru/";

/// Header carrying the API key on every pet endpoint.
pub const AUTH_HEADER: &str = "auth_key";

/// Multipart field name of the uploaded photo.
pub const PHOTO_FIELD: &str = "pet_photo";

/// Synchronous, stateless request builder for the Pet Friends API.
#[derive(Debug, Clone)]
pub struct PetFriendsClient {
    base_url: Url,
}

impl PetFriendsClient {
    /// Bind to `base_url`. Any path prefix is kept; endpoints are appended
    /// below it.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut url = Url::parse(base_url)?;
        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self { base_url: url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn build_get_api_key(&self, email: &str, password: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.endpoint(&["api", "key"]).to_string(),
            headers: vec![
                ("email".to_string(), email.to_string()),
                ("password".to_string(), password.to_string()),
            ],
            body: None,
        }
    }

    pub fn build_get_list_of_pets(&self, auth_key: &ApiKey, filter: PetFilter) -> HttpRequest {
        let mut url = self.endpoint(&["api", "pets"]);
        url.query_pairs_mut().append_pair("filter", filter.as_str());
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: vec![auth_header(auth_key)],
            body: None,
        }
    }

    pub fn build_add_new_pet(
        &self,
        auth_key: &ApiKey,
        fields: &PetFields,
        photo: &PhotoFile,
    ) -> HttpRequest {
        let age = fields.age.to_string();
        let form = MultipartForm::new()
            .text("name", &fields.name)
            .text("animal_type", &fields.animal_type)
            .text("age", &age)
            .file(PHOTO_FIELD, photo);
        HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoint(&["api", "pets"]).to_string(),
            headers: vec![auth_header(auth_key)],
            body: Some(HttpBody::Multipart(form)),
        }
    }

    pub fn build_create_pet_simple(&self, auth_key: &ApiKey, fields: &PetFields) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoint(&["api", "create_pet_simple"]).to_string(),
            headers: form_headers(auth_key),
            body: Some(form_body(fields)),
        }
    }

    pub fn build_update_pet_info(
        &self,
        auth_key: &ApiKey,
        pet_id: &str,
        fields: &PetFields,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Put,
            url: self.endpoint(&["api", "pets", pet_id]).to_string(),
            headers: form_headers(auth_key),
            body: Some(form_body(fields)),
        }
    }

    pub fn build_delete_pet(&self, auth_key: &ApiKey, pet_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.endpoint(&["api", "pets", pet_id]).to_string(),
            headers: vec![auth_header(auth_key)],
            body: None,
        }
    }

    pub fn build_set_photo(&self, auth_key: &ApiKey, pet_id: &str, photo: &PhotoFile) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self
                .endpoint(&["api", "pets", "set_photo", pet_id])
                .to_string(),
            headers: vec![auth_header(auth_key)],
            body: Some(HttpBody::Multipart(
                MultipartForm::new().file(PHOTO_FIELD, photo),
            )),
        }
    }

    /// Normalize any response into `(status, body)`.
    pub fn parse_response(&self, response: HttpResponse) -> ApiResponse {
        ApiResponse::from(response)
    }

    // Segments are percent-encoded, so a pet id can never escape its path slot.
    // "." and ".." (in any encoding) are dot-segments under the URL standard
    // and cannot be carried as an id.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn auth_header(auth_key: &ApiKey) -> (String, String) {
    (AUTH_HEADER.to_string(), auth_key.as_str().to_string())
}

fn form_headers(auth_key: &ApiKey) -> Vec<(String, String)> {
    vec![
        auth_header(auth_key),
        ("content-type".to_string(), FORM_CONTENT_TYPE.to_string()),
    ]
}

fn form_body(fields: &PetFields) -> HttpBody {
    let age = fields.age.to_string();
    HttpBody::Bytes(
        form::urlencoded(&[
            ("name", fields.name.as_str()),
            ("animal_type", fields.animal_type.as_str()),
            ("age", age.as_str()),
        ])
        .into_bytes(),
    )
}
