//! Blocking wrapper composing build, execute and parse for each operation.
//!
//! Every method returns `Ok(ApiResponse)` for any HTTP status; the caller
//! decides what the status means. `Err` is reserved for transport failures
//! and unreadable photo files.

use std::fmt;
use std::path::Path;

use reqwest::blocking::Client;
use tracing::debug;

use crate::client::PetFriendsClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::settings::Settings;
use crate::transport;
use crate::types::{Age, ApiKey, ApiResponse, PetFields, PetFilter, PhotoFile};

#[derive(Clone)]
pub struct PetFriends {
    client: PetFriendsClient,
    http: Client,
}

impl fmt::Debug for PetFriends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PetFriends")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}

impl PetFriends {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client: PetFriendsClient::new(base_url)?,
            http: transport::http_client()?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        Self::new(&settings.base_url)
    }

    pub fn client(&self) -> &PetFriendsClient {
        &self.client
    }

    /// Exchange account credentials for an API key (`{"key": ...}` on success).
    pub fn get_api_key(&self, email: &str, password: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_get_api_key(email, password))
    }

    pub fn get_list_of_pets(
        &self,
        auth_key: &ApiKey,
        filter: PetFilter,
    ) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_get_list_of_pets(auth_key, filter))
    }

    /// Create a pet with a photo read from `photo_path`.
    pub fn add_new_pet(
        &self,
        auth_key: &ApiKey,
        name: &str,
        animal_type: &str,
        age: impl Into<Age>,
        photo_path: impl AsRef<Path>,
    ) -> Result<ApiResponse, ApiError> {
        let photo = PhotoFile::read(photo_path)?;
        let fields = PetFields::new(name, animal_type, age);
        self.send(self.client.build_add_new_pet(auth_key, &fields, &photo))
    }

    pub fn create_pet_simple(
        &self,
        auth_key: &ApiKey,
        name: &str,
        animal_type: &str,
        age: impl Into<Age>,
    ) -> Result<ApiResponse, ApiError> {
        let fields = PetFields::new(name, animal_type, age);
        self.send(self.client.build_create_pet_simple(auth_key, &fields))
    }

    pub fn update_pet_info(
        &self,
        auth_key: &ApiKey,
        pet_id: &str,
        name: &str,
        animal_type: &str,
        age: impl Into<Age>,
    ) -> Result<ApiResponse, ApiError> {
        let fields = PetFields::new(name, animal_type, age);
        self.send(self.client.build_update_pet_info(auth_key, pet_id, &fields))
    }

    pub fn delete_pet(&self, auth_key: &ApiKey, pet_id: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_delete_pet(auth_key, pet_id))
    }

    pub fn set_photo(
        &self,
        auth_key: &ApiKey,
        pet_id: &str,
        photo_path: impl AsRef<Path>,
    ) -> Result<ApiResponse, ApiError> {
        let photo = PhotoFile::read(photo_path)?;
        self.send(self.client.build_set_photo(auth_key, pet_id, &photo))
    }

    fn send(&self, request: HttpRequest) -> Result<ApiResponse, ApiError> {
        debug!(method = ?request.method, url = %request.url, "sending request");
        let response = transport::execute(&self.http, request)?;
        debug!(status = response.status, "received response");
        Ok(self.client.parse_response(response))
    }
}
