//! Blocking API client for the Pet Friends service.
//!
//! # Overview
//! Wraps the service's seven endpoints (authenticate, list, add with photo,
//! create simple, update, delete, set photo). Each call returns the raw
//! status code together with the parsed body so tests can assert on exactly
//! what the server said.
//!
//! # Design
//! - `PetFriendsClient` is stateless: it builds `HttpRequest` values and
//!   parses `HttpResponse` values without touching the network.
//! - `transport` performs the round-trip with reqwest's blocking client; `PetFriends` composes
//!   build, execute and parse.
//! - DTOs are defined independently from the mock-server crate; the
//!   scenario tests catch schema drift.

pub mod api;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod settings;
pub mod transport;
pub mod types;

pub use api::PetFriends;
pub use client::{PetFriendsClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use form::{FormPart, MultipartForm};
pub use http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
pub use settings::{Settings, SettingsError};
pub use types::{Age, ApiKey, ApiResponse, Body, Pet, PetFields, PetFilter, PetList, PhotoFile};
