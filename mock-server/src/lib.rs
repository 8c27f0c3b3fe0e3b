//! In-memory stand-in for the Pet Friends REST API.
//!
//! Reproduces the wire contract the client relies on: header-based key
//! issuance, `auth_key` on every pet endpoint, form and multipart payloads,
//! and `{"error": ...}` bodies with 400/403 for rejected calls.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Form, Json, Router,
};
use base64::prelude::*;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// How `age` is validated on create and update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AgePolicy {
    /// Non-numeric ages are rejected with 400.
    #[default]
    Strict,
    /// Any text is stored, as the live service sometimes does.
    Lenient,
}

#[derive(Clone, Debug)]
pub struct Account {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug)]
struct SeedPet {
    owner: String,
    name: String,
    animal_type: String,
    age: String,
}

#[derive(Clone, Debug, Default)]
pub struct MockConfig {
    accounts: Vec<Account>,
    seed: Vec<SeedPet>,
    age_policy: AgePolicy,
}

impl MockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, email: &str, password: &str) -> Self {
        self.accounts.push(Account {
            email: email.to_string(),
            password: password.to_string(),
        });
        self
    }

    /// Pre-populate a pet owned by `owner`, which must be a registered email.
    pub fn seed_pet(mut self, owner: &str, name: &str, animal_type: &str, age: &str) -> Self {
        self.seed.push(SeedPet {
            owner: owner.to_string(),
            name: name.to_string(),
            animal_type: animal_type.to_string(),
            age: age.to_string(),
        });
        self
    }

    pub fn age_policy(mut self, policy: AgePolicy) -> Self {
        self.age_policy = policy;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    pub age: String,
    pub pet_photo: String,
    pub user_id: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiKey {
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Form payload of create-simple and update. Missing fields deserialize as
/// empty so the handlers can answer with an `error` body instead of a bare
/// extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PetForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub animal_type: String,
    #[serde(default)]
    pub age: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filter: String,
}

struct Credential {
    password: String,
    key: String,
}

pub struct Store {
    credentials: HashMap<String, Credential>,
    // api key -> user id
    users: HashMap<String, String>,
    // newest first
    pets: Vec<Pet>,
    age_policy: AgePolicy,
}

impl Store {
    fn new(config: MockConfig) -> Self {
        let mut store = Store {
            credentials: HashMap::new(),
            users: HashMap::new(),
            pets: Vec::new(),
            age_policy: config.age_policy,
        };
        let mut owners = HashMap::new();
        for account in config.accounts {
            let key = Uuid::new_v4().simple().to_string();
            let user_id = Uuid::new_v4().simple().to_string();
            owners.insert(account.email.clone(), user_id.clone());
            store.users.insert(key.clone(), user_id);
            store.credentials.insert(
                account.email,
                Credential {
                    password: account.password,
                    key,
                },
            );
        }
        for seed in config.seed {
            if let Some(user_id) = owners.get(&seed.owner) {
                let form = PetForm {
                    name: seed.name,
                    animal_type: seed.animal_type,
                    age: seed.age,
                };
                store.insert(user_id.clone(), form, String::new());
            }
        }
        store
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<String, ApiFailure> {
        let key = header(headers, "auth_key")
            .ok_or_else(|| ApiFailure::forbidden("Please provide 'auth_key' Header"))?;
        self.users
            .get(key)
            .cloned()
            .ok_or_else(|| ApiFailure::forbidden("Please provide a valid 'auth_key' Header"))
    }

    fn insert(&mut self, user_id: String, form: PetForm, pet_photo: String) -> Pet {
        let pet = Pet {
            id: Uuid::new_v4().to_string(),
            name: form.name,
            animal_type: form.animal_type,
            age: form.age,
            pet_photo,
            user_id,
            created_at: timestamp(),
        };
        self.pets.insert(0, pet.clone());
        pet
    }

    fn owned_mut(&mut self, user_id: &str, pet_id: &str) -> Result<&mut Pet, ApiFailure> {
        self.pets
            .iter_mut()
            .find(|pet| pet.id == pet_id && pet.user_id == user_id)
            .ok_or_else(pet_not_found)
    }

    fn check_fields(&self, form: &PetForm) -> Result<(), ApiFailure> {
        if form.name.is_empty() || form.animal_type.is_empty() || form.age.is_empty() {
            return Err(ApiFailure::bad_request(
                "Fields 'name', 'animal_type' and 'age' are required",
            ));
        }
        if !age_is_valid(self.age_policy, &form.age) {
            return Err(ApiFailure::bad_request("Age must be a number"));
        }
        Ok(())
    }
}

pub type Db = Arc<RwLock<Store>>;

/// An error answer: status plus `{"error": message}`.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        debug!(status = %self.status, error = %self.message, "rejecting request");
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

type ApiResult<T> = Result<T, ApiFailure>;

pub fn app(config: MockConfig) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::new(config)));
    Router::new()
        .route("/api/key", get(get_api_key))
        .route("/api/pets", get(list_pets).post(add_new_pet))
        .route("/api/create_pet_simple", post(create_pet_simple))
        .route("/api/pets/{id}", put(update_pet_info).delete(delete_pet))
        .route("/api/pets/set_photo/{id}", post(set_photo))
        .with_state(db)
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "pet friends mock listening");
    }
    axum::serve(listener, app(config)).await
}

/// Strict policy accepts non-negative integers only.
pub fn age_is_valid(policy: AgePolicy, age: &str) -> bool {
    match policy {
        AgePolicy::Strict => age.trim().parse::<u32>().is_ok(),
        AgePolicy::Lenient => true,
    }
}

/// Encode an uploaded image as the data URI stored in `pet_photo`.
pub fn photo_data_uri(content_type: Option<&str>, bytes: &[u8]) -> Result<String, String> {
    let kind: mime::Mime = content_type
        .and_then(|value| value.parse().ok())
        .unwrap_or(mime::APPLICATION_OCTET_STREAM);
    if kind.type_() != mime::IMAGE {
        return Err(format!("Photo must be an image, got {kind}"));
    }
    if bytes.is_empty() {
        return Err("Photo is empty".to_string());
    }
    Ok(format!(
        "data:{};base64,{}",
        kind.essence_str(),
        BASE64_STANDARD.encode(bytes)
    ))
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn pet_not_found() -> ApiFailure {
    ApiFailure::bad_request("Pet with this id wasn't found!")
}

fn timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64().to_string())
        .unwrap_or_default()
}

#[derive(Default)]
struct Upload {
    fields: HashMap<String, String>,
    photo: Option<Result<String, String>>,
}

async fn read_upload(mut multipart: Multipart) -> ApiResult<Upload> {
    let mut upload = Upload::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiFailure::bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "pet_photo" {
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiFailure::bad_request(e.to_string()))?;
            upload.photo = Some(photo_data_uri(content_type.as_deref(), &bytes));
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| ApiFailure::bad_request(e.to_string()))?;
            upload.fields.insert(name, text);
        }
    }
    Ok(upload)
}

fn required_photo(upload: &mut Upload) -> ApiResult<String> {
    match upload.photo.take() {
        Some(Ok(uri)) => Ok(uri),
        Some(Err(message)) => Err(ApiFailure::bad_request(message)),
        None => Err(ApiFailure::bad_request("Field 'pet_photo' is required")),
    }
}

async fn get_api_key(State(db): State<Db>, headers: HeaderMap) -> ApiResult<Json<ApiKey>> {
    let store = db.read().await;
    let email = header(&headers, "email").unwrap_or_default();
    let password = header(&headers, "password").unwrap_or_default();
    match store.credentials.get(email) {
        Some(credential) if credential.password == password => Ok(Json(ApiKey {
            key: credential.key.clone(),
        })),
        _ => Err(ApiFailure::forbidden("This user wasn't found in database")),
    }
}

async fn list_pets(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<PetList>> {
    let store = db.read().await;
    let user_id = store.authorize(&headers)?;
    let pets = match query.filter.as_str() {
        "" => store.pets.clone(),
        "my_pets" => store
            .pets
            .iter()
            .filter(|pet| pet.user_id == user_id)
            .cloned()
            .collect(),
        _ => return Err(ApiFailure::bad_request("Filter value is incorrect")),
    };
    Ok(Json(PetList { pets }))
}

async fn add_new_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Json<Pet>> {
    let user_id = db.read().await.authorize(&headers)?;
    let mut upload = read_upload(multipart).await?;
    let form = PetForm {
        name: upload.fields.remove("name").unwrap_or_default(),
        animal_type: upload.fields.remove("animal_type").unwrap_or_default(),
        age: upload.fields.remove("age").unwrap_or_default(),
    };
    let mut store = db.write().await;
    store.check_fields(&form)?;
    let photo = required_photo(&mut upload)?;
    let pet = store.insert(user_id, form, photo);
    debug!(id = %pet.id, "pet created with photo");
    Ok(Json(pet))
}

async fn create_pet_simple(
    State(db): State<Db>,
    headers: HeaderMap,
    Form(form): Form<PetForm>,
) -> ApiResult<Json<Pet>> {
    let mut store = db.write().await;
    let user_id = store.authorize(&headers)?;
    store.check_fields(&form)?;
    let pet = store.insert(user_id, form, String::new());
    debug!(id = %pet.id, "pet created");
    Ok(Json(pet))
}

async fn update_pet_info(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(form): Form<PetForm>,
) -> ApiResult<Json<Pet>> {
    let mut store = db.write().await;
    let user_id = store.authorize(&headers)?;
    store.check_fields(&form)?;
    let pet = store.owned_mut(&user_id, &id)?;
    pet.name = form.name;
    pet.animal_type = form.animal_type;
    pet.age = form.age;
    Ok(Json(pet.clone()))
}

async fn delete_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    let user_id = store.authorize(&headers)?;
    let position = store
        .pets
        .iter()
        .position(|pet| pet.id == id && pet.user_id == user_id)
        .ok_or_else(pet_not_found)?;
    store.pets.remove(position);
    debug!(%id, "pet deleted");
    Ok(StatusCode::OK)
}

async fn set_photo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<Pet>> {
    let user_id = db.read().await.authorize(&headers)?;
    let mut upload = read_upload(multipart).await?;
    let mut store = db.write().await;
    let pet = store.owned_mut(&user_id, &id)?;
    pet.pet_photo = required_photo(&mut upload)?;
    Ok(Json(pet.clone()))
}
