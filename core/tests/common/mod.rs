//! Shared harness for the scenario suites.
//!
//! A `Harness` bundles a client, the account credentials and a directory of
//! photo assets. The mock harness starts a fresh mock server on a random
//! port per test; the live harness points at the real service.

#![allow(dead_code)]

pub mod scenarios;

use std::path::{Path, PathBuf};

use mock_server::MockConfig;
use petfriends_core::{ApiKey, PetFilter, PetFriends, PetList};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

pub const EMAIL: &str = "tester@example.com";
pub const PASSWORD: &str = "correct horse";
pub const NEIGHBOUR: &str = "neighbour@example.com";

/// Photo assets the scenarios upload.
pub const CAT_PHOTO: &str = "cat1.jpg";
pub const SECOND_PHOTO: &str = "p1040103.jpg";

// JPEG SOI/APP0 header followed by EOI; enough for a content-type sniff.
const JPEG_STUB: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xD9,
];

pub struct Harness {
    pub pf: PetFriends,
    pub email: String,
    pub password: String,
    images: PathBuf,
    _photos: Option<TempDir>,
}

impl Harness {
    pub fn photo(&self, name: &str) -> PathBuf {
        self.images.join(name)
    }

    /// Write a JPEG stub padded to `len` bytes next to the other photos.
    pub fn write_padded_photo(&self, name: &str, len: usize) -> PathBuf {
        let mut bytes = JPEG_STUB.to_vec();
        bytes.resize(len.max(JPEG_STUB.len()), 0x5A);
        let path = self.photo(name);
        std::fs::write(&path, bytes).expect("write padded photo");
        path
    }

    /// Authenticate and return the key, panicking if the service refuses.
    pub fn api_key(&self) -> ApiKey {
        let response = self
            .pf
            .get_api_key(&self.email, &self.password)
            .expect("key request failed");
        response.json().expect("key response")
    }

    pub fn my_pets(&self, auth_key: &ApiKey) -> PetList {
        self.pf
            .get_list_of_pets(auth_key, PetFilter::MyPets)
            .expect("list request failed")
            .json()
            .expect("pet list")
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "petfriends_core=debug,mock_server=debug,warn".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Two accounts: ours with one pet, a neighbour with one pet.
pub fn mock_config() -> MockConfig {
    MockConfig::new()
        .account(EMAIL, PASSWORD)
        .account(NEIGHBOUR, PASSWORD)
        .seed_pet(NEIGHBOUR, "Шарик", "пёс", "7")
        .seed_pet(EMAIL, "Суперкот", "кот", "3")
}

/// Like `mock_config` but we own nothing yet.
pub fn mock_config_without_own_pets() -> MockConfig {
    MockConfig::new()
        .account(EMAIL, PASSWORD)
        .account(NEIGHBOUR, PASSWORD)
        .seed_pet(NEIGHBOUR, "Шарик", "пёс", "7")
}

/// Start a mock server on a random port and return its base URL.
pub fn spawn_mock(config: MockConfig) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, config).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

pub fn mock_harness(config: MockConfig) -> Harness {
    init_tracing();
    let base_url = spawn_mock(config);
    let photos = TempDir::new().unwrap();
    write_photos(photos.path());
    Harness {
        pf: PetFriends::new(&base_url).unwrap(),
        email: EMAIL.to_string(),
        password: PASSWORD.to_string(),
        images: photos.path().to_path_buf(),
        _photos: Some(photos),
    }
}

/// Harness for the real service, or `None` when credentials or photo
/// assets are missing.
pub fn live_harness() -> Option<Harness> {
    init_tracing();
    let settings = match petfriends_core::Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}; skipping live test.");
            return None;
        }
    };
    let images = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("images");
    for name in [CAT_PHOTO, SECOND_PHOTO] {
        if !images.join(name).is_file() {
            eprintln!("{} not found; skipping live test.", images.join(name).display());
            return None;
        }
    }
    Some(Harness {
        pf: PetFriends::from_settings(&settings).unwrap(),
        email: settings.email.clone(),
        password: settings.password.clone(),
        images,
        _photos: None,
    })
}

fn write_photos(dir: &Path) {
    for name in [CAT_PHOTO, SECOND_PHOTO] {
        std::fs::write(dir.join(name), JPEG_STUB).unwrap();
    }
}
