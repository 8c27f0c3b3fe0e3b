//! Scenario bodies shared by the mock and live suites.
//!
//! Each one authenticates, does at most a couple of setup calls, performs the
//! call under test and asserts the status code plus one body field.

use petfriends_core::{ApiKey, Pet, PetFilter, PetList};

use super::{Harness, CAT_PHOTO, SECOND_PHOTO};

pub fn get_api_key_for_valid_user(h: &Harness) {
    let response = h.pf.get_api_key(&h.email, &h.password).unwrap();

    assert_eq!(response.status, 200);
    assert!(response.has_field("key"), "body: {}", response.body);
}

pub fn get_all_pets_with_valid_key(h: &Harness) {
    let auth_key = h.api_key();
    let response = h.pf.get_list_of_pets(&auth_key, PetFilter::All).unwrap();

    assert_eq!(response.status, 200);
    // Other users' records are not ours to type-check.
    let pets = response.field("pets").and_then(|pets| pets.as_array());
    assert!(pets.is_some_and(|pets| !pets.is_empty()));
}

pub fn add_new_pet_with_valid_data(h: &Harness) {
    let name = "Барбоскин";
    let auth_key = h.api_key();
    let response = h
        .pf
        .add_new_pet(&auth_key, name, "двортерьер", "4", h.photo(CAT_PHOTO))
        .unwrap();

    assert_eq!(response.status, 200);
    let pet: Pet = response.json().unwrap();
    assert_eq!(pet.name, name);
}

pub fn successful_delete_self_pet(h: &Harness) {
    let auth_key = h.api_key();
    let my_pets = ensure_own_pet(h, &auth_key);

    let pet_id = my_pets.first().expect("own pet").id.clone();
    let response = h.pf.delete_pet(&auth_key, &pet_id).unwrap();

    let my_pets = h.my_pets(&auth_key);
    assert_eq!(response.status, 200);
    assert!(!my_pets.contains(&pet_id));
}

pub fn successful_update_self_pet_info(h: &Harness) {
    let name = "Мурзик";
    let auth_key = h.api_key();
    let my_pets = h.my_pets(&auth_key);

    let Some(pet) = my_pets.first() else {
        panic!("There is no my pets");
    };
    let response = h
        .pf
        .update_pet_info(&auth_key, &pet.id, name, "Котэ", 5)
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.field("name").and_then(|v| v.as_str()), Some(name));
}

pub fn set_photo_with_valid_data(h: &Harness) {
    let auth_key = h.api_key();
    let my_pets = h.my_pets(&auth_key);

    let Some(pet) = my_pets.first() else {
        panic!("There is no my pets");
    };
    let response = h
        .pf
        .set_photo(&auth_key, &pet.id, h.photo(CAT_PHOTO))
        .unwrap();

    assert_eq!(response.status, 200);
    assert!(response.has_field("pet_photo"), "body: {}", response.body);
}

pub fn set_photo_with_invalid_pet_id(h: &Harness) {
    let auth_key = h.api_key();
    let response = h
        .pf
        .set_photo(&auth_key, "invalid_id", h.photo(SECOND_PHOTO))
        .unwrap();

    assert_eq!(response.status, 400);
    assert!(response.has_field("error"), "body: {}", response.body);
}

pub fn create_pet_simple_with_valid_data(h: &Harness) {
    let name = "Мурзик";
    let auth_key = h.api_key();
    let response = h.pf.create_pet_simple(&auth_key, name, "Кот", 3).unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.field("name").and_then(|v| v.as_str()), Some(name));
}

/// The live service has been seen to accept letters in `age`; the expected
/// 400 is kept so the defect stays visible.
pub fn create_pet_simple_with_invalid_age(h: &Harness) {
    let auth_key = h.api_key();
    let response = h
        .pf
        .create_pet_simple(&auth_key, "Мурзик", "Кот", "abc")
        .unwrap();

    assert_eq!(response.status, 400, "body: {}", response.body);
    assert!(response.has_field("error"));
}

/// Own pets, creating one first when there are none.
fn ensure_own_pet(h: &Harness, auth_key: &ApiKey) -> PetList {
    let my_pets = h.my_pets(auth_key);
    if !my_pets.is_empty() {
        return my_pets;
    }
    let created = h
        .pf
        .add_new_pet(auth_key, "Суперкот", "кот", "3", h.photo(CAT_PHOTO))
        .unwrap();
    assert_eq!(created.status, 200, "setup failed: {}", created.body);
    h.my_pets(auth_key)
}
