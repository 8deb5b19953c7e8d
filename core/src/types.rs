//! Domain DTOs for the registry API.
//!
//! # Design
//! Wire names follow the backend (`nome_completo`, `raca_id`, ...); Rust
//! fields are English and mapped with serde renames. The mock-server crate
//! defines its own copies of these shapes; integration tests catch drift.

use serde::{Deserialize, Serialize};

/// Backend-assigned integer identifier, shared by tutors, dogs and breeds.
pub type RecordId = i64;

/// A dog owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tutor {
    pub id: RecordId,
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
}

/// Payload for `POST /usuarios` and `PUT /usuarios/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TutorInput {
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

/// Read-only breed reference data.
///
/// Only `id` and `name` are guaranteed; the descriptive fields may be
/// missing, notably when the breed arrives embedded in a dog record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Breed {
    #[serde(default)]
    pub id: RecordId,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "imagem", default)]
    pub image: Option<String>,
    #[serde(rename = "porte", default)]
    pub size: Option<String>,
    #[serde(rename = "grupo", default)]
    pub group: Option<String>,
    #[serde(rename = "cuidados", default)]
    pub care: Option<String>,
    #[serde(rename = "comportamento", default)]
    pub behavior: Option<String>,
    #[serde(rename = "racao", default)]
    pub feeding: Option<String>,
}

/// A registered dog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dog {
    pub id: RecordId,
    #[serde(rename = "nome_pet")]
    pub name: String,
    #[serde(rename = "idade", default)]
    pub age: Option<u32>,
    #[serde(rename = "peso", default)]
    pub weight: Option<f64>,
    #[serde(rename = "info_extra", default)]
    pub notes: Option<String>,
    #[serde(rename = "user_id")]
    pub tutor_id: RecordId,
    #[serde(rename = "raca_id")]
    pub breed_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<Breed>,
}

/// Payload for `POST /cachorros`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewDog {
    #[serde(rename = "nome_pet")]
    pub name: String,
    #[serde(rename = "raca_id")]
    pub breed_id: RecordId,
    #[serde(rename = "idade")]
    pub age: Option<u32>,
    #[serde(rename = "peso")]
    pub weight: Option<f64>,
    #[serde(rename = "info_extra")]
    pub notes: String,
    #[serde(rename = "user_id")]
    pub tutor_id: RecordId,
}

/// Payload for `PUT /cachorros/{id}`. The owner never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DogUpdate {
    #[serde(rename = "nome_pet")]
    pub name: String,
    #[serde(rename = "raca_id")]
    pub breed_id: Option<RecordId>,
    #[serde(rename = "idade")]
    pub age: Option<u32>,
    #[serde(rename = "peso")]
    pub weight: Option<f64>,
    #[serde(rename = "info_extra")]
    pub notes: String,
}

/// Outcome of `POST /cachorros`. A duplicate is an expected answer, not a
/// failure: the backend returns the record that already exists.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateDogOutcome {
    Created(Dog),
    Duplicate { message: Option<String>, existing: Dog },
}

/// Error envelope returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a 409 answer to `POST /cachorros`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DuplicateDogBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "cachorro")]
    pub existing: Option<Dog>,
}
