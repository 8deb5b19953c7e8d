//! Stateless HTTP request builder and response parser for the registry API.
//!
//! # Design
//! `RegistryClient` holds only a `base_url` and carries no mutable state
//! between calls. Each endpoint is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The round trip itself belongs to a `Transport`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    Breed, CreateDogOutcome, Dog, DogUpdate, DuplicateDogBody, ErrorBody, NewDog, RecordId, Tutor,
    TutorInput,
};

/// Synchronous, stateless client for the registry API.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
}

impl RegistryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- breeds ---

    pub fn build_list_breeds(&self) -> HttpRequest {
        self.get("/racas".to_string())
    }

    /// `slug` is percent-encoded; see `breed::breed_slug` for how it is
    /// derived from a breed name.
    pub fn build_get_breed(&self, slug: &str) -> HttpRequest {
        self.get(format!("/racas/{}", urlencoding::encode(slug)))
    }

    pub fn parse_list_breeds(&self, response: HttpResponse) -> Result<Vec<Breed>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_breed(&self, response: HttpResponse) -> Result<Breed, ApiError> {
        parse_json(response)
    }

    // --- tutors ---

    pub fn build_list_tutors(&self) -> HttpRequest {
        self.get("/usuarios".to_string())
    }

    pub fn build_get_tutor(&self, id: RecordId) -> HttpRequest {
        self.get(format!("/usuarios/{id}"))
    }

    pub fn build_find_tutor_by_email(&self, email: &str) -> HttpRequest {
        self.get(format!("/usuarios/email/{}", urlencoding::encode(email)))
    }

    pub fn build_create_tutor(&self, input: &TutorInput) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, "/usuarios".to_string(), input)
    }

    pub fn build_update_tutor(
        &self,
        id: RecordId,
        input: &TutorInput,
    ) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, format!("/usuarios/{id}"), input)
    }

    pub fn build_delete_tutor(&self, id: RecordId) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("/usuarios/{id}"))
    }

    pub fn build_list_tutor_dogs(&self, tutor_id: RecordId) -> HttpRequest {
        self.get(format!("/usuarios/{tutor_id}/cachorros"))
    }

    pub fn parse_list_tutors(&self, response: HttpResponse) -> Result<Vec<Tutor>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_tutor(&self, response: HttpResponse) -> Result<Tutor, ApiError> {
        parse_json(response)
    }

    /// A 404 means "not registered yet" and yields `Ok(None)`.
    pub fn parse_find_tutor_by_email(
        &self,
        response: HttpResponse,
    ) -> Result<Option<Tutor>, ApiError> {
        if response.status == 404 {
            return Ok(None);
        }
        parse_json(response).map(Some)
    }

    pub fn parse_create_tutor(&self, response: HttpResponse) -> Result<Tutor, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_tutor(&self, response: HttpResponse) -> Result<Tutor, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_tutor(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_list_tutor_dogs(&self, response: HttpResponse) -> Result<Vec<Dog>, ApiError> {
        parse_json(response)
    }

    // --- dogs ---

    pub fn build_get_dog(&self, id: RecordId) -> HttpRequest {
        self.get(format!("/cachorros/{id}"))
    }

    pub fn build_create_dog(&self, input: &NewDog) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, "/cachorros".to_string(), input)
    }

    pub fn build_update_dog(&self, id: RecordId, input: &DogUpdate) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, format!("/cachorros/{id}"), input)
    }

    pub fn build_delete_dog(&self, id: RecordId) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("/cachorros/{id}"))
    }

    pub fn parse_get_dog(&self, response: HttpResponse) -> Result<Dog, ApiError> {
        parse_json(response)
    }

    /// A 409 carrying the existing record yields `CreateDogOutcome::Duplicate`.
    /// A 409 without one is an ordinary error.
    pub fn parse_create_dog(&self, response: HttpResponse) -> Result<CreateDogOutcome, ApiError> {
        if response.status == 409 {
            if let Ok(DuplicateDogBody {
                message,
                existing: Some(existing),
            }) = serde_json::from_str::<DuplicateDogBody>(&response.body)
            {
                return Ok(CreateDogOutcome::Duplicate { message, existing });
            }
        }
        parse_json(response).map(CreateDogOutcome::Created)
    }

    pub fn parse_update_dog(&self, response: HttpResponse) -> Result<Dog, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_dog(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    // --- helpers ---

    fn get(&self, path: String) -> HttpRequest {
        self.bare(HttpMethod::Get, path)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json<B: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        input: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|b| b.message);
    Err(ApiError::Http {
        status: response.status,
        message,
        body: response.body.clone(),
    })
}
