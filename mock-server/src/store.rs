//! In-memory registry data and the rules the real backend enforces.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breed {
    pub id: i64,
    pub nome: String,
    pub imagem: String,
    pub porte: String,
    pub grupo: String,
    pub cuidados: String,
    pub comportamento: String,
    pub racao: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutor {
    pub id: i64,
    pub nome_completo: String,
    pub email: String,
    pub telefone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    pub id: i64,
    pub nome_pet: String,
    pub idade: Option<u32>,
    pub peso: Option<f64>,
    pub info_extra: Option<String>,
    pub user_id: i64,
    pub raca_id: i64,
}

/// A dog as the API returns it, with its breed embedded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DogView {
    #[serde(flatten)]
    pub dog: Dog,
    pub breed: Option<Breed>,
}

#[derive(Debug, Deserialize)]
pub struct TutorInput {
    pub nome_completo: String,
    pub email: String,
    #[serde(default)]
    pub telefone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewDog {
    pub nome_pet: String,
    pub raca_id: i64,
    #[serde(default)]
    pub idade: Option<u32>,
    #[serde(default)]
    pub peso: Option<f64>,
    #[serde(default)]
    pub info_extra: Option<String>,
    pub user_id: i64,
}

/// `nome_pet` and `raca_id` keep their value when absent; the other fields
/// are replaced, so `null` clears them.
#[derive(Debug, Deserialize)]
pub struct DogUpdate {
    #[serde(default)]
    pub nome_pet: Option<String>,
    #[serde(default)]
    pub raca_id: Option<i64>,
    #[serde(default)]
    pub idade: Option<u32>,
    #[serde(default)]
    pub peso: Option<f64>,
    #[serde(default)]
    pub info_extra: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("e-mail {0} is already registered")]
    EmailTaken(String),

    #[error("{} is already registered for this tutor", dog_name(.0))]
    DuplicateDog(Box<DogView>),
}

fn dog_name(view: &DogView) -> &str {
    &view.dog.nome_pet
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            StoreError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            StoreError::Validation(_) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            StoreError::EmailTaken(_) => {
                (StatusCode::CONFLICT, Json(json!({ "message": message }))).into_response()
            }
            StoreError::DuplicateDog(existing) => (
                StatusCode::CONFLICT,
                Json(json!({ "message": message, "cachorro": existing })),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    breeds: Vec<Breed>,
    tutors: BTreeMap<i64, Tutor>,
    dogs: BTreeMap<i64, Dog>,
    next_tutor_id: i64,
    next_dog_id: i64,
}

impl Registry {
    pub fn with_breeds(breeds: Vec<Breed>) -> Self {
        Self {
            breeds,
            next_tutor_id: 1,
            next_dog_id: 1,
            ..Self::default()
        }
    }

    pub fn seeded() -> Self {
        Self::with_breeds(seed_breeds())
    }

    pub fn breeds(&self) -> &[Breed] {
        &self.breeds
    }

    pub fn breed_by_slug(&self, slug: &str) -> Result<&Breed, StoreError> {
        self.breeds
            .iter()
            .find(|b| b.nome.to_lowercase().replace(' ', "-") == slug.to_lowercase())
            .ok_or(StoreError::NotFound("breed"))
    }

    fn breed(&self, id: i64) -> Result<&Breed, StoreError> {
        self.breeds
            .iter()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound("breed"))
    }

    // --- tutors ---

    pub fn tutors(&self) -> Vec<Tutor> {
        self.tutors.values().cloned().collect()
    }

    pub fn tutor(&self, id: i64) -> Result<&Tutor, StoreError> {
        self.tutors.get(&id).ok_or(StoreError::NotFound("user"))
    }

    pub fn tutor_by_email(&self, email: &str) -> Result<&Tutor, StoreError> {
        let email = email.trim();
        self.tutors
            .values()
            .find(|t| t.email.eq_ignore_ascii_case(email))
            .ok_or(StoreError::NotFound("user"))
    }

    pub fn create_tutor(&mut self, input: TutorInput) -> Result<Tutor, StoreError> {
        let (nome_completo, email, telefone) = validate_tutor(input)?;
        if self.tutor_by_email(&email).is_ok() {
            return Err(StoreError::EmailTaken(email));
        }
        let tutor = Tutor {
            id: self.next_tutor_id,
            nome_completo,
            email,
            telefone,
        };
        self.next_tutor_id += 1;
        self.tutors.insert(tutor.id, tutor.clone());
        Ok(tutor)
    }

    pub fn update_tutor(&mut self, id: i64, input: TutorInput) -> Result<Tutor, StoreError> {
        self.tutor(id)?;
        let (nome_completo, email, telefone) = validate_tutor(input)?;
        if self.tutor_by_email(&email).is_ok_and(|other| other.id != id) {
            return Err(StoreError::EmailTaken(email));
        }
        let tutor = Tutor {
            id,
            nome_completo,
            email,
            telefone,
        };
        self.tutors.insert(id, tutor.clone());
        Ok(tutor)
    }

    /// Removes the tutor and every dog they own.
    pub fn delete_tutor(&mut self, id: i64) -> Result<usize, StoreError> {
        self.tutors.remove(&id).ok_or(StoreError::NotFound("user"))?;
        let before = self.dogs.len();
        self.dogs.retain(|_, dog| dog.user_id != id);
        Ok(before - self.dogs.len())
    }

    pub fn tutor_dogs(&self, tutor_id: i64) -> Result<Vec<DogView>, StoreError> {
        self.tutor(tutor_id)?;
        Ok(self
            .dogs
            .values()
            .filter(|d| d.user_id == tutor_id)
            .map(|d| self.view(d))
            .collect())
    }

    // --- dogs ---

    pub fn dog(&self, id: i64) -> Result<DogView, StoreError> {
        self.dogs
            .get(&id)
            .map(|d| self.view(d))
            .ok_or(StoreError::NotFound("dog"))
    }

    /// A dog with the same (case-insensitive) name and breed under the same
    /// tutor is a duplicate.
    pub fn create_dog(&mut self, input: NewDog) -> Result<DogView, StoreError> {
        let nome_pet = input.nome_pet.trim().to_string();
        if nome_pet.is_empty() {
            return Err(StoreError::Validation("nome_pet is required".to_string()));
        }
        self.tutor(input.user_id)?;
        self.breed(input.raca_id)?;
        if let Some(existing) = self.dogs.values().find(|d| {
            d.user_id == input.user_id
                && d.raca_id == input.raca_id
                && d.nome_pet.to_lowercase() == nome_pet.to_lowercase()
        }) {
            return Err(StoreError::DuplicateDog(Box::new(self.view(existing))));
        }
        let dog = Dog {
            id: self.next_dog_id,
            nome_pet,
            idade: input.idade,
            peso: input.peso,
            info_extra: input.info_extra,
            user_id: input.user_id,
            raca_id: input.raca_id,
        };
        self.next_dog_id += 1;
        self.dogs.insert(dog.id, dog.clone());
        Ok(self.view(&dog))
    }

    pub fn update_dog(&mut self, id: i64, input: DogUpdate) -> Result<DogView, StoreError> {
        if let Some(raca_id) = input.raca_id {
            self.breed(raca_id)?;
        }
        let dog = self.dogs.get_mut(&id).ok_or(StoreError::NotFound("dog"))?;
        if let Some(nome_pet) = input.nome_pet.map(|n| n.trim().to_string()) {
            if !nome_pet.is_empty() {
                dog.nome_pet = nome_pet;
            }
        }
        if let Some(raca_id) = input.raca_id {
            dog.raca_id = raca_id;
        }
        dog.idade = input.idade;
        dog.peso = input.peso;
        dog.info_extra = input.info_extra;
        let dog = dog.clone();
        Ok(self.view(&dog))
    }

    pub fn delete_dog(&mut self, id: i64) -> Result<(), StoreError> {
        self.dogs
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound("dog"))
    }

    fn view(&self, dog: &Dog) -> DogView {
        DogView {
            dog: dog.clone(),
            breed: self.breed(dog.raca_id).ok().cloned(),
        }
    }
}

fn validate_tutor(input: TutorInput) -> Result<(String, String, Option<String>), StoreError> {
    let nome_completo = input.nome_completo.trim().to_string();
    let email = input.email.trim().to_string();
    if nome_completo.is_empty() || email.is_empty() {
        return Err(StoreError::Validation(
            "nome_completo and email are required".to_string(),
        ));
    }
    let telefone = input
        .telefone
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    Ok((nome_completo, email, telefone))
}

fn breed(id: i64, nome: &str, porte: &str, grupo: &str, texts: [&str; 3]) -> Breed {
    let [cuidados, comportamento, racao] = texts;
    Breed {
        id,
        nome: nome.to_string(),
        imagem: format!("{}.png", nome.to_lowercase().replace(' ', "_")),
        porte: porte.to_string(),
        grupo: grupo.to_string(),
        cuidados: cuidados.to_string(),
        comportamento: comportamento.to_string(),
        racao: racao.to_string(),
    }
}

pub fn seed_breeds() -> Vec<Breed> {
    vec![
        breed(
            1,
            "Golden Retriever",
            "large",
            "Retrievers",
            [
                "Brush two or three times a week; daily walks and swimming.",
                "Friendly and patient; eager to please and easy to train",
                "Large-breed food split into two meals; watch the weight.",
            ],
        ),
        breed(
            2,
            "Labrador Retriever",
            "large",
            "Retrievers",
            [
                "Weekly brushing; needs at least an hour of exercise a day.",
                "Outgoing and affectionate; loves water and fetch games",
                "Measured portions of large-breed food; prone to obesity.",
            ],
        ),
        breed(
            3,
            "Pug",
            "small",
            "Companion dogs",
            [
                "Clean facial folds daily; avoid heat and heavy exercise.",
                "Charming and playful; follows the family everywhere",
                "Small-breed food in controlled portions.",
            ],
        ),
        breed(
            4,
            "Shih Tzu",
            "small",
            "Companion dogs",
            [
                "Daily brushing and regular grooming; keep the eyes clean.",
                "Sweet and sociable; adapts well to apartments",
                "Small-breed food with skin and coat support.",
            ],
        ),
        breed(
            5,
            "Border Collie",
            "medium",
            "Herding dogs",
            [
                "Weekly brushing; needs intense physical and mental exercise.",
                "Very intelligent and energetic; bored dogs invent their own jobs",
                "High-energy food for active medium breeds.",
            ],
        ),
        breed(
            6,
            "German Shepherd",
            "large",
            "Herding dogs",
            [
                "Brush several times a week; sheds heavily twice a year.",
                "Loyal and protective; confident with clear training",
                "Large-breed food with joint support.",
            ],
        ),
    ]
}
