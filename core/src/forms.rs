//! Tutor and pet form view models.
//!
//! Field values are kept as the raw text a user typed; `TutorForm::input`,
//! `PetForm::new_dog` and `PetForm::update` trim and validate them into
//! request payloads.

use crate::breed::BreedSelect;
use crate::error::FormError;
use crate::types::{Dog, DogUpdate, NewDog, RecordId, Tutor, TutorInput};

/// The tutor registration form.
#[derive(Debug, Clone)]
pub struct TutorForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    fields_enabled: bool,
    submit_visible: bool,
    editing: Option<RecordId>,
}

impl Default for TutorForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            fields_enabled: true,
            submit_visible: true,
            editing: None,
        }
    }
}

impl TutorForm {
    pub fn input(&self) -> Result<TutorInput, FormError> {
        let input = TutorInput {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        };
        if input.full_name.is_empty() || input.email.is_empty() {
            return Err(FormError::MissingTutorFields);
        }
        Ok(input)
    }

    pub fn fill(&mut self, tutor: &Tutor) {
        self.full_name = tutor.full_name.clone();
        self.email = tutor.email.clone();
        self.phone = tutor.phone.clone().unwrap_or_default();
    }

    /// Disable every field and hide the submit button.
    pub fn lock(&mut self) {
        self.fields_enabled = false;
        self.submit_visible = false;
    }

    /// Re-enable fields for an admin edit of `tutor_id`; submit stays hidden.
    pub fn begin_edit(&mut self, tutor_id: RecordId) {
        self.fields_enabled = true;
        self.editing = Some(tutor_id);
    }

    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    /// Clear values only, like a form reset.
    pub fn clear_values(&mut self) {
        self.full_name.clear();
        self.email.clear();
        self.phone.clear();
    }

    /// Back to a blank, editable form with the submit button visible.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn fields_enabled(&self) -> bool {
        self.fields_enabled
    }

    pub fn submit_visible(&self) -> bool {
        self.submit_visible
    }

    pub fn editing(&self) -> Option<RecordId> {
        self.editing
    }
}

/// The pet registration form, including its breed dropdown.
#[derive(Debug, Clone)]
pub struct PetForm {
    pub name: String,
    pub age: String,
    pub weight: String,
    pub notes: String,
    pub breed: BreedSelect,
    loaded: Option<RecordId>,
    editing: Option<RecordId>,
}

impl Default for PetForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            weight: String::new(),
            notes: String::new(),
            breed: BreedSelect::default(),
            loaded: None,
            editing: None,
        }
    }
}

impl PetForm {
    pub fn new_dog(&self, tutor_id: RecordId) -> Result<NewDog, FormError> {
        let name = self.name.trim().to_string();
        let breed_id = match self.breed.selected() {
            Some(id) if !name.is_empty() => id,
            _ => return Err(FormError::MissingPetFields),
        };
        Ok(NewDog {
            name,
            breed_id,
            age: parse_age(&self.age)?,
            weight: parse_weight(&self.weight)?,
            notes: self.notes.trim().to_string(),
            tutor_id,
        })
    }

    pub fn update(&self) -> Result<DogUpdate, FormError> {
        Ok(DogUpdate {
            name: self.name.trim().to_string(),
            breed_id: self.breed.selected(),
            age: parse_age(&self.age)?,
            weight: parse_weight(&self.weight)?,
            notes: self.notes.trim().to_string(),
        })
    }

    /// Fill every field from `dog` and remember its id. Returns the label of
    /// the selected breed so the caller can refresh the breed panel.
    pub fn fill(&mut self, dog: &Dog) -> Option<String> {
        self.name = dog.name.clone();
        self.age = dog.age.map(|a| a.to_string()).unwrap_or_default();
        self.weight = dog.weight.map(|w| w.to_string()).unwrap_or_default();
        self.notes = dog.notes.clone().unwrap_or_default();
        self.loaded = Some(dog.id);
        self.breed.select(Some(dog.breed_id)).map(str::to_string)
    }

    /// Expose update/delete controls bound to `dog_id`.
    pub fn begin_edit(&mut self, dog_id: RecordId) {
        self.editing = Some(dog_id);
    }

    /// Clear values and selection; breed options and edit controls stay.
    pub fn clear_values(&mut self) {
        self.name.clear();
        self.age.clear();
        self.weight.clear();
        self.notes.clear();
        self.breed.clear_selection();
    }

    /// Clear values and leave edit mode. Breed options survive.
    pub fn reset(&mut self) {
        self.clear_values();
        self.loaded = None;
        self.editing = None;
    }

    pub fn loaded(&self) -> Option<RecordId> {
        self.loaded
    }

    pub fn editing(&self) -> Option<RecordId> {
        self.editing
    }
}

fn parse_age(raw: &str) -> Result<Option<u32>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| FormError::InvalidAge(raw.to_string()))
}

fn parse_weight(raw: &str) -> Result<Option<f64>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.replace(',', ".").parse::<f64>() {
        Ok(w) if w.is_finite() && w >= 0.0 => Ok(Some(w)),
        _ => Err(FormError::InvalidWeight(raw.to_string())),
    }
}
