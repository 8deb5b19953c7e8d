//! Admin list views for dogs and tutors.

use crate::types::{Dog, RecordId, Tutor};

/// The admin buttons next to the tutor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminButton {
    Dogs,
    Tutors,
}

/// Per-row triggers of an admin list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DogRow {
    pub id: RecordId,
    pub name: String,
    pub age: Option<u32>,
}

impl From<&Dog> for DogRow {
    fn from(dog: &Dog) -> Self {
        Self {
            id: dog.id,
            name: dog.name.clone(),
            age: dog.age,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorRow {
    pub id: RecordId,
    pub full_name: String,
    pub email: String,
}

impl From<&Tutor> for TutorRow {
    fn from(tutor: &Tutor) -> Self {
        Self {
            id: tutor.id,
            full_name: tutor.full_name.clone(),
            email: tutor.email.clone(),
        }
    }
}

/// A rendered admin list. Row actions only accept ids of rows it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminList<R> {
    pub title: &'static str,
    pub empty_text: &'static str,
    pub rows: Vec<R>,
}

impl AdminList<DogRow> {
    pub fn dogs(dogs: &[Dog]) -> Self {
        Self {
            title: "Manage Dogs",
            empty_text: "No dogs registered for this user.",
            rows: dogs.iter().map(DogRow::from).collect(),
        }
    }

    pub fn contains(&self, dog_id: RecordId) -> bool {
        self.rows.iter().any(|row| row.id == dog_id)
    }
}

impl AdminList<TutorRow> {
    pub fn tutors(tutors: &[Tutor]) -> Self {
        Self {
            title: "Manage Tutors",
            empty_text: "No tutors registered.",
            rows: tutors.iter().map(TutorRow::from).collect(),
        }
    }

    pub fn contains(&self, tutor_id: RecordId) -> bool {
        self.rows.iter().any(|row| row.id == tutor_id)
    }
}

impl<R> AdminList<R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
