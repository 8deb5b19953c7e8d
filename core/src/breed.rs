//! Breed dropdown and the read-only breed info panel.

use crate::types::{Breed, Dog, RecordId};

const DEFAULT_IMAGE: &str = "default_dog.png";

/// Derive the lookup slug for `GET /racas/{slug}` from a breed name:
/// lowercased, spaces replaced by hyphens.
pub fn breed_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Path of a breed image as the page serves it.
pub fn image_path(image: Option<&str>) -> String {
    format!("assets/{}", image.filter(|i| !i.is_empty()).unwrap_or(DEFAULT_IMAGE))
}

/// One entry of the breed dropdown. `id == None` is the leading
/// "Select a breed" option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedOption {
    pub id: Option<RecordId>,
    pub label: String,
}

impl BreedOption {
    pub fn empty() -> Self {
        Self {
            id: None,
            label: "Select a breed".to_string(),
        }
    }
}

impl From<&Breed> for BreedOption {
    fn from(breed: &Breed) -> Self {
        Self {
            id: Some(breed.id),
            label: breed.name.clone(),
        }
    }
}

/// The breed dropdown: its options and current selection.
#[derive(Debug, Clone)]
pub struct BreedSelect {
    options: Vec<BreedOption>,
    selected: Option<RecordId>,
}

impl Default for BreedSelect {
    fn default() -> Self {
        Self {
            options: vec![BreedOption::empty()],
            selected: None,
        }
    }
}

impl BreedSelect {
    pub fn populate(&mut self, breeds: &[Breed]) {
        self.options = std::iter::once(BreedOption::empty())
            .chain(breeds.iter().map(BreedOption::from))
            .collect();
        self.selected = None;
    }

    pub fn options(&self) -> &[BreedOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<RecordId> {
        self.selected
    }

    /// Select `id` and return the label of the chosen option. Unknown ids
    /// fall back to the empty option, like a `<select>` given a bad value.
    pub fn select(&mut self, id: Option<RecordId>) -> Option<&str> {
        let option = id.and_then(|id| self.options.iter().find(|o| o.id == Some(id)));
        self.selected = option.and_then(|o| o.id);
        option.map(|o| o.label.as_str())
    }

    pub fn selected_label(&self) -> Option<&str> {
        let id = self.selected?;
        self.options
            .iter()
            .find(|o| o.id == Some(id))
            .map(|o| o.label.as_str())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

/// The breed info panel: image, title, one-line description and three cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedPanel {
    pub image: String,
    pub title: String,
    pub description: String,
    pub care: String,
    pub behavior: String,
    pub feeding: String,
}

impl Default for BreedPanel {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl BreedPanel {
    pub fn placeholder() -> Self {
        Self {
            image: image_path(None),
            title: "Select a Breed".to_string(),
            description: "Select a breed to see its detailed information.".to_string(),
            care: "Select a breed to see care details.".to_string(),
            behavior: "Select a breed to see the expected behavior.".to_string(),
            feeding: "Select a breed to see the food recommendation.".to_string(),
        }
    }

    /// Panel shown when the detail fetch for `name` failed.
    pub fn unavailable(name: &str) -> Self {
        Self {
            image: image_path(None),
            title: name.to_string(),
            description: "Detailed information is not available for this breed.".to_string(),
            care: "Care details not found.".to_string(),
            behavior: "Behavior details not found.".to_string(),
            feeding: "Food recommendations not found.".to_string(),
        }
    }

    pub fn from_breed(breed: &Breed) -> Self {
        let mut description = format!(
            "The {} is a {} dog that belongs to the {} group.",
            breed.name,
            breed.size.as_deref().unwrap_or("N/A"),
            breed.group.as_deref().unwrap_or("N/A"),
        );
        if let Some(first) = breed
            .behavior
            .as_deref()
            .and_then(|b| b.split(';').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            description.push(' ');
            description.push_str(first.trim_end_matches('.'));
            description.push('.');
        }
        Self {
            image: image_path(breed.image.as_deref()),
            title: breed.name.clone(),
            description,
            care: breed.care.clone().unwrap_or_default(),
            behavior: breed.behavior.clone().unwrap_or_default(),
            feeding: breed.feeding.clone().unwrap_or_default(),
        }
    }

    /// Panel filled from the breed embedded in a dog record, which may be
    /// partial or missing.
    pub fn from_dog(dog: &Dog) -> Self {
        let breed = dog.breed.clone().unwrap_or_default();
        let title = if breed.name.is_empty() {
            "Unknown breed".to_string()
        } else {
            breed.name.clone()
        };
        Self {
            image: image_path(breed.image.as_deref()),
            description: format!(
                "The {} is a {} dog that belongs to the {} group.",
                breed.name,
                breed.size.as_deref().unwrap_or("N/A"),
                breed.group.as_deref().unwrap_or("N/A"),
            ),
            title,
            care: breed
                .care
                .unwrap_or_else(|| "Care information not available.".to_string()),
            behavior: breed
                .behavior
                .unwrap_or_else(|| "Behavior information not available.".to_string()),
            feeding: breed
                .feeding
                .unwrap_or_else(|| "Food recommendations not available.".to_string()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

/// The dog summary box shown next to the breed panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DogSummary {
    pub dog_id: RecordId,
    pub size: String,
    pub group: String,
    pub tutor_name: String,
    pub dog_name: String,
    pub notes: String,
}

impl DogSummary {
    pub fn new(dog: &Dog, tutor_name: &str) -> Self {
        let breed = dog.breed.as_ref();
        let or_na = |s: &str| if s.is_empty() { "N/A".to_string() } else { s.to_string() };
        Self {
            dog_id: dog.id,
            size: breed
                .and_then(|b| b.size.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            group: breed
                .and_then(|b| b.group.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            tutor_name: or_na(tutor_name),
            dog_name: or_na(&dog.name),
            notes: dog
                .notes
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}
