//! Plain-text rendering of the page state.

use std::fmt::Write;
use std::time::Instant;

use registry_core::{
    AdminList, BreedPanel, Confirm, DogRow, DogSummary, MessageSlot, RegistryApp, Transport,
    TutorRow,
};

/// The whole page as it would look right now.
pub fn page<T: Transport, C: Confirm>(app: &RegistryApp<T, C>, now: Instant) -> String {
    let mut out = String::new();

    let tutor = app.tutor_form();
    match app.session().current() {
        Some(id) => {
            let _ = writeln!(out, "== Tutor #{id}: {} <{}> ==", tutor.full_name, tutor.email);
        }
        None => out.push_str("== No tutor identified ==\n"),
    }
    if let Some(id) = tutor.editing() {
        let _ = writeln!(out, "Editing tutor #{id} (update-tutor / remove-tutor)");
    }
    out.push_str(&message("user", app.user_message(), now));

    let pet = app.pet_form();
    if let Some(id) = pet.editing() {
        let _ = writeln!(out, "Editing dog #{id} (update-dog / remove-dog)");
    }
    out.push_str(&message("pet", app.pet_message(), now));

    out.push('\n');
    out.push_str(&breed_panel(app.breed_panel()));
    if let Some(summary) = app.dog_summary() {
        out.push('\n');
        out.push_str(&dog_summary(summary));
    }
    if let Some(list) = app.dog_admin() {
        out.push('\n');
        out.push_str(&dog_list(list));
    }
    if let Some(list) = app.tutor_admin() {
        out.push('\n');
        out.push_str(&tutor_list(list));
    }
    out
}

/// The message of a slot, or nothing once it has expired.
pub fn message(slot_name: &str, slot: &MessageSlot, now: Instant) -> String {
    match slot.visible(now) {
        Some(msg) => format!("[{slot_name}] {}: {}\n", msg.kind.label(), msg.text),
        None => String::new(),
    }
}

pub fn breed_panel(panel: &BreedPanel) -> String {
    format!(
        "{}\n  image: {}\n  {}\n  Care: {}\n  Behavior: {}\n  Food: {}\n",
        panel.title, panel.image, panel.description, panel.care, panel.behavior, panel.feeding
    )
}

pub fn dog_summary(summary: &DogSummary) -> String {
    format!(
        "Dog #{}\n  Size: {}\n  Group: {}\n  Tutor: {}\n  Name: {}\n  Notes: {}\n",
        summary.dog_id,
        summary.size,
        summary.group,
        summary.tutor_name,
        summary.dog_name,
        summary.notes
    )
}

pub fn dog_list(list: &AdminList<DogRow>) -> String {
    let mut out = format!("{}\n", list.title);
    if list.is_empty() {
        let _ = writeln!(out, "  {}", list.empty_text);
    }
    for row in &list.rows {
        let age = row.age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "  #{} {} (age {age})", row.id, row.name);
    }
    out
}

pub fn tutor_list(list: &AdminList<TutorRow>) -> String {
    let mut out = format!("{}\n", list.title);
    if list.is_empty() {
        let _ = writeln!(out, "  {}", list.empty_text);
    }
    for row in &list.rows {
        let _ = writeln!(out, "  #{} {} <{}>", row.id, row.full_name, row.email);
    }
    out
}
