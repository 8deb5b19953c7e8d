//! The view-state store and its event handlers.
//!
//! # Design
//! `RegistryApp` owns every piece of UI state: the session, both forms, the
//! breed panel, the dog summary, the admin lists and the two message slots.
//! Each public method handles one UI event and runs its requests strictly in
//! sequence through the host's `Transport`. Failures never escape a handler;
//! they end up as a status message, which is what the page shows.

use crate::admin::{AdminButton, AdminList, DogRow, RowAction, TutorRow};
use crate::breed::{breed_slug, BreedPanel, DogSummary};
use crate::client::RegistryClient;
use crate::error::{ApiError, FormError};
use crate::forms::{PetForm, TutorForm};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::session::Session;
use crate::status::{MessageKind, MessageSlot};
use crate::types::{CreateDogOutcome, Dog, RecordId, Tutor, TutorInput};

/// Source of yes/no answers for destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Where the page should scroll after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    DogSummary,
}

pub struct RegistryApp<T, C> {
    client: RegistryClient,
    transport: T,
    confirm: C,
    session: Session,
    tutor_form: TutorForm,
    pet_form: PetForm,
    breed_panel: BreedPanel,
    dog_summary: Option<DogSummary>,
    dog_admin: Option<AdminList<DogRow>>,
    tutor_admin: Option<AdminList<TutorRow>>,
    admin_enabled: bool,
    logout_visible: bool,
    user_message: MessageSlot,
    pet_message: MessageSlot,
    scroll_target: Option<ScrollTarget>,
}

impl<T: Transport, C: Confirm> RegistryApp<T, C> {
    pub fn new(client: RegistryClient, transport: T, confirm: C) -> Self {
        Self {
            client,
            transport,
            confirm,
            session: Session::default(),
            tutor_form: TutorForm::default(),
            pet_form: PetForm::default(),
            breed_panel: BreedPanel::placeholder(),
            dog_summary: None,
            dog_admin: None,
            tutor_admin: None,
            admin_enabled: false,
            logout_visible: false,
            user_message: MessageSlot::default(),
            pet_message: MessageSlot::default(),
            scroll_target: None,
        }
    }

    /// Page load: fill the breed dropdown and show the placeholder panel.
    pub fn load(&mut self) {
        let request = self.client.build_list_breeds();
        match self.send(request, RegistryClient::parse_list_breeds) {
            Ok(breeds) => {
                tracing::info!(count = breeds.len(), "breeds loaded");
                self.pet_form.breed.populate(&breeds);
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load breeds");
                self.pet_message.show(
                    MessageKind::Error,
                    "Could not load the breeds. Please try again later.",
                );
            }
        }
        self.breed_panel = BreedPanel::placeholder();
        self.admin_enabled = false;
    }

    // --- tutor flow ---

    /// Identify the tutor by e-mail, registering them when unknown, then
    /// open a session.
    pub fn submit_tutor(&mut self) {
        let input = match self.tutor_form.input() {
            Ok(input) => input,
            Err(err) => {
                self.user_message.show(MessageKind::Error, err.to_string());
                return;
            }
        };

        match self.identify(&input) {
            Ok((tutor, true)) => {
                self.tutor_form.fill(&tutor);
                self.user_message.show(
                    MessageKind::Info,
                    format!("Welcome back, {}! You are already registered.", tutor.full_name),
                );
                self.enter_session(tutor.id);
            }
            Ok((tutor, false)) => {
                self.user_message.show(
                    MessageKind::Success,
                    format!("User \"{}\" registered successfully!", tutor.full_name),
                );
                self.enter_session(tutor.id);
            }
            Err(err) => {
                self.user_message.show(
                    MessageKind::Error,
                    format!("Error processing user: {}", describe(&err)),
                );
                self.session.clear();
            }
        }
    }

    /// Returns the tutor and whether they were already registered.
    fn identify(&mut self, input: &TutorInput) -> Result<(Tutor, bool), ApiError> {
        let request = self.client.build_find_tutor_by_email(&input.email);
        if let Some(existing) = self.send(request, RegistryClient::parse_find_tutor_by_email)? {
            tracing::debug!(tutor_id = existing.id, "tutor found by email");
            return Ok((existing, true));
        }
        let request = self.client.build_create_tutor(input)?;
        let created = self.send(request, RegistryClient::parse_create_tutor)?;
        tracing::info!(tutor_id = created.id, "tutor registered");
        Ok((created, false))
    }

    fn enter_session(&mut self, tutor_id: RecordId) {
        self.session.activate(tutor_id);
        self.tutor_form.lock();
        self.logout_visible = true;
        self.admin_enabled = true;
        self.load_tutor_dogs();
    }

    /// Show the first dog of the active tutor, if they have any.
    fn load_tutor_dogs(&mut self) {
        let Some(tutor_id) = self.session.current() else {
            return;
        };
        let request = self.client.build_list_tutor_dogs(tutor_id);
        match self.send(request, RegistryClient::parse_list_tutor_dogs) {
            Ok(dogs) => {
                if let Some(first) = dogs.first() {
                    self.show_dog(first);
                }
            }
            Err(err) => tracing::warn!(tutor_id, error = %err, "failed to load tutor dogs"),
        }
    }

    pub fn logout(&mut self) {
        self.reset_view();
        self.user_message
            .show(MessageKind::Info, "You have logged out. The forms were reset.");
    }

    fn reset_view(&mut self) {
        self.session.clear();
        self.tutor_form.reset();
        self.pet_form.reset();
        self.breed_panel = BreedPanel::placeholder();
        self.dog_summary = None;
        self.logout_visible = false;
        self.dog_admin = None;
        self.tutor_admin = None;
        self.admin_enabled = false;
        self.scroll_target = None;
    }

    // --- pet flow ---

    pub fn submit_pet(&mut self) {
        let Some(tutor_id) = self.session.current() else {
            self.pet_message
                .show(MessageKind::Error, FormError::NoSession.to_string());
            return;
        };
        let new_dog = match self.pet_form.new_dog(tutor_id) {
            Ok(dog) => dog,
            Err(err) => {
                self.pet_message.show(MessageKind::Error, err.to_string());
                return;
            }
        };

        let outcome = self
            .client
            .build_create_dog(&new_dog)
            .and_then(|request| self.send(request, RegistryClient::parse_create_dog));
        match outcome {
            Ok(CreateDogOutcome::Duplicate { message, existing }) => {
                tracing::info!(dog_id = existing.id, "dog already registered");
                self.pet_message.show(
                    MessageKind::Info,
                    message.unwrap_or_else(|| "Dog already registered.".to_string()),
                );
                self.show_dog(&existing);
                self.scroll_target = Some(ScrollTarget::DogSummary);
            }
            Ok(CreateDogOutcome::Created(dog)) => {
                tracing::info!(dog_id = dog.id, tutor_id, "dog registered");
                self.pet_message.show(
                    MessageKind::Success,
                    format!("Dog \"{}\" registered successfully!", dog.name),
                );
                let label = self.pet_form.breed.selected_label().map(str::to_string);
                self.display_breed_info(label);
                self.pet_form.reset();
                self.scroll_target = Some(ScrollTarget::DogSummary);
            }
            Err(err) => {
                self.pet_message.show(
                    MessageKind::Error,
                    format!("Error registering pet: {}", describe(&err)),
                );
            }
        }
    }

    /// Dropdown change. `None` is the empty option and never hits the
    /// network.
    pub fn select_breed(&mut self, breed_id: Option<RecordId>) {
        let label = self.pet_form.breed.select(breed_id).map(str::to_string);
        self.display_breed_info(label);
    }

    fn display_breed_info(&mut self, name: Option<String>) {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            self.breed_panel = BreedPanel::placeholder();
            return;
        };
        let request = self.client.build_get_breed(&breed_slug(&name));
        match self.send(request, RegistryClient::parse_get_breed) {
            Ok(breed) => self.breed_panel = BreedPanel::from_breed(&breed),
            Err(err) => {
                tracing::warn!(breed = %name, error = %err, "failed to load breed details");
                self.pet_message.show(
                    MessageKind::Error,
                    format!("Could not load details for breed \"{name}\"."),
                );
                self.breed_panel = BreedPanel::unavailable(&name);
            }
        }
    }

    fn show_dog(&mut self, dog: &Dog) {
        self.breed_panel = BreedPanel::from_dog(dog);
        self.dog_summary = Some(DogSummary::new(dog, &self.tutor_form.full_name));
    }

    fn populate_pet_form(&mut self, dog: &Dog) {
        let label = self.pet_form.fill(dog);
        self.display_breed_info(label);
    }

    // --- admin ---

    pub fn admin(&mut self, button: AdminButton) {
        if !self.require_admin() {
            return;
        }
        match button {
            AdminButton::Dogs => self.show_admin_dogs(),
            AdminButton::Tutors => self.show_admin_tutors(),
        }
    }

    /// Admin controls only work while a session is active.
    fn require_admin(&mut self) -> bool {
        if !self.admin_enabled {
            self.user_message.show(
                MessageKind::Error,
                "Please identify or register a user before using the admin tools.",
            );
        }
        self.admin_enabled
    }

    fn show_admin_dogs(&mut self) {
        let Some(tutor_id) = self.session.current() else {
            self.user_message.show(
                MessageKind::Error,
                "Please identify or register a user before managing dogs.",
            );
            return;
        };
        let request = self.client.build_list_tutor_dogs(tutor_id);
        match self.send(request, RegistryClient::parse_list_tutor_dogs) {
            Ok(dogs) => self.dog_admin = Some(AdminList::dogs(&dogs)),
            Err(err) => {
                tracing::error!(tutor_id, error = %err, "failed to list dogs");
                self.user_message.show(
                    MessageKind::Error,
                    "Could not load the dogs for administration.",
                );
            }
        }
    }

    fn show_admin_tutors(&mut self) {
        let request = self.client.build_list_tutors();
        match self.send(request, RegistryClient::parse_list_tutors) {
            Ok(tutors) => self.tutor_admin = Some(AdminList::tutors(&tutors)),
            Err(err) => {
                tracing::error!(error = %err, "failed to list tutors");
                self.user_message.show(
                    MessageKind::Error,
                    "Could not load the users for administration.",
                );
            }
        }
    }

    /// A trigger on a row of the dog list.
    pub fn dog_row(&mut self, action: RowAction, dog_id: RecordId) {
        if !self.require_admin() {
            return;
        }
        if !self.dog_admin.as_ref().is_some_and(|list| list.contains(dog_id)) {
            self.pet_message.show(
                MessageKind::Error,
                format!("Dog #{dog_id} is not in the dog list."),
            );
            return;
        }
        match action {
            RowAction::View | RowAction::Edit => {
                let request = self.client.build_get_dog(dog_id);
                let dog = match self.send(request, RegistryClient::parse_get_dog) {
                    Ok(dog) => dog,
                    Err(err) => {
                        tracing::warn!(dog_id, error = %err, "failed to load dog");
                        self.pet_message.show(MessageKind::Error, "Dog not found.");
                        return;
                    }
                };
                self.show_dog(&dog);
                self.populate_pet_form(&dog);
                if action == RowAction::Edit {
                    self.pet_form.begin_edit(dog.id);
                }
            }
            RowAction::Delete => {
                if self.delete_dog(dog_id, "Failed to delete dog.") {
                    self.pet_message
                        .show(MessageKind::Success, "Dog deleted successfully.");
                    self.show_admin_dogs();
                    self.pet_form.reset();
                }
            }
        }
    }

    /// The "update pet" control of edit mode.
    pub fn update_dog(&mut self) {
        if !self.require_admin() {
            return;
        }
        let Some(dog_id) = self.pet_form.editing() else {
            self.pet_message
                .show(MessageKind::Error, FormError::NotEditing.to_string());
            return;
        };
        let update = match self.pet_form.update() {
            Ok(update) => update,
            Err(err) => {
                self.pet_message.show(MessageKind::Error, err.to_string());
                return;
            }
        };
        let updated = self
            .client
            .build_update_dog(dog_id, &update)
            .and_then(|request| self.send(request, RegistryClient::parse_update_dog));
        match updated {
            Ok(dog) => {
                self.pet_message
                    .show(MessageKind::Success, "Pet updated successfully.");
                self.show_dog(&dog);
                self.populate_pet_form(&dog);
                self.show_admin_dogs();
            }
            Err(err) => {
                tracing::warn!(dog_id, error = %err, "failed to update dog");
                self.pet_message.show(MessageKind::Error, "Failed to update pet.");
            }
        }
    }

    /// The "delete pet" control of edit mode.
    pub fn delete_edited_dog(&mut self) {
        if !self.require_admin() {
            return;
        }
        let Some(dog_id) = self.pet_form.editing() else {
            self.pet_message
                .show(MessageKind::Error, FormError::NotEditing.to_string());
            return;
        };
        if self.delete_dog(dog_id, "Failed to delete pet.") {
            self.pet_message
                .show(MessageKind::Success, "Pet deleted successfully.");
            self.pet_form.reset();
            self.show_admin_dogs();
        }
    }

    /// Confirm, then delete. Returns whether the dog is gone.
    fn delete_dog(&mut self, dog_id: RecordId, failure: &str) -> bool {
        if !self.confirm.confirm("Confirm deleting this dog?") {
            return false;
        }
        let request = self.client.build_delete_dog(dog_id);
        match self.send(request, RegistryClient::parse_delete_dog) {
            Ok(()) => {
                tracing::info!(dog_id, "dog deleted");
                if self.dog_summary.as_ref().is_some_and(|s| s.dog_id == dog_id) {
                    self.dog_summary = None;
                    self.breed_panel = BreedPanel::placeholder();
                }
                true
            }
            Err(err) => {
                tracing::warn!(dog_id, error = %err, "failed to delete dog");
                self.pet_message.show(MessageKind::Error, failure);
                false
            }
        }
    }

    /// A trigger on a row of the tutor list.
    pub fn tutor_row(&mut self, action: RowAction, tutor_id: RecordId) {
        if !self.require_admin() {
            return;
        }
        if !self.tutor_admin.as_ref().is_some_and(|list| list.contains(tutor_id)) {
            self.user_message.show(
                MessageKind::Error,
                format!("User #{tutor_id} is not in the user list."),
            );
            return;
        }
        match action {
            RowAction::View | RowAction::Edit => {
                let request = self.client.build_get_tutor(tutor_id);
                let tutor = match self.send(request, RegistryClient::parse_get_tutor) {
                    Ok(tutor) => tutor,
                    Err(err) => {
                        tracing::warn!(tutor_id, error = %err, "failed to load tutor");
                        self.user_message.show(MessageKind::Error, "User not found.");
                        return;
                    }
                };
                self.populate_tutor_form(&tutor);
                self.tutor_form.begin_edit(tutor.id);
            }
            RowAction::Delete => {
                if self.delete_tutor(
                    tutor_id,
                    "Confirm deleting this user and their dogs?",
                    "Failed to delete user.",
                ) {
                    self.user_message
                        .show(MessageKind::Success, "User deleted successfully.");
                    if self.admin_enabled {
                        self.show_admin_tutors();
                    }
                }
            }
        }
    }

    /// Adopting another tutor drops the dog list, which belonged to the
    /// previous one.
    fn populate_tutor_form(&mut self, tutor: &Tutor) {
        if self.session.current() != Some(tutor.id) {
            self.dog_admin = None;
        }
        self.tutor_form.fill(tutor);
        self.session.activate(tutor.id);
        self.tutor_form.lock();
        self.logout_visible = true;
    }

    /// The "update tutor" control of edit mode.
    pub fn update_tutor(&mut self) {
        if !self.require_admin() {
            return;
        }
        let Some(tutor_id) = self.tutor_form.editing() else {
            self.user_message
                .show(MessageKind::Error, FormError::NotEditing.to_string());
            return;
        };
        let input = match self.tutor_form.input() {
            Ok(input) => input,
            Err(err) => {
                self.user_message.show(MessageKind::Error, err.to_string());
                return;
            }
        };
        let updated = self
            .client
            .build_update_tutor(tutor_id, &input)
            .and_then(|request| self.send(request, RegistryClient::parse_update_tutor));
        match updated {
            Ok(tutor) => {
                self.user_message
                    .show(MessageKind::Success, "Tutor updated successfully.");
                self.populate_tutor_form(&tutor);
                self.show_admin_tutors();
            }
            Err(err) => {
                tracing::warn!(tutor_id, error = %err, "failed to update tutor");
                self.user_message
                    .show(MessageKind::Error, "Failed to update tutor.");
            }
        }
    }

    /// The "delete tutor" control of edit mode.
    pub fn delete_edited_tutor(&mut self) {
        if !self.require_admin() {
            return;
        }
        let Some(tutor_id) = self.tutor_form.editing() else {
            self.user_message
                .show(MessageKind::Error, FormError::NotEditing.to_string());
            return;
        };
        if self.delete_tutor(
            tutor_id,
            "Confirm deleting this tutor and their dogs?",
            "Failed to delete tutor.",
        ) {
            self.user_message
                .show(MessageKind::Success, "Tutor deleted successfully.");
            self.tutor_form.clear_values();
            self.tutor_form.end_edit();
            if self.admin_enabled {
                self.show_admin_tutors();
            }
        }
    }

    /// Confirm, then delete. Deleting the active tutor ends the session,
    /// since every later request on its behalf would fail.
    fn delete_tutor(&mut self, tutor_id: RecordId, prompt: &str, failure: &str) -> bool {
        if !self.confirm.confirm(prompt) {
            return false;
        }
        let request = self.client.build_delete_tutor(tutor_id);
        match self.send(request, RegistryClient::parse_delete_tutor) {
            Ok(()) => {
                tracing::info!(tutor_id, "tutor deleted");
                if self.session.current() == Some(tutor_id) {
                    self.reset_view();
                }
                true
            }
            Err(err) => {
                tracing::warn!(tutor_id, error = %err, "failed to delete tutor");
                self.user_message.show(MessageKind::Error, failure);
                false
            }
        }
    }

    // --- plumbing ---

    fn send<R>(
        &mut self,
        request: HttpRequest,
        parse: impl FnOnce(&RegistryClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        tracing::debug!(status = response.status, "response received");
        parse(&self.client, response)
    }

    // --- view state ---

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn tutor_form(&self) -> &TutorForm {
        &self.tutor_form
    }

    pub fn tutor_form_mut(&mut self) -> &mut TutorForm {
        &mut self.tutor_form
    }

    pub fn pet_form(&self) -> &PetForm {
        &self.pet_form
    }

    pub fn pet_form_mut(&mut self) -> &mut PetForm {
        &mut self.pet_form
    }

    pub fn breed_panel(&self) -> &BreedPanel {
        &self.breed_panel
    }

    pub fn dog_summary(&self) -> Option<&DogSummary> {
        self.dog_summary.as_ref()
    }

    pub fn dog_admin(&self) -> Option<&AdminList<DogRow>> {
        self.dog_admin.as_ref()
    }

    pub fn tutor_admin(&self) -> Option<&AdminList<TutorRow>> {
        self.tutor_admin.as_ref()
    }

    pub fn admin_enabled(&self) -> bool {
        self.admin_enabled
    }

    pub fn logout_visible(&self) -> bool {
        self.logout_visible
    }

    pub fn user_message(&self) -> &MessageSlot {
        &self.user_message
    }

    pub fn pet_message(&self) -> &MessageSlot {
        &self.pet_message
    }

    /// The pending scroll request, cleared once read.
    pub fn take_scroll_target(&mut self) -> Option<ScrollTarget> {
        self.scroll_target.take()
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }
}

/// Prefer the backend's own explanation over our rendering of the error.
fn describe(err: &ApiError) -> String {
    err.server_message()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::http::{HttpMethod, TransportError};

    /// Replays canned responses in order and records every request.
    #[derive(Default)]
    struct Scripted {
        responses: VecDeque<(u16, String)>,
        requests: Vec<HttpRequest>,
    }

    impl Scripted {
        fn reply(mut self, status: u16, body: &str) -> Self {
            self.responses.push_back((status, body.to_string()));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.requests
                .iter()
                .map(|r| format!("{} {}", r.method, r.path.trim_start_matches(BASE)))
                .collect()
        }
    }

    impl Transport for Scripted {
        fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.push(request);
            let (status, body) = self
                .responses
                .pop_front()
                .ok_or_else(|| TransportError("no scripted response".to_string()))?;
            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body,
            })
        }
    }

    const BASE: &str = "http://api.test";
    const BREEDS: &str = r#"[{"id":1,"nome":"Golden Retriever"},{"id":2,"nome":"Pug"}]"#;
    const ANA: &str = r#"{"id":7,"nome_completo":"Ana Souza","email":"ana@example.com","telefone":"1199"}"#;
    const REX: &str = r#"{"id":4,"nome_pet":"Rex","idade":3,"peso":30.0,"info_extra":"","user_id":7,"raca_id":1,
        "breed":{"id":1,"nome":"Golden Retriever","porte":"Large","grupo":"Retrievers"}}"#;
    const GOLDEN: &str = r#"{"id":1,"nome":"Golden Retriever","imagem":"golden.png","porte":"Large",
        "grupo":"Retrievers","cuidados":"Brush weekly","comportamento":"Gentle; eager to please","racao":"Premium"}"#;

    type TestApp = RegistryApp<Scripted, fn(&str) -> bool>;

    fn yes(_: &str) -> bool {
        true
    }

    fn no(_: &str) -> bool {
        false
    }

    fn app(transport: Scripted) -> TestApp {
        RegistryApp::new(RegistryClient::new(BASE), transport, yes as fn(&str) -> bool)
    }

    /// An app that has loaded breeds and logged in as Ana (no dogs).
    fn logged_in(extra: Scripted) -> TestApp {
        let mut transport = Scripted::default()
            .reply(200, BREEDS)
            .reply(200, ANA)
            .reply(200, "[]");
        transport.responses.extend(extra.responses);
        let mut app = app(transport);
        app.load();
        let form = app.tutor_form_mut();
        form.full_name = "Ana Souza".to_string();
        form.email = "ana@example.com".to_string();
        app.submit_tutor();
        assert_eq!(app.session().current(), Some(7));
        app
    }

    fn last_text(slot: &MessageSlot) -> &str {
        slot.last().map(|m| m.text.as_str()).unwrap_or_default()
    }

    #[test]
    fn load_populates_dropdown_and_disables_admin() {
        let mut app = app(Scripted::default().reply(200, BREEDS));
        app.load();
        assert_eq!(app.pet_form().breed.options().len(), 3);
        assert!(app.breed_panel().is_placeholder());
        assert!(!app.admin_enabled());
    }

    #[test]
    fn load_failure_shows_error() {
        let mut app = app(Scripted::default().reply(500, "oops"));
        app.load();
        assert_eq!(app.pet_form().breed.options().len(), 1);
        assert_eq!(app.pet_message().last().unwrap().kind, MessageKind::Error);
    }

    #[test]
    fn new_email_creates_exactly_one_tutor_and_opens_session() {
        let transport = Scripted::default()
            .reply(404, r#"{"message":"Usuário não encontrado"}"#)
            .reply(201, ANA)
            .reply(200, "[]");
        let mut app = app(transport);
        let form = app.tutor_form_mut();
        form.full_name = " Ana Souza ".to_string();
        form.email = "ana@example.com".to_string();

        app.submit_tutor();

        assert_eq!(
            app.transport().calls(),
            vec![
                "GET /usuarios/email/ana%40example.com",
                "POST /usuarios",
                "GET /usuarios/7/cachorros",
            ]
        );
        let body: serde_json::Value =
            serde_json::from_str(app.transport().requests[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["nome_completo"], "Ana Souza");
        assert_eq!(app.session().current(), Some(7));
        assert!(app.admin_enabled());
        assert!(app.logout_visible());
        assert!(!app.tutor_form().fields_enabled());
        assert!(!app.tutor_form().submit_visible());
        assert_eq!(app.user_message().last().unwrap().kind, MessageKind::Success);
    }

    #[test]
    fn existing_email_reuses_identifier_without_creating() {
        let transport = Scripted::default().reply(200, ANA).reply(200, &format!("[{REX}]"));
        let mut app = app(transport);
        let form = app.tutor_form_mut();
        form.full_name = "Someone Else".to_string();
        form.email = "ana@example.com".to_string();

        app.submit_tutor();

        let calls = app.transport().calls();
        assert!(calls.iter().all(|c| !c.starts_with("POST")), "{calls:?}");
        assert_eq!(app.session().current(), Some(7));
        assert_eq!(app.tutor_form().full_name, "Ana Souza");
        assert_eq!(app.tutor_form().phone, "1199");
        assert!(last_text(app.user_message()).starts_with("Welcome back"));

        let summary = app.dog_summary().unwrap();
        assert_eq!(summary.dog_name, "Rex");
        assert_eq!(summary.tutor_name, "Ana Souza");
        assert_eq!(app.breed_panel().title, "Golden Retriever");
    }

    #[test]
    fn missing_tutor_fields_send_nothing() {
        let mut app = app(Scripted::default());
        app.tutor_form_mut().email = "ana@example.com".to_string();
        app.submit_tutor();
        assert!(app.transport().requests.is_empty());
        assert_eq!(
            last_text(app.user_message()),
            FormError::MissingTutorFields.to_string()
        );
    }

    #[test]
    fn unexpected_lookup_status_is_error_and_clears_session() {
        let mut app = app(Scripted::default().reply(500, r#"{"message":"db down"}"#));
        let form = app.tutor_form_mut();
        form.full_name = "Ana".to_string();
        form.email = "ana@example.com".to_string();
        app.submit_tutor();
        assert!(!app.session().is_active());
        assert!(!app.admin_enabled());
        assert_eq!(last_text(app.user_message()), "Error processing user: db down");
    }

    #[test]
    fn pet_without_session_is_rejected_without_network() {
        let mut app = app(Scripted::default());
        let form = app.pet_form_mut();
        form.name = "Rex".to_string();
        app.submit_pet();
        assert!(app.transport().requests.is_empty());
        assert_eq!(last_text(app.pet_message()), FormError::NoSession.to_string());
    }

    #[test]
    fn pet_without_breed_is_rejected_without_network() {
        let mut app = logged_in(Scripted::default());
        let before = app.transport().requests.len();
        app.pet_form_mut().name = "Rex".to_string();
        app.submit_pet();
        assert_eq!(app.transport().requests.len(), before);
        assert_eq!(
            last_text(app.pet_message()),
            FormError::MissingPetFields.to_string()
        );
    }

    #[test]
    fn duplicate_dog_surfaces_existing_record() {
        let conflict = format!(r#"{{"message":"Rex is already registered","cachorro":{REX}}}"#);
        let mut app = logged_in(Scripted::default().reply(409, &conflict));
        let form = app.pet_form_mut();
        form.name = "Rex".to_string();
        form.breed.select(Some(1));

        app.submit_pet();

        let message = app.pet_message().last().unwrap();
        assert_eq!(message.kind, MessageKind::Info);
        assert_eq!(message.text, "Rex is already registered");
        assert_eq!(app.dog_summary().unwrap().dog_id, 4);
        assert_eq!(app.take_scroll_target(), Some(ScrollTarget::DogSummary));
        assert_eq!(app.take_scroll_target(), None);
    }

    #[test]
    fn created_dog_shows_breed_and_resets_form() {
        let mut app = logged_in(Scripted::default().reply(201, REX).reply(200, GOLDEN));
        let form = app.pet_form_mut();
        form.name = "Rex".to_string();
        form.age = "3".to_string();
        form.breed.select(Some(1));

        app.submit_pet();

        let calls = app.transport().calls();
        assert_eq!(&calls[calls.len() - 2..], ["POST /cachorros", "GET /racas/golden-retriever"]);
        assert_eq!(app.breed_panel().care, "Brush weekly");
        assert!(app.pet_form().name.is_empty());
        assert_eq!(app.pet_form().breed.selected(), None);
        assert_eq!(app.pet_message().last().unwrap().kind, MessageKind::Success);
    }

    #[test]
    fn empty_breed_selection_resets_panel_without_network() {
        let mut app = app(Scripted::default().reply(200, BREEDS).reply(200, GOLDEN));
        app.load();
        app.select_breed(Some(1));
        assert_eq!(app.breed_panel().title, "Golden Retriever");
        let before = app.transport().requests.len();

        app.select_breed(None);

        assert_eq!(app.transport().requests.len(), before);
        assert!(app.breed_panel().is_placeholder());
    }

    #[test]
    fn breed_fetch_failure_falls_back_to_placeholder() {
        let mut app = app(Scripted::default().reply(200, BREEDS).reply(404, ""));
        app.load();
        app.select_breed(Some(2));
        assert_eq!(*app.breed_panel(), BreedPanel::unavailable("Pug"));
        assert_eq!(app.transport().calls().last().unwrap(), "GET /racas/pug");
        assert_eq!(app.pet_message().last().unwrap().kind, MessageKind::Error);
    }

    #[test]
    fn logout_clears_session_and_admin_state() {
        let tutors = format!("[{ANA}]");
        let mut app = logged_in(Scripted::default().reply(200, "[]").reply(200, &tutors));
        app.admin(AdminButton::Dogs);
        app.admin(AdminButton::Tutors);
        assert!(app.dog_admin().unwrap().is_empty());
        assert_eq!(app.tutor_admin().unwrap().rows.len(), 1);

        app.logout();

        assert!(!app.session().is_active());
        assert!(!app.admin_enabled());
        assert!(!app.logout_visible());
        assert!(app.dog_admin().is_none());
        assert!(app.tutor_admin().is_none());
        assert!(app.tutor_form().fields_enabled());
        assert!(app.tutor_form().submit_visible());
        assert!(app.tutor_form().email.is_empty());
        assert!(app.breed_panel().is_placeholder());
    }

    #[test]
    fn admin_buttons_are_disabled_without_session() {
        let mut app = app(Scripted::default());
        app.admin(AdminButton::Tutors);
        assert!(app.transport().requests.is_empty());
        assert!(app.tutor_admin().is_none());
        assert_eq!(app.user_message().last().unwrap().kind, MessageKind::Error);
    }

    #[test]
    fn edit_dog_then_update_targets_captured_id() {
        let updated = REX.replace("\"Rex\"", "\"Max\"");
        let mut app = logged_in(
            Scripted::default()
                .reply(200, &format!("[{REX}]"))
                .reply(200, REX)
                .reply(200, GOLDEN)
                .reply(200, &updated)
                .reply(200, GOLDEN)
                .reply(200, &format!("[{updated}]")),
        );
        app.admin(AdminButton::Dogs);

        app.dog_row(RowAction::Edit, 4);
        assert_eq!(app.breed_panel().care, "Brush weekly");
        assert_eq!(app.pet_form().editing(), Some(4));
        assert_eq!(app.pet_form().name, "Rex");
        assert_eq!(app.pet_form().breed.selected(), Some(1));

        app.pet_form_mut().name = "Max".to_string();
        app.update_dog();

        let put = app
            .transport()
            .requests
            .iter()
            .find(|r| r.method == HttpMethod::Put)
            .unwrap();
        assert_eq!(put.path, format!("{BASE}/cachorros/4"));
        assert_eq!(app.pet_form().name, "Max");
        assert_eq!(app.dog_admin().unwrap().rows[0].name, "Max");
        assert_eq!(app.dog_summary().unwrap().dog_name, "Max");
        assert_eq!(app.breed_panel().care, "Brush weekly");
        assert_eq!(last_text(app.pet_message()), "Pet updated successfully.");
    }

    #[test]
    fn viewing_dog_keeps_fetched_breed_detail() {
        let mut app = logged_in(
            Scripted::default()
                .reply(200, &format!("[{REX}]"))
                .reply(200, REX)
                .reply(200, GOLDEN),
        );
        app.admin(AdminButton::Dogs);

        app.dog_row(RowAction::View, 4);

        let calls = app.transport().calls();
        assert_eq!(&calls[calls.len() - 2..], ["GET /cachorros/4", "GET /racas/golden-retriever"]);
        assert_eq!(app.breed_panel().care, "Brush weekly");
        assert_eq!(app.breed_panel().image, "assets/golden.png");
        assert!(app.breed_panel().description.ends_with("Gentle."));
        assert_eq!(app.dog_summary().unwrap().dog_id, 4);
        assert_eq!(app.pet_form().name, "Rex");
        assert_eq!(app.pet_form().editing(), None);
    }

    #[test]
    fn row_actions_after_logout_send_nothing() {
        let mut app = logged_in(
            Scripted::default()
                .reply(200, &format!("[{REX}]"))
                .reply(200, &format!("[{ANA}]")),
        );
        app.admin(AdminButton::Dogs);
        app.admin(AdminButton::Tutors);
        app.logout();
        let before = app.transport().requests.len();

        app.dog_row(RowAction::Delete, 4);
        app.dog_row(RowAction::View, 4);
        app.tutor_row(RowAction::Delete, 7);
        app.tutor_row(RowAction::View, 8);
        app.update_dog();
        app.delete_edited_tutor();

        assert_eq!(app.transport().requests.len(), before);
        assert!(!app.session().is_active());
        assert!(!app.admin_enabled());
        assert_eq!(app.user_message().last().unwrap().kind, MessageKind::Error);
    }

    #[test]
    fn row_action_for_unlisted_id_sends_nothing() {
        let mut app = logged_in(Scripted::default().reply(200, "[]"));
        app.admin(AdminButton::Dogs);
        let before = app.transport().requests.len();

        app.dog_row(RowAction::Delete, 99);
        app.tutor_row(RowAction::View, 8);

        assert_eq!(app.transport().requests.len(), before);
        assert_eq!(last_text(app.pet_message()), "Dog #99 is not in the dog list.");
        assert_eq!(last_text(app.user_message()), "User #8 is not in the user list.");
        assert_eq!(app.session().current(), Some(7));
    }

    #[test]
    fn declined_confirmation_sends_no_delete() {
        let mut app = logged_in(
            Scripted::default()
                .reply(200, &format!("[{REX}]"))
                .reply(200, &format!("[{ANA}]")),
        );
        app.admin(AdminButton::Dogs);
        app.admin(AdminButton::Tutors);
        app.confirm = no;
        let before = app.transport().requests.len();
        app.dog_row(RowAction::Delete, 4);
        app.tutor_row(RowAction::Delete, 7);
        assert_eq!(app.transport().requests.len(), before);
    }

    #[test]
    fn deleting_dog_refreshes_list() {
        let mut app = logged_in(
            Scripted::default()
                .reply(200, &format!("[{REX}]"))
                .reply(204, "")
                .reply(200, "[]"),
        );
        app.admin(AdminButton::Dogs);
        app.dog_row(RowAction::Delete, 4);
        let calls = app.transport().calls();
        assert_eq!(&calls[calls.len() - 2..], ["DELETE /cachorros/4", "GET /usuarios/7/cachorros"]);
        assert!(app.dog_admin().unwrap().is_empty());
        assert_eq!(last_text(app.pet_message()), "Dog deleted successfully.");
    }

    #[test]
    fn failed_delete_shows_error_and_keeps_list() {
        let mut app = logged_in(
            Scripted::default()
                .reply(200, &format!("[{REX}]"))
                .reply(500, ""),
        );
        app.admin(AdminButton::Dogs);
        app.dog_row(RowAction::Delete, 4);
        assert_eq!(last_text(app.pet_message()), "Failed to delete dog.");
        assert_eq!(app.dog_admin().unwrap().rows.len(), 1);
    }

    #[test]
    fn editing_tutor_adopts_session_and_update_refreshes_list() {
        let bia = r#"{"id":8,"nome_completo":"Bia Lima","email":"bia@example.com","telefone":null}"#;
        let renamed = bia.replace("Bia Lima", "Beatriz Lima");
        let mut app = logged_in(
            Scripted::default()
                .reply(200, "[]")
                .reply(200, &format!("[{ANA},{bia}]"))
                .reply(200, bia)
                .reply(200, &renamed)
                .reply(200, &format!("[{ANA},{renamed}]")),
        );
        app.admin(AdminButton::Dogs);
        app.admin(AdminButton::Tutors);

        app.tutor_row(RowAction::Edit, 8);
        assert_eq!(app.session().current(), Some(8));
        assert!(app.dog_admin().is_none(), "dog list belonged to the previous tutor");
        assert_eq!(app.tutor_form().editing(), Some(8));
        assert!(app.tutor_form().fields_enabled());

        app.tutor_form_mut().full_name = "Beatriz Lima".to_string();
        app.update_tutor();

        assert_eq!(app.tutor_form().full_name, "Beatriz Lima");
        assert_eq!(app.tutor_admin().unwrap().rows.len(), 2);
        assert_eq!(last_text(app.user_message()), "Tutor updated successfully.");
    }

    #[test]
    fn deleting_active_tutor_ends_session() {
        let mut app = logged_in(
            Scripted::default()
                .reply(200, &format!("[{ANA}]"))
                .reply(200, ANA)
                .reply(204, ""),
        );
        app.admin(AdminButton::Tutors);
        app.tutor_row(RowAction::Edit, 7);
        app.delete_edited_tutor();
        assert!(!app.session().is_active());
        assert!(!app.admin_enabled());
        assert_eq!(app.tutor_form().editing(), None);
        assert_eq!(last_text(app.user_message()), "Tutor deleted successfully.");
    }

    #[test]
    fn deleting_another_tutor_keeps_session_and_refreshes_list() {
        let bia = r#"{"id":8,"nome_completo":"Bia Lima","email":"bia@example.com","telefone":null}"#;
        let mut app = logged_in(
            Scripted::default()
                .reply(200, &format!("[{ANA},{bia}]"))
                .reply(204, "")
                .reply(200, &format!("[{ANA}]")),
        );
        app.admin(AdminButton::Tutors);

        app.tutor_row(RowAction::Delete, 8);

        let calls = app.transport().calls();
        assert_eq!(&calls[calls.len() - 2..], ["DELETE /usuarios/8", "GET /usuarios"]);
        assert_eq!(app.session().current(), Some(7));
        assert!(app.admin_enabled());
        assert_eq!(app.tutor_admin().unwrap().rows.len(), 1);
        assert_eq!(last_text(app.user_message()), "User deleted successfully.");
    }

    #[test]
    fn removing_edited_dog_resets_form_and_leaves_edit_mode() {
        let mut app = logged_in(
            Scripted::default()
                .reply(200, &format!("[{REX}]"))
                .reply(200, REX)
                .reply(200, GOLDEN)
                .reply(204, "")
                .reply(200, "[]"),
        );
        app.admin(AdminButton::Dogs);
        app.dog_row(RowAction::Edit, 4);
        assert_eq!(app.pet_form().editing(), Some(4));

        app.delete_edited_dog();

        let calls = app.transport().calls();
        assert_eq!(&calls[calls.len() - 2..], ["DELETE /cachorros/4", "GET /usuarios/7/cachorros"]);
        assert_eq!(app.pet_form().editing(), None);
        assert!(app.pet_form().name.is_empty());
        assert!(app.dog_summary().is_none());
        assert!(app.breed_panel().is_placeholder());
        assert!(app.dog_admin().unwrap().is_empty());
        assert_eq!(last_text(app.pet_message()), "Pet deleted successfully.");
    }

    #[test]
    fn update_without_edit_mode_is_rejected() {
        let mut app = logged_in(Scripted::default());
        let before = app.transport().requests.len();
        app.update_dog();
        app.update_tutor();
        assert_eq!(app.transport().requests.len(), before);
    }
}
