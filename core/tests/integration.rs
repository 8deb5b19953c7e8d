//! End-to-end page flows against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `RegistryApp` over
//! real HTTP using ureq. Validates that request building, response parsing
//! and the view-state transitions line up with what the backend answers.

use registry_core::{
    AdminButton, HttpMethod, HttpRequest, HttpResponse, MessageKind, RegistryApp, RegistryClient,
    RowAction, Transport, TransportError,
};

/// Executes requests with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = &self.agent;
        let mut response = match (req.method, req.body) {
            (HttpMethod::Get, _) => agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => {
                agent.post(&req.path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                agent.put(&req.path).content_type("application/json").send(body.as_bytes())
            }
            (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
        }
        .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// Start the mock server on a random port and return its base URL.
fn start_server() -> String {
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
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn always_yes(_prompt: &str) -> bool {
    true
}

type LiveApp = RegistryApp<UreqTransport, fn(&str) -> bool>;

fn live_app(base_url: &str) -> LiveApp {
    RegistryApp::new(RegistryClient::new(base_url), UreqTransport::new(), always_yes)
}

fn last_text(slot: &registry_core::MessageSlot) -> &str {
    slot.last().map(|m| m.text.as_str()).unwrap_or_default()
}

#[test]
fn registration_lifecycle() {
    let base_url = start_server();
    let mut app = live_app(&base_url);

    // Step 1: page load fills the dropdown.
    app.load();
    assert!(app.pet_form().breed.options().len() > 1, "breeds should load");
    assert!(app.breed_panel().is_placeholder());
    assert!(!app.admin_enabled());

    // Step 2: a pet without a session is rejected locally.
    app.pet_form_mut().name = "Rex".to_string();
    app.submit_pet();
    assert_eq!(app.pet_message().last().unwrap().kind, MessageKind::Error);
    assert!(last_text(app.pet_message()).contains("register or identify"));

    // Step 3: register a new tutor.
    {
        let form = app.tutor_form_mut();
        form.full_name = "Ana Souza".to_string();
        form.email = "ana@example.com".to_string();
        form.phone = "11 9999".to_string();
    }
    app.submit_tutor();
    let msg = app.user_message().last().unwrap();
    assert_eq!(msg.kind, MessageKind::Success, "{}", msg.text);
    assert!(msg.text.contains("Ana Souza"));
    let tutor_id = app.session().current().expect("session should be active");
    assert!(!app.tutor_form().fields_enabled());
    assert!(app.logout_visible());
    assert!(app.admin_enabled());

    // Step 4: register a dog with breed 1.
    let label = app.pet_form_mut().breed.select(Some(1)).map(str::to_string);
    assert_eq!(label.as_deref(), Some("Golden Retriever"));
    {
        let form = app.pet_form_mut();
        form.name = "Rex".to_string();
        form.age = "3".to_string();
        form.weight = "30,5".to_string();
    }
    app.submit_pet();
    let msg = app.pet_message().last().unwrap();
    assert_eq!(msg.kind, MessageKind::Success, "{}", msg.text);
    assert_eq!(app.breed_panel().title, "Golden Retriever");
    assert!(app.pet_form().name.is_empty(), "form resets after create");
    assert!(app.take_scroll_target().is_some());

    // Step 5: the same dog again surfaces the existing record.
    app.pet_form_mut().breed.select(Some(1));
    app.pet_form_mut().name = "rex".to_string();
    app.submit_pet();
    let msg = app.pet_message().last().unwrap();
    assert_eq!(msg.kind, MessageKind::Info, "{}", msg.text);
    let summary = app.dog_summary().expect("summary of the existing dog");
    assert_eq!(summary.dog_name, "Rex");
    assert_eq!(summary.tutor_name, "Ana Souza");
    let dog_id = summary.dog_id;

    // Step 6: logout, then identify again by e-mail only.
    app.logout();
    assert!(app.session().current().is_none());
    assert!(app.dog_summary().is_none());
    {
        let form = app.tutor_form_mut();
        form.full_name = "Ana".to_string();
        form.email = "ana@example.com".to_string();
    }
    app.submit_tutor();
    let msg = app.user_message().last().unwrap();
    assert_eq!(msg.kind, MessageKind::Info, "{}", msg.text);
    assert_eq!(app.session().current(), Some(tutor_id), "no duplicate tutor");
    assert_eq!(app.tutor_form().full_name, "Ana Souza");
    assert_eq!(app.dog_summary().map(|s| s.dog_id), Some(dog_id));

    // Step 7: admin lists.
    app.admin(AdminButton::Dogs);
    let dogs = app.dog_admin().expect("dog list");
    assert_eq!(dogs.rows.len(), 1);
    assert_eq!(dogs.rows[0].id, dog_id);

    app.admin(AdminButton::Tutors);
    let tutors = app.tutor_admin().expect("tutor list");
    assert!(tutors.rows.iter().any(|r| r.id == tutor_id));

    // Step 8: edit the dog.
    app.dog_row(RowAction::Edit, dog_id);
    assert_eq!(app.pet_form().editing(), Some(dog_id));
    assert_eq!(app.pet_form().name, "Rex");
    app.pet_form_mut().name = "Max".to_string();
    app.pet_form_mut().breed.select(Some(3));
    app.update_dog();
    let msg = app.pet_message().last().unwrap();
    assert_eq!(msg.kind, MessageKind::Success, "{}", msg.text);
    assert_eq!(app.dog_admin().unwrap().rows[0].name, "Max");
    assert_eq!(app.breed_panel().title, "Pug");
    assert!(!app.breed_panel().care.is_empty());

    // Step 9: delete the dog from its row.
    app.dog_row(RowAction::Delete, dog_id);
    assert_eq!(last_text(app.pet_message()), "Dog deleted successfully.");
    assert!(app.dog_admin().unwrap().is_empty());

    // Step 10: a dog that left the list can no longer be acted on.
    app.dog_row(RowAction::View, dog_id);
    assert_eq!(
        last_text(app.pet_message()),
        format!("Dog #{dog_id} is not in the dog list.")
    );

    // Step 11: deleting the active tutor ends the session.
    app.tutor_row(RowAction::Delete, tutor_id);
    assert!(app.session().current().is_none());
    assert!(!app.admin_enabled());
    assert_eq!(last_text(app.user_message()), "User deleted successfully.");
}

#[test]
fn unreachable_backend_reports_errors() {
    // Bind then drop so the port is closed.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut app = live_app(&format!("http://{addr}"));

    app.load();
    assert_eq!(app.pet_message().last().unwrap().kind, MessageKind::Error);
    assert_eq!(app.pet_form().breed.options().len(), 1);

    {
        let form = app.tutor_form_mut();
        form.full_name = "Ana Souza".to_string();
        form.email = "ana@example.com".to_string();
    }
    app.submit_tutor();
    assert!(last_text(app.user_message()).starts_with("Error processing user:"));
    assert!(app.session().current().is_none());
}
