//! Client core for the dog registry front end.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the whole page
//! state (session, forms, breed panel, admin lists, status messages) in a
//! `RegistryApp` whose methods are the page's event handlers.
//!
//! # Design
//! - `RegistryClient` is stateless; it holds only `base_url`.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - The host supplies a `Transport` for the round trip and a `Confirm`
//!   for destructive actions; the core never blocks on anything else.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod admin;
pub mod app;
pub mod breed;
pub mod client;
pub mod error;
pub mod forms;
pub mod http;
pub mod session;
pub mod status;
pub mod types;

pub use admin::{AdminButton, AdminList, DogRow, RowAction, TutorRow};
pub use app::{Confirm, RegistryApp, ScrollTarget};
pub use breed::{breed_slug, BreedPanel, DogSummary};
pub use client::RegistryClient;
pub use error::{ApiError, FormError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use session::Session;
pub use status::{MessageKind, MessageSlot, StatusMessage};
pub use types::{Breed, CreateDogOutcome, Dog, DogUpdate, NewDog, RecordId, Tutor, TutorInput};
