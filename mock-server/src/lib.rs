//! In-memory stand-in for the registry backend.
//!
//! Serves the same REST surface as the real service (`/racas`, `/usuarios`,
//! `/cachorros`) with the same answers the front end relies on: 404 for an
//! unknown e-mail, 409 with the existing record for a duplicate dog, and
//! cascading tutor deletes.

pub mod store;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub use store::{Breed, Dog, DogView, Registry, StoreError, Tutor};
use store::{DogUpdate, NewDog, TutorInput};

pub type Db = Arc<RwLock<Registry>>;

/// Router over a freshly seeded registry.
pub fn app() -> Router {
    app_with(Registry::seeded())
}

pub fn app_with(registry: Registry) -> Router {
    let db: Db = Arc::new(RwLock::new(registry));
    Router::new()
        .route("/racas", get(list_breeds))
        .route("/racas/{slug}", get(get_breed))
        .route("/usuarios", get(list_tutors).post(create_tutor))
        .route(
            "/usuarios/{id}",
            get(get_tutor).put(update_tutor).delete(delete_tutor),
        )
        .route("/usuarios/email/{email}", get(find_tutor_by_email))
        .route("/usuarios/{id}/cachorros", get(list_tutor_dogs))
        .route("/cachorros", axum::routing::post(create_dog))
        .route("/cachorros/{id}", get(get_dog).put(update_dog).delete(delete_dog))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- breeds ---

async fn list_breeds(State(db): State<Db>) -> Json<Vec<Breed>> {
    Json(db.read().await.breeds().to_vec())
}

async fn get_breed(
    State(db): State<Db>,
    Path(slug): Path<String>,
) -> Result<Json<Breed>, StoreError> {
    db.read().await.breed_by_slug(&slug).cloned().map(Json)
}

// --- tutors ---

async fn list_tutors(State(db): State<Db>) -> Json<Vec<Tutor>> {
    Json(db.read().await.tutors())
}

async fn get_tutor(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Tutor>, StoreError> {
    db.read().await.tutor(id).cloned().map(Json)
}

async fn find_tutor_by_email(
    State(db): State<Db>,
    Path(email): Path<String>,
) -> Result<Json<Tutor>, StoreError> {
    db.read().await.tutor_by_email(&email).cloned().map(Json)
}

async fn create_tutor(
    State(db): State<Db>,
    Json(input): Json<TutorInput>,
) -> Result<(StatusCode, Json<Tutor>), StoreError> {
    let tutor = db.write().await.create_tutor(input)?;
    tracing::info!(tutor_id = tutor.id, "tutor created");
    Ok((StatusCode::CREATED, Json(tutor)))
}

async fn update_tutor(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TutorInput>,
) -> Result<Json<Tutor>, StoreError> {
    db.write().await.update_tutor(id, input).map(Json)
}

async fn delete_tutor(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, StoreError> {
    let removed_dogs = db.write().await.delete_tutor(id)?;
    tracing::info!(tutor_id = id, removed_dogs, "tutor deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn list_tutor_dogs(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<DogView>>, StoreError> {
    db.read().await.tutor_dogs(id).map(Json)
}

// --- dogs ---

async fn get_dog(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<DogView>, StoreError> {
    db.read().await.dog(id).map(Json)
}

async fn create_dog(
    State(db): State<Db>,
    Json(input): Json<NewDog>,
) -> Result<(StatusCode, Json<DogView>), StoreError> {
    let dog = db.write().await.create_dog(input)?;
    tracing::info!(dog_id = dog.dog.id, tutor_id = dog.dog.user_id, "dog created");
    Ok((StatusCode::CREATED, Json(dog)))
}

async fn update_dog(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<DogUpdate>,
) -> Result<Json<DogView>, StoreError> {
    db.write().await.update_dog(id, input).map(Json)
}

async fn delete_dog(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, StoreError> {
    db.write().await.delete_dog(id)?;
    tracing::info!(dog_id = id, "dog deleted");
    Ok(StatusCode::NO_CONTENT)
}
