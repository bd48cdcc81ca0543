//! Inventory API for a used auto parts yard.
//!
//! Donor cars arrive, get stripped into parts, parts get sold. The crate
//! exposes a JSON REST API over Sea-ORM entities: CRUD plus search,
//! filtering and pagination for every resource, a sale flow that tracks
//! part status, image uploads, and a statistics endpoint. Interactive API
//! docs are served at `/docs`.

pub mod app;
pub mod auth;
pub mod catalog;
pub mod category;
pub mod config;
pub mod errors;
pub mod filter;
pub mod migrations;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod sort;
pub mod storage;
pub mod traits;
pub mod validation;

pub use app::{AppState, build_router};
pub use config::AppConfig;
pub use errors::ApiError;
pub use migrations::Migrator;
