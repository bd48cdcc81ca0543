//! Sea-ORM entities and API models for the five inventory resources.

pub mod car;
pub mod customer;
pub mod part;
pub mod sale;
pub mod supplier;

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Image URLs stored as a JSON array in one column.
///
/// Uploads land under `/uploads/<uuid>.<ext>`; the stored strings are the
/// public URL paths, not filesystem paths.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
pub struct ImageUrls(pub Vec<String>);
