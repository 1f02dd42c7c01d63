//! Internal Rust models matching the database schema.

use chrono::{DateTime, Utc};
use scrapeforged_common::{MovieId, PerformerId, StudioId, TagId};
use serde::{Deserialize, Serialize};

/// Catalog performer. Names are not unique; `disambiguation` tells apart
/// performers sharing a name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Performer {
    pub id: PerformerId,
    pub name: String,
    pub disambiguation: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Catalog studio. Names are unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Studio {
    pub id: StudioId,
    pub name: String,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Catalog movie (a group of scenes released together).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub name: String,
    pub date: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Catalog tag. Names are unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
