//! Typed ID wrappers for catalog records.
//!
//! Each catalog table gets its own newtype around a UUID so that a studio ID
//! can never be passed where a performer ID is expected. IDs are stored as
//! TEXT in the catalog and rendered with [`Display`](std::fmt::Display) when
//! they are stamped onto scraped references.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Generate a new random ", $what, " ID.")]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

catalog_id!(
    /// Unique identifier for a catalog performer.
    PerformerId,
    "performer"
);
catalog_id!(
    /// Unique identifier for a catalog studio.
    StudioId,
    "studio"
);
catalog_id!(
    /// Unique identifier for a catalog movie.
    MovieId,
    "movie"
);
catalog_id!(
    /// Unique identifier for a catalog tag.
    TagId,
    "tag"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(PerformerId::new(), PerformerId::new());
        assert_ne!(TagId::new(), TagId::new());
    }

    #[test]
    fn test_display_parse() {
        let id = StudioId::new();
        let parsed: StudioId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<MovieId>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let uuid = Uuid::new_v4();
        let id = PerformerId::from(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }
}
