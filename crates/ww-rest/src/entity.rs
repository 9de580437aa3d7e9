//! Entity types and their REST paths.

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// A Drupal content entity type exposed over REST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Node,
    Comment,
}

impl EntityType {
    /// URL path segment for this entity type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Node => "node",
            EntityType::Comment => "comment",
        }
    }

    /// Path of one existing entity: `{type}/{id}`.
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.as_str(), id)
    }

    /// Path that creates a new entity: `entity/{type}`.
    pub fn create_path(&self) -> String {
        format!("entity/{}", self.as_str())
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "node" => Ok(EntityType::Node),
            "comment" => Ok(EntityType::Comment),
            other => Err(Error::new(ErrorKind::UnknownEntityType(other.to_string()))),
        }
    }
}
