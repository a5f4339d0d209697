//! Domain error type shared by the store and remote layers.

use crate::types::EntityId;

/// Errors produced by domain validation and local cache lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Entity is not present in the local cache.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: EntityId },

    /// Input failed a domain validation rule.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: EntityId) -> Self {
        CoreError::NotFound { entity, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity_and_id() {
        let err = CoreError::not_found("task", 42);
        assert_eq!(err.to_string(), "task with id 42 not found");
    }

    #[test]
    fn test_validation_message_passthrough() {
        let err = CoreError::Validation("Project name is required".into());
        assert!(err.to_string().contains("Project name is required"));
    }
}
