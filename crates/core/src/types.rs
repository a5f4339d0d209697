//! Shared type aliases used across the workspace.

/// Entity identifier.
///
/// Server-assigned ids are positive. Negative ids are provisional,
/// handed out by [`crate::temp_id::TempIdAllocator`] for optimistic
/// inserts, and never leave the process.
pub type EntityId = i64;

/// UTC timestamp as stored by the server (`created_at` columns).
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Returns `true` if the id is a provisional client-side id.
pub fn is_temp(id: EntityId) -> bool {
    id < 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_ids_are_negative() {
        assert!(is_temp(-1));
        assert!(is_temp(i64::MIN));
        assert!(!is_temp(0));
        assert!(!is_temp(1));
        assert!(!is_temp(42));
    }
}
