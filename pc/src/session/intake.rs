//! Intake profile persistence

use tracing::info;

use crate::domain::LearnerProfile;
use crate::error::{CompanionError, Result};
use crate::storage::{self, KeyValueStore, Scope, StorageKeys};

/// Validate and store the learner's intake profile (durable scope)
pub fn save_intake<S>(store: &mut S, keys: &StorageKeys, profile: &LearnerProfile) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    profile.validate()?;
    storage::save_json(store, Scope::Durable, &keys.intake(), profile)?;
    info!(has_name = profile.display_name().is_some(), "Saved learner intake");
    Ok(())
}

/// Load the stored intake profile; absence means intake was never completed
pub fn load_intake<S>(store: &S, keys: &StorageKeys) -> Result<LearnerProfile>
where
    S: KeyValueStore + ?Sized,
{
    storage::load_json(store, Scope::Durable, &keys.intake())?.ok_or(CompanionError::MissingIntake)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::new();
        let keys = StorageKeys::new("pc");
        let profile = LearnerProfile::new(Some("Ada".to_string()), "nurse", "genomics");

        save_intake(&mut store, &keys, &profile).unwrap();
        assert_eq!(load_intake(&store, &keys).unwrap(), profile);
    }

    #[test]
    fn test_missing_intake() {
        let store = MemoryStore::new();
        let err = load_intake(&store, &StorageKeys::new("pc")).unwrap_err();
        assert!(matches!(err, CompanionError::MissingIntake));
    }

    #[test]
    fn test_incomplete_intake_not_saved() {
        let mut store = MemoryStore::new();
        let keys = StorageKeys::new("pc");
        let profile = LearnerProfile::new(None, "", "genomics");

        assert!(save_intake(&mut store, &keys, &profile).is_err());
        assert!(store.get(Scope::Durable, &keys.intake()).unwrap().is_none());
    }
}
