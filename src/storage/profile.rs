use crate::domain::BusinessProfile;

use super::store::{Store, StoreError, get_json, keys};

/// Owner of the onboarded business profile and the onboarding flag.
///
/// The profile is loaded once and every mutation is written through to the
/// store before the call returns. A corrupt or missing record loads as the
/// default (empty) profile.
#[derive(Debug)]
pub struct ProfileStore<S> {
    store: S,
    profile: BusinessProfile,
    onboarding_complete: bool,
}

impl<S: Store> ProfileStore<S> {
    /// Loads the profile and onboarding flag from the store.
    pub fn load(store: S) -> Self {
        let profile = get_json(&store, keys::BUSINESS_INFO).unwrap_or_default();
        let onboarding_complete = store
            .get(keys::ONBOARDING_COMPLETE)
            .is_some_and(|raw| raw == "true");
        Self {
            store,
            profile,
            onboarding_complete,
        }
    }

    /// The current profile.
    #[must_use]
    pub const fn profile(&self) -> &BusinessProfile {
        &self.profile
    }

    /// Whether the onboarding wizard has been completed.
    #[must_use]
    pub const fn is_onboarding_complete(&self) -> bool {
        self.onboarding_complete
    }

    /// Applies a mutation to the profile and persists the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated profile cannot be written.
    pub fn update(&mut self, f: impl FnOnce(&mut BusinessProfile)) -> Result<(), StoreError> {
        f(&mut self.profile);
        self.persist()
    }

    /// Replaces the whole profile and persists it.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be written.
    pub fn replace(&mut self, profile: BusinessProfile) -> Result<(), StoreError> {
        self.profile = profile;
        self.persist()
    }

    /// Marks onboarding as finished and persists the flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag cannot be written.
    pub fn complete_onboarding(&mut self) -> Result<(), StoreError> {
        self.onboarding_complete = true;
        self.store.set(keys::ONBOARDING_COMPLETE, "true")
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        super::store::set_json(&mut self.store, keys::BUSINESS_INFO, &self.profile)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::storage::store::MemoryStore;

    #[test]
    fn starts_from_defaults_on_an_empty_store() {
        let profiles = ProfileStore::load(MemoryStore::new());
        assert_eq!(profiles.profile(), &BusinessProfile::default());
        assert!(!profiles.is_onboarding_complete());
    }

    #[test]
    fn mutations_survive_a_reload() {
        let mut store = MemoryStore::new();

        let mut profiles = ProfileStore::load(store.clone());
        profiles
            .update(|profile| {
                profile.name = "Thamel Suppliers".to_string();
                profile.registration_date = NaiveDate::from_ymd_opt(2024, 1, 1);
            })
            .unwrap();
        store = profiles.store;

        let reloaded = ProfileStore::load(store);
        assert_eq!(reloaded.profile().name, "Thamel Suppliers");
        assert_eq!(
            reloaded.profile().registration_date,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn corrupt_profile_record_loads_as_default() {
        let mut store = MemoryStore::new();
        store.set(keys::BUSINESS_INFO, "][").unwrap();

        let profiles = ProfileStore::load(store);
        assert_eq!(profiles.profile(), &BusinessProfile::default());
    }

    #[test]
    fn onboarding_flag_round_trips() {
        let mut profiles = ProfileStore::load(MemoryStore::new());
        profiles.complete_onboarding().unwrap();
        let store = profiles.store;

        assert!(ProfileStore::load(store).is_onboarding_complete());
    }
}
