//! Which cached queries a successful write makes stale.

use std::collections::HashMap;

use crate::query::cache::QueryCache;
use crate::query::key::{KeyPattern, keys};

/// Every write the dashboard can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationKind {
    CreateStaff,
    UpdateStaff,
    DeleteStaff,
    UpdateUnitStatus,
    CreateAmenity,
    UpdateAmenity,
    DeleteAmenity,
    AssignParkingSlot,
    ReleaseParkingSlot,
    CreateNotice,
    UpdateNotice,
    PublishNotice,
    ArchiveNotice,
    DeleteNotice,
    CreateServiceRequest,
    AssignServiceRequest,
    UpdateRequestStatus,
    DeleteServiceRequest,
    ReviewDocument,
    SubmitApplication,
    ReviewApplication,
}

impl MutationKind {
    pub const ALL: &'static [MutationKind] = &[
        MutationKind::CreateStaff,
        MutationKind::UpdateStaff,
        MutationKind::DeleteStaff,
        MutationKind::UpdateUnitStatus,
        MutationKind::CreateAmenity,
        MutationKind::UpdateAmenity,
        MutationKind::DeleteAmenity,
        MutationKind::AssignParkingSlot,
        MutationKind::ReleaseParkingSlot,
        MutationKind::CreateNotice,
        MutationKind::UpdateNotice,
        MutationKind::PublishNotice,
        MutationKind::ArchiveNotice,
        MutationKind::DeleteNotice,
        MutationKind::CreateServiceRequest,
        MutationKind::AssignServiceRequest,
        MutationKind::UpdateRequestStatus,
        MutationKind::DeleteServiceRequest,
        MutationKind::ReviewDocument,
        MutationKind::SubmitApplication,
        MutationKind::ReviewApplication,
    ];

    /// Resource the write targets directly.
    pub fn resource(self) -> &'static str {
        use MutationKind::*;
        match self {
            CreateStaff | UpdateStaff | DeleteStaff => keys::STAFF,
            UpdateUnitStatus => keys::UNITS,
            CreateAmenity | UpdateAmenity | DeleteAmenity => keys::AMENITIES,
            AssignParkingSlot | ReleaseParkingSlot => keys::PARKING,
            CreateNotice | UpdateNotice | PublishNotice | ArchiveNotice | DeleteNotice => {
                keys::NOTICES
            }
            CreateServiceRequest | AssignServiceRequest | UpdateRequestStatus
            | DeleteServiceRequest => keys::SERVICE_REQUESTS,
            ReviewDocument => keys::DOCUMENTS,
            SubmitApplication | ReviewApplication => keys::ONBOARDING,
        }
    }
}

/// Map from write kind to the key patterns it invalidates.
#[derive(Clone, Debug)]
pub struct InvalidationRegistry {
    rules: HashMap<MutationKind, Vec<KeyPattern>>,
}

impl InvalidationRegistry {
    /// A registry with no rules at all.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Adds a pattern to the rule for `kind`.
    pub fn register(mut self, kind: MutationKind, pattern: KeyPattern) -> Self {
        let patterns = self.rules.entry(kind).or_default();
        if !patterns.contains(&pattern) {
            patterns.push(pattern);
        }
        self
    }

    pub fn affected(&self, kind: MutationKind) -> &[KeyPattern] {
        self.rules.get(&kind).map_or(&[][..], Vec::as_slice)
    }

    /// Invalidates everything `kind` affects; returns the number of entries hit.
    pub fn apply(&self, kind: MutationKind, cache: &QueryCache) -> usize {
        let affected = self.affected(kind);
        if affected.is_empty() {
            log::warn!("No invalidation rule for {kind:?}");
            return 0;
        }
        let count = affected
            .iter()
            .map(|pattern| cache.invalidate(pattern))
            .sum();
        log::debug!("{kind:?} invalidated {count} cached queries");
        count
    }
}

impl Default for InvalidationRegistry {
    /// Every write invalidates its own resource, plus the resources whose
    /// records embed data from it.
    fn default() -> Self {
        use MutationKind::*;

        let registry = MutationKind::ALL
            .iter()
            .fold(Self::empty(), |registry, kind| {
                registry.register(*kind, KeyPattern::resource(kind.resource()))
            });

        [
            (UpdateStaff, keys::SERVICE_REQUESTS),
            (DeleteStaff, keys::SERVICE_REQUESTS),
            (AssignParkingSlot, keys::RESIDENTS),
            (ReleaseParkingSlot, keys::RESIDENTS),
            (AssignServiceRequest, keys::STAFF),
            (ReviewDocument, keys::ONBOARDING),
            (ReviewApplication, keys::RESIDENTS),
            (ReviewApplication, keys::UNITS),
        ]
        .into_iter()
        .fold(registry, |registry, (kind, resource)| {
            registry.register(kind, KeyPattern::resource(resource))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_write_invalidates_its_own_resource() {
        let registry = InvalidationRegistry::default();
        for kind in MutationKind::ALL {
            assert!(
                registry
                    .affected(*kind)
                    .contains(&KeyPattern::resource(kind.resource())),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn approving_an_application_touches_residents_and_units() {
        let registry = InvalidationRegistry::default();
        let affected = registry.affected(MutationKind::ReviewApplication);
        assert_eq!(
            affected,
            &[
                KeyPattern::resource(keys::ONBOARDING),
                KeyPattern::resource(keys::RESIDENTS),
                KeyPattern::resource(keys::UNITS),
            ]
        );
    }

    #[test]
    fn empty_registry_invalidates_nothing() {
        let cache = QueryCache::default();
        assert_eq!(
            InvalidationRegistry::empty().apply(MutationKind::PublishNotice, &cache),
            0
        );
    }
}
