//! Mutation lifecycle state machine
//!
//! One optimistic mutation moves Idle → Pending → Settled and never back.
//! The transition is enforced by ownership: [`PendingMutation::begin`] is
//! the only way to enter Pending, [`PendingMutation::settle`] consumes the
//! pending mutation, and a [`SettledMutation`] is terminal. Illegal
//! transitions are unrepresentable rather than checked at runtime.
//!
//! The pending value carries the rollback snapshot taken before the
//! speculative cache write; it lives only as long as the in-flight
//! request and is never persisted.

use hub_cache::CacheEntry;
use hub_model::QueryKey;

/// How a mutation settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Settlement {
    /// Server confirmed; optimistic edit stands until the refetch lands
    Applied,
    /// Server refused or was unreachable; snapshot was restored
    RolledBack,
}

/// Lifecycle phase of one mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationPhase {
    /// Not started
    Idle,
    /// Speculative edit applied, network call in flight
    Pending,
    /// Request settled one way or the other
    Settled(Settlement),
}

impl MutationPhase {
    /// Whether `self` may advance to `to`
    #[must_use]
    pub fn can_advance_to(self, to: MutationPhase) -> bool {
        matches!(
            (self, to),
            (Self::Idle, Self::Pending) | (Self::Pending, Self::Settled(_))
        )
    }

    /// Whether the phase is terminal
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Settled(_))
    }
}

/// An in-flight mutation holding its rollback snapshot
#[derive(Debug)]
pub struct PendingMutation {
    key: QueryKey,
    previous: CacheEntry,
}

impl PendingMutation {
    /// Enter Pending, capturing the snapshot to restore on failure
    #[inline]
    #[must_use]
    pub fn begin(key: QueryKey, previous: CacheEntry) -> Self {
        Self { key, previous }
    }

    /// Key the mutation targets
    #[inline]
    #[must_use]
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Snapshot taken before the speculative write
    #[inline]
    #[must_use]
    pub fn previous(&self) -> &CacheEntry {
        &self.previous
    }

    /// Current phase (always Pending while this value exists)
    #[inline]
    #[must_use]
    pub fn phase(&self) -> MutationPhase {
        MutationPhase::Pending
    }

    /// Settle the mutation, consuming it
    #[inline]
    #[must_use]
    pub fn settle(self, settlement: Settlement) -> SettledMutation {
        SettledMutation {
            key: self.key,
            previous: self.previous,
            settlement,
        }
    }
}

/// A settled mutation; terminal
#[derive(Debug)]
pub struct SettledMutation {
    key: QueryKey,
    previous: CacheEntry,
    settlement: Settlement,
}

impl SettledMutation {
    /// Key the mutation targeted
    #[inline]
    #[must_use]
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// How the mutation settled
    #[inline]
    #[must_use]
    pub fn settlement(&self) -> Settlement {
        self.settlement
    }

    /// Take the snapshot for a rollback restore
    #[inline]
    #[must_use]
    pub fn into_previous(self) -> CacheEntry {
        self.previous
    }
}
