use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use traveler_api::endpoints::TripDayId;

/// Screens that may need a reload after a mutation elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshTarget {
    TripDay(TripDayId),
}

/// Shared registry of screens that need a refresh.
///
/// Written by whoever completes a mutation (trip point created), consumed by
/// the target screen when it regains focus. `take` is a one-shot read: the
/// flag is cleared as it is observed.
#[derive(Clone, Default)]
pub struct RefreshRegistry {
    pending: Arc<Mutex<HashSet<RefreshTarget>>>,
}

impl RefreshRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self, target: RefreshTarget) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.insert(target);
        }
    }

    /// Consume a pending refresh for `target`. Returns true at most once per
    /// mark.
    pub fn take(&self, target: RefreshTarget) -> bool {
        match self.pending.lock() {
            Ok(mut pending) => pending.remove(&target),
            Err(_) => false,
        }
    }

    pub fn is_marked(&self, target: RefreshTarget) -> bool {
        self.pending
            .lock()
            .map(|pending| pending.contains(&target))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for RefreshRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pending.lock() {
            Ok(pending) => f.debug_tuple("RefreshRegistry").field(&*pending).finish(),
            Err(_) => f.write_str("RefreshRegistry(<poisoned>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn day() -> TripDayId {
        TripDayId::new(Uuid::from_u128(7))
    }

    #[test]
    fn take_is_one_shot() {
        let registry = RefreshRegistry::new();
        registry.mark(RefreshTarget::TripDay(day()));

        assert!(registry.is_marked(RefreshTarget::TripDay(day())));
        assert!(registry.take(RefreshTarget::TripDay(day())));
        assert!(!registry.take(RefreshTarget::TripDay(day())));
    }

    #[test]
    fn clones_share_state() {
        let registry = RefreshRegistry::new();
        let other = registry.clone();
        other.mark(RefreshTarget::TripDay(day()));

        assert!(registry.take(RefreshTarget::TripDay(day())));
    }
}
