//! Streaming result buffer and reconcile pass
//!
//! The conversational surface re-invokes its result callback many times per
//! turn while it streams tokens. Those callbacks land here, never in the
//! store. A periodic reconcile pass (driven by a timer in the web crate)
//! compares the buffer version against the last one it consumed and forwards
//! at most one clean snapshot per tick.

use crate::city::City;

/// Result cards shown for a single chat turn.
pub const STREAM_CARD_CAP: usize = 2;
/// Period of the reconcile timer, in milliseconds.
pub const RECONCILE_TICK_MS: u32 = 400;

/// Latest known unique result set for the in-flight turn.
///
/// Owned by the surface that also owns the scheduler; one per session, not a
/// process-wide global.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamBuffer {
    cities: Vec<City>,
    version: u64,
}

impl StreamBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one streamed candidate into the running set.
    ///
    /// Invalid candidates and case-insensitive name duplicates are ignored
    /// without a version bump, so re-emissions of the same city during
    /// streaming never look like fresh data to the scheduler.
    pub fn push(&mut self, candidate: &City) -> bool {
        if !candidate.is_valid() {
            log::warn!("stream buffer ignoring candidate with missing identity fields");
            return false;
        }
        if self
            .cities
            .iter()
            .any(|existing| existing.name_matches(&candidate.name))
        {
            return false;
        }
        self.cities.push(candidate.clone());
        let overflow = self.cities.len().saturating_sub(STREAM_CARD_CAP);
        if overflow > 0 {
            self.cities.drain(..overflow);
        }
        self.version += 1;
        true
    }

    /// Overwrite the whole set at turn completion.
    pub fn replace(&mut self, cities: &[City]) {
        let mut unique: Vec<City> = Vec::new();
        for city in cities.iter().filter(|c| c.is_valid()) {
            if !unique.iter().any(|seen| seen.name_matches(&city.name)) {
                unique.push(city.clone());
            }
        }
        unique.truncate(STREAM_CARD_CAP);
        if unique != self.cities {
            self.cities = unique;
            self.version += 1;
        }
    }

    /// Discard buffered cities for the next turn. Keeps the version moving
    /// forward so a tick after the clear propagates the empty set.
    pub fn clear(&mut self) {
        if !self.cities.is_empty() {
            self.cities.clear();
            self.version += 1;
        }
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<City> {
        self.cities.clone()
    }
}

/// Version cursor for the periodic reconcile tick.
///
/// Converts the bursty buffer writes into at most one store dispatch per
/// tick; intermediate buffer states between two ticks are never observed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcilePass {
    last_consumed: u64,
}

impl ReconcilePass {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one tick. Returns the snapshot to dispatch when the buffer has
    /// advanced since the last consumed version, `None` otherwise.
    pub fn tick(&mut self, buffer: &StreamBuffer) -> Option<Vec<City>> {
        let current = buffer.version();
        if current == self.last_consumed {
            return None;
        }
        self.last_consumed = current;
        Some(buffer.snapshot())
    }
}
