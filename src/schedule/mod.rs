//! Time-slot model: canonical slot tokens and containment semantics
//!
//! A slot identifies one weekday×period cell, encoded as `weekday_period`
//! (e.g. `"1_3"` for Monday, third period). Tokens are opaque: equality is
//! exact string equality, with no case or whitespace normalization.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One weekday×period cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(String);

impl TimeSlot {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeSlot {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

/// A set of time slots, as declared by a student or attached to a course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotSet(HashSet<TimeSlot>);

impl SlotSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-joined raw slot string as stored at ingestion time.
    ///
    /// An empty or whitespace-only raw value yields the empty set; empty
    /// segments (`"a,,b"`) are ignored. Tokens are taken verbatim —
    /// no trimming or case folding, matching the exact-equality contract.
    pub fn parse(raw: &str) -> Self {
        let slots = raw
            .split(',')
            .filter(|s| !s.is_empty())
            .map(TimeSlot::from)
            .collect();
        Self(slots)
    }

    /// True iff every slot in `self` is present in `available`.
    ///
    /// The empty set is vacuously contained in any set, including the
    /// empty one: a course with no declared meeting times always fits.
    pub fn contained_in(&self, available: &SlotSet) -> bool {
        self.0.is_subset(&available.0)
    }

    pub fn insert(&mut self, slot: TimeSlot) {
        self.0.insert(slot);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<TimeSlot> for SlotSet {
    fn from_iter<I: IntoIterator<Item = TimeSlot>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for SlotSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(TimeSlot::from).collect()
    }
}
