//! Participant model.
//!
//! A participant is one member of the population being scheduled, with
//! ranked activity preferences, a completion history for repeat
//! exclusion, and the schedule the allocation engine builds for them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Offering;

/// One schedule entry: an offering a participant has been placed into.
///
/// Denormalized from the offering (name, slot, topic, leader, location)
/// so the schedule can be queried and printed without looking the
/// offering back up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Offering name.
    pub offering: String,
    /// Slot the offering occupies.
    pub slot: u32,
    /// Subject grouping topic. Empty = no grouping.
    pub topic: String,
    /// Offering leader.
    pub leader: String,
    /// Offering location.
    pub location: String,
}

impl From<&Offering> for Placement {
    fn from(offering: &Offering) -> Self {
        Self {
            offering: offering.name.clone(),
            slot: offering.slot,
            topic: offering.topic.clone(),
            leader: offering.leader.clone(),
            location: offering.location.clone(),
        }
    }
}

/// A member of the population being scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Unique name across the whole population.
    pub name: String,
    /// Group label, used for tie-break ordering and output grouping only.
    pub group: String,
    /// Serving priority (higher = served earlier). Callers may adjust
    /// this before allocation, e.g. demoting returning participants.
    pub priority: i32,
    /// Ranked offering names, best-liked first. One entry per distinct
    /// offering name, ties pre-broken by the shuffle.
    pub preferences: Vec<String>,
    /// Names of activities previously completed (repeat exclusion).
    pub history: HashSet<String>,
    /// Per-slot assignments, built by the allocation engine.
    pub schedule: Vec<Placement>,
}

impl Participant {
    /// Creates a participant with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: String::new(),
            priority: 0,
            preferences: Vec::new(),
            history: HashSet::new(),
            schedule: Vec::new(),
        }
    }

    /// Sets the group label.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Sets the serving priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the ranked preference list.
    pub fn with_preferences(mut self, preferences: Vec<String>) -> Self {
        self.preferences = preferences;
        self
    }

    /// Sets the completion history.
    pub fn with_history(mut self, completed: Vec<String>) -> Self {
        self.history = completed.into_iter().collect();
        self
    }

    /// Whether the schedule already occupies the given slot.
    pub fn occupies_slot(&self, slot: u32) -> bool {
        self.schedule.iter().any(|p| p.slot == slot)
    }

    /// Whether the schedule already contains the given non-empty topic.
    pub fn has_topic(&self, topic: &str) -> bool {
        !topic.is_empty() && self.schedule.iter().any(|p| p.topic == topic)
    }

    /// Whether this participant is eligible for the offering: its slot
    /// is free, it is repeatable or not yet completed, and its topic is
    /// not already on the schedule. Capacity is the offering's concern,
    /// not checked here.
    pub fn may_take(&self, offering: &Offering) -> bool {
        !self.occupies_slot(offering.slot)
            && (offering.repeatable || !self.history.contains(&offering.name))
            && !self.has_topic(&offering.topic)
    }

    /// Whether every slot up to `slot_count` has a placement.
    pub fn is_fully_scheduled(&self, slot_count: usize) -> bool {
        self.schedule.len() >= slot_count
    }
}
