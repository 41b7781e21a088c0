//! Offering and catalog models.
//!
//! An offering is one activity instance bound to a single time slot.
//! An activity that runs in several slots is described once as a
//! `CatalogEntry` and expanded into independent per-slot offerings
//! before validation or allocation.

use serde::{Deserialize, Serialize};

/// One activity instance bound to a single time slot.
///
/// Offering names are not unique across slots: the same activity may run
/// in several periods, each period being its own `Offering` with its own
/// roster. Within one slot, leaders and locations must be unique (the
/// validator enforces this).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offering {
    /// Activity name, shared by sibling offerings in other slots.
    pub name: String,
    /// Time slot this offering occupies (1-based).
    pub slot: u32,
    /// Maximum roster size.
    pub capacity: usize,
    /// Minimum viable roster size. `None` = no minimum.
    pub min_capacity: Option<usize>,
    /// Person running the offering.
    pub leader: String,
    /// Where the offering meets.
    pub location: String,
    /// Whether a participant who already completed this activity may be
    /// assigned to it again.
    pub repeatable: bool,
    /// Subject grouping label. Offerings sharing a non-empty topic are
    /// mutually exclusive for any one participant (two levels of the
    /// same subject). Empty = no grouping.
    pub topic: String,
    /// Names of assigned participants, in assignment order.
    /// Appended to only by the allocation engine.
    pub roster: Vec<String>,
}

impl Offering {
    /// Creates an offering with the given name, slot, and capacity.
    pub fn new(name: impl Into<String>, slot: u32, capacity: usize) -> Self {
        Self {
            name: name.into(),
            slot,
            capacity,
            min_capacity: None,
            leader: String::new(),
            location: String::new(),
            repeatable: false,
            topic: String::new(),
            roster: Vec::new(),
        }
    }

    /// Sets the leader.
    pub fn with_leader(mut self, leader: impl Into<String>) -> Self {
        self.leader = leader.into();
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the minimum viable roster size.
    pub fn with_min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = Some(min_capacity);
        self
    }

    /// Sets whether previous completers may re-enroll.
    pub fn with_repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }

    /// Sets the subject grouping topic.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Whether the roster has room for another participant.
    pub fn has_room(&self) -> bool {
        self.roster.len() < self.capacity
    }

    /// Remaining roster space.
    pub fn open_seats(&self) -> usize {
        self.capacity.saturating_sub(self.roster.len())
    }

    /// Whether the roster meets its minimum, if one is set.
    pub fn meets_minimum(&self) -> bool {
        self.min_capacity.map_or(true, |min| self.roster.len() >= min)
    }
}

/// A slot-free activity definition from the catalog.
///
/// One entry describes an activity that may run in any number of slots;
/// [`expand`](CatalogEntry::expand) produces one independent [`Offering`]
/// per target slot, each owning its own roster.
///
/// # Example
/// ```
/// use campalloc::models::CatalogEntry;
///
/// let offerings = CatalogEntry::new("Archery", 12)
///     .with_leader("Robin")
///     .with_location("Range")
///     .expand(&[1, 3]);
/// assert_eq!(offerings.len(), 2);
/// assert_eq!(offerings[0].slot, 1);
/// assert_eq!(offerings[1].slot, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Activity name.
    pub name: String,
    /// Maximum roster size per slot.
    pub capacity: usize,
    /// Minimum viable roster size per slot. `None` = no minimum.
    pub min_capacity: Option<usize>,
    /// Person running the activity.
    pub leader: String,
    /// Where the activity meets.
    pub location: String,
    /// Whether previous completers may re-enroll.
    pub repeatable: bool,
    /// Subject grouping label. Empty = no grouping.
    pub topic: String,
}

impl CatalogEntry {
    /// Creates a catalog entry with the given name and per-slot capacity.
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
            min_capacity: None,
            leader: String::new(),
            location: String::new(),
            repeatable: false,
            topic: String::new(),
        }
    }

    /// Sets the leader.
    pub fn with_leader(mut self, leader: impl Into<String>) -> Self {
        self.leader = leader.into();
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the minimum viable roster size.
    pub fn with_min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = Some(min_capacity);
        self
    }

    /// Sets whether previous completers may re-enroll.
    pub fn with_repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }

    /// Sets the subject grouping topic.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Produces one independent offering per target slot.
    pub fn expand(&self, slots: &[u32]) -> Vec<Offering> {
        slots
            .iter()
            .map(|&slot| Offering {
                name: self.name.clone(),
                slot,
                capacity: self.capacity,
                min_capacity: self.min_capacity,
                leader: self.leader.clone(),
                location: self.location.clone(),
                repeatable: self.repeatable,
                topic: self.topic.clone(),
                roster: Vec::new(),
            })
            .collect()
    }
}
