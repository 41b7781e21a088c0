//! Pre-flight validation for allocation input.
//!
//! Checks structural integrity of the offering and participant sets
//! before the engine touches them. Detects:
//! - Malformed pre-populated schedules
//! - Duplicate participant names
//! - Slots without enough aggregate capacity
//! - Preference names matching no offering (advisory)
//! - Leader and location double-booking within a slot
//!
//! Fatal checks abort immediately with a [`StructuralViolation`]; the
//! engine must not run on input that failed validation. The advisory
//! unknown-preference check is collected into the [`ValidationReport`]
//! and logged, and never halts the run; a retired catalog item must not
//! block scheduling everyone else.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::models::{Offering, Participant};

/// A fatal structural problem in the input.
///
/// Raised by [`validate`] the moment a check fails; allocation must not
/// be attempted afterwards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralViolation {
    /// A participant arrived with an empty offering name already in
    /// their schedule (malformed upstream data).
    #[error("participant '{participant}' has an empty offering name in their schedule")]
    MalformedSchedule { participant: String },

    /// Two participants share a name.
    #[error("duplicate participant name '{name}'")]
    DuplicateParticipant { name: String },

    /// A slot cannot hold the whole population.
    #[error("slot {slot} has total capacity {capacity} for {participants} participants")]
    InsufficientCapacity {
        slot: u32,
        capacity: usize,
        participants: usize,
    },

    /// One leader runs two offerings in the same slot.
    #[error("leader '{leader}' is double-booked in slot {slot}")]
    LeaderConflict { leader: String, slot: u32 },

    /// One location hosts two offerings in the same slot.
    #[error("location '{location}' is double-booked in slot {slot}")]
    LocationConflict { location: String, slot: u32 },
}

/// A preference name that matches no offering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreference {
    /// Who ranked the name.
    pub participant: String,
    /// The name with no matching offering.
    pub preference: String,
}

/// Advisory findings from validation. None of these stop the run.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Preference names that match no offering.
    pub unknown_preferences: Vec<UnknownPreference>,
}

impl ValidationReport {
    /// Whether validation found nothing to report.
    pub fn is_clean(&self) -> bool {
        self.unknown_preferences.is_empty()
    }
}

/// Validates the input for one allocation run.
///
/// Checks run in a fixed order; the first fatal failure is returned
/// immediately. Advisory findings are collected in the report.
///
/// # Returns
/// `Ok(report)` if the input is structurally sound, `Err(violation)` on
/// the first fatal problem.
pub fn validate(
    offerings: &[Offering],
    participants: &[Participant],
) -> Result<ValidationReport, StructuralViolation> {
    // Pre-populated schedules must not carry empty offering names
    for participant in participants {
        if participant.schedule.iter().any(|p| p.offering.is_empty()) {
            return Err(StructuralViolation::MalformedSchedule {
                participant: participant.name.clone(),
            });
        }
    }

    // Participant names are population-unique
    let mut names = HashSet::new();
    for participant in participants {
        if !names.insert(participant.name.as_str()) {
            return Err(StructuralViolation::DuplicateParticipant {
                name: participant.name.clone(),
            });
        }
    }

    // Every slot must be able to hold the whole population
    let mut slot_capacity: HashMap<u32, usize> = HashMap::new();
    for offering in offerings {
        *slot_capacity.entry(offering.slot).or_insert(0) += offering.capacity;
    }
    let mut slots: Vec<u32> = slot_capacity.keys().copied().collect();
    slots.sort_unstable();
    for slot in slots {
        let capacity = slot_capacity[&slot];
        if capacity < participants.len() {
            return Err(StructuralViolation::InsufficientCapacity {
                slot,
                capacity,
                participants: participants.len(),
            });
        }
    }

    // Advisory: preference names should exist in the catalog
    let known: HashSet<&str> = offerings.iter().map(|o| o.name.as_str()).collect();
    let mut report = ValidationReport::default();
    for participant in participants {
        for preference in &participant.preferences {
            if !known.contains(preference.as_str()) {
                tracing::warn!(
                    participant = %participant.name,
                    preference = %preference,
                    "preference matches no offering"
                );
                report.unknown_preferences.push(UnknownPreference {
                    participant: participant.name.clone(),
                    preference: preference.clone(),
                });
            }
        }
    }

    // One offering per leader per slot
    let mut leaders = HashSet::new();
    for offering in offerings {
        if !leaders.insert((offering.slot, offering.leader.as_str())) {
            return Err(StructuralViolation::LeaderConflict {
                leader: offering.leader.clone(),
                slot: offering.slot,
            });
        }
    }

    // One offering per location per slot
    let mut locations = HashSet::new();
    for offering in offerings {
        if !locations.insert((offering.slot, offering.location.as_str())) {
            return Err(StructuralViolation::LocationConflict {
                location: offering.location.clone(),
                slot: offering.slot,
            });
        }
    }

    Ok(report)
}
