//! The round-based greedy assignment engine.
//!
//! # Algorithm
//!
//! 1. Shuffle the participant processing order once with the seeded
//!    permutation.
//! 2. Run one round per preference rank. Each round stable-sorts the
//!    order by priority descending, gives every unfinished participant
//!    one attempt at their rank-`r` choice, then reverses the order.
//! 3. A choice lands in the first offering of that name, taken in
//!    fill-policy order, that has room and passes the participant's
//!    slot, repeat, and topic guards.
//!
//! The stable sort keeps equal-priority participants in the current
//! relative order (the shuffle's order on round 0, the reversed
//! previous order afterwards), which spreads tie-break advantage evenly
//! across rounds.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::models::{Offering, Participant, Placement};
use crate::shuffle;

use super::AllocationReport;

/// Which offering takes a participant when several of the preferred
/// name could.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillPolicy {
    /// Fill emptiest offerings first.
    #[default]
    LoadBalance,
    /// Fill fullest offerings first.
    PackTight,
}

/// Round-based greedy allocator.
///
/// Takes exclusive, temporary ownership of the offering and participant
/// collections for the duration of one [`allocate`](Allocator::allocate)
/// call, appending to rosters and schedules in place. Runs are
/// deterministic: identical input and seed always produce identical
/// output.
///
/// # Example
///
/// ```
/// use campalloc::allocator::Allocator;
/// use campalloc::models::{Offering, Participant};
///
/// let mut offerings = vec![Offering::new("Archery", 1, 2)];
/// let mut participants = vec![
///     Participant::new("Ada").with_preferences(vec!["Archery".into()]),
/// ];
///
/// let report = Allocator::new().allocate(&mut offerings, &mut participants);
/// assert_eq!(report.total_filled(), 1);
/// assert_eq!(offerings[0].roster, vec!["Ada".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct Allocator {
    policy: FillPolicy,
    seed: u64,
}

impl Allocator {
    /// Creates an allocator with the load-balance policy and the stock
    /// seed.
    pub fn new() -> Self {
        Self {
            policy: FillPolicy::LoadBalance,
            seed: shuffle::DEFAULT_SEED,
        }
    }

    /// Sets the fill policy for the whole run.
    pub fn with_policy(mut self, policy: FillPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Assigns participants to offerings over one round per preference
    /// rank.
    ///
    /// Rosters and schedules are appended in place; schedules are
    /// sorted by slot afterwards. Always runs to completion; anything
    /// that could not be placed is reported, never raised.
    pub fn allocate(
        &self,
        offerings: &mut [Offering],
        participants: &mut [Participant],
    ) -> AllocationReport {
        let slot_count = offerings.iter().map(|o| o.slot).max().unwrap_or(0) as usize;
        let round_count = offerings
            .iter()
            .map(|o| o.name.as_str())
            .collect::<HashSet<_>>()
            .len();

        let mut order = shuffle::permutation(self.seed, participants.len());

        let mut round_fills = Vec::with_capacity(round_count);
        for round in 0..round_count {
            // Stable: equal priorities keep the current relative order
            order.sort_by_key(|&pi| Reverse(participants[pi].priority));

            let mut filled = 0;
            for &pi in &order {
                if participants[pi].is_fully_scheduled(slot_count) {
                    continue;
                }
                let Some(preferred) = participants[pi].preferences.get(round).cloned() else {
                    continue;
                };
                if let Some(oi) = self.select_offering(offerings, &participants[pi], &preferred) {
                    let placement = Placement::from(&offerings[oi]);
                    offerings[oi].roster.push(participants[pi].name.clone());
                    participants[pi].schedule.push(placement);
                    filled += 1;
                }
            }
            tracing::debug!(round, filled, "allocation round complete");
            round_fills.push(filled);

            order.reverse();
        }

        for participant in participants.iter_mut() {
            participant.schedule.sort_by_key(|p| p.slot);
        }

        self.build_report(round_fills, offerings, participants, slot_count)
    }

    /// First offering in fill-policy order that matches the preferred
    /// name, has room, and passes the participant's eligibility guards.
    fn select_offering(
        &self,
        offerings: &[Offering],
        participant: &Participant,
        preferred: &str,
    ) -> Option<usize> {
        let mut ordered: Vec<usize> = (0..offerings.len()).collect();
        match self.policy {
            FillPolicy::LoadBalance => ordered.sort_by_key(|&oi| offerings[oi].roster.len()),
            FillPolicy::PackTight => {
                ordered.sort_by_key(|&oi| Reverse(offerings[oi].roster.len()));
            }
        }

        ordered.into_iter().find(|&oi| {
            let offering = &offerings[oi];
            offering.name == preferred && offering.has_room() && participant.may_take(offering)
        })
    }

    fn build_report(
        &self,
        round_fills: Vec<usize>,
        offerings: &[Offering],
        participants: &[Participant],
        slot_count: usize,
    ) -> AllocationReport {
        let mut report = AllocationReport {
            round_fills,
            ..Default::default()
        };

        for participant in participants {
            if !participant.is_fully_scheduled(slot_count) {
                tracing::warn!(
                    participant = %participant.name,
                    scheduled = participant.schedule.len(),
                    slot_count,
                    "schedule incomplete"
                );
                report.incomplete.push(participant.name.clone());
            }
        }

        for offering in offerings {
            if !offering.meets_minimum() {
                tracing::warn!(
                    offering = %offering.name,
                    slot = offering.slot,
                    roster = offering.roster.len(),
                    "roster below minimum"
                );
                report.under_minimum.push((offering.name.clone(), offering.slot));
            }
        }

        // Re-check the topic guard over the finished schedules. A hit
        // here means the assignment loop itself is broken.
        for participant in participants {
            let mut topics = HashSet::new();
            let duplicated = participant
                .schedule
                .iter()
                .any(|p| !p.topic.is_empty() && !topics.insert(p.topic.as_str()));
            if duplicated {
                tracing::error!(
                    participant = %participant.name,
                    "duplicate topic in final schedule"
                );
                report.topic_conflicts.push(participant.name.clone());
            }
        }

        report
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn schedule_names(participant: &Participant) -> Vec<&str> {
        participant
            .schedule
            .iter()
            .map(|p| p.offering.as_str())
            .collect()
    }

    #[test]
    fn test_priority_contest_end_to_end() {
        // Two slots: A and B (slot 1, one seat each), C (slot 2, two
        // seats). The higher-priority participant wins the contested
        // first choice; the other recovers via later ranks.
        let mut offerings = vec![
            Offering::new("A", 1, 1),
            Offering::new("B", 1, 1),
            Offering::new("C", 2, 2),
        ];
        let mut participants = vec![
            Participant::new("P1")
                .with_priority(2)
                .with_preferences(prefs(&["A", "C", "B"])),
            Participant::new("P2")
                .with_priority(1)
                .with_preferences(prefs(&["A", "C", "B"])),
        ];

        let report = Allocator::new().allocate(&mut offerings, &mut participants);

        assert_eq!(offerings[0].roster, vec!["P1".to_string()]);
        assert_eq!(schedule_names(&participants[0]), vec!["A", "C"]);
        assert_eq!(schedule_names(&participants[1]), vec!["B", "C"]);
        assert_eq!(report.round_fills, vec![1, 2, 1]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_capacity_and_slot_invariants() {
        let mut offerings = vec![
            Offering::new("Archery", 1, 2),
            Offering::new("Chess", 1, 2),
            Offering::new("Pottery", 2, 2),
            Offering::new("Hiking", 2, 2),
        ];
        let all = prefs(&["Archery", "Chess", "Pottery", "Hiking"]);
        let mut participants = vec![
            Participant::new("Ada").with_preferences(all.clone()),
            Participant::new("Grace").with_preferences(all.clone()),
            Participant::new("Edsger").with_preferences(all.clone()),
            Participant::new("Alan").with_preferences(all),
        ];

        let report = Allocator::new().allocate(&mut offerings, &mut participants);

        for offering in &offerings {
            assert!(offering.roster.len() <= offering.capacity);
        }
        for participant in &participants {
            let slots: Vec<u32> = participant.schedule.iter().map(|p| p.slot).collect();
            let unique: HashSet<u32> = slots.iter().copied().collect();
            assert_eq!(slots.len(), unique.len(), "duplicate slot in schedule");
            assert_eq!(participant.schedule.len(), 2);
        }
        assert!(report.is_clean());
        assert_eq!(report.total_filled(), 8);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let offerings = vec![
            Offering::new("Archery", 1, 2),
            Offering::new("Chess", 1, 2),
            Offering::new("Pottery", 2, 3),
            Offering::new("Hiking", 2, 1),
        ];
        let all = prefs(&["Pottery", "Archery", "Hiking", "Chess"]);
        let participants: Vec<Participant> = ["Ada", "Grace", "Edsger", "Alan"]
            .iter()
            .map(|name| Participant::new(*name).with_preferences(all.clone()))
            .collect();

        let mut offerings_a = offerings.clone();
        let mut participants_a = participants.clone();
        let report_a = Allocator::new().allocate(&mut offerings_a, &mut participants_a);

        let mut offerings_b = offerings;
        let mut participants_b = participants;
        let report_b = Allocator::new().allocate(&mut offerings_b, &mut participants_b);

        for (a, b) in offerings_a.iter().zip(&offerings_b) {
            assert_eq!(a.roster, b.roster);
        }
        for (a, b) in participants_a.iter().zip(&participants_b) {
            assert_eq!(a.schedule, b.schedule);
        }
        assert_eq!(report_a.round_fills, report_b.round_fills);
    }

    #[test]
    fn test_reversal_balances_equal_priorities() {
        // Both want the same single seat each round. Whoever loses
        // round 0 goes first in round 1, so each ends up with exactly
        // one placement.
        let mut offerings = vec![Offering::new("G1", 1, 1), Offering::new("G2", 2, 1)];
        let mut participants = vec![
            Participant::new("Ada").with_preferences(prefs(&["G1", "G2"])),
            Participant::new("Grace").with_preferences(prefs(&["G1", "G2"])),
        ];

        let report = Allocator::new().allocate(&mut offerings, &mut participants);

        assert_eq!(participants[0].schedule.len(), 1);
        assert_eq!(participants[1].schedule.len(), 1);
        assert_ne!(
            participants[0].schedule[0], participants[1].schedule[0],
            "each seat goes to a different participant"
        );
        assert_eq!(report.round_fills, vec![1, 1]);
        assert_eq!(report.incomplete.len(), 2);
    }

    #[test]
    fn test_history_blocks_retake() {
        let mut offerings = vec![Offering::new("Pottery", 1, 5), Offering::new("Chess", 1, 5)];
        let mut participants = vec![Participant::new("Ada")
            .with_history(vec!["Pottery".into()])
            .with_preferences(prefs(&["Pottery", "Chess"]))];

        Allocator::new().allocate(&mut offerings, &mut participants);

        assert_eq!(schedule_names(&participants[0]), vec!["Chess"]);
        assert!(offerings[0].roster.is_empty());
    }

    #[test]
    fn test_repeatable_allows_retake() {
        let mut offerings = vec![
            Offering::new("Pottery", 1, 5).with_repeatable(true),
            Offering::new("Chess", 1, 5),
        ];
        let mut participants = vec![Participant::new("Ada")
            .with_history(vec!["Pottery".into()])
            .with_preferences(prefs(&["Pottery", "Chess"]))];

        Allocator::new().allocate(&mut offerings, &mut participants);

        assert_eq!(schedule_names(&participants[0]), vec!["Pottery"]);
    }

    #[test]
    fn test_topic_exclusion() {
        let mut offerings = vec![
            Offering::new("Pottery I", 1, 5).with_topic("pottery"),
            Offering::new("Pottery II", 2, 5).with_topic("pottery"),
            Offering::new("Chess", 2, 5),
        ];
        let mut participants = vec![Participant::new("Ada").with_preferences(prefs(&[
            "Pottery I",
            "Pottery II",
            "Chess",
        ]))];

        let report = Allocator::new().allocate(&mut offerings, &mut participants);

        assert_eq!(schedule_names(&participants[0]), vec!["Pottery I", "Chess"]);
        assert!(report.topic_conflicts.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_load_balance_spreads_same_name() {
        let mut offerings = vec![Offering::new("Art", 1, 2), Offering::new("Art", 2, 2)];
        let mut participants = vec![
            Participant::new("Ada")
                .with_priority(2)
                .with_preferences(prefs(&["Art"])),
            Participant::new("Grace")
                .with_priority(1)
                .with_preferences(prefs(&["Art"])),
        ];

        Allocator::new().allocate(&mut offerings, &mut participants);

        assert_eq!(offerings[0].roster, vec!["Ada".to_string()]);
        assert_eq!(offerings[1].roster, vec!["Grace".to_string()]);
    }

    #[test]
    fn test_pack_tight_fills_same_name() {
        let mut offerings = vec![Offering::new("Art", 1, 2), Offering::new("Art", 2, 2)];
        let mut participants = vec![
            Participant::new("Ada")
                .with_priority(2)
                .with_preferences(prefs(&["Art"])),
            Participant::new("Grace")
                .with_priority(1)
                .with_preferences(prefs(&["Art"])),
        ];

        Allocator::new()
            .with_policy(FillPolicy::PackTight)
            .allocate(&mut offerings, &mut participants);

        assert_eq!(
            offerings[0].roster,
            vec!["Ada".to_string(), "Grace".to_string()]
        );
        assert!(offerings[1].roster.is_empty());
    }

    #[test]
    fn test_partial_schedule_reported_not_raised() {
        // Aggregate slot capacity is sufficient, but Grace only ranked
        // the offering that fills before she is served.
        let mut offerings = vec![Offering::new("X", 1, 1), Offering::new("Y", 1, 1)];
        let mut participants = vec![
            Participant::new("Ada")
                .with_priority(5)
                .with_preferences(prefs(&["X", "Y"])),
            Participant::new("Grace").with_preferences(prefs(&["X"])),
        ];

        let report = Allocator::new().allocate(&mut offerings, &mut participants);

        assert_eq!(report.incomplete, vec!["Grace".to_string()]);
        assert_eq!(offerings[0].roster, vec!["Ada".to_string()]);
        assert!(offerings[1].roster.is_empty());
    }

    #[test]
    fn test_under_minimum_reported() {
        let mut offerings = vec![
            Offering::new("A", 1, 4).with_min_capacity(2),
            Offering::new("B", 1, 4).with_min_capacity(2),
        ];
        let mut participants = vec![
            Participant::new("Ada").with_preferences(prefs(&["A", "B"])),
            Participant::new("Grace").with_preferences(prefs(&["A", "B"])),
        ];

        let report = Allocator::new().allocate(&mut offerings, &mut participants);

        assert_eq!(report.under_minimum, vec![("B".to_string(), 1)]);
        assert!(report.incomplete.is_empty());
        assert!(!report.is_clean());
    }

    #[test]
    fn test_schedule_sorted_by_slot() {
        // Assigned slot 2 first, slot 1 second; the post-pass sorts
        let mut offerings = vec![Offering::new("Late", 2, 1), Offering::new("Early", 1, 1)];
        let mut participants =
            vec![Participant::new("Ada").with_preferences(prefs(&["Late", "Early"]))];

        Allocator::new().allocate(&mut offerings, &mut participants);

        let slots: Vec<u32> = participants[0].schedule.iter().map(|p| p.slot).collect();
        assert_eq!(slots, vec![1, 2]);
    }

    #[test]
    fn test_empty_input() {
        let report = Allocator::new().allocate(&mut [], &mut []);
        assert!(report.round_fills.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_custom_seed_still_deterministic() {
        let offerings = vec![Offering::new("A", 1, 1), Offering::new("B", 1, 1)];
        let participants = vec![
            Participant::new("Ada").with_preferences(prefs(&["A", "B"])),
            Participant::new("Grace").with_preferences(prefs(&["A", "B"])),
        ];

        let mut offerings_a = offerings.clone();
        let mut participants_a = participants.clone();
        Allocator::new()
            .with_seed(7)
            .allocate(&mut offerings_a, &mut participants_a);

        let mut offerings_b = offerings;
        let mut participants_b = participants;
        Allocator::new()
            .with_seed(7)
            .allocate(&mut offerings_b, &mut participants_b);

        assert_eq!(offerings_a[0].roster, offerings_b[0].roster);
        assert_eq!(offerings_a[1].roster, offerings_b[1].roster);
    }
}
