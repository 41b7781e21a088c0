//! Round-based greedy allocation.
//!
//! # Algorithm
//!
//! One round per preference rank. Within a round, participants are
//! served highest priority first and each receives at most one
//! placement: their rank-`r` choice, if any offering by that name can
//! still take them. The participant order is reversed between rounds so
//! equal-priority participants trade tie-break advantage from round to
//! round. Rounds never backtrack; a participant whose preferences run
//! out before their schedule fills is reported, not retried.
//!
//! This approximates a serial, priority-respecting allocation without
//! the cost of a full stable-matching search: nobody receives their
//! rank-2 choice in an offering while a higher-priority participant who
//! ranked the same offering first is still waiting.
//!
//! # Reference
//! Abdulkadiroglu & Sonmez (1998), "Random Serial Dictatorship and the
//! Core from Random Endowments in House Allocation Problems"

mod engine;
mod report;

pub use engine::{Allocator, FillPolicy};
pub use report::AllocationReport;
