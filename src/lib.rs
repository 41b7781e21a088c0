//! Preference-rank allocation engine for multi-period course and camp
//! scheduling.
//!
//! Assigns each member of a population to exactly one activity per time
//! slot, honoring ranked preferences as closely as possible while
//! satisfying hard capacity, conflict, and eligibility constraints.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Offering`, `CatalogEntry`,
//!   `Participant`, `Placement`
//! - **`shuffle`**: Seeded permutation generator and tie-break ranking
//! - **`validation`**: Pre-flight structural checks (duplicate names,
//!   aggregate capacity, leader/location double-booking)
//! - **`allocator`**: The round-based greedy assignment engine
//!
//! # Architecture
//!
//! This crate is the algorithmic core of a larger scheduler. An external
//! collaborator parses raw input into `Offering` and `Participant`
//! values, this crate validates and allocates, and the collaborator
//! formats the mutated records into rosters and schedules. No file,
//! network, or process boundary lives here.
//!
//! # References
//!
//! - Abdulkadiroglu & Sonmez (1998), "Random Serial Dictatorship and the
//!   Core from Random Endowments in House Allocation Problems"
//! - Knuth (1997), "The Art of Computer Programming", Vol. 2, §3.4.2

pub mod allocator;
pub mod models;
pub mod shuffle;
pub mod validation;
