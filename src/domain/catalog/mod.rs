//! Candidate corpus view - per-turn snapshot of retrievable programs.

mod candidate;

pub use candidate::{CandidateItem, Condition};
