//! Use-case handlers.

mod advance_turn;

pub use advance_turn::{AdvanceTurnCommand, AdvanceTurnError, AdvanceTurnHandler, AdvanceTurnResult};
