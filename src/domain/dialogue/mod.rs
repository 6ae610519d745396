//! Dialogue - session state, turn results, and the per-turn orchestrator.

mod orchestrator;
mod session_state;
mod turn;

pub use orchestrator::DialogueOrchestrator;
pub use session_state::SessionState;
pub use turn::{FinalTurn, QuestionTurn, TurnProgress, TurnResult};
