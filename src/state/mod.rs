pub mod event;
pub mod machine;
pub mod model;
pub mod queue;

pub use event::{SelectionEvent, SelectionEventKind, StateTransition};
pub use machine::SelectionStateMachine;
pub use model::{SelectionPhase, SelectionState};
pub use queue::{SelectionEventQueue, SelectionReporter};
