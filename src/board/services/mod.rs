//! Application services for board reconciliation.

mod controller;

pub use controller::{
    BoardConfig, BoardController, BoardError, BoardResult, DeleteOutcome, DragRejection,
    DropOutcome, DropRejection, MoveResolution, SaveOutcome, StagedMove,
};
