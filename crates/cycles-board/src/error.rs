//! Board service error types.

use cycles_core::error::CyclesError;
use cycles_core::id::BoardId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Core(#[from] CyclesError),

    /// The board record exists but its document was never seeded.
    ///
    /// The two creation writes share no transaction, so this window is
    /// surfaced as its own outcome instead of being silently retried; a
    /// reconciliation job can detect and repair un-seeded boards.
    #[error("board {board_id} created but not seeded: {source}")]
    PartiallyCreated {
        board_id: BoardId,
        source: CyclesError,
    },
}

impl From<BoardError> for CyclesError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::Core(e) => e,
            partial @ BoardError::PartiallyCreated { .. } => {
                CyclesError::Backend(partial.to_string())
            }
        }
    }
}
