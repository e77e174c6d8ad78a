//! Cycles Board — board lifecycle orchestration: creation, rename and
//! relocation, listing, and lookup.

pub mod error;
pub mod seed;
pub mod service;

pub use error::BoardError;
pub use service::{
    BoardListing, BoardPage, BoardService, CreateBoardInput, CreateBoardOutput,
    UpdateBoardInput, UpdateBoardOutput,
};
