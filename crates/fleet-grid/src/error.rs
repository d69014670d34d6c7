//! Grid-subsystem error type.

use thiserror::Error;

use fleet_core::Cell;

/// Errors produced by `fleet-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("layout cell {cell} carries unknown type code {code}")]
    UnknownCode { cell: Cell, code: u8 },

    #[error("layout is {got} cells but {width}x{height} requires {expected}")]
    Dimensions {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },
}

pub type GridResult<T> = Result<T, GridError>;
