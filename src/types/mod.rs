//! Data types shared by the grid, workbook and sources.

mod cell;
mod table;

pub use cell::*;
pub use table::*;
