//! One module per exercise; each extends `WorksheetService` with the
//! handlers for that exercise's user actions.

pub mod coloring;
pub mod comparison;
pub mod counting;
pub mod matching;

pub use coloring::ProperFraction;
