pub mod extract;
pub mod rank;
pub mod select;
pub mod swatch;
