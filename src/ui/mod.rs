pub mod controls;
pub mod grid;
pub mod title;
