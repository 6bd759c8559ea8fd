pub mod assignment;
pub mod editor;
pub mod geometry;
pub mod render;
pub mod session;
pub mod tally;
pub mod validation;
