//! Color model used by the frame clear.

pub mod color;

pub use color::Color;
