//! Color values handed to the context (clear color).

pub mod color;

pub use color::Color;
