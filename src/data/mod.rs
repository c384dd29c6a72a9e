//! Built-in datasets: the reference pumping test and synthetic series.

pub mod sample;

pub use sample::*;
