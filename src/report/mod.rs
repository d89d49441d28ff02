pub mod generator;
pub mod stats;

pub use generator::{generate_report, render_outline};
