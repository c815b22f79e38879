//! Charts module - Count tabulation and chart rendering

pub mod catalog;
mod counts;
mod renderer;

pub use catalog::ChartSpec;
pub use counts::CountTable;
pub use renderer::ChartRenderer;
