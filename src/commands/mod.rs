pub mod chart;
pub mod sectors;
pub mod serve;
