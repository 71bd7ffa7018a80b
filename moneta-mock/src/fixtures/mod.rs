pub mod indicators;
pub mod series;
