pub mod download;
pub mod frame;
pub mod indicators;
pub mod series;

pub mod util;
