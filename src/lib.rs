pub mod app;
pub mod displays;
pub mod tally;
pub mod vision;
