//! Command-line front end: the headless player and the schedule dump.

pub mod dump;
pub mod play;
