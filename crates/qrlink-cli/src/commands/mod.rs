pub mod actions;
pub mod config;
pub mod generate;
pub mod scan;
pub mod send;
pub mod watch;
