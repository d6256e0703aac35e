pub mod actions;
pub mod config;
pub mod consts;
pub mod decode;
pub mod encode;
pub mod error;
pub mod io;
pub mod payload;
pub mod remote;
pub mod scan;
