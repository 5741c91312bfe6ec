pub mod cli;
pub mod color;
pub mod conf;
pub mod format;
pub mod logging;
pub mod mux;
pub mod separator;
