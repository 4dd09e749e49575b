pub mod config;
pub mod logging;

pub mod decode;
pub mod har;
pub mod host;
pub mod request_log;
pub mod session;
