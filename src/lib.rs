pub mod channel;
pub mod config;
pub mod http;
pub mod persist;
pub mod source;
pub mod update;
pub mod version;
