pub mod config;
pub mod credentials;
pub mod input;
pub mod standup;
