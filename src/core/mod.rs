pub mod attendance;
pub mod backup;
pub mod config;
pub mod conflict;
pub mod log;
pub mod reminder;
pub mod resolver;
pub mod schedule;
pub mod settings;
pub mod statistics;
pub mod week;
