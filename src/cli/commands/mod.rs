pub mod attendance;
pub mod backup;
pub mod config;
pub mod course;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod remind;
pub mod schedule;
pub mod settings;
pub mod stats;
pub mod topbar;
pub mod week;
