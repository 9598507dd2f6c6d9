pub mod courses;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod schedule;
pub mod settings;
pub mod statistics;
pub mod stats;
