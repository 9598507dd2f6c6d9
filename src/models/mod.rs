pub mod attendance;
pub mod course;
pub mod display;
pub mod schedule;
pub mod statistics;
pub mod week_info;
pub mod weeks;
