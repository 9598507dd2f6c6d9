use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekInfo {
    pub week: u32,
    pub semester_start_date: String, // '' when no start date is configured
    pub is_calculated: bool,
}
