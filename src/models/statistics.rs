use serde::Serialize;
use std::collections::BTreeMap;

/// Coarse part of the day a class starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum DayPeriod {
    #[serde(rename = "上午")]
    Morning,
    #[serde(rename = "中午")]
    Noon,
    #[serde(rename = "下午")]
    Afternoon,
    #[serde(rename = "晚上")]
    Evening,
}

impl DayPeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => DayPeriod::Morning,
            12..=13 => DayPeriod::Noon,
            14..=17 => DayPeriod::Afternoon,
            _ => DayPeriod::Evening,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "上午",
            DayPeriod::Noon => "中午",
            DayPeriod::Afternoon => "下午",
            DayPeriod::Evening => "晚上",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total_courses: i64,
    pub total_hours: f64,     // rounded to one decimal
    pub attendance_rate: f64, // percent, one decimal
    pub weekly_hours: f64,
    pub busiest_day: String,
    pub time_distribution: BTreeMap<DayPeriod, u32>,
}
