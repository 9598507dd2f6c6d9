use serde::Serialize;

pub const DEFAULT_COURSE_COLOR: &str = "#4ECDC4";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub teacher: String,    // ⇔ courses.teacher (TEXT, default '')
    pub location: String,   // ⇔ courses.location (TEXT, default '')
    pub color: String,      // ⇔ courses.color (TEXT, default '#4ECDC4')
    pub created_at: String, // ⇔ courses.created_at (local datetime)
}

/// Fields accepted when creating a course.
#[derive(Debug, Clone, Default)]
pub struct NewCourse {
    pub name: String,
    pub teacher: Option<String>,
    pub location: Option<String>,
    pub color: Option<String>,
}

/// Partial update: `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    pub name: Option<String>,
    pub teacher: Option<String>,
    pub location: Option<String>,
    pub color: Option<String>,
}

impl CourseUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.teacher.is_none() && self.location.is_none() && self.color.is_none()
    }
}
