use serde::Serialize;

/// What the topbar shows at one instant. Recomputed every tick, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    pub display_text: String,
    pub progress: f64,
    pub is_break_time: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            display_text: "暂无课程".to_string(),
            progress: 0.0,
            is_break_time: false,
        }
    }
}
