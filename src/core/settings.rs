use crate::db::log::ttlog_soft;
use crate::db::settings::{
    NOTIFICATION_ENABLED, NOTIFICATION_MINUTES, NOTIFICATION_SOUND, SEMESTER_START_DATE,
    TOTAL_WEEKS, reset_settings, set_setting,
};
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_date;
use rusqlite::Connection;

pub struct SettingsLogic;

impl SettingsLogic {
    /// Reject values the services could not interpret. Unknown keys are
    /// stored as given.
    pub fn validate(key: &str, value: &str) -> AppResult<()> {
        match key {
            SEMESTER_START_DATE if !value.is_empty() && parse_date(value).is_none() => {
                Err(AppError::InvalidDate(value.to_string()))
            }
            TOTAL_WEEKS if !matches!(value.parse::<u32>(), Ok(n) if n > 0) => Err(
                AppError::Config(format!("{key} must be a positive integer, got '{value}'")),
            ),
            NOTIFICATION_MINUTES if value.parse::<u32>().is_err() => Err(AppError::Config(
                format!("{key} must be a number of minutes, got '{value}'"),
            )),
            NOTIFICATION_ENABLED | NOTIFICATION_SOUND if value != "true" && value != "false" => {
                Err(AppError::Config(format!(
                    "{key} must be 'true' or 'false', got '{value}'"
                )))
            }
            _ => Ok(()),
        }
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
        Self::validate(key, value)?;
        set_setting(conn, key, value)?;
        ttlog_soft(conn, "settings_set", key, &format!("{key} = '{value}'"));
        Ok(())
    }

    pub fn reset(conn: &mut Connection) -> AppResult<()> {
        reset_settings(conn)?;
        ttlog_soft(conn, "settings_reset", "", "All settings restored to defaults");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_are_checked() {
        assert!(SettingsLogic::validate(SEMESTER_START_DATE, "2025-09-01").is_ok());
        assert!(SettingsLogic::validate(SEMESTER_START_DATE, "").is_ok());
        assert!(SettingsLogic::validate(SEMESTER_START_DATE, "tomorrow").is_err());
        assert!(SettingsLogic::validate(TOTAL_WEEKS, "0").is_err());
        assert!(SettingsLogic::validate(TOTAL_WEEKS, "18").is_ok());
        assert!(SettingsLogic::validate(NOTIFICATION_ENABLED, "yes").is_err());
        assert!(SettingsLogic::validate("theme_mode", "anything").is_ok());
    }
}
