use crate::cli::parser::{Commands, SettingsAction};
use crate::config::Config;
use crate::core::settings::SettingsLogic;
use crate::db::pool::DbPool;
use crate::db::settings::{get_all_settings, get_setting};
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::colors::{GREY, RESET};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Settings { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::open_initialized(&cfg.database)?;

    match action {
        SettingsAction::List => {
            let mut table = Table::new(vec![Column::new("Key"), Column::new("Value")]);
            for (key, value) in get_all_settings(&pool.conn)? {
                table.add_row(vec![key, value]);
            }
            print!("{}", table.render());
        }

        SettingsAction::Get { key } => {
            let value = get_setting(&pool.conn, key)?;
            if value.is_empty() {
                println!("{GREY}(empty){RESET}");
            } else {
                println!("{}", value);
            }
        }

        SettingsAction::Set { key, value } => {
            SettingsLogic::set(&pool.conn, key, value)?;
            success(format!("{} = '{}'", key, value));
        }

        SettingsAction::Reset => {
            SettingsLogic::reset(&mut pool.conn)?;
            success("Settings restored to defaults.");
        }
    }

    Ok(())
}
