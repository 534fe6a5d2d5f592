use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sync::{self, Selector};
use crate::db::initialize::init_db;
use crate::db::pool::Db;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::settings::Settings;
use crate::remote::session::SessionClient;
use crate::ui::messages::{error, info, success};
use crate::utils::date;

/// Replay local entries to the remote system.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Push { entry, date, week } = cmd {
        let selector = if let Some(id) = entry {
            Selector::Entry(*id)
        } else if let Some(s) = week {
            let anchor = date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?;
            Selector::Week(anchor)
        } else if let Some(s) = date {
            let d = date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?;
            Selector::Date(d)
        } else {
            Selector::Date(date::today())
        };

        let db = Db::open(&cfg.database)?;
        init_db(&db.conn)?;

        let settings = Settings::from_pairs(&queries::load_settings_map(&db.conn)?)?;
        let client = SessionClient::new(settings)?;

        let outcomes = sync::push(&client, &db.conn, selector)?;
        if outcomes.is_empty() {
            info("No entries matched; nothing was sent");
            return Ok(());
        }

        let mut failed = 0usize;
        for outcome in &outcomes {
            match &outcome.result {
                Ok(()) => success(format!("Pushed entry {}", outcome.entry_id)),
                Err(e) => {
                    failed += 1;
                    error(format!("Entry {} failed: {}", outcome.entry_id, e));
                }
            }
        }
        if failed > 0 {
            error(format!(
                "{} of {} entries failed; the ones already pushed stay pushed",
                failed,
                outcomes.len()
            ));
        }
    }
    Ok(())
}
