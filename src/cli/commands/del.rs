use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::Db;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::date;

/// Delete local entries by id or by date.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { entry, date } = cmd {
        let db = Db::open(&cfg.database)?;
        init_db(&db.conn)?;

        if let Some(id) = entry {
            let n = queries::delete_entry_by_id(&db.conn, *id)?;
            if n == 0 {
                warning(format!("No entry with id {}", id));
            } else {
                success(format!("Deleted entry {}", id));
            }
        } else if let Some(s) = date {
            let d = date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?;
            let n = queries::delete_entries_by_date(&db.conn, d)?;
            success(format!(
                "Deleted {} entries from {}",
                n,
                d.format("%Y-%m-%d")
            ));
        } else {
            warning("Nothing to delete: pass --entry ID or --date DATE");
        }
    }
    Ok(())
}
