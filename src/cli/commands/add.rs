use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::validate::validate_entry;
use crate::db::initialize::init_db;
use crate::db::pool::Db;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::NewTimeEntry;
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::time::parse_time_or_err;

/// Compose one entry and store it locally. Validation happens before any
/// store mutation; a rejected entry leaves the database untouched.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        start,
        end,
        project,
        task,
        description,
        date,
        billable,
        dept,
        notes,
    } = cmd
    {
        let d = match date {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };
        let start_time = parse_time_or_err(start)?;
        let end_time = parse_time_or_err(end)?;

        let entry = NewTimeEntry {
            date: d,
            start_time,
            end_time,
            billable: *billable,
            department_id: dept.unwrap_or(cfg.default_department),
            project_id: *project,
            task_id: *task,
            description: description.join(" "),
            notes: notes.clone().unwrap_or_default(),
        };
        validate_entry(&entry)?;

        let db = Db::open(&cfg.database)?;
        init_db(&db.conn)?;
        let id = queries::insert_entry(&db.conn, &entry)?;

        success(format!("Added entry {} on {}", id, d.format("%Y-%m-%d")));
    }
    Ok(())
}
