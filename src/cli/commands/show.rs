use std::collections::HashMap;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::Db;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::utils::date;

/// Show the entries of one date, ordered by start time.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { date, long } = cmd {
        let d = match date {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        let db = Db::open(&cfg.database)?;
        init_db(&db.conn)?;
        let entries = queries::load_entries_by_date(&db.conn, d)?;

        if entries.is_empty() {
            println!("No entries for {}", d.format("%Y-%m-%d"));
            return Ok(());
        }

        if *long {
            // Resolve ids against the mirror; an id the mirror does not
            // know yet is shown bare instead of failing the listing.
            let departments: HashMap<i64, String> = queries::list_departments(&db.conn)?
                .into_iter()
                .map(|dep| (dep.id, dep.name))
                .collect();
            let projects: HashMap<i64, String> = queries::list_projects(&db.conn)?
                .into_iter()
                .map(|p| (p.id, p.name))
                .collect();

            println!(
                "{:<4} {} {:<10} {:<5} {:<5} {:<28} {:<28} {}",
                "ID", "B", "DATE", "START", "END", "DEPARTMENT", "PROJECT", "DESCRIPTION"
            );
            for e in &entries {
                let dep = departments
                    .get(&e.department_id)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", e.department_id));
                let proj = projects
                    .get(&e.project_id)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", e.project_id));
                println!(
                    "{:<4} {} {:<10} {:<5} {:<5} {:<28} {:<28} {}",
                    e.id,
                    if e.billable { "X" } else { " " },
                    e.date_str(),
                    e.start_str(),
                    e.end_str(),
                    dep,
                    proj,
                    e.description,
                );
            }
        } else {
            println!(
                "{:<4} {} {:<10} {:<5} {:<5} {:>5} {:>5} {:>5} {}",
                "ID", "B", "DATE", "START", "END", "DEPT", "PROJ", "TASK", "DESCRIPTION"
            );
            for e in &entries {
                println!(
                    "{:<4} {} {:<10} {:<5} {:<5} {:>5} {:>5} {:>5} {}",
                    e.id,
                    if e.billable { "X" } else { " " },
                    e.date_str(),
                    e.start_str(),
                    e.end_str(),
                    e.department_id,
                    e.project_id,
                    e.task_id,
                    e.description,
                );
            }
        }
    }
    Ok(())
}
