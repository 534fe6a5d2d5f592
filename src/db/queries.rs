use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection, Result, Row};

use crate::errors::{AppError, AppResult};
use crate::models::reference::{Department, Project, Task};
use crate::models::template::{Action, NewAction, Template};
use crate::models::time_entry::{NewTimeEntry, TimeEntry};

// ---------------------------------------------------------------------------
// Mirrored reference entities: upsert-by-id is the ONLY mutation mode.
// A given id maps to exactly one row; refresh overwrites, never duplicates.
// ---------------------------------------------------------------------------

pub fn upsert_department(conn: &Connection, id: i64, name: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO departments (id, name) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET name = excluded.name",
        params![id, name],
    )?;
    Ok(())
}

pub fn upsert_project(conn: &Connection, id: i64, name: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO projects (id, name) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET name = excluded.name",
        params![id, name],
    )?;
    Ok(())
}

pub fn upsert_task(conn: &Connection, id: i64, project_id: i64, name: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO tasks (id, project_id, name) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET project_id = excluded.project_id,
                                       name       = excluded.name",
        params![id, project_id, name],
    )?;
    Ok(())
}

pub fn list_departments(conn: &Connection) -> AppResult<Vec<Department>> {
    let mut stmt = conn.prepare("SELECT id, name FROM departments ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Department {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_projects(conn: &Connection) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare("SELECT id, name FROM projects ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Project {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn tasks_for_project(conn: &Connection, project_id: i64) -> AppResult<Vec<Task>> {
    let mut stmt = conn
        .prepare("SELECT id, project_id, name FROM tasks WHERE project_id = ?1 ORDER BY id ASC")?;
    let rows = stmt.query_map([project_id], map_task)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn search_departments(conn: &Connection, needle: &str) -> AppResult<Vec<Department>> {
    let mut stmt =
        conn.prepare("SELECT id, name FROM departments WHERE name LIKE ?1 ORDER BY id ASC")?;
    let pattern = format!("%{}%", needle);
    let rows = stmt.query_map([pattern], |row| {
        Ok(Department {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn search_projects(conn: &Connection, needle: &str) -> AppResult<Vec<Project>> {
    let mut stmt =
        conn.prepare("SELECT id, name FROM projects WHERE name LIKE ?1 ORDER BY id ASC")?;
    let pattern = format!("%{}%", needle);
    let rows = stmt.query_map([pattern], |row| {
        Ok(Project {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn search_tasks(conn: &Connection, needle: &str) -> AppResult<Vec<Task>> {
    let mut stmt = conn
        .prepare("SELECT id, project_id, name FROM tasks WHERE name LIKE ?1 ORDER BY id ASC")?;
    let pattern = format!("%{}%", needle);
    let rows = stmt.query_map([pattern], map_task)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_task(row: &Row) -> Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
    })
}

// ---------------------------------------------------------------------------
// Time entries: always insert with a fresh local id, never upsert.
// ---------------------------------------------------------------------------

pub fn insert_entry(conn: &Connection, entry: &NewTimeEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO time_entries
            (date, start_time, end_time, billable,
             department_id, project_id, task_id, description, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            entry.date.format("%Y-%m-%d").to_string(),
            entry.start_time.format("%H:%M").to_string(),
            entry.end_time.format("%H:%M").to_string(),
            entry.billable as i64,
            entry.department_id,
            entry.project_id,
            entry.task_id,
            entry.description,
            entry.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_entry_by_id(conn: &Connection, id: i64) -> AppResult<Option<TimeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, start_time, end_time, billable,
                department_id, project_id, task_id, description, notes
         FROM time_entries WHERE id = ?1",
    )?;
    let mut rows = stmt.query_map([id], map_entry)?;

    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

pub fn load_entries_by_date(conn: &Connection, date: NaiveDate) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, start_time, end_time, billable,
                department_id, project_id, task_id, description, notes
         FROM time_entries
         WHERE date = ?1
         ORDER BY start_time ASC",
    )?;
    let date_str = date.format("%Y-%m-%d").to_string();
    let rows = stmt.query_map([date_str], map_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Inclusive date-range load, the shape the week selector needs.
pub fn load_entries_in_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, start_time, end_time, billable,
                department_id, project_id, task_id, description, notes
         FROM time_entries
         WHERE date >= ?1 AND date <= ?2
         ORDER BY date ASC, start_time ASC",
    )?;
    let rows = stmt.query_map(
        params![
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
        ],
        map_entry,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_entry_by_id(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM time_entries WHERE id = ?1", [id])?;
    Ok(n)
}

pub fn delete_entries_by_date(conn: &Connection, date: NaiveDate) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM time_entries WHERE date = ?1",
        [date.format("%Y-%m-%d").to_string()],
    )?;
    Ok(n)
}

fn map_entry(row: &Row) -> Result<TimeEntry> {
    let date_str: String = row.get(1)?;
    let start_str: String = row.get(2)?;
    let end_str: String = row.get(3)?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;
    let start_time = NaiveTime::parse_from_str(&start_str, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(start_str.clone())),
        )
    })?;
    let end_time = NaiveTime::parse_from_str(&end_str, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(end_str.clone())),
        )
    })?;

    Ok(TimeEntry {
        id: row.get(0)?,
        date,
        start_time,
        end_time,
        billable: row.get::<_, i64>(4)? != 0,
        department_id: row.get(5)?,
        project_id: row.get(6)?,
        task_id: row.get(7)?,
        description: row.get(8)?,
        notes: row.get(9)?,
    })
}

// ---------------------------------------------------------------------------
// Templates and actions
// ---------------------------------------------------------------------------

pub fn insert_template(conn: &Connection, name: &str, description: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO templates (name, description) VALUES (?1, ?2)",
        params![name, description],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_template_by_name(conn: &Connection, name: &str) -> AppResult<Option<Template>> {
    let mut stmt =
        conn.prepare("SELECT id, name, description FROM templates WHERE name = ?1")?;
    let mut rows = stmt.query_map([name], map_template)?;

    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

pub fn list_templates(conn: &Connection) -> AppResult<Vec<Template>> {
    let mut stmt = conn.prepare("SELECT id, name, description FROM templates ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_template)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn search_templates(conn: &Connection, needle: &str) -> AppResult<Vec<Template>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description FROM templates
         WHERE name LIKE ?1 OR description LIKE ?1
         ORDER BY id ASC",
    )?;
    let pattern = format!("%{}%", needle);
    let rows = stmt.query_map([pattern], map_template)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_template(row: &Row) -> Result<Template> {
    Ok(Template {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

pub fn insert_action(conn: &Connection, action: &NewAction) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO actions
            (template_id, stack, duration_minutes,
             department_id, project_id, task_id, billable, description, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            action.template_id,
            action.stack,
            action.duration_minutes,
            action.department_id,
            action.project_id,
            action.task_id,
            action.billable as i64,
            action.description,
            action.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Actions in stack order; expansion depends on this ordering.
pub fn actions_for_template(conn: &Connection, template_id: i64) -> AppResult<Vec<Action>> {
    let mut stmt = conn.prepare(
        "SELECT id, template_id, stack, duration_minutes,
                department_id, project_id, task_id, billable, description, notes
         FROM actions
         WHERE template_id = ?1
         ORDER BY stack ASC",
    )?;
    let rows = stmt.query_map([template_id], |row| {
        Ok(Action {
            id: row.get(0)?,
            template_id: row.get(1)?,
            stack: row.get(2)?,
            duration_minutes: row.get(3)?,
            department_id: row.get(4)?,
            project_id: row.get(5)?,
            task_id: row.get(6)?,
            billable: row.get::<_, i64>(7)? != 0,
            description: row.get(8)?,
            notes: row.get(9)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn load_settings_map(conn: &Connection) -> AppResult<HashMap<String, String>> {
    let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut out = HashMap::new();
    for r in rows {
        let (k, v) = r?;
        out.insert(k, v);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::pool::Db;

    fn entry(date: &str, start: &str, end: &str) -> NewTimeEntry {
        NewTimeEntry {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end_time: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
            billable: false,
            department_id: 1,
            project_id: 2,
            task_id: 3,
            description: "desc".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn upsert_is_idempotent_and_overwrites() {
        let db = Db::open_in_memory().unwrap();
        init_db(&db.conn).unwrap();

        upsert_department(&db.conn, 7, "Infrastructure").unwrap();
        upsert_department(&db.conn, 7, "Infrastructure").unwrap();

        let deps = list_departments(&db.conn).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "Infrastructure");

        // Overwrite by id replaces the row in place.
        upsert_department(&db.conn, 7, "Infra & Ops").unwrap();
        let deps = list_departments(&db.conn).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "Infra & Ops");
    }

    #[test]
    fn task_upsert_can_move_between_projects() {
        let db = Db::open_in_memory().unwrap();
        init_db(&db.conn).unwrap();

        upsert_project(&db.conn, 1, "Alpha").unwrap();
        upsert_project(&db.conn, 2, "Beta").unwrap();
        upsert_task(&db.conn, 100, 1, "Design").unwrap();
        upsert_task(&db.conn, 100, 2, "Design").unwrap();

        assert!(tasks_for_project(&db.conn, 1).unwrap().is_empty());
        let moved = tasks_for_project(&db.conn, 2).unwrap();
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].id, 100);
    }

    #[test]
    fn entries_insert_with_fresh_ids_and_range_query_is_inclusive() {
        let db = Db::open_in_memory().unwrap();
        init_db(&db.conn).unwrap();

        let a = insert_entry(&db.conn, &entry("2026-08-02", "09:00", "10:00")).unwrap();
        let b = insert_entry(&db.conn, &entry("2026-08-05", "09:00", "10:00")).unwrap();
        let c = insert_entry(&db.conn, &entry("2026-08-08", "09:00", "10:00")).unwrap();
        let _outside = insert_entry(&db.conn, &entry("2026-08-09", "09:00", "10:00")).unwrap();
        assert!(a < b && b < c);

        let week = load_entries_in_range(
            &db.conn,
            NaiveDate::from_ymd_opt(2026, 8, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 8).unwrap(),
        )
        .unwrap();
        let ids: Vec<i64> = week.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn settings_round_trip() {
        let db = Db::open_in_memory().unwrap();
        init_db(&db.conn).unwrap();

        set_setting(&db.conn, "host", "timehost").unwrap();
        set_setting(&db.conn, "host", "timehost2").unwrap();

        let map = load_settings_map(&db.conn).unwrap();
        assert_eq!(map.get("host").map(String::as_str), Some("timehost2"));
    }
}
