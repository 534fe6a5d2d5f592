use rusqlite::{Connection, Result};

/// Mirrored reference tables. Ids come from the remote system, so these
/// are plain primary keys with no AUTOINCREMENT.
fn create_reference_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS departments (
            id    INTEGER PRIMARY KEY,
            name  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS projects (
            id    INTEGER PRIMARY KEY,
            name  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id          INTEGER PRIMARY KEY,
            project_id  INTEGER NOT NULL,
            name        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks(project_id);
        "#,
    )?;
    Ok(())
}

/// Locally authored rows; the id is assigned here, never remotely.
fn create_entry_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS time_entries (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            date           TEXT NOT NULL,
            start_time     TEXT NOT NULL,
            end_time       TEXT NOT NULL,
            billable       INTEGER NOT NULL DEFAULT 0,
            department_id  INTEGER NOT NULL,
            project_id     INTEGER NOT NULL,
            task_id        INTEGER NOT NULL,
            description    TEXT NOT NULL DEFAULT '',
            notes          TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_entries_date ON time_entries(date, start_time);
        "#,
    )?;
    Ok(())
}

fn create_template_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS templates (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL UNIQUE,
            description  TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS actions (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            template_id       INTEGER NOT NULL,
            stack             INTEGER NOT NULL,
            duration_minutes  INTEGER NOT NULL,
            department_id     INTEGER NOT NULL,
            project_id        INTEGER NOT NULL,
            task_id           INTEGER NOT NULL,
            billable          INTEGER NOT NULL DEFAULT 0,
            description       TEXT NOT NULL DEFAULT '',
            notes             TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_actions_template ON actions(template_id, stack);
        "#,
    )?;
    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key    TEXT PRIMARY KEY,
            value  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and by every command before touching the
/// store, so an old database picks up new tables transparently.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    create_reference_tables(conn)?;
    create_entry_table(conn)?;
    create_template_tables(conn)?;
    create_settings_table(conn)?;
    Ok(())
}
