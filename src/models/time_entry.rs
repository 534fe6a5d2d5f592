use chrono::{NaiveDate, NaiveTime};

/// One locally composed timesheet row.
///
/// Department/project/task ids are soft references into the mirrored
/// reference tables; they are not enforced to exist locally because the
/// mirror may be stale while the remote side still knows them.
#[derive(Debug, Clone)]
pub struct TimeEntry {
    pub id: i64,            // ⇔ time_entries.id (local, AUTOINCREMENT)
    pub date: NaiveDate,    // ⇔ time_entries.date (TEXT "YYYY-MM-DD")
    pub start_time: NaiveTime, // ⇔ time_entries.start_time (TEXT "HH:MM")
    pub end_time: NaiveTime,   // ⇔ time_entries.end_time (TEXT "HH:MM")
    pub billable: bool,
    pub department_id: i64,
    pub project_id: i64,
    pub task_id: i64,
    pub description: String,
    pub notes: String,
}

/// Insert shape: everything but the id, which the store assigns.
#[derive(Debug, Clone)]
pub struct NewTimeEntry {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub billable: bool,
    pub department_id: i64,
    pub project_id: i64,
    pub task_id: i64,
    pub description: String,
    pub notes: String,
}

impl TimeEntry {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn start_str(&self) -> String {
        self.start_time.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end_time.format("%H:%M").to_string()
    }
}
