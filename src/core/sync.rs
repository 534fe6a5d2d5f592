//! Two-way traffic between the local store and the remote system.
//!
//! Pull: fetch the day-info page, extract the reference snapshot, merge it
//! into the store by unconditional upsert. Rows that vanished remotely are
//! left alone; the mirror is meant to keep working offline.
//!
//! Push: select local entries by criterion and replay each as one form
//! submission. Nothing marks an entry as pushed, so re-running the same
//! selector resubmits and the remote system decides what to do with the
//! duplicate.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppResult;
use crate::models::snapshot::ReferenceSnapshot;
use crate::models::time_entry::TimeEntry;
use crate::remote::extract::extract;
use crate::remote::payload::{entry_form, OPERATE_PATH};
use crate::remote::session::SessionClient;
use crate::utils::date;

const DAY_INFO_PATH: &str = "/atrweb/DayInfo.asp";

/// Criterion for choosing which local entries to push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// One entry by local id.
    Entry(i64),
    /// Every entry on an exact date.
    Date(NaiveDate),
    /// Every entry in the Sunday..Saturday week containing the date.
    Week(NaiveDate),
}

/// Per-entry push result. A failed entry never rolls back the ones that
/// already went through.
#[derive(Debug)]
pub struct PushOutcome {
    pub entry_id: i64,
    pub result: Result<(), String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub departments: usize,
    pub projects: usize,
    pub tasks: usize,
    pub skipped: usize,
}

/// Resolve a selector to the ordered entry rows it covers.
pub fn resolve(conn: &Connection, selector: Selector) -> AppResult<Vec<TimeEntry>> {
    match selector {
        Selector::Entry(id) => Ok(queries::load_entry_by_id(conn, id)?
            .into_iter()
            .collect()),
        Selector::Date(d) => queries::load_entries_by_date(conn, d),
        Selector::Week(anchor) => {
            let (start, end) = date::week_bounds(anchor);
            queries::load_entries_in_range(conn, start, end)
        }
    }
}

/// Replay the selected entries against the remote system.
///
/// Resolves first: an empty selection performs no network I/O at all and
/// reports success with an empty result set. Session acquisition failure
/// aborts the whole push before any submission.
pub fn push(
    client: &SessionClient,
    conn: &Connection,
    selector: Selector,
) -> AppResult<Vec<PushOutcome>> {
    let entries = resolve(conn, selector)?;
    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let token = client.acquire_session()?;

    let mut outcomes = Vec::with_capacity(entries.len());
    for entry in &entries {
        let form = entry_form(client.employee_id(), entry);
        let result = client
            .post_form(&token, OPERATE_PATH, &form)
            .map(|_| ())
            .map_err(|e| e.to_string());
        outcomes.push(PushOutcome {
            entry_id: entry.id,
            result,
        });
    }

    Ok(outcomes)
}

/// Pull the current reference data and merge it into the store.
pub fn refresh(client: &SessionClient, conn: &mut Connection) -> AppResult<RefreshStats> {
    let token = client.acquire_session()?;
    let path = format!(
        "{}?adtmDate={}",
        DAY_INFO_PATH,
        date::to_info_page_date(date::today())
    );
    let html = client.get(&token, &path)?;
    let snapshot = extract(&html)?;
    merge_snapshot(conn, &snapshot)
}

/// Merge one snapshot by upsert, inside a single transaction: either the
/// whole snapshot lands or none of it does. Stale local rows that the
/// snapshot no longer mentions are intentionally not touched.
pub fn merge_snapshot(
    conn: &mut Connection,
    snapshot: &ReferenceSnapshot,
) -> AppResult<RefreshStats> {
    let mut stats = RefreshStats {
        skipped: snapshot.skipped.len(),
        ..Default::default()
    };

    let tx = conn.transaction()?;
    for (id, name) in &snapshot.departments {
        queries::upsert_department(&tx, *id, name)?;
        stats.departments += 1;
    }
    for (id, project) in &snapshot.projects {
        queries::upsert_project(&tx, *id, &project.name)?;
        stats.projects += 1;
        for (task_id, task_name) in &project.tasks {
            queries::upsert_task(&tx, *task_id, *id, task_name)?;
            stats.tasks += 1;
        }
    }
    tx.commit()?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::pool::Db;
    use crate::models::snapshot::ProjectNode;
    use crate::models::time_entry::NewTimeEntry;
    use chrono::NaiveTime;

    fn seeded_db() -> Db {
        let db = Db::open_in_memory().unwrap();
        init_db(&db.conn).unwrap();
        db
    }

    fn entry_on(conn: &Connection, date: &str) -> i64 {
        queries::insert_entry(
            conn,
            &NewTimeEntry {
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                billable: false,
                department_id: 1,
                project_id: 1,
                task_id: 1,
                description: String::new(),
                notes: String::new(),
            },
        )
        .unwrap()
    }

    fn snapshot_with(projects: &[(i64, &str)]) -> ReferenceSnapshot {
        let mut snapshot = ReferenceSnapshot::default();
        for (id, name) in projects {
            snapshot.projects.insert(
                *id,
                ProjectNode {
                    name: name.to_string(),
                    tasks: Default::default(),
                },
            );
        }
        snapshot
    }

    #[test]
    fn week_selector_covers_sunday_through_saturday_only() {
        let db = seeded_db();
        // 2026-08-02 is a Sunday, 2026-08-08 a Saturday.
        let sunday = entry_on(&db.conn, "2026-08-02");
        let midweek = entry_on(&db.conn, "2026-08-05");
        let saturday = entry_on(&db.conn, "2026-08-08");
        let _before = entry_on(&db.conn, "2026-08-01");
        let _after = entry_on(&db.conn, "2026-08-09");

        let anchor = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let selected = resolve(&db.conn, Selector::Week(anchor)).unwrap();
        let ids: Vec<i64> = selected.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![sunday, midweek, saturday]);
    }

    #[test]
    fn entry_selector_resolves_one_or_zero_rows() {
        let db = seeded_db();
        let id = entry_on(&db.conn, "2026-08-05");

        assert_eq!(resolve(&db.conn, Selector::Entry(id)).unwrap().len(), 1);
        assert!(resolve(&db.conn, Selector::Entry(id + 1)).unwrap().is_empty());
    }

    #[test]
    fn push_with_empty_selection_touches_nothing() {
        let db = seeded_db();
        let client = SessionClient::new(crate::models::settings::Settings {
            username: "u".to_string(),
            password: "p".to_string(),
            // resolves nowhere: a reached network would fail loudly
            host: "remote.invalid".to_string(),
            use_tls: false,
            employee_id: 1,
            default_department: 0,
        })
        .unwrap();

        let anchor = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let outcomes = push(&client, &db.conn, Selector::Week(anchor)).unwrap();
        assert!(outcomes.is_empty());
    }

    #[test]
    fn merge_upserts_and_keeps_stale_rows() {
        let mut db = seeded_db();

        let first = snapshot_with(&[(1, "Alpha"), (2, "Beta")]);
        merge_snapshot(&mut db.conn, &first).unwrap();

        // Second refresh renames project 1 and no longer mentions 2.
        let second = snapshot_with(&[(1, "Alpha v2")]);
        let stats = merge_snapshot(&mut db.conn, &second).unwrap();
        assert_eq!(stats.projects, 1);

        let projects = queries::list_projects(&db.conn).unwrap();
        assert_eq!(projects.len(), 2, "stale rows must survive a refresh");
        assert_eq!(projects[0].name, "Alpha v2");
        assert_eq!(projects[1].name, "Beta");
    }

    #[test]
    fn merge_attaches_tasks_to_their_project() {
        let mut db = seeded_db();

        let mut snapshot = snapshot_with(&[(1, "Alpha")]);
        snapshot
            .projects
            .get_mut(&1)
            .unwrap()
            .tasks
            .insert(100, "Design".to_string());
        let stats = merge_snapshot(&mut db.conn, &snapshot).unwrap();
        assert_eq!(stats.tasks, 1);

        let tasks = queries::tasks_for_project(&db.conn, 1).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Design");
    }
}
