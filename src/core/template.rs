//! Template expansion: turn a chain of canned actions into concrete
//! entries anchored at a start instant.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use crate::models::template::Action;
use crate::models::time_entry::NewTimeEntry;

/// Materialize one entry per action, in stack order. Each entry starts at
/// the running cursor and ends `duration` later; the cursor then advances,
/// so the chain is contiguous and non-overlapping by construction.
pub fn expand(
    actions: &[Action],
    anchor: NaiveDateTime,
    fields: &HashMap<String, String>,
) -> Vec<NewTimeEntry> {
    let mut cursor = anchor;
    let mut entries = Vec::with_capacity(actions.len());

    for action in actions {
        let end = cursor + Duration::minutes(action.duration_minutes);
        entries.push(NewTimeEntry {
            date: cursor.date(),
            start_time: cursor.time(),
            end_time: end.time(),
            billable: action.billable,
            department_id: action.department_id,
            project_id: action.project_id,
            task_id: action.task_id,
            description: substitute(&action.description, fields),
            notes: substitute(&action.notes, fields),
        });
        cursor = end;
    }

    entries
}

/// Literal `{name}` replacement for every provided field. Placeholders
/// with no matching value stay verbatim; substitution never fails.
fn substitute(text: &str, fields: &HashMap<String, String>) -> String {
    let mut out = text.to_string();
    for (name, value) in fields {
        out = out.replace(&format!("{{{}}}", name), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn action(stack: i64, minutes: i64, description: &str) -> Action {
        Action {
            id: stack,
            template_id: 1,
            stack,
            duration_minutes: minutes,
            department_id: 4,
            project_id: 1,
            task_id: 100,
            billable: false,
            description: description.to_string(),
            notes: String::new(),
        }
    }

    fn anchor_at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 5)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn entries_are_contiguous_and_non_overlapping() {
        let actions = vec![
            action(1, 30, "standup"),
            action(2, 45, "review"),
            action(3, 15, "mail"),
        ];
        let entries = expand(&actions, anchor_at(9, 0), &HashMap::new());

        let times: Vec<(String, String)> = entries
            .iter()
            .map(|e| {
                (
                    e.start_time.format("%H:%M").to_string(),
                    e.end_time.format("%H:%M").to_string(),
                )
            })
            .collect();
        assert_eq!(
            times,
            vec![
                ("09:00".to_string(), "09:30".to_string()),
                ("09:30".to_string(), "10:15".to_string()),
                ("10:15".to_string(), "10:30".to_string()),
            ]
        );
    }

    #[test]
    fn expansion_is_deterministic() {
        let actions = vec![action(1, 30, "a"), action(2, 60, "b")];
        let fields = HashMap::from([("TICKET".to_string(), "4711".to_string())]);
        let a = expand(&actions, anchor_at(8, 30), &fields);
        let b = expand(&actions, anchor_at(8, 30), &fields);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.start_time, y.start_time);
            assert_eq!(x.end_time, y.end_time);
            assert_eq!(x.description, y.description);
        }
    }

    #[test]
    fn placeholders_substitute_and_unmatched_stay_verbatim() {
        let actions = vec![action(1, 30, "work on {TICKET} for {CUSTOMER}")];
        let fields = HashMap::from([("TICKET".to_string(), "4711".to_string())]);
        let entries = expand(&actions, anchor_at(9, 0), &fields);

        assert_eq!(entries[0].description, "work on 4711 for {CUSTOMER}");
    }

    #[test]
    fn missing_field_values_are_not_an_error() {
        let actions = vec![action(1, 30, "plain text, no markers")];
        let entries = expand(&actions, anchor_at(9, 0), &HashMap::new());
        assert_eq!(entries[0].description, "plain text, no markers");
    }
}
