//! Submission payload for the remote "operate" endpoint.

use crate::models::time_entry::TimeEntry;
use crate::utils::date::to_wire_date;
use crate::utils::time::to_wire_time;

pub const OPERATE_PATH: &str = "/atrweb/operate.asp";

/// The full field set the operate form requires. Most of the constants
/// exist only to satisfy server-side checks and were fixed by inspecting
/// what the web UI submits.
pub fn entry_form(employee_id: i64, entry: &TimeEntry) -> Vec<(&'static str, String)> {
    vec![
        ("selected_row", String::new()),
        ("operating_code", "0".to_string()),
        ("timing_id", "0".to_string()),
        ("strings_num", "0".to_string()),
        ("int_employee_id", employee_id.to_string()),
        ("dtm_date", to_wire_date(entry.date)),
        ("notes", String::new()),
        ("ddl_abbr", entry.department_id.to_string()),
        ("ddl_project", entry.project_id.to_string()),
        ("tasks", entry.task_id.to_string()),
        ("date_from_f", to_wire_date(entry.date)),
        ("dtm_from", to_wire_time(entry.start_time)),
        ("date_to_f", to_wire_date(entry.date)),
        ("dtm_to", to_wire_time(entry.end_time)),
        ("txt_description", entry.description.clone()),
        ("txt_notes", entry.notes.clone()),
        ("save1", "Save".to_string()),
        ("ddl_IN_ON", String::new()),
        // the endpoint string-compares capitalized booleans
        ("is_billable", if entry.billable { "True" } else { "False" }.to_string()),
        ("link", "1".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn form_carries_wire_formats_and_constants() {
        let entry = TimeEntry {
            id: 12,
            date: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            billable: true,
            department_id: 4,
            project_id: 1,
            task_id: 100,
            description: "stand-up".to_string(),
            notes: String::new(),
        };

        let form = entry_form(777, &entry);
        let get = |k: &str| {
            form.iter()
                .find(|(key, _)| *key == k)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };

        assert_eq!(get("int_employee_id"), "777");
        assert_eq!(get("dtm_date"), "08/05/2026");
        assert_eq!(get("date_from_f"), "08/05/2026");
        assert_eq!(get("dtm_from"), "09:00");
        assert_eq!(get("dtm_to"), "10:30");
        assert_eq!(get("is_billable"), "True");
        assert_eq!(get("save1"), "Save");
        assert_eq!(get("link"), "1");
    }
}
