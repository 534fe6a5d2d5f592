//! Reference-data extraction from the remote day-info page.
//!
//! The page was never meant to be machine-read: the department list is an
//! ordinary form dropdown, but projects and tasks only exist as array
//! literals inside an inline script block that feeds the page's cascading
//! dropdowns. The format is fixed, so this parser is deliberately literal
//! about it: three marker substrings, a bounded window after each, split on
//! the exact delimiters the page emits. Individual bad records are skipped
//! and recorded; a missing marker means the page layout changed and aborts
//! the whole pass.

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::{AppError, AppResult};
use crate::models::snapshot::{ProjectNode, ReferenceSnapshot, SkipReason, SkippedRecord};

/// Name of the department dropdown on the entry form.
const DEPARTMENT_SELECT: &str = "ddl_abbr";

/// Script-array markers, verbatim as the page emits them.
const PROJECT_NAME_MARKER: &str = "Np=new Array(";
const PROJECT_ID_MARKER: &str = "Kp=new Array(";
const TASK_MARKER: &str = "TaskArray = new Array(";

/// Window sizes after each marker. The task array packs three values per
/// entry and is by far the densest, so it gets a larger window.
const PROJECT_WINDOW: usize = 3_000;
const TASK_WINDOW: usize = 10_000;

/// Slots the page could not resolve server-side carry this literal in the
/// project-id array.
const ID_SENTINEL: &str = "Error!";

/// Recover the department/project/task hierarchy from one day-info page.
///
/// Deterministic: the same document always produces the same snapshot.
pub fn extract(html: &str) -> AppResult<ReferenceSnapshot> {
    let mut snapshot = ReferenceSnapshot::default();

    extract_departments(html, &mut snapshot)?;

    let names = array_body(html, PROJECT_NAME_MARKER, PROJECT_WINDOW, ");")?;
    let ids = array_body(html, PROJECT_ID_MARKER, PROJECT_WINDOW, ");")?;
    let tasks = array_body(html, TASK_MARKER, TASK_WINDOW, "))")?;

    collect_projects(&names, &ids, &mut snapshot);
    collect_tasks(&tasks, &mut snapshot);

    Ok(snapshot)
}

fn select_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r#"(?is)<select[^>]*\bname\s*=\s*["']?{}["']?[^>]*>(.*?)</select>"#,
            DEPARTMENT_SELECT
        ))
        .unwrap()
    })
}

fn option_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<option[^>]*\bvalue\s*=\s*["']?([^"'>\s]*)["']?[^>]*>([^<]*)"#).unwrap()
    })
}

/// Step 1: the department dropdown. Each selectable child pairs a numeric
/// value with its visible text; anything without an integer value is
/// skipped.
fn extract_departments(html: &str, snapshot: &mut ReferenceSnapshot) -> AppResult<()> {
    let select = select_re()
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or_else(|| {
            AppError::PageFormat(format!(
                "department dropdown '{}' not found",
                DEPARTMENT_SELECT
            ))
        })?;

    for option in option_re().captures_iter(select.as_str()) {
        let raw_value = option.get(1).map_or("", |m| m.as_str());
        let text = option.get(2).map_or("", |m| m.as_str()).trim().to_string();
        match raw_value.parse::<i64>() {
            Ok(id) => {
                snapshot.departments.insert(id, text);
            }
            Err(_) => snapshot.skipped.push(SkippedRecord {
                raw: raw_value.to_string(),
                reason: SkipReason::NonNumericValue,
            }),
        }
    }

    Ok(())
}

/// Step 2: cut one script-array literal out of the document.
///
/// Takes a bounded window after the marker, keeps only the first line of
/// it, then cuts at the array-close sequence (the real page puts each
/// array on its own line, but nothing guarantees the close is the last
/// thing on that line). The returned body has the marker prefix and close
/// syntax already stripped.
fn array_body(
    html: &str,
    marker: &str,
    window: usize,
    close: &str,
) -> AppResult<String> {
    let pos = html
        .find(marker)
        .ok_or_else(|| AppError::PageFormat(format!("marker '{}' not found", marker)))?;

    let mut end = (pos + window).min(html.len());
    while !html.is_char_boundary(end) {
        end -= 1;
    }
    let windowed = &html[pos..end];

    let line = windowed
        .split(['\r', '\n'])
        .next()
        .unwrap_or(windowed);

    let body = line.strip_prefix(marker).unwrap_or(line);
    let body = match body.find(close) {
        Some(at) => &body[..at],
        // Close never showed up inside the window; take what is there and
        // shave any partial close characters off the end.
        None => body.trim_end().trim_end_matches([')', ';']),
    };

    Ok(body.to_string())
}

/// Step 3: zip the project-name and project-id arrays positionally; entry
/// *i* of the id list identifies entry *i* of the name list.
fn collect_projects(names: &str, ids: &str, snapshot: &mut ReferenceSnapshot) {
    let name_list: Vec<&str> = names.split("\",\"").collect();

    for (i, raw_id) in ids.split("\",\"").enumerate() {
        let cleaned = raw_id.trim().trim_matches('"');
        if cleaned == ID_SENTINEL {
            snapshot.skipped.push(SkippedRecord {
                raw: raw_id.to_string(),
                reason: SkipReason::SentinelValue,
            });
            continue;
        }
        let id = match cleaned.parse::<i64>() {
            Ok(id) => id,
            Err(_) => {
                snapshot.skipped.push(SkippedRecord {
                    raw: raw_id.to_string(),
                    reason: SkipReason::NonNumericValue,
                });
                continue;
            }
        };
        let Some(name) = name_list.get(i) else {
            snapshot.skipped.push(SkippedRecord {
                raw: raw_id.to_string(),
                reason: SkipReason::MalformedRecord,
            });
            continue;
        };

        snapshot.projects.insert(
            id,
            ProjectNode {
                name: name.trim().trim_matches('"').to_string(),
                tasks: Default::default(),
            },
        );
    }
}

/// Step 4: task entries are `project-id,'name',task-id` triples. A bad
/// triple loses only itself, never its neighbours.
fn collect_tasks(tasks: &str, snapshot: &mut ReferenceSnapshot) {
    for item in tasks.split("),new Array(") {
        let parts: Vec<&str> = item.split(',').collect();
        if parts.len() != 3 {
            snapshot.skipped.push(SkippedRecord {
                raw: item.to_string(),
                reason: SkipReason::MalformedRecord,
            });
            continue;
        }

        let project_id = parts[0].trim().parse::<i64>();
        let task_id = parts[2].trim().parse::<i64>();
        let (Ok(project_id), Ok(task_id)) = (project_id, task_id) else {
            snapshot.skipped.push(SkippedRecord {
                raw: item.to_string(),
                reason: SkipReason::MalformedRecord,
            });
            continue;
        };
        let name = parts[1].trim().trim_matches('\'').to_string();

        match snapshot.projects.get_mut(&project_id) {
            Some(project) => {
                project.tasks.insert(task_id, name);
            }
            None => snapshot.skipped.push(SkippedRecord {
                raw: item.to_string(),
                reason: SkipReason::UnknownProject,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELECT_BLOCK: &str = r#"
        <form name="entry">
        <select name="ddl_abbr" id="ddl_abbr">
          <option value="">-- choose --</option>
          <option value="4">Infrastructure</option>
          <option value="9">Field Services</option>
        </select>
        </form>
    "#;

    fn page(script: &str) -> String {
        format!(
            "<html><body>{}<script language=\"javascript\">\r\n{}\r\n</script></body></html>",
            SELECT_BLOCK, script
        )
    }

    #[test]
    fn extraction_is_deterministic() {
        let doc = page(
            "Np=new Array(\"Alpha\",\"Beta\");\r\nKp=new Array(\"1\",\"2\");\r\nTaskArray = new Array(1,'T1',100),new Array(2,'T2',200))",
        );
        let a = extract(&doc).unwrap();
        let b = extract(&doc).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn departments_come_from_the_dropdown() {
        let doc = page(
            "Np=new Array(\"Alpha\");\r\nKp=new Array(\"1\");\r\nTaskArray = new Array(1,'T1',100))",
        );
        let snapshot = extract(&doc).unwrap();

        assert_eq!(snapshot.departments.len(), 2);
        assert_eq!(snapshot.departments[&4], "Infrastructure");
        assert_eq!(snapshot.departments[&9], "Field Services");
        // the empty "-- choose --" value is skipped, not an error
        assert_eq!(snapshot.skip_count(SkipReason::NonNumericValue), 1);
    }

    #[test]
    fn single_line_script_block_extracts_fully() {
        // Everything on one line, the way the page sometimes renders it.
        let doc = page(
            "Np=new Array(\"Alpha\",\"Beta\");Kp=new Array(\"1\",\"2\");TaskArray = new Array(1,'T1',100),new Array(2,'T2',200))",
        );
        let snapshot = extract(&doc).unwrap();

        assert_eq!(snapshot.projects.len(), 2);
        assert_eq!(snapshot.projects[&1].name, "Alpha");
        assert_eq!(snapshot.projects[&2].name, "Beta");
        assert_eq!(snapshot.projects[&1].tasks[&100], "T1");
        assert_eq!(snapshot.projects[&2].tasks[&200], "T2");
    }

    #[test]
    fn malformed_task_triple_loses_only_itself() {
        let doc = page(
            "Np=new Array(\"Alpha\");\r\nKp=new Array(\"1\");\r\nTaskArray = new Array(1,'A',10),new Array(bad),new Array(1,'B',11))",
        );
        let snapshot = extract(&doc).unwrap();

        let tasks = &snapshot.projects[&1].tasks;
        assert_eq!(tasks[&10], "A");
        assert_eq!(tasks[&11], "B");
        assert_eq!(snapshot.skip_count(SkipReason::MalformedRecord), 1);
    }

    #[test]
    fn sentinel_project_ids_are_skipped() {
        let doc = page(
            "Np=new Array(\"Alpha\",\"Broken\",\"Beta\");\r\nKp=new Array(\"1\",\"Error!\",\"2\");\r\nTaskArray = new Array(1,'T1',100))",
        );
        let snapshot = extract(&doc).unwrap();

        assert_eq!(snapshot.projects.len(), 2);
        assert!(snapshot.projects.contains_key(&1));
        assert!(snapshot.projects.contains_key(&2));
        assert_eq!(snapshot.skip_count(SkipReason::SentinelValue), 1);
    }

    #[test]
    fn task_for_unknown_project_is_skipped() {
        let doc = page(
            "Np=new Array(\"Alpha\");\r\nKp=new Array(\"1\");\r\nTaskArray = new Array(1,'T1',100),new Array(99,'Ghost',200))",
        );
        let snapshot = extract(&doc).unwrap();

        assert_eq!(snapshot.projects[&1].tasks.len(), 1);
        assert_eq!(snapshot.skip_count(SkipReason::UnknownProject), 1);
    }

    #[test]
    fn missing_marker_is_a_page_format_error() {
        let doc = page("Np=new Array(\"Alpha\");\r\nKp=new Array(\"1\");");
        let err = extract(&doc).unwrap_err();
        assert!(matches!(err, AppError::PageFormat(_)));
    }

    #[test]
    fn missing_department_dropdown_is_a_page_format_error() {
        let doc = "<html><body>Np=new Array(\"A\");Kp=new Array(\"1\");TaskArray = new Array(1,'T',2))</body></html>";
        let err = extract(doc).unwrap_err();
        assert!(matches!(err, AppError::PageFormat(_)));
    }
}
