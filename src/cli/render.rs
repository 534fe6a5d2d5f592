//! Plain-text rendering of query results for the terminal.

use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppResult;
use crate::models::reference::{Department, Project, Task};
use crate::models::template::Template;

pub fn print_department(department: &Department) {
    println!("D: [{:>4}] {}", department.id, department.name);
}

pub fn print_project(conn: &Connection, project: &Project) -> AppResult<()> {
    println!("P: [{:>4}] {}", project.id, project.name);
    for task in queries::tasks_for_project(conn, project.id)? {
        print_task(&task);
    }
    Ok(())
}

pub fn print_task(task: &Task) {
    println!("   [{:>4} {:>4}] {}", task.project_id, task.id, task.name);
}

pub fn print_template(conn: &Connection, template: &Template) -> AppResult<()> {
    println!("T: [{:>4}] {}", template.id, template.name);
    if !template.description.is_empty() {
        println!("   {}", template.description);
    }
    for action in queries::actions_for_template(conn, template.id)? {
        println!(
            "   [{:>2}] {:>4}min  dept {} proj {} task {} {} {}",
            action.stack,
            action.duration_minutes,
            action.department_id,
            action.project_id,
            action.task_id,
            if action.billable { "billable" } else { "" },
            action.description,
        );
        if !action.notes.is_empty() {
            println!("        notes: {}", action.notes);
        }
    }
    Ok(())
}
