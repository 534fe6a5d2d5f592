/// A reusable chain of entry blueprints.
#[derive(Debug, Clone)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// One step of a template. Steps are totally ordered by `stack`; the
/// expander consumes them in that order and advances a time cursor by
/// `duration_minutes` per step.
#[derive(Debug, Clone)]
pub struct Action {
    pub id: i64,
    pub template_id: i64,
    pub stack: i64,
    pub duration_minutes: i64,
    pub department_id: i64,
    pub project_id: i64,
    pub task_id: i64,
    pub billable: bool,
    pub description: String,
    pub notes: String,
}

/// Insert shape for a new action.
#[derive(Debug, Clone)]
pub struct NewAction {
    pub template_id: i64,
    pub stack: i64,
    pub duration_minutes: i64,
    pub department_id: i64,
    pub project_id: i64,
    pub task_id: i64,
    pub billable: bool,
    pub description: String,
    pub notes: String,
}
