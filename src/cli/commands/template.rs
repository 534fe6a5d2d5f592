use crate::cli::parser::{Commands, TemplateCommands};
use crate::cli::render;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::Db;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::template::NewAction;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Template { command } = cmd {
        let db = Db::open(&cfg.database)?;
        init_db(&db.conn)?;

        match command {
            TemplateCommands::New { name, description } => {
                let id = queries::insert_template(&db.conn, name, description)?;
                success(format!("Created template '{}' (id {})", name, id));
            }
            TemplateCommands::Add {
                template,
                stack,
                duration,
                dept,
                project,
                task,
                description,
                billable,
                notes,
            } => {
                let tmpl = queries::find_template_by_name(&db.conn, template)?
                    .ok_or_else(|| AppError::TemplateNotFound(template.clone()))?;
                queries::insert_action(
                    &db.conn,
                    &NewAction {
                        template_id: tmpl.id,
                        stack: *stack,
                        duration_minutes: *duration,
                        department_id: *dept,
                        project_id: *project,
                        task_id: *task,
                        billable: *billable,
                        description: description.join(" "),
                        notes: notes.clone().unwrap_or_default(),
                    },
                )?;
                success(format!("Added action to '{}' at stack {}", template, stack));
            }
            TemplateCommands::Show { name } => {
                let tmpl = queries::find_template_by_name(&db.conn, name)?
                    .ok_or_else(|| AppError::TemplateNotFound(name.clone()))?;
                render::print_template(&db.conn, &tmpl)?;
            }
        }
    }
    Ok(())
}
