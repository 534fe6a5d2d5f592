use crate::cli::parser::Commands;
use crate::cli::render;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::Db;
use crate::db::queries;
use crate::errors::AppResult;

/// Search reference data by name. The default searches projects and, when
/// nothing matches, falls back to task names.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Search {
        query,
        dept,
        template,
    } = cmd
    {
        let db = Db::open(&cfg.database)?;
        init_db(&db.conn)?;

        if *dept {
            for department in queries::search_departments(&db.conn, query)? {
                render::print_department(&department);
            }
        } else if *template {
            for tmpl in queries::search_templates(&db.conn, query)? {
                render::print_template(&db.conn, &tmpl)?;
            }
        } else {
            let projects = queries::search_projects(&db.conn, query)?;
            if projects.is_empty() {
                for task in queries::search_tasks(&db.conn, query)? {
                    render::print_task(&task);
                }
            } else {
                for project in projects {
                    render::print_project(&db.conn, &project)?;
                }
            }
        }
    }
    Ok(())
}
