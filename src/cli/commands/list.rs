use crate::cli::parser::Commands;
use crate::cli::render;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::Db;
use crate::db::queries;
use crate::errors::AppResult;

/// List mirrored reference data: projects with their tasks by default,
/// departments or templates on request.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { dept, template } = cmd {
        let db = Db::open(&cfg.database)?;
        init_db(&db.conn)?;

        if *dept {
            for department in queries::list_departments(&db.conn)? {
                render::print_department(&department);
            }
        } else if *template {
            for tmpl in queries::list_templates(&db.conn)? {
                render::print_template(&db.conn, &tmpl)?;
            }
        } else {
            for project in queries::list_projects(&db.conn)? {
                render::print_project(&db.conn, &project)?;
            }
        }
    }
    Ok(())
}
