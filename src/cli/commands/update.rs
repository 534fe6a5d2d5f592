use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sync;
use crate::db::initialize::init_db;
use crate::db::pool::Db;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::settings::Settings;
use crate::remote::session::SessionClient;
use crate::ui::messages::{success, warning};

/// Pull the current reference data from the remote system and merge it
/// into the local mirror.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Update = cmd {
        let mut db = Db::open(&cfg.database)?;
        init_db(&db.conn)?;

        let settings = Settings::from_pairs(&queries::load_settings_map(&db.conn)?)?;
        let client = SessionClient::new(settings)?;

        let stats = sync::refresh(&client, &mut db.conn)?;
        success(format!(
            "Mirror updated: {} departments, {} projects, {} tasks",
            stats.departments, stats.projects, stats.tasks
        ));
        if stats.skipped > 0 {
            warning(format!(
                "{} records on the remote page could not be parsed and were skipped",
                stats.skipped
            ));
        }
    }
    Ok(())
}
