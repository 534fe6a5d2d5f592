use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::Db;
use crate::db::queries::set_setting;
use crate::errors::AppResult;
use crate::models::settings;
use crate::ui::messages::{info, success};

/// Initialize config file, database schema and the settings table.
///
/// Re-running init after editing the config file re-seeds the settings
/// table from it; the database itself is never wiped.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    let wrote = cfg.init_all(!cli.test)?;
    if wrote {
        info(format!(
            "Wrote a fresh config file at {:?} - fill in your credentials and run init again",
            Config::config_file()
        ));
    }

    let db = Db::open(&cfg.database)?;
    init_db(&db.conn)?;

    set_setting(&db.conn, settings::KEY_USERNAME, &cfg.username)?;
    set_setting(&db.conn, settings::KEY_PASSWORD, &cfg.password)?;
    set_setting(&db.conn, settings::KEY_HOST, &cfg.host)?;
    set_setting(
        &db.conn,
        settings::KEY_USE_TLS,
        if cfg.use_tls { "yes" } else { "no" },
    )?;
    set_setting(
        &db.conn,
        settings::KEY_EMPLOYEE_ID,
        &cfg.employee_id.to_string(),
    )?;
    set_setting(
        &db.conn,
        settings::KEY_DEFAULT_DEPARTMENT,
        &cfg.default_department.to_string(),
    )?;

    success(format!("Database ready: {}", cfg.database));
    Ok(())
}
