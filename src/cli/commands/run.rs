use std::collections::HashMap;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::template::expand;
use crate::core::validate::validate_entry;
use crate::db::initialize::init_db;
use crate::db::pool::Db;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::time::parse_time_or_err;

/// Expand a template into concrete entries anchored at the given time and
/// store them.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Run {
        template,
        start,
        date,
        fields,
    } = cmd
    {
        let d = match date {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };
        let start_time = parse_time_or_err(start)?;
        let field_values = parse_fields(fields)?;

        let mut db = Db::open(&cfg.database)?;
        init_db(&db.conn)?;

        let tmpl = queries::find_template_by_name(&db.conn, template)?
            .ok_or_else(|| AppError::TemplateNotFound(template.clone()))?;
        let actions = queries::actions_for_template(&db.conn, tmpl.id)?;

        let entries = expand(&actions, d.and_time(start_time), &field_values);
        for entry in &entries {
            validate_entry(entry)?;
        }

        // All-or-nothing: a failure inserting one expanded entry must not
        // leave half a chain behind.
        let tx = db.conn.transaction()?;
        for entry in &entries {
            queries::insert_entry(&tx, entry)?;
        }
        tx.commit()?;

        success(format!(
            "Expanded '{}' into {} entries on {}",
            tmpl.name,
            entries.len(),
            d.format("%Y-%m-%d")
        ));
    }
    Ok(())
}

/// `NAME:VALUE` pairs from the command line; names are uppercased so the
/// `{NAME}` markers in templates stay predictable.
fn parse_fields(raw: &[String]) -> AppResult<HashMap<String, String>> {
    let mut out = HashMap::new();
    for item in raw {
        let (name, value) = item
            .split_once(':')
            .ok_or_else(|| AppError::InvalidField(format!("'{}' is not NAME:VALUE", item)))?;
        out.insert(name.to_uppercase(), value.to_string());
    }
    Ok(out)
}
