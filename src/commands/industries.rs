//! Industry catalog commands
//!
//! Renders the static catalog as a card table, as JSON, or as a single
//! detail view. Nothing here contacts the completion service.

use crate::catalog::{build_detail_message, find_industry, list_industries, IndustryRecord};
use crate::error::{CareerbotError, Result};
use prettytable::{cell, row, Table};

/// Print the industry catalog
///
/// # Arguments
///
/// * `json` - Emit JSON instead of the card table
/// * `detail` - Optional 1-based index or name selecting a single industry
///
/// # Errors
///
/// Returns `CareerbotError::UnknownIndustry` if `detail` matches nothing, or
/// `CareerbotError::Serialization` if JSON output fails
///
/// # Examples
///
/// ```
/// use careerbot::commands::industries::show_industries;
///
/// show_industries(false, Some("2")).unwrap();
/// assert!(show_industries(false, Some("Mining")).is_err());
/// ```
pub fn show_industries(json: bool, detail: Option<&str>) -> Result<()> {
    tracing::debug!("industries::show_industries json={} detail={:?}", json, detail);

    match detail {
        Some(query) => {
            let record = lookup(query)?;
            if json {
                println!("{}", industry_json(record)?);
            } else {
                print_industry_detail(record);
            }
        }
        None => {
            let records = list_industries();
            if json {
                println!("{}", industries_json(records)?);
            } else {
                print_industry_table(records);
            }
        }
    }

    Ok(())
}

/// Resolve an index or name to a catalog entry
///
/// # Errors
///
/// Returns `CareerbotError::UnknownIndustry` if nothing matches
pub fn lookup(query: &str) -> Result<&'static IndustryRecord> {
    find_industry(query).ok_or_else(|| CareerbotError::UnknownIndustry(query.trim().to_string()).into())
}

/// Build the card table for `records`
pub fn industry_table(records: &[IndustryRecord]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["#", "", "Industry", "Estimated Growth"]);

    for (i, record) in records.iter().enumerate() {
        let index = i + 1;
        table.add_row(row![index, record.icon, record.name, record.growth_estimate]);
    }

    table
}

/// Print the card table with a heading
pub fn print_industry_table(records: &[IndustryRecord]) {
    println!("\nGrowing industries:\n");
    industry_table(records).printstd();
    println!("\nUse '/industry <number|name>' in chat, or 'industries --detail <n>', for details.\n");
}

/// Print the detail view for one industry
pub fn print_industry_detail(record: &IndustryRecord) {
    println!("\n{}", build_detail_message(record));
}

fn industries_json(records: &[IndustryRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(|e| CareerbotError::Serialization(e).into())
}

fn industry_json(record: &IndustryRecord) -> Result<String> {
    serde_json::to_string_pretty(record).map_err(|e| CareerbotError::Serialization(e).into())
}
