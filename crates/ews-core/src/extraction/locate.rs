//! Row matching for a single concept in a single year column.
//!
//! Both locators answer `None` for "not found". A row that matches but holds
//! a non-numeric or empty cell in the year column does not end the search:
//! later rows are still tried, and if none qualifies the concept is absent.

use rust_decimal::Decimal;
use tracing::trace;

use super::table::RawTable;

/// Aliases longer than this many characters may match as a bare substring
/// of a Vietnamese label.
const LONG_ALIAS_CHARS: usize = 10;

/// Code-export match: the first column equals an alias exactly, or the
/// second column (the line description) contains an alias, ignoring case.
pub fn locate_code_export(table: &RawTable, aliases: &[String], year_col: usize) -> Option<Decimal> {
    let aliases: Vec<(&str, String)> = aliases
        .iter()
        .filter(|a| !a.is_empty())
        .map(|a| (a.as_str(), a.to_lowercase()))
        .collect();
    if aliases.is_empty() {
        return None;
    }

    for r in 0..table.height() {
        let code = table.cell(r, 0).text().trim().to_string();
        let description = table.cell(r, 1).text().to_lowercase();
        let matched = aliases
            .iter()
            .any(|(alias, lower)| code == *alias || description.contains(lower.as_str()));
        if !matched {
            continue;
        }
        if let Some(value) = table.cell(r, year_col).as_decimal() {
            trace!(row = r, code = %code, %value, "code export line located");
            return Some(value);
        }
    }
    None
}

/// Vietnamese match on the trimmed first-column label.
///
/// An exact (case-insensitive) label match anywhere in the table is
/// preferred. Only when no exact row yields a number is a substring match
/// accepted, and then only for long aliases or labels that start or end with
/// the alias. `reserved` holds labels that belong to other concepts; a row
/// carrying one of them exactly is never claimed by a substring match.
pub fn locate_vietnamese(
    table: &RawTable,
    aliases: &[String],
    reserved: &[String],
    year_col: usize,
) -> Option<Decimal> {
    let aliases: Vec<String> = aliases
        .iter()
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty())
        .collect();
    if aliases.is_empty() {
        return None;
    }

    let labels: Vec<String> = (0..table.height())
        .map(|r| table.cell(r, 0).text().trim().to_lowercase())
        .collect();

    let exact = first_numeric(table, &labels, year_col, |label: &str| {
        aliases.iter().any(|a| label == a.as_str())
    });
    let reserved: Vec<String> = reserved.iter().map(|r| r.trim().to_lowercase()).collect();
    let found = exact.or_else(|| {
        first_numeric(table, &labels, year_col, |label: &str| {
            if reserved.iter().any(|r| r == label) {
                return false;
            }
            aliases.iter().any(|a| {
                label.contains(a.as_str())
                    && (a.chars().count() > LONG_ALIAS_CHARS
                        || label.starts_with(a.as_str())
                        || label.ends_with(a.as_str()))
            })
        })
    });

    found.map(|(r, value)| {
        trace!(row = r, label = %labels[r], %value, "statement line located");
        value
    })
}

fn first_numeric(
    table: &RawTable,
    labels: &[String],
    year_col: usize,
    accept: impl Fn(&str) -> bool,
) -> Option<(usize, Decimal)> {
    labels.iter().enumerate().find_map(|(r, label)| {
        if label.is_empty() || !accept(label.as_str()) {
            return None;
        }
        table.cell(r, year_col).as_decimal().map(|v| (r, v))
    })
}
