// Copyright 2026 Skywatch Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTML extraction for the rendered sighting index.
//!
//! The page is a DataTables-style listing: an info line reporting the total
//! entry count, a table with a fixed column layout, and a next-page control
//! that carries a `disabled` CSS class on the last page. All extraction here
//! is pure — it takes an HTML string and never touches the browser.

use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// DOM id of the report table.
pub const TABLE_ID: &str = "table_1";

/// DOM id of the next-page control.
pub const NEXT_CONTROL_ID: &str = "table_1_next";

/// One sighting report row. Column positions are fixed; the leading cell
/// (row expander) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sighting {
    pub datetime: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub shape: String,
    pub summary: String,
}

/// State of the next-page control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextControl {
    Enabled,
    Disabled,
    Absent,
}

/// Extract the expected total from the info line ("Showing 1 to 25 of 132
/// entries"). Returns `None` when the info element or the pattern is absent.
pub fn entry_total(html: &str) -> Option<u64> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("div.dataTables_info").ok()?;
    let text: String = document.select(&selector).next()?.text().collect();

    let re = Regex::new(r"of (\d+) entries").ok()?;
    let caps = re.captures(&text)?;
    caps[1].parse().ok()
}

/// Extract sighting rows from the rendered table.
///
/// Returns `None` when the table itself is missing, and `Some(rows)` with
/// the rows of the current view otherwise. A row with fewer cells than the
/// fixed layout is skipped and logged.
pub fn sighting_rows(html: &str) -> Option<Vec<Sighting>> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse(&format!("table#{TABLE_ID}")).ok()?;
    document.select(&table_selector).next()?;

    let row_selector = Selector::parse(&format!("table#{TABLE_ID} tbody tr")).ok()?;
    let cell_selector = Selector::parse("td").ok()?;

    let mut rows = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|c| c.text().collect::<String>().trim().to_string())
            .collect();

        if cells.len() < 7 {
            debug!("skipping row with {} cells (expected 7)", cells.len());
            continue;
        }

        rows.push(Sighting {
            datetime: cells[1].clone(),
            city: cells[2].clone(),
            state: cells[3].clone(),
            country: cells[4].clone(),
            shape: cells[5].clone(),
            summary: cells[6].clone(),
        });
    }

    Some(rows)
}

/// Inspect the next-page control in the rendered HTML.
pub fn next_control(html: &str) -> NextControl {
    let document = Html::parse_document(html);
    let selector = match Selector::parse(&format!("#{NEXT_CONTROL_ID}")) {
        Ok(s) => s,
        Err(_) => return NextControl::Absent,
    };

    match document.select(&selector).next() {
        None => NextControl::Absent,
        Some(el) => {
            let disabled = el
                .value()
                .attr("class")
                .map(|c| c.split_whitespace().any(|cls| cls == "disabled"))
                .unwrap_or(false);
            if disabled {
                NextControl::Disabled
            } else {
                NextControl::Enabled
            }
        }
    }
}
