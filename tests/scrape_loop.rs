//! Integration tests for the multi-page scrape loop, driven by a scripted
//! in-memory page driver (no browser involved).

use anyhow::{bail, Result};
use async_trait::async_trait;
use skywatch::config::Config;
use skywatch::scrape::driver::PageDriver;
use skywatch::scrape::periods::Period;
use skywatch::scrape::sightings::{scrape_period, scrape_range};

/// A driver that serves a fixed sequence of rendered pages. `navigate`
/// rewinds to the first page; each `click` advances to the next one.
struct ScriptedDriver {
    pages: Vec<String>,
    pos: usize,
    navigated: Vec<String>,
}

impl ScriptedDriver {
    fn new(pages: Vec<String>) -> Self {
        Self {
            pages,
            pos: 0,
            navigated: Vec::new(),
        }
    }
}

#[async_trait]
impl PageDriver for ScriptedDriver {
    async fn navigate(&mut self, url: &str, _timeout_ms: u64) -> Result<()> {
        self.navigated.push(url.to_string());
        self.pos = 0;
        Ok(())
    }

    async fn html(&mut self) -> Result<String> {
        match self.pages.get(self.pos) {
            Some(page) => Ok(page.clone()),
            None => bail!("no page scripted at position {}", self.pos),
        }
    }

    async fn click(&mut self, _element_id: &str) -> Result<()> {
        if self.pos + 1 < self.pages.len() {
            self.pos += 1;
        }
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

/// Config with poll deadlines short enough for tests that run into them.
fn test_config() -> Config {
    Config {
        readiness_timeout_ms: 100,
        poll_interval_ms: 10,
        ..Config::default()
    }
}

fn info_div(total: u64) -> String {
    format!(
        r#"<div class="dataTables_info" id="table_1_info">Showing 1 to 25 of {total} entries</div>"#
    )
}

fn row(datetime: &str, summary: &str) -> String {
    format!(
        "<tr><td></td><td>{datetime}</td><td>Phoenix</td><td>AZ</td>\
         <td>USA</td><td>Light</td><td>{summary}</td></tr>"
    )
}

fn next_button(disabled: bool) -> String {
    let class = if disabled {
        "paginate_button next disabled"
    } else {
        "paginate_button next"
    };
    format!(r#"<a class="{class}" id="table_1_next">Next</a>"#)
}

fn listing(total: u64, rows: &[String], next_disabled: bool) -> String {
    format!(
        r#"<html><body>{}<table id="table_1"><tbody>{}</tbody></table>{}</body></html>"#,
        info_div(total),
        rows.join(""),
        next_button(next_disabled)
    )
}

fn period(token: &str) -> Period {
    Period::parse(token).unwrap()
}

#[tokio::test]
async fn vanishing_table_keeps_partial_rows_without_raising() {
    // Reports 5 entries but the table and next control disappear after 2 rows
    let pages = vec![
        listing(
            5,
            &[row("2023-01-05", "first"), row("2023-01-06", "second")],
            false,
        ),
        format!("<html><body>{}</body></html>", info_div(5)),
    ];
    let mut driver = ScriptedDriver::new(pages);
    let cfg = test_config();

    let rows = scrape_period(&mut driver, &cfg, &period("202301"), &None, &mut 0)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].summary, "first");
    assert_eq!(rows[1].summary, "second");
}

#[tokio::test]
async fn walks_pages_until_expected_total_reached() {
    let pages = vec![
        listing(4, &[row("2023-01-01", "r1"), row("2023-01-02", "r2")], false),
        listing(4, &[row("2023-01-03", "r3"), row("2023-01-04", "r4")], true),
    ];
    let mut driver = ScriptedDriver::new(pages);
    let cfg = test_config();

    let rows = scrape_period(&mut driver, &cfg, &period("202301"), &None, &mut 0)
        .await
        .unwrap();

    let summaries: Vec<&str> = rows.iter().map(|r| r.summary.as_str()).collect();
    assert_eq!(summaries, vec!["r1", "r2", "r3", "r4"]);
}

#[tokio::test]
async fn disabled_next_control_ends_the_period_early() {
    // Expected total says 10, but the only page already has next disabled
    let pages = vec![listing(
        10,
        &[row("2023-01-01", "only"), row("2023-01-02", "two")],
        true,
    )];
    let mut driver = ScriptedDriver::new(pages);
    let cfg = test_config();

    let rows = scrape_period(&mut driver, &cfg, &period("202301"), &None, &mut 0)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn missing_entry_total_skips_the_period() {
    let pages = vec!["<html><body><p>nothing rendered yet</p></body></html>".to_string()];
    let mut driver = ScriptedDriver::new(pages);
    let cfg = test_config();

    let rows = scrape_period(&mut driver, &cfg, &period("202301"), &None, &mut 0)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn stuck_pagination_never_collects_a_page_twice() {
    // Clicking next never changes the rendered rows; the loop must stop
    // instead of re-appending the same page until the total is reached.
    let same = listing(6, &[row("2023-01-01", "r1"), row("2023-01-02", "r2")], false);
    let pages = vec![same.clone(), same];
    let mut driver = ScriptedDriver::new(pages);
    let cfg = test_config();

    let rows = scrape_period(&mut driver, &cfg, &period("202301"), &None, &mut 0)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn range_visits_every_period_and_survives_empty_ones() {
    // No entry total anywhere: every period is skipped, but all are visited
    let pages = vec!["<html><body></body></html>".to_string()];
    let mut driver = ScriptedDriver::new(pages);
    let cfg = test_config();

    let rows = scrape_range(
        &mut driver,
        &cfg,
        period("202311"),
        period("202401"),
        &None,
    )
    .await
    .unwrap();

    assert!(rows.is_empty());
    assert_eq!(driver.navigated.len(), 3);
    assert!(driver.navigated[0].ends_with("?id=e202311"));
    assert!(driver.navigated[1].ends_with("?id=e202312"));
    assert!(driver.navigated[2].ends_with("?id=e202401"));
}

#[tokio::test]
async fn progress_events_track_period_outcomes() {
    let pages = vec![listing(2, &[row("2023-01-01", "r1"), row("2023-01-02", "r2")], true)];
    let mut driver = ScriptedDriver::new(pages);
    let cfg = test_config();

    let (tx, mut rx) = skywatch::progress::channel();
    scrape_period(&mut driver, &cfg, &period("202301"), &Some(tx), &mut 0)
        .await
        .unwrap();

    let started = rx.try_recv().unwrap();
    let completed = rx.try_recv().unwrap();
    assert!(format!("{:?}", started.event).starts_with("PeriodStarted"));
    let rendered = format!("{:?}", completed.event);
    assert!(rendered.starts_with("PeriodCompleted"));
    assert!(rendered.contains("rows: 2"));
}
