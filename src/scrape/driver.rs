//! Browser driver abstraction for the sighting scraper.
//!
//! Defines the `PageDriver` trait that the scrape loop runs against, and the
//! Chromium implementation backed by chromiumoxide. Tests drive the loop
//! with a scripted in-memory driver instead.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;

/// Find the Chromium binary path.
pub fn find_chromium() -> Option<PathBuf> {
    // 1. SKYWATCH_CHROMIUM_PATH env
    if let Ok(p) = std::env::var("SKYWATCH_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. ~/.skywatch/chromium/
    if let Some(home) = dirs::home_dir() {
        let candidates = if cfg!(target_os = "macos") {
            vec![
                home.join(".skywatch/chromium/chrome-mac-arm64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
                home.join(".skywatch/chromium/chrome-mac-x64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
                home.join(".skywatch/chromium/chrome"),
            ]
        } else {
            vec![
                home.join(".skywatch/chromium/chrome-linux64/chrome"),
                home.join(".skywatch/chromium/chrome"),
            ]
        };
        for c in candidates {
            if c.exists() {
                return Some(c);
            }
        }
    }

    // 3. System PATH
    if let Ok(path) = which::which("google-chrome") {
        return Some(path);
    }
    if let Ok(path) = which::which("chromium") {
        return Some(path);
    }
    if let Ok(path) = which::which("chromium-browser") {
        return Some(path);
    }

    // 4. Common macOS locations
    if cfg!(target_os = "macos") {
        let common =
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// A browser page the scrape loop can navigate, read, and click.
#[async_trait]
pub trait PageDriver: Send {
    /// Navigate to a URL with a timeout.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<()>;
    /// Get the full rendered page HTML.
    async fn html(&mut self) -> Result<String>;
    /// Click the element with the given DOM id.
    async fn click(&mut self, element_id: &str) -> Result<()>;
    /// Close the driver.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Chromium-backed driver.
pub struct ChromiumDriver {
    browser: Browser,
    page: Page,
}

impl ChromiumDriver {
    /// Launch a headless Chromium instance with one page.
    pub async fn new() -> Result<Self> {
        let chrome_path =
            find_chromium().context("Chromium not found. Install Chrome or Chromium, or set SKYWATCH_CHROMIUM_PATH.")?;

        let config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        // Spawn the handler task
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("failed to create page")?;

        Ok(Self { browser, page })
    }
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<()> {
        let result = tokio::time::timeout(
            std::time::Duration::from_millis(timeout_ms),
            self.page.goto(url),
        )
        .await;

        match result {
            Ok(Ok(_)) => {
                let _ = self.page.wait_for_navigation().await;
                Ok(())
            }
            Ok(Err(e)) => bail!("navigation failed: {e}"),
            Err(_) => bail!("navigation timed out after {timeout_ms}ms"),
        }
    }

    async fn html(&mut self) -> Result<String> {
        let result = self
            .page
            .evaluate("document.documentElement.outerHTML")
            .await
            .context("failed to get HTML")?;

        let html: String = result
            .into_value()
            .map_err(|e| anyhow::anyhow!("failed to convert HTML result: {e:?}"))?;

        Ok(html)
    }

    async fn click(&mut self, element_id: &str) -> Result<()> {
        let script = format!(
            "(() => {{ const el = document.getElementById('{element_id}'); \
             if (el) {{ el.click(); return true; }} return false; }})()"
        );
        let result = self
            .page
            .evaluate(script)
            .await
            .context("click script failed")?;

        let clicked: bool = result
            .into_value()
            .map_err(|e| anyhow::anyhow!("failed to convert click result: {e:?}"))?;
        if !clicked {
            bail!("element #{element_id} not found");
        }
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let _ = self.page.close().await;
        let mut browser = self.browser;
        let _ = browser.close().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires Chromium to be installed
    async fn test_chromium_navigate_and_read() {
        let mut driver = ChromiumDriver::new().await.expect("failed to launch");

        driver
            .navigate("data:text/html,<h1>Hello</h1><p>World</p>", 10000)
            .await
            .expect("navigation failed");

        let html = driver.html().await.expect("html failed");
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>World</p>"));

        Box::new(driver).close().await.expect("close failed");
    }
}
