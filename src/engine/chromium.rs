//! Headless Chromium backend driven over the DevTools protocol.

use std::path::Path;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, EventDomContentEventFired, EventLoadEventFired, PrintToPdfParams,
};
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::cookies::CookieSpec;
use crate::engine::{Engine, EnginePage, EngineSession, LaunchConfig, HARDENED_LAUNCH_ARGS};
use crate::error::{RenderError, Result};
use crate::request::{NavigationOptions, PdfOptions, ScreenshotOptions};
use crate::viewport::Viewport;

pub struct ChromiumEngine;

pub struct ChromiumSession {
    browser: Browser,
    events: JoinHandle<()>,
}

pub struct ChromiumPage {
    page: Page,
}

impl Engine for ChromiumEngine {
    type Session = ChromiumSession;

    async fn launch(&self, _config: &LaunchConfig) -> Result<ChromiumSession> {
        let browser_config = BrowserConfig::builder()
            .args(HARDENED_LAUNCH_ARGS.iter().copied())
            .build()
            .map_err(RenderError::Launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|err| RenderError::Launch(err.to_string()))?;

        // The handler stream must be polled for the whole session or CDP
        // calls never complete.
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(ChromiumSession { browser, events })
    }
}

impl EngineSession for ChromiumSession {
    type Page = ChromiumPage;

    async fn new_page(&mut self) -> Result<ChromiumPage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|err| RenderError::Session(err.to_string()))?;
        Ok(ChromiumPage { page })
    }

    async fn close(&mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|err| RenderError::Session(err.to_string()))?;
        let _ = self.browser.wait().await?;
        self.events.abort();
        Ok(())
    }
}

/// Page lifecycle events the navigation can wait on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettleCondition {
    Load,
    DomContentLoaded,
}

impl SettleCondition {
    fn parse(s: &str) -> Result<SettleCondition> {
        match s {
            "load" => Ok(SettleCondition::Load),
            "domcontentloaded" => Ok(SettleCondition::DomContentLoaded),
            other => Err(RenderError::Navigation(format!(
                "unsupported wait-until condition '{other}' (supported: load, domcontentloaded)"
            ))),
        }
    }
}

impl EnginePage for ChromiumPage {
    async fn set_cookies(&mut self, cookies: &[CookieSpec]) -> Result<()> {
        let params = cookies
            .iter()
            .map(|cookie| {
                CookieParam::builder()
                    .name(cookie.name.clone())
                    .value(cookie.value.clone())
                    .url(cookie.url.clone())
                    .build()
                    .map_err(RenderError::Session)
            })
            .collect::<Result<Vec<_>>>()?;

        self.page
            .set_cookies(params)
            .await
            .map_err(|err| RenderError::Session(err.to_string()))?;
        Ok(())
    }

    async fn goto(&mut self, url: &str, options: &NavigationOptions) -> Result<()> {
        let condition = SettleCondition::parse(&options.wait_until)?;

        let navigate = async {
            // Subscribe before navigating so the event cannot be missed.
            match condition {
                SettleCondition::Load => {
                    let mut settled = self
                        .page
                        .event_listener::<EventLoadEventFired>()
                        .await
                        .map_err(|err| RenderError::Navigation(err.to_string()))?;
                    self.page
                        .goto(url)
                        .await
                        .map_err(|err| RenderError::Navigation(err.to_string()))?;
                    settled.next().await;
                }
                SettleCondition::DomContentLoaded => {
                    let mut settled = self
                        .page
                        .event_listener::<EventDomContentEventFired>()
                        .await
                        .map_err(|err| RenderError::Navigation(err.to_string()))?;
                    self.page
                        .goto(url)
                        .await
                        .map_err(|err| RenderError::Navigation(err.to_string()))?;
                    settled.next().await;
                }
            }
            Ok(())
        };

        // A timeout of zero disables the deadline entirely.
        if options.timeout_ms == 0 {
            navigate.await
        } else {
            match tokio::time::timeout(Duration::from_millis(options.timeout_ms), navigate).await {
                Ok(result) => result,
                Err(_) => Err(RenderError::NavigationTimeout {
                    url: url.to_string(),
                    wait_until: options.wait_until.clone(),
                    timeout_ms: options.timeout_ms,
                }),
            }
        }
    }

    async fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        let params = SetDeviceMetricsOverrideParams::builder()
            .width(viewport.width as i64)
            .height(viewport.height as i64)
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(RenderError::Session)?;
        self.page
            .execute(params)
            .await
            .map_err(|err| RenderError::Session(err.to_string()))?;
        Ok(())
    }

    async fn pdf(&mut self, options: &PdfOptions, output: Option<&Path>) -> Result<Vec<u8>> {
        let (paper_width, paper_height) =
            paper_size(&options.format).map_err(RenderError::Capture)?;

        let params = PrintToPdfParams {
            landscape: Some(options.landscape),
            print_background: Some(options.print_background),
            display_header_footer: Some(options.display_header_footer),
            header_template: Some(options.header_template.clone()),
            footer_template: Some(options.footer_template.clone()),
            paper_width: Some(paper_width),
            paper_height: Some(paper_height),
            margin_top: Some(css_length_to_inches(&options.margin_top).map_err(RenderError::Capture)?),
            margin_right: Some(
                css_length_to_inches(&options.margin_right).map_err(RenderError::Capture)?,
            ),
            margin_bottom: Some(
                css_length_to_inches(&options.margin_bottom).map_err(RenderError::Capture)?,
            ),
            margin_left: Some(
                css_length_to_inches(&options.margin_left).map_err(RenderError::Capture)?,
            ),
            ..Default::default()
        };

        let bytes = self
            .page
            .pdf(params)
            .await
            .map_err(|err| RenderError::Capture(err.to_string()))?;

        if let Some(path) = output {
            tokio::fs::write(path, &bytes).await?;
        }
        Ok(bytes)
    }

    async fn screenshot(
        &mut self,
        options: &ScreenshotOptions,
        output: Option<&Path>,
    ) -> Result<Vec<u8>> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(options.full_page)
            .omit_background(options.omit_background)
            .build();

        let bytes = self
            .page
            .screenshot(params)
            .await
            .map_err(|err| RenderError::Capture(err.to_string()))?;

        if let Some(path) = output {
            tokio::fs::write(path, &bytes).await?;
        }
        Ok(bytes)
    }
}

/// Converts a CSS length string to inches for `Page.printToPDF`.
/// Unitless values are pixels at 96dpi.
fn css_length_to_inches(length: &str) -> std::result::Result<f64, String> {
    let trimmed = length.trim();
    let split = trimmed
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid length value '{length}'"))?;

    let per_inch = match unit.to_ascii_lowercase().as_str() {
        "" | "px" => 96.0,
        "in" => 1.0,
        "cm" => 2.54,
        "mm" => 25.4,
        "pt" => 72.0,
        "pc" => 6.0,
        other => return Err(format!("unknown length unit '{other}' in '{length}'")),
    };

    Ok(value / per_inch)
}

/// Named paper formats mapped to (width, height) in inches.
fn paper_size(format: &str) -> std::result::Result<(f64, f64), String> {
    let size = match format.to_ascii_lowercase().as_str() {
        "letter" => (8.5, 11.0),
        "legal" => (8.5, 14.0),
        "tabloid" => (11.0, 17.0),
        "ledger" => (17.0, 11.0),
        "a0" => (33.1, 46.8),
        "a1" => (23.4, 33.1),
        "a2" => (16.54, 23.4),
        "a3" => (11.7, 16.54),
        "a4" => (8.27, 11.7),
        "a5" => (5.83, 8.27),
        "a6" => (4.13, 5.83),
        other => return Err(format!("unknown paper format '{other}'")),
    };
    Ok(size)
}
