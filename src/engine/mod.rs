//! Rendering engine abstraction.
//!
//! The session driver talks to the browser exclusively through these
//! traits, which lets its state machine be exercised against an
//! in-memory fake in tests. The one real backend is [`ChromiumEngine`].

use std::path::Path;

use crate::cookies::CookieSpec;
use crate::error::Result;
use crate::request::{NavigationOptions, PdfOptions, ScreenshotOptions};
use crate::viewport::Viewport;

pub mod chromium;

pub use chromium::ChromiumEngine;

/// Launch arguments applied to every session. The set is fixed; the
/// `--sandbox` CLI flag is recorded but does not alter it.
pub const HARDENED_LAUNCH_ARGS: &[&str] = &[
    "--disable-setuid-sandbox",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--disable-site-isolation-trials",
    "--no-default-browser-check",
    "--no-first-run",
    "--no-zygote",
    "--single-process",
];

#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub sandbox: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        LaunchConfig { sandbox: true }
    }
}

#[allow(async_fn_in_trait)]
pub trait Engine {
    type Session: EngineSession;

    async fn launch(&self, config: &LaunchConfig) -> Result<Self::Session>;
}

#[allow(async_fn_in_trait)]
pub trait EngineSession {
    type Page: EnginePage;

    async fn new_page(&mut self) -> Result<Self::Page>;

    /// Tears the browser down. Called on every exit path after launch.
    async fn close(&mut self) -> Result<()>;
}

#[allow(async_fn_in_trait)]
pub trait EnginePage {
    async fn set_cookies(&mut self, cookies: &[CookieSpec]) -> Result<()>;

    async fn goto(&mut self, url: &str, options: &NavigationOptions) -> Result<()>;

    async fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Captures a PDF, writing it to `output` when given, and returns
    /// the bytes either way.
    async fn pdf(&mut self, options: &PdfOptions, output: Option<&Path>) -> Result<Vec<u8>>;

    /// Captures a PNG screenshot, writing it to `output` when given,
    /// and returns the bytes either way.
    async fn screenshot(
        &mut self,
        options: &ScreenshotOptions,
        output: Option<&Path>,
    ) -> Result<Vec<u8>>;
}
