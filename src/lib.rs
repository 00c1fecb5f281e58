//! Render a URL or local HTML file to a PDF document or PNG screenshot
//! using headless Chromium.
//!
//! One invocation of the [`SessionDriver`] launches one browser session,
//! renders one page, and tears the session down again. The CLI binary is
//! a thin layer over this crate.

pub mod config;
pub mod cookies;
pub mod engine;
pub mod error;
pub mod progress;
pub mod request;
pub mod session;
pub mod target;
pub mod viewport;

pub use config::{central_config_path, Config, ConfigError, PrintConfig};
pub use cookies::{build_cookies, CookieParseError, CookieSpec};
pub use engine::{
    ChromiumEngine, Engine, EnginePage, EngineSession, LaunchConfig, HARDENED_LAUNCH_ARGS,
};
pub use error::{RenderError, Result};
pub use progress::ProgressCallback;
pub use request::{CaptureMode, NavigationOptions, PdfOptions, RenderRequest, ScreenshotOptions};
pub use session::SessionDriver;
pub use target::{resolve_target, TargetError};
pub use viewport::{Viewport, ViewportParseError};
