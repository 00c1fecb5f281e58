use std::path::PathBuf;

use crate::cookies::CookieSpec;
use crate::viewport::Viewport;

/// Everything the session driver needs to render one page.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Fully resolved target, always an absolute URL.
    pub target_url: String,
    pub navigation: NavigationOptions,
    pub cookies: Vec<CookieSpec>,
    /// Capture destination; `None` means raw bytes on stdout.
    pub output: Option<PathBuf>,
    pub mode: CaptureMode,
}

/// Exactly one capture is taken per invocation.
#[derive(Debug, Clone)]
pub enum CaptureMode {
    Pdf(PdfOptions),
    Screenshot(ScreenshotOptions),
}

#[derive(Debug, Clone)]
pub struct NavigationOptions {
    /// Milliseconds; 0 disables the navigation timeout.
    pub timeout_ms: u64,
    /// Settle condition, passed through to the engine unvalidated.
    pub wait_until: String,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        NavigationOptions {
            timeout_ms: 30_000,
            wait_until: "load".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PdfOptions {
    /// Named paper format, e.g. "Letter" or "A4".
    pub format: String,
    pub landscape: bool,
    pub print_background: bool,
    /// Margins as CSS length strings, converted by the engine.
    pub margin_top: String,
    pub margin_right: String,
    pub margin_bottom: String,
    pub margin_left: String,
    pub display_header_footer: bool,
    pub header_template: String,
    pub footer_template: String,
}

impl Default for PdfOptions {
    fn default() -> Self {
        PdfOptions {
            format: "Letter".to_string(),
            landscape: false,
            print_background: true,
            margin_top: "6.25mm".to_string(),
            margin_right: "6.25mm".to_string(),
            margin_bottom: "14.11mm".to_string(),
            margin_left: "6.25mm".to_string(),
            display_header_footer: false,
            header_template: String::new(),
            footer_template: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScreenshotOptions {
    pub full_page: bool,
    pub omit_background: bool,
    /// Applied after navigation, before capture.
    pub viewport: Option<Viewport>,
}

impl Default for ScreenshotOptions {
    fn default() -> Self {
        ScreenshotOptions {
            full_page: true,
            omit_background: false,
            viewport: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_defaults() {
        let nav = NavigationOptions::default();
        assert_eq!(nav.timeout_ms, 30_000);
        assert_eq!(nav.wait_until, "load");
    }

    #[test]
    fn pdf_defaults() {
        let pdf = PdfOptions::default();
        assert_eq!(pdf.format, "Letter");
        assert!(!pdf.landscape);
        assert!(pdf.print_background);
        assert_eq!(pdf.margin_top, "6.25mm");
        assert_eq!(pdf.margin_right, "6.25mm");
        assert_eq!(pdf.margin_bottom, "14.11mm");
        assert_eq!(pdf.margin_left, "6.25mm");
        assert!(!pdf.display_header_footer);
        assert!(pdf.header_template.is_empty());
        assert!(pdf.footer_template.is_empty());
    }

    #[test]
    fn screenshot_defaults() {
        let shot = ScreenshotOptions::default();
        assert!(shot.full_page);
        assert!(!shot.omit_background);
        assert!(shot.viewport.is_none());
    }
}
