use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use pagecap_lib::{
    build_cookies, resolve_target, CaptureMode, ChromiumEngine, LaunchConfig, RenderRequest,
    Result, ScreenshotOptions, SessionDriver, Viewport,
};

use crate::cli::SharedOptions;
use crate::settings;

#[allow(clippy::too_many_arguments)]
pub async fn run_screenshot(
    raw_args: &[String],
    config_path: Option<&Path>,
    verbose: bool,
    url: String,
    output: Option<PathBuf>,
    shared: SharedOptions,
    full_page: bool,
    omit_background: bool,
    viewport: Option<String>,
) -> ExitCode {
    // Validated here so a malformed value never reaches the browser.
    let viewport = match viewport {
        Some(raw) => match raw.parse::<Viewport>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                eprintln!("Option --viewport must be in the format ###x### e.g. 800x600");
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let result = screenshot(
        raw_args,
        config_path,
        verbose,
        url,
        output,
        shared,
        full_page,
        omit_background,
        viewport,
    )
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failed to take screenshot: {err}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn screenshot(
    raw_args: &[String],
    config_path: Option<&Path>,
    verbose: bool,
    url: String,
    output: Option<PathBuf>,
    shared: SharedOptions,
    full_page: bool,
    omit_background: bool,
    viewport: Option<Viewport>,
) -> Result<()> {
    let config = settings::load_config(config_path)?;
    let resolved = settings::resolve_shared_settings(raw_args, &shared, &config);

    let target_url = resolve_target(&url)?;
    let cookies = build_cookies(&shared.cookie, &target_url)?;

    if verbose {
        eprintln!("Target: {target_url}");
        eprintln!(
            "Timeout: {}ms, wait-until: {}",
            resolved.timeout_ms, resolved.wait_until
        );
        if let Some(viewport) = viewport {
            eprintln!("Viewport: {viewport}");
        }
    }

    let request = RenderRequest {
        target_url,
        navigation: pagecap_lib::NavigationOptions {
            timeout_ms: resolved.timeout_ms,
            wait_until: resolved.wait_until,
        },
        cookies,
        output,
        mode: CaptureMode::Screenshot(ScreenshotOptions {
            full_page,
            omit_background,
            viewport,
        }),
    };

    let driver = SessionDriver::new(
        ChromiumEngine,
        LaunchConfig {
            sandbox: shared.sandbox,
        },
    )
    .with_progress(Arc::new(|msg: &str| eprintln!("{msg}")));

    driver.render(&request).await?;
    Ok(())
}
