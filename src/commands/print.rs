use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use pagecap_lib::{
    build_cookies, resolve_target, CaptureMode, ChromiumEngine, LaunchConfig, RenderRequest,
    Result, SessionDriver,
};

use crate::cli::SharedOptions;
use crate::settings;

#[allow(clippy::too_many_arguments)]
pub async fn run_print(
    raw_args: &[String],
    config_path: Option<&Path>,
    verbose: bool,
    url: String,
    output: Option<PathBuf>,
    shared: SharedOptions,
    background: bool,
    margin_top: String,
    margin_right: String,
    margin_bottom: String,
    margin_left: String,
    format: String,
    landscape: bool,
    display_header_footer: bool,
    header_template: String,
    footer_template: String,
) -> ExitCode {
    let result = print(
        raw_args,
        config_path,
        verbose,
        url,
        output,
        shared,
        background,
        margin_top,
        margin_right,
        margin_bottom,
        margin_left,
        format,
        landscape,
        display_header_footer,
        header_template,
        footer_template,
    )
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failed to generate pdf: {err}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn print(
    raw_args: &[String],
    config_path: Option<&Path>,
    verbose: bool,
    url: String,
    output: Option<PathBuf>,
    shared: SharedOptions,
    background: bool,
    margin_top: String,
    margin_right: String,
    margin_bottom: String,
    margin_left: String,
    format: String,
    landscape: bool,
    display_header_footer: bool,
    header_template: String,
    footer_template: String,
) -> Result<()> {
    let config = settings::load_config(config_path)?;
    let resolved = settings::resolve_shared_settings(raw_args, &shared, &config);
    let pdf_options = settings::resolve_print_options(
        raw_args,
        &config,
        background,
        margin_top,
        margin_right,
        margin_bottom,
        margin_left,
        format,
        landscape,
        display_header_footer,
        header_template,
        footer_template,
    );

    let target_url = resolve_target(&url)?;
    let cookies = build_cookies(&shared.cookie, &target_url)?;

    if verbose {
        eprintln!("Target: {target_url}");
        eprintln!(
            "Timeout: {}ms, wait-until: {}",
            resolved.timeout_ms, resolved.wait_until
        );
        eprintln!("Format: {}, landscape: {}", pdf_options.format, pdf_options.landscape);
    }

    let request = RenderRequest {
        target_url,
        navigation: pagecap_lib::NavigationOptions {
            timeout_ms: resolved.timeout_ms,
            wait_until: resolved.wait_until,
        },
        cookies,
        output,
        mode: CaptureMode::Pdf(pdf_options),
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
