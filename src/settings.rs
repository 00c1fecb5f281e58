use std::path::Path;

use pagecap_lib::{Config, PdfOptions, RenderError};

use crate::cli::SharedOptions;

/// Returns true when the flag was explicitly given on the command line,
/// either as `--flag` or `--flag=value`. Used to decide whether a CLI
/// value overrides the config file or merely carries its clap default.
pub fn flag_present(raw_args: &[String], flag: &str) -> bool {
    let prefixed = format!("{flag}=");
    raw_args
        .iter()
        .any(|arg| arg == flag || arg.starts_with(&prefixed))
}

/// Shared options after config layering.
#[derive(Debug, Clone)]
pub struct ResolvedSharedSettings {
    pub timeout_ms: u64,
    pub wait_until: String,
}

pub fn resolve_shared_settings(
    raw_args: &[String],
    shared: &SharedOptions,
    config: &Config,
) -> ResolvedSharedSettings {
    let timeout_ms = if flag_present(raw_args, "--timeout") {
        shared.timeout
    } else {
        config.timeout.as_millis() as u64
    };
    let wait_until = if flag_present(raw_args, "--wait-until") {
        shared.wait_until.clone()
    } else {
        config.wait_until.clone()
    };
    ResolvedSharedSettings {
        timeout_ms,
        wait_until,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn resolve_print_options(
    raw_args: &[String],
    config: &Config,
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
) -> PdfOptions {
    let pick = |flag: &str, cli_value: String, config_value: &str| {
        if flag_present(raw_args, flag) {
            cli_value
        } else {
            config_value.to_string()
        }
    };

    PdfOptions {
        format: pick("--format", format, &config.print.format),
        landscape,
        print_background: background,
        margin_top: pick("--margin-top", margin_top, &config.print.margin_top),
        margin_right: pick("--margin-right", margin_right, &config.print.margin_right),
        margin_bottom: pick(
            "--margin-bottom",
            margin_bottom,
            &config.print.margin_bottom,
        ),
        margin_left: pick("--margin-left", margin_left, &config.print.margin_left),
        display_header_footer,
        header_template,
        footer_template,
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config, RenderError> {
    let config =
        Config::load(path).map_err(|err| RenderError::Validation(err.to_string()))?;
    config.validate().map_err(RenderError::Validation)?;
    Ok(config)
}
