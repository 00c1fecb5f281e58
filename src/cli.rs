use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pagecap")]
#[command(version, about = "Render a URL or local HTML file to PDF or PNG with headless Chromium")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print effective settings and extra stage detail to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file (default: ~/.config/pagecap/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the page to a PDF document
    Print {
        /// URL or local HTML file to render
        url: String,

        /// Output file; omit to write the PDF to stdout
        output: Option<PathBuf>,

        #[command(flatten)]
        shared: SharedOptions,

        /// Print background graphics
        #[arg(
            long,
            value_name = "BOOL",
            default_value_t = true,
            action = ArgAction::Set,
            num_args = 0..=1,
            default_missing_value = "true"
        )]
        background: bool,

        /// Top margin as a CSS length
        #[arg(long, value_name = "LENGTH", default_value = "6.25mm")]
        margin_top: String,

        /// Right margin as a CSS length
        #[arg(long, value_name = "LENGTH", default_value = "6.25mm")]
        margin_right: String,

        /// Bottom margin as a CSS length
        #[arg(long, value_name = "LENGTH", default_value = "14.11mm")]
        margin_bottom: String,

        /// Left margin as a CSS length
        #[arg(long, value_name = "LENGTH", default_value = "6.25mm")]
        margin_left: String,

        /// Paper format (Letter, Legal, Tabloid, Ledger, A0-A6)
        #[arg(long, value_name = "FORMAT", default_value = "Letter")]
        format: String,

        /// Landscape orientation
        #[arg(
            long,
            value_name = "BOOL",
            default_value_t = false,
            action = ArgAction::Set,
            num_args = 0..=1,
            default_missing_value = "true"
        )]
        landscape: bool,

        /// Show the header and footer templates
        #[arg(
            long,
            value_name = "BOOL",
            default_value_t = false,
            action = ArgAction::Set,
            num_args = 0..=1,
            default_missing_value = "true"
        )]
        display_header_footer: bool,

        /// HTML template for the page header
        #[arg(long, value_name = "HTML", default_value = "")]
        header_template: String,

        /// HTML template for the page footer
        #[arg(long, value_name = "HTML", default_value = "")]
        footer_template: String,
    },

    /// Capture the page as a PNG screenshot
    Screenshot {
        /// URL or local HTML file to render
        url: String,

        /// Output file; omit to write the PNG to stdout
        output: Option<PathBuf>,

        #[command(flatten)]
        shared: SharedOptions,

        /// Capture the full scrollable page
        #[arg(
            long,
            value_name = "BOOL",
            default_value_t = true,
            action = ArgAction::Set,
            num_args = 0..=1,
            default_missing_value = "true"
        )]
        full_page: bool,

        /// Hide the default white background
        #[arg(
            long,
            value_name = "BOOL",
            default_value_t = false,
            action = ArgAction::Set,
            num_args = 0..=1,
            default_missing_value = "true"
        )]
        omit_background: bool,

        /// Set viewport to a given size, e.g. 800x600
        #[arg(long, value_name = "WxH")]
        viewport: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct SharedOptions {
    /// Accepted for compatibility; launch flags are fixed
    #[arg(
        long,
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub sandbox: bool,

    /// Navigation timeout in milliseconds (0 disables the timeout)
    #[arg(long, value_name = "MS", default_value_t = 30_000)]
    pub timeout: u64,

    /// Event to wait for before capturing (load, domcontentloaded)
    #[arg(long, value_name = "EVENT", default_value = "load")]
    pub wait_until: String,

    /// Cookie to set before navigation; repeatable
    #[arg(long, value_name = "NAME:VALUE")]
    pub cookie: Vec<String>,
}

pub fn parse() -> Cli {
    Cli::parse()
}
