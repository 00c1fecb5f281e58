use std::process::ExitCode;

mod cli;
mod commands;
mod settings;

use cli::Commands;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();

    match args.command {
        Commands::Print {
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
        } => {
            commands::run_print(
                &raw_args,
                args.config.as_deref(),
                args.verbose,
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
            .await
        }
        Commands::Screenshot {
            url,
            output,
            shared,
            full_page,
            omit_background,
            viewport,
        } => {
            commands::run_screenshot(
                &raw_args,
                args.config.as_deref(),
                args.verbose,
                url,
                output,
                shared,
                full_page,
                omit_background,
                viewport,
            )
            .await
        }
    }
}
