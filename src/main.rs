//! edrex - editor-flavored regex find/replace CLI

#[cfg(feature = "cli")]
mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    #[cfg(feature = "cli")]
    {
        use clap::CommandFactory;
        use cli::{parse, Cli, Commands};
        use edrex::core::{EngineConfig, SearchError};
        use edrex::output::{json::format_json_compact, ErrorResponse};

        init_tracing();

        let args = parse();

        // If no command, show help
        let Some(command) = args.command else {
            let _ = Cli::command().print_help();
            return ExitCode::SUCCESS;
        };

        let format = args.format;
        let config = EngineConfig {
            backtrack_limit: args.backtrack_limit,
        };

        let result = match command {
            Commands::Find {
                pattern,
                input,
                pattern_args,
                range,
                all,
                max_matches,
            } => {
                let options = cli::find_options(&pattern_args, &range, all, max_matches);
                cli::handle_find(&pattern, &input, &options, &pattern_args, config, format)
            }

            Commands::Replace {
                pattern,
                template,
                input,
                pattern_args,
                range,
                all,
                write,
                no_backup,
            } => {
                let options = cli::find_options(&pattern_args, &range, all, usize::MAX);
                cli::handle_replace(
                    &pattern,
                    &template,
                    &input,
                    &options,
                    &pattern_args,
                    write,
                    no_backup,
                    config,
                    format,
                )
            }

            Commands::Translate {
                pattern,
                pattern_args,
            } => cli::handle_translate(&pattern, &pattern_args, config, format),

            Commands::Expand { template } => cli::handle_expand(&template, format),
        };

        match result {
            Ok(output) => {
                println!("{}", output);
                ExitCode::SUCCESS
            }
            Err(e) => {
                // Output error as structured JSON
                let code = e
                    .downcast_ref::<SearchError>()
                    .map_or("COMMAND_ERROR", SearchError::code);
                let error = ErrorResponse::new(code, format!("{:#}", e));
                eprintln!("{}", format_json_compact(&error));
                ExitCode::FAILURE
            }
        }
    }

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("CLI feature not enabled. Build with --features cli");
        ExitCode::FAILURE
    }
}

/// Log to stderr so stdout stays machine-readable. Filter from `EDREX_LOG`.
#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("EDREX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
