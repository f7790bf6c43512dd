use atto::cli::{generate_completions, Args, Commands};
use atto::config::AppConfig;
use atto::diagnostic::render_diagnostics;
use atto::interpreter::run_source;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use std::fs;
use std::process;

fn main() {
    let args = Args::parse();

    if let Some(Commands::Complete { shell }) = args.command {
        generate_completions(shell);
        return;
    }

    let config = AppConfig::from_args(&args);

    let Some(path) = args.file.as_ref() else {
        Args::command()
            .error(ErrorKind::MissingRequiredArgument, "a source <FILE> is required")
            .exit();
    };

    verbose_log(&config, &format!("Reading source from {}", path.display()));
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            error_message(&config, &format!("error: cannot read {}: {}", path.display(), e));
            process::exit(1);
        }
    };
    verbose_log(&config, &format!("Read {} bytes", source.len()));

    match run_source(&source, &config.run_options()) {
        Ok(Some(value)) => verbose_log(&config, &format!("Finished with {}", value)),
        Ok(None) => verbose_log(&config, "Finished without running anything"),
        Err(err) => {
            verbose_log(&config, &format!("Stopped: {}", err));
            let file_name = path.display().to_string();
            eprint!(
                "{}",
                render_diagnostics(&source, &file_name, &[err.to_diagnostic()], config.color_enabled)
            );
            process::exit(1);
        }
    }
}

fn verbose_log(config: &AppConfig, message: &str) {
    if config.verbose {
        eprintln!("[atto:debug] {}", message);
    }
}

fn error_message(config: &AppConfig, message: &str) {
    if config.color_enabled {
        eprintln!("{}", message.red().bold());
    } else {
        eprintln!("{}", message);
    }
}
