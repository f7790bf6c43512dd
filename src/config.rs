use crate::cli::{Args, ColorChoice};
use crate::interpreter::RunOptions;

pub struct AppConfig {
    pub color_enabled: bool,
    pub verbose: bool,
    pub prelude: bool,
    pub max_depth: usize,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Self {
        let color_enabled = match args.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => atty::is(atty::Stream::Stderr),
        };

        AppConfig {
            color_enabled,
            verbose: args.verbose,
            prelude: !args.no_prelude,
            max_depth: args.max_depth,
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            prelude: self.prelude,
            verbose: self.verbose,
            max_depth: self.max_depth,
        }
    }
}
