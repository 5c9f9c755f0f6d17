//! CLI entry point for dirtree

use std::io;
use std::process::ExitCode;

use dirtree::{
    Args, JsonFormatter, OsFileSystem, StreamingFormatter, TreeConfig, TreeError, TreeStats,
    TreeWalker, prompt_config,
};
use env_logger::Env;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // No arguments at all means interactive mode
    let (config, json) = if std::env::args_os().len() <= 1 {
        match prompt_config(&mut io::stdin().lock(), &mut io::stdout()) {
            Ok(config) => (config, false),
            Err(e) => {
                eprintln!("dirtree: failed to read input: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        let args = Args::parse_lenient(std::env::args_os());
        let json = args.json;
        (args.into_config(), json)
    };

    match run(&config, json) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dirtree: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &TreeConfig, json: bool) -> Result<TreeStats, TreeError> {
    let walker = TreeWalker::new(&OsFileSystem, config);
    if json {
        let mut output = JsonFormatter::new(io::stdout().lock());
        walker.walk(&mut output)
    } else {
        let mut output = StreamingFormatter::stdout(config.use_color);
        walker.walk(&mut output)
    }
}
