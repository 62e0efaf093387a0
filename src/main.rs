// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;
use voice_lens::app::{self, Flags};

const HELP: &str = "\
Voice-driven stock photo search

USAGE:
  voice_lens [QUERY] [OPTIONS]

ARGS:
  QUERY                   Search run on startup (default: [search].default_query)

OPTIONS:
  --lang <LOCALE>         Interface language (e.g. en-US, fr)
  --config-dir <DIR>      Directory holding settings.toml
  --diagnostics <FILE>    Write a diagnostics report when the window closes
  --verbose               Print warnings and errors to stderr
  -h, --help              Print this help
";

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        diagnostics_path: args.opt_value_from_str::<_, PathBuf>("--diagnostics")?,
        verbose: args.contains("--verbose"),
        initial_query: None,
    };

    let rest: Vec<String> = args
        .finish()
        .into_iter()
        .filter_map(|arg| arg.into_string().ok())
        .collect();
    let initial_query = (!rest.is_empty()).then(|| rest.join(" "));

    Ok(Flags {
        initial_query,
        ..flags
    })
}

fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    match app::run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
