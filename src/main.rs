use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Convert Hacker News stories and comments from json on stdin to a sqlite database.
#[derive(Parser, Debug)]
#[command(name = "hn2sqlite", version)]
struct Args {
  /// sqlite database to load into, created if it doesn't exist
  #[arg(value_name = "DATABASE")]
  database : PathBuf,

  /// read json from this file instead of stdin
  #[arg(long, short = 'i', value_name = "FILE")]
  input : Option<PathBuf>,

  /// more logging, repeat for even more. RUST_LOG overrides this.
  #[arg(long, short = 'v', action = clap::ArgAction::Count)]
  verbose : u8,
}

fn main() -> ExitCode {
  let args = match Args::try_parse() {
    Ok(args) => args,
    Err(err) => {
      // --help and --version also arrive here, and they're not failures
      let code = if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
      let _ = err.print();
      return code
    }
  };

  let level = match args.verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

  let result = hn2sqlite::make_readable(args.input.as_deref())
    .and_then(|istream| hn2sqlite::run(&args.database, istream));

  match result {
    Ok(stats) => {
      log::debug!("{stats}");
      ExitCode::SUCCESS
    }
    Err(err) => {
      log::error!("{err}");
      ExitCode::FAILURE
    }
  }
}
