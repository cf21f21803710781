//! `freecam-replay`: run a JSON input script through the camera rig and
//! print one JSON line per frame.
//!
//! ```text
//! freecam-replay <script.json> [--options <preset.toml>]
//! ```

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use freecam::options::Options;
use freecam::replay::ReplayScript;

struct Args {
    script: PathBuf,
    options: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let mut script = None;
    let mut options = None;
    while let Some(arg) = args.next() {
        if arg == "--options" {
            match args.next() {
                Some(path) => options = Some(PathBuf::from(path)),
                None => return Err("--options needs a path".to_owned()),
            }
        } else if script.is_none() {
            script = Some(PathBuf::from(arg));
        } else {
            return Err(format!("unexpected argument: {arg}"));
        }
    }
    script
        .map(|script| Args { script, options })
        .ok_or_else(|| {
            "Usage: freecam-replay <script.json> [--options <preset.toml>]"
                .to_owned()
        })
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut script = ReplayScript::load(&args.script)?;
    if let Some(path) = &args.options {
        script.options = Options::load(path)?;
    }

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in script.run() {
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
