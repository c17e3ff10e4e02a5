use anyhow::Result;
use argh::FromArgs;
use pipe_shell::Interpreter;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// A tiny shell: echo, pwd, cat, wc and external programs joined with pipes.
/// Starts an interactive session unless a command line is given.
struct Args {
    #[argh(option, short = 'c')]
    /// run a single command line and exit
    command: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Args = argh::from_env();
    let mut sh = Interpreter::default();

    match args.command {
        Some(line) => {
            let out = sh.run_line(&line)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(out.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
        None => sh.repl(),
    }
}
