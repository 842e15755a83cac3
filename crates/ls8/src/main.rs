use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ls8::ExitStatus;
use ls8_common::StdoutConsole;
use ls8_cpu::MachineConfig;

/// Run an LS-8 program.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the `.ls8` program
    program: PathBuf,

    /// Log a trace line before every instruction (needs RUST_LOG=trace)
    #[arg(long, env = "LS8_TRACE")]
    trace: bool,

    /// Print R0 when the program halts
    #[arg(long, env = "LS8_ECHO_ON_HALT")]
    echo_on_halt: bool,

    /// Let CALL push its return address without the stack floor check
    #[arg(long, env = "LS8_UNGUARDED_CALL")]
    unguarded_call: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitStatus::Failure.into()
            } else {
                ExitStatus::Halted.into()
            };
        }
    };

    let config = MachineConfig::builder()
        .trace(cli.trace)
        .echo_on_halt(cli.echo_on_halt)
        .guard_call(!cli.unguarded_call)
        .build();

    let mut console = StdoutConsole::new();
    match ls8::run_file(&cli.program, config, &mut console) {
        Ok(_) => ExitStatus::Halted.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::from_error(&err).into()
        }
    }
}
