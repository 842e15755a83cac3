mod loader;

use std::path::Path;

use anyhow::{Context, Result};
use ls8_common::Console;
use ls8_cpu::{Machine, MachineConfig, MachineError};

pub use loader::{load_program_file, load_program_text, LoadError};

/// Process exit codes, distinct per failure class so scripts can tell a bad
/// path from a bad program.
///
/// `ProgramNotFound` covers every failure to read the program file (missing,
/// permission denied, a directory). A file that reads but is not text is a
/// `MalformedProgram`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Halted = 0,
    Failure = 1,
    ProgramNotFound = 2,
    MalformedProgram = 3,
    UnknownOpcode = 4,
    StackFault = 5,
    InvalidRegister = 6,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Classify an error returned by [`run_file`].
    pub fn from_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(err) = cause.downcast_ref::<LoadError>() {
                return match err {
                    LoadError::NotFound { .. } | LoadError::Io { .. } => {
                        ExitStatus::ProgramNotFound
                    }
                    LoadError::InvalidEncoding { .. }
                    | LoadError::InvalidLiteral { .. }
                    | LoadError::TooLarge { .. } => ExitStatus::MalformedProgram,
                };
            }
            if let Some(err) = cause.downcast_ref::<MachineError>() {
                return match err {
                    MachineError::UnknownOpcode { .. } => ExitStatus::UnknownOpcode,
                    MachineError::StackOverflow { .. } | MachineError::StackUnderflow { .. } => {
                        ExitStatus::StackFault
                    }
                    MachineError::InvalidRegister { .. } => ExitStatus::InvalidRegister,
                    MachineError::ProgramTooLarge { .. } => ExitStatus::MalformedProgram,
                    MachineError::Output(_) | MachineError::Halted => ExitStatus::Failure,
                };
            }
        }
        ExitStatus::Failure
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

/// Load `program` into a fresh machine and run it to completion.
pub fn run_program<C: Console>(
    program: &[u8],
    config: MachineConfig,
    console: &mut C,
) -> Result<Machine> {
    let mut machine = Machine::with_config(config);
    machine.load_program(program)?;
    machine.run(console)?;
    Ok(machine)
}

/// Read an `.ls8` file and run it.
pub fn run_file<C: Console>(
    path: impl AsRef<Path>,
    config: MachineConfig,
    console: &mut C,
) -> Result<Machine> {
    let path = path.as_ref();
    let program = load_program_file(path)?;
    run_program(&program, config, console)
        .with_context(|| format!("while running '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ls8_common::BufferConsole;
    use ls8_cpu::State;
    use std::path::PathBuf;

    fn program_path(name: &str) -> PathBuf {
        // Support both workspace-root and crate-relative working directories.
        let candidates = [
            PathBuf::from("assets/programs").join(name),
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("../../assets/programs")
                .join(name),
        ];
        for path in &candidates {
            if path.exists() {
                return path.clone();
            }
        }
        panic!("{} not found. Tried: {:?}", name, candidates)
    }

    fn run_asset(name: &str) -> (Machine, BufferConsole) {
        let mut console = BufferConsole::new();
        let machine = run_file(program_path(name), MachineConfig::default(), &mut console)
            .unwrap_or_else(|err| panic!("{} failed: {:#}", name, err));
        (machine, console)
    }

    #[test]
    fn print8() {
        let (machine, console) = run_asset("print8.ls8");
        assert_eq!(console.text(), "8\n");
        assert_eq!(machine.state(), State::Halted);
    }

    #[test]
    fn mult() {
        let (_, console) = run_asset("mult.ls8");
        assert_eq!(console.text(), "72\n");
    }

    #[test]
    fn stack() {
        let (machine, console) = run_asset("stack.ls8");
        assert_eq!(console.numbers(), vec![2, 4, 1]);
        assert_eq!(machine.registers().sp(), ls8_cpu::STACK_BASE);
    }

    #[test]
    fn call() {
        let (machine, console) = run_asset("call.ls8");
        assert_eq!(console.numbers(), vec![20, 30, 36, 60]);
        assert_eq!(machine.registers().sp(), ls8_cpu::STACK_BASE);
    }

    #[test]
    fn sctest() {
        let (_, console) = run_asset("sctest.ls8");
        assert_eq!(console.numbers(), vec![1, 4, 5]);
    }

    #[test]
    fn exit_status_for_missing_file() {
        let mut console = BufferConsole::new();
        let err = run_file("no/such/program.ls8", MachineConfig::default(), &mut console)
            .unwrap_err();
        assert_eq!(ExitStatus::from_error(&err), ExitStatus::ProgramNotFound);
        assert_eq!(ExitStatus::from_error(&err).code(), 2);
    }

    #[test]
    fn exit_status_for_machine_faults() {
        let mut console = BufferConsole::new();
        let cases = [
            (vec![0xFF_u8], ExitStatus::UnknownOpcode),
            (vec![0b0100_0110, 0], ExitStatus::StackFault),
            (vec![0b1000_0010, 9, 0], ExitStatus::InvalidRegister),
            (vec![0; 300], ExitStatus::MalformedProgram),
        ];
        for (program, expected) in cases {
            let err = run_program(&program, MachineConfig::default(), &mut console).unwrap_err();
            assert_eq!(ExitStatus::from_error(&err), expected, "{:#}", err);
        }
    }

    #[test]
    fn exit_status_for_binary_file() {
        let path =
            std::env::temp_dir().join(format!("ls8_binary_{}.ls8", std::process::id()));
        std::fs::write(&path, [0xFF, 0xFE, b'\n']).unwrap();
        let mut console = BufferConsole::new();
        let result = run_file(&path, MachineConfig::default(), &mut console);
        let _ = std::fs::remove_file(&path);

        let err = result.unwrap_err();
        assert_eq!(ExitStatus::from_error(&err), ExitStatus::MalformedProgram);
        assert_eq!(ExitStatus::from_error(&err).code(), 3);
    }

    #[test]
    fn exit_status_for_bad_literal() {
        let err = anyhow::Error::new(load_program_text("2\n").unwrap_err());
        assert_eq!(ExitStatus::from_error(&err), ExitStatus::MalformedProgram);
    }
}
