use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ls8_cpu::MEMORY_SIZE;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} file not found", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a text file", path.display())]
    InvalidEncoding { path: PathBuf },
    #[error("line {line}: '{text}' is not an 8-bit binary literal")]
    InvalidLiteral { line: usize, text: String },
    #[error("program is {len} bytes but memory holds {}", MEMORY_SIZE)]
    TooLarge { len: usize },
}

/// Parse `.ls8` source into bytes.
///
/// One binary literal per line; anything after `#` is a comment and blank
/// lines are skipped:
///
/// ```text
/// 10000010 # LDI R0,8
/// 00000000
/// 00001000
/// 01000111 # PRN R0
/// 00000000
/// 00000001 # HLT
/// ```
pub fn load_program_text(source: &str) -> Result<Vec<u8>, LoadError> {
    let mut program = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let code = line.split('#').next().unwrap_or_default().trim();
        if code.is_empty() {
            continue;
        }
        let byte = u8::from_str_radix(code, 2).map_err(|_| LoadError::InvalidLiteral {
            line: index + 1,
            text: code.to_string(),
        })?;
        program.push(byte);
    }

    if program.len() > MEMORY_SIZE {
        return Err(LoadError::TooLarge { len: program.len() });
    }
    Ok(program)
}

pub fn load_program_file(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::InvalidData => LoadError::InvalidEncoding {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let program = load_program_text(&source)?;
    log::info!("Loaded {} bytes from '{}'", program.len(), path.display());
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literals_and_skips_comments() {
        let source = "\
# print8.ls8

10000010 # LDI R0,8
00000000
00001000
   01000111   # PRN R0
00000000
00000001 # HLT
";
        let program = load_program_text(source).unwrap();
        assert_eq!(program, vec![0x82, 0x00, 0x08, 0x47, 0x00, 0x01]);
    }

    #[test]
    fn reports_line_of_bad_literal() {
        let err = load_program_text("00000001\n\n1000002 # typo\n").unwrap_err();
        match err {
            LoadError::InvalidLiteral { line, text } => {
                assert_eq!(line, 3);
                assert_eq!(text, "1000002");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_values_wider_than_a_byte() {
        let err = load_program_text("100000000\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidLiteral { line: 1, .. }));
    }

    #[test]
    fn rejects_programs_larger_than_memory() {
        let source = "00000000\n".repeat(MEMORY_SIZE + 1);
        let err = load_program_text(&source).unwrap_err();
        assert!(matches!(err, LoadError::TooLarge { len: 257 }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_program_file("definitely/not/here.ls8").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(err.to_string(), "definitely/not/here.ls8 file not found");
    }

    #[test]
    fn non_utf8_file_is_invalid_encoding() {
        let path =
            std::env::temp_dir().join(format!("ls8_bad_utf8_{}.ls8", std::process::id()));
        fs::write(&path, [0xFF, 0xFE, b'\n']).unwrap();
        let result = load_program_file(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(LoadError::InvalidEncoding { .. })));
    }
}
