pub mod console;

pub use console::{BufferConsole, Console, StdoutConsole};
