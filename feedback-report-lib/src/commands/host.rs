use std::io::{Read, Write};

/// The process surroundings a command talks to, swapped out in tests
pub trait Host: Send + Sync {
    /// Where events are read from when no file is named (e.g., stdin)
    fn input(&mut self) -> impl Read;

    /// Where command results go (e.g., stdout)
    fn output(&mut self) -> impl Write;

    /// Where diagnostics go (e.g., stderr)
    fn error(&mut self) -> impl Write;

    /// Terminate the process; a test host may only record the code.
    fn exit(&mut self, code: i32);
}
