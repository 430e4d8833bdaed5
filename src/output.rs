//! Output sink used by the registry to report results and ask for confirmation.

pub trait Output {
    /// Write text without a trailing newline
    fn write(&self, text: &str);

    fn write_line(&self, text: &str);

    /// Report a failure to the user (stderr for terminal sinks)
    fn error(&self, text: &str);

    /// Ask a yes/no question. Returns `default` when the user just presses Enter.
    fn confirm(&self, prompt: &str, default: bool) -> bool;
}
