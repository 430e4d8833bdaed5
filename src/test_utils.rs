//! Test utilities shared across test modules

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::model::Profile;
use crate::output::Output;
use crate::paths::Paths;
use tempfile::TempDir;

/// Create a Paths struct rooted in a temporary directory
pub fn setup_test_paths(temp_dir: &TempDir) -> Paths {
    Paths::from_dir(temp_dir.path().join("ccm"))
}

/// A valid profile with the given name
pub fn profile(name: &str) -> Profile {
    Profile::new(
        name,
        format!("sk-test-{name}-0123456789"),
        "https://api.example.com",
        "claude-sonnet-4",
    )
}

/// Output sink that records everything and answers confirmations from a script
///
/// Confirmations beyond the scripted answers fall back to the prompt's default.
#[derive(Default)]
pub struct ScriptedOutput {
    answers: RefCell<VecDeque<bool>>,
    lines: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Output for ScriptedOutput {
    fn write(&self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }

    fn write_line(&self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }

    fn error(&self, text: &str) {
        self.errors.borrow_mut().push(text.to_string());
    }

    fn confirm(&self, prompt: &str, default: bool) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or(default)
    }
}
