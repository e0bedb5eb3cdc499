use std::{fmt, str::FromStr};

use crate::ExecError;

/// Sub-action of the compose operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeAction {
    Pull,
    Up,
    Down,
    /// Project status (`docker compose ps`).
    Info,
}

impl ComposeAction {
    pub const ALL: [ComposeAction; 4] = [Self::Pull, Self::Up, Self::Down, Self::Info];
    pub(crate) const EXPECTED: &'static str = "pull, up, down, info";

    pub fn as_str(&self) -> &'static str {
        match self {
            ComposeAction::Pull => "pull",
            ComposeAction::Up => "up",
            ComposeAction::Down => "down",
            ComposeAction::Info => "info",
        }
    }
}

impl FromStr for ComposeAction {
    type Err = ExecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ExecError::UnknownAction {
                action: s.to_string(),
                expected: Self::EXPECTED,
            })
    }
}

impl fmt::Display for ComposeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
