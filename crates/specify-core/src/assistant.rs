use crate::error::SpecifyError;
use std::fmt;
use std::str::FromStr;

/// The AI assistants a template exists for, in prompt order.
pub const ASSISTANTS: &[Assistant] = &[Assistant::Claude, Assistant::Gemini, Assistant::Copilot];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assistant {
    Claude,
    Gemini,
    Copilot,
}

impl Assistant {
    /// Stable id used in asset names and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Assistant::Claude => "claude",
            Assistant::Gemini => "gemini",
            Assistant::Copilot => "copilot",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Assistant::Claude => "Claude Code",
            Assistant::Gemini => "Gemini CLI",
            Assistant::Copilot => "GitHub Copilot",
        }
    }

    /// CLI tool this assistant needs on PATH, with an install hint.
    /// Copilot lives inside the editor and needs nothing locally.
    pub fn required_tool(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Assistant::Claude => Some((
                "claude",
                "https://docs.anthropic.com/en/docs/claude-code/setup",
            )),
            Assistant::Gemini => Some(("gemini", "https://github.com/google-gemini/gemini-cli")),
            Assistant::Copilot => None,
        }
    }
}

impl fmt::Display for Assistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Assistant {
    type Err = SpecifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claude" => Ok(Assistant::Claude),
            "gemini" => Ok(Assistant::Gemini),
            "copilot" => Ok(Assistant::Copilot),
            other => Err(SpecifyError::UnknownAssistant(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for a in ASSISTANTS {
            assert_eq!(*a, a.id().parse::<Assistant>().unwrap());
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        let err = "cursor".parse::<Assistant>().unwrap_err();
        assert!(err.to_string().contains("cursor"));
    }

    #[test]
    fn copilot_needs_no_local_tool() {
        assert!(Assistant::Copilot.required_tool().is_none());
        assert_eq!(Assistant::Claude.required_tool().unwrap().0, "claude");
    }
}
