use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    Capturing,
    Executing,
    SkippedEmpty,
    Relaying,
    Done,
    Aborted,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Capturing => "capturing",
            Stage::Executing => "executing",
            Stage::SkippedEmpty => "skipped_empty",
            Stage::Relaying => "relaying",
            Stage::Done => "done",
            Stage::Aborted => "aborted",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
