use serde::Serialize;
use std::fmt;

/// Lifecycle of a single configuration resolution.
///
/// ```text
/// Unloaded -> Loading -> Validating -> Ready
///                 \            \
///                  +-> Failed   +-> Failed
/// ```
///
/// `Ready` and `Failed` are terminal. Reloading means building a new resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionState {
    Unloaded,
    Loading,
    Validating,
    Ready,
    Failed,
}

impl ResolutionState {
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Unloaded, Self::Loading)
                | (Self::Loading, Self::Validating | Self::Failed)
                | (Self::Validating, Self::Ready | Self::Failed)
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Validating => "validating",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
