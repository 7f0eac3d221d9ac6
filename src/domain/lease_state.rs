use std::fmt;
use std::str::FromStr;

/// Lifecycle of one service lease. `Uninitialized` and `Provisioning`
/// cover the acquire phase before a lease handle exists; they appear in
/// the acquire path's structured logs, while a lease itself is born
/// `Ready`. `Closed` is terminal and reached exactly once regardless of
/// what happens while `Executing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaseState {
    Uninitialized,
    Provisioning,
    Ready,
    Executing,
    TearingDown,
    Closed,
}

impl LeaseState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaseState::Uninitialized => "UNINITIALIZED",
            LeaseState::Provisioning => "PROVISIONING",
            LeaseState::Ready => "READY",
            LeaseState::Executing => "EXECUTING",
            LeaseState::TearingDown => "TEARING_DOWN",
            LeaseState::Closed => "CLOSED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LeaseState::Closed)
    }
}

impl FromStr for LeaseState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNINITIALIZED" => Ok(LeaseState::Uninitialized),
            "PROVISIONING" => Ok(LeaseState::Provisioning),
            "READY" => Ok(LeaseState::Ready),
            "EXECUTING" => Ok(LeaseState::Executing),
            "TEARING_DOWN" => Ok(LeaseState::TearingDown),
            "CLOSED" => Ok(LeaseState::Closed),
            _ => Err(format!("Invalid lease state: {}", s)),
        }
    }
}

impl fmt::Display for LeaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
