use std::str::FromStr;

use mooring::domain::LeaseState;

#[test]
fn given_state_when_formatting_then_uses_canonical_name() {
    assert_eq!(LeaseState::TearingDown.to_string(), "TEARING_DOWN");
    assert_eq!(LeaseState::Ready.as_str(), "READY");
}

#[test]
fn given_canonical_name_when_parsing_then_round_trips() {
    for state in [
        LeaseState::Uninitialized,
        LeaseState::Provisioning,
        LeaseState::Ready,
        LeaseState::Executing,
        LeaseState::TearingDown,
        LeaseState::Closed,
    ] {
        assert_eq!(LeaseState::from_str(state.as_str()), Ok(state));
    }
}

#[test]
fn given_unknown_name_when_parsing_then_returns_error() {
    assert!(LeaseState::from_str("RUNNING").is_err());
}

#[test]
fn given_closed_state_when_checking_then_only_closed_is_terminal() {
    assert!(LeaseState::Closed.is_terminal());
    assert!(!LeaseState::Executing.is_terminal());
    assert!(!LeaseState::TearingDown.is_terminal());
}
