mod harness;
mod harness_error;

pub use harness::{Harness, ServiceLease};
pub use harness_error::HarnessError;
