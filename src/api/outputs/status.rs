//! The shared SAT/UNSAT status returned at both top-level entry points (§6).

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Sat,
    Unsat,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Sat => write!(f, "SAT"),
            Status::Unsat => write!(f, "UNSAT"),
        }
    }
}
