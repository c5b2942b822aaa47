use serde::{Deserialize, Serialize};

/// A configured remote vantage point from which a check can be performed.
///
/// `code` must be unique across the set of perspectives a coordinator is
/// configured with; `rir` classifies the perspective for diversity purposes
/// (see the cohort and quorum rules in `mpic-cohort` / `mpic-coordinator`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Perspective {
    pub code: String,
    pub rir: String,
}

impl Perspective {
    pub fn new(code: impl Into<String>, rir: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            rir: rir.into(),
        }
    }
}
