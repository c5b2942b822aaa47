use thiserror::Error;

pub type Result<T> = std::result::Result<T, CohortError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CohortError {
    #[error("cohort size {requested} exceeds the number of available perspectives ({available})")]
    CohortSizeExceedsAvailablePerspectives { requested: usize, available: usize },
}
