use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A package-specific validator was given a record of another package.
    #[error("package {actual:?} is not the expected sample package ({expected}) for this validator")]
    WrongPackage { expected: String, actual: String },
}
