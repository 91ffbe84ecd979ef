use thiserror::Error;

pub type FcResult<T> = Result<T, FcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FcError {
    #[error("Invalid configuration: {what} = {value}")]
    InvalidConfiguration { what: &'static str, value: f64 },
}
