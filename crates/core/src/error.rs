use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("malformed ARN '{value}': {reason}")]
    MalformedArn { value: String, reason: String },
}
