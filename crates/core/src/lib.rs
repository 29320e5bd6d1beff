pub mod arn;
pub mod config;
pub mod error;

pub use arn::*;
pub use config::DeployConfig;
pub use error::*;
