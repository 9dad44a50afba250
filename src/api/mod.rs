pub mod client;
pub mod error;

pub use client::TaskGateway;
pub use error::ApiError;
