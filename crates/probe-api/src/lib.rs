mod error;
pub use error::ApiError;

mod handler;
pub use handler::ProbeHandler;

mod adapter;
pub use adapter::ProbeService;

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpApi;

#[cfg(feature = "http")]
pub use axum;
