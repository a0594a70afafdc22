pub mod http;
pub mod api_client;
pub mod auth_service;

pub use http::{ApiError, ApiRequest, ApiResponse, FetchTransport, HttpMethod, Transport};
pub use api_client::{ApiClient, Outcome};
