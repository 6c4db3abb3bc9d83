// Infrastructure layer - Configuration, encoding and page rendering
pub mod config;
pub mod http_response;
pub mod page;
