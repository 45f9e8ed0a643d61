//! Infrastructure layer - transports hosting the registry

pub mod http;

pub use http::HttpServer;
