//! HTTP transport built on warp

pub mod handlers;
pub mod routes;
pub mod server;
pub mod utils;

pub use routes::RouteBuilder;
pub use server::HttpServer;
