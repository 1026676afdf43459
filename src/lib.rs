// Library exports for integration tests
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod geo;
pub mod handlers;
pub mod models;
pub mod navigation;
pub mod signup;
pub mod templates;
