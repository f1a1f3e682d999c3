pub mod cart;
pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod normalize;
pub mod orders;
pub mod response;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
