pub mod config;
pub mod handlers;
pub mod language;
pub mod proxy;
pub mod routes;
pub mod state;
pub mod translate;
pub mod websocket;
