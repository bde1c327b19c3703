//! reqwest-backed [`CampusApi`](crate::CampusApi) implementation.

mod api;
mod client;
mod config;


pub use client::HttpCampusApi;
pub use config::HttpConfig;
