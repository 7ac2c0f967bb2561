//! HTTP client module for the Narcissus scanner

pub mod client;
pub use client::HttpClient;
