//! Client for the external card catalog API

pub mod client;

pub use client::{TcgClient, TcgConfig, DEFAULT_BASE_URL};
