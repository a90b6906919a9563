//! mcp-forge: generate boilerplate Python MCP servers
//!
//! A server is described as a [`generation::ServerSpec`], validated, and
//! rendered into `server.py`, `requirements.txt` and `README.md`. The same
//! pipeline backs the web wizard ([`web`]) and the command line.
#![deny(unsafe_code)]

pub mod application;
pub mod config;
pub mod generation;
pub mod infrastructure;
pub mod web;
pub mod wizard;
