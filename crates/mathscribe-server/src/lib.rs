//! # Mathscribe Server
//!
//! HTTP API server: handwritten-math recognition and symbolic equation
//! solving over four routes (`/`, `/predict`, `/solve`, `/health`).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod server;
pub mod solver;

pub use server::{AppState, ErrorBody, Server, ServerConfig};
pub use solver::solve_equation;
