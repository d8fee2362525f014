//! Press pass generator: renders printable ID cards and starts hosted
//! checkout for laminated copies.

pub mod card;
pub mod config;
pub mod dto;
pub mod error;
pub mod payments;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
