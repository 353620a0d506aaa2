//! Portfolio backend - content API with view tracking and ranked listings
//!
//! This library provides the core functionality for the portfolio backend:
//! project, blog, case study, and testimonial content, per-IP deduplicated
//! view tracking, and a weighted ranking score for the public listing.
//!
//! # Architecture
//! - `api`: HTTP services, JWT auth, and middleware
//! - `repository`: Sea-ORM data access layer
//! - `services`: view recording and score recomputation
//! - `config`: configuration management
//! - `cli`: maintenance commands (admin seeding)

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod repository;
pub mod services;
pub mod utils;
