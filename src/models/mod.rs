//! Database models shared across the booking repository.

pub mod auth;
pub mod bonus;
pub mod cart;
pub mod config;
pub mod keypoint;
pub mod problem;
pub mod purchase;
pub mod replacement;
pub mod review;
pub mod tour;
pub mod user;
