pub mod auth;
pub mod keypoint;
pub mod problem;
pub mod replacement;
pub mod review;
pub mod tour;
