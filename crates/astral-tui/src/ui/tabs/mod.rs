//! Content for each page section.

pub mod community;
pub mod courses;
pub mod dashboard;
pub mod home;
pub mod markets;
