//! Profiles Crate
//!
//! Department profile submission and review workflow: applicants draft
//! and submit one profile per department, staff review submissions and
//! notify the applicant of the outcome.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use application::config::ProfilesConfig;
pub use error::{ProfileError, ProfileResult};
pub use infra::postgres::PgProfileRepository;
pub use presentation::router::{admin_router, profiles_router};
