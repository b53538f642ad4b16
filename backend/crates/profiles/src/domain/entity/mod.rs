//! Domain Entities

pub mod department_profile;
