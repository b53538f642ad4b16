//! Value Objects

pub mod approval_status;
pub mod department_name;
