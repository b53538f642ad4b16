//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::department_profile::{DepartmentProfile, ProfileForm};
pub use repository::{DepartmentCount, ProfileRepository, ProfileStats};
pub use value_object::approval_status::{ApprovalStatus, ReviewAction};
pub use value_object::department_name::DepartmentName;
