mod department;

pub use department::{CreateDepartment, Department, UpdateDepartment};
