pub mod normalizers;

pub use normalizers::*;
