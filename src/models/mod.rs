pub mod report;
pub mod signal;

pub use report::*;
pub use signal::*;
