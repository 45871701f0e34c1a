pub mod enrollment_error;

pub use enrollment_error::{EnrollmentError, EnrollmentResult};
