pub mod pavilion;
pub mod review;
