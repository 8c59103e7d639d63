//! Constraint checking over single actions and combinations.

pub mod validator;

pub use validator::ConstraintValidator;
