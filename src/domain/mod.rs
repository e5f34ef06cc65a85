pub mod datetime;
pub mod promotion;
pub mod validation;
