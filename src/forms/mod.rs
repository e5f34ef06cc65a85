pub mod filters;
pub mod promotions;
