pub mod assessment;
pub mod audit;
pub mod section;
pub mod user;
pub mod validation;
