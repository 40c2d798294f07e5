pub mod assess;
pub mod audit;
