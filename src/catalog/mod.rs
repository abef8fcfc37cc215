pub mod alias;
pub mod document;
pub mod generator;
pub mod rows;
