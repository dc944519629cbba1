pub mod data;
pub mod dates;
pub mod fields;
