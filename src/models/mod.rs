pub mod currency;
pub mod experience;
pub mod field;
pub mod vacancy;
