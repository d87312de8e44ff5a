pub mod cipher;
pub mod curve;
pub mod field;
pub mod mimc;
