pub mod classification;
pub mod health;
pub mod reference;
