pub mod cloudstack;
pub mod glesys;
pub mod nova;
