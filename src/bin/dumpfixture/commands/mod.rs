pub mod capture;
pub mod census;
