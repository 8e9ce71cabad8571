pub mod probe;
pub mod route;
pub mod token;
