pub mod forecast;
pub mod system;
