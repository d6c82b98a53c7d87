pub mod contact;
mod health_check;

pub use health_check::*;
