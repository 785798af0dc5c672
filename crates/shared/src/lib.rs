pub mod console;
pub mod domain;
pub mod error;
pub mod protocol;
