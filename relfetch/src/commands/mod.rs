pub mod get;
pub mod release;
