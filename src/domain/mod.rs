pub mod models;
pub mod values;
pub mod filter;
pub mod sort;
pub mod errors;

pub use models::*;
pub use values::*;
pub use filter::*;
pub use sort::*;
pub use errors::*;
