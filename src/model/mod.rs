pub mod config;
pub mod key;
pub mod line;
pub mod section;

pub use config::*;
pub use key::*;
pub use line::*;
pub use section::*;
