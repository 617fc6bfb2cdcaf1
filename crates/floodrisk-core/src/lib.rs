pub mod config;
pub mod factor;
pub mod input;
pub mod scorer;
pub mod vegetation;

pub use config::*;
pub use factor::*;
pub use input::*;
pub use scorer::*;
pub use vegetation::*;
