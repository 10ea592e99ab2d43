pub mod env;
pub mod loader;
pub mod profile;
pub mod settings;
pub mod source;

pub use env::*;
pub use loader::*;
pub use profile::*;
pub use settings::*;
pub use source::*;
