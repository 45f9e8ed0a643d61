//! Application layer - the method registry, its built-in methods and
//! construction from configuration

pub mod builtin;
pub mod registry;
pub mod setup;

pub use builtin::register_builtins;
pub use registry::{MethodRegistry, MAX_ALIAS_DEPTH};
pub use setup::RegistrySetup;
