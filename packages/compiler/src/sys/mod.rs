//! System Abstraction
//!
//! The compiler never touches the host directly; it asks a `CompilerSystem`.

pub mod compiler_system;
pub mod os_system;
pub mod testing;

pub use compiler_system::*;
pub use os_system::*;
