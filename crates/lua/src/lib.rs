//! Lua runtime, compiler service, and solution model for rig
//!
//! Build-definition scripts are ordinary Lua sources. This crate owns
//! everything that touches the interpreter:
//! - the compiler service that turns source files into bytecode artifacts
//! - the runtime that executes those artifacts with the `rig` API registered
//! - the Solution/Project model that scripts populate through userdata handles

mod compile;
mod compiler;
mod error;
mod runtime;
mod solution;

pub use compile::{CompileRequest, CompileResult, WarningLevel};
pub use compiler::{Compiler, BASE_MODULES};
pub use error::LuaError;
pub use runtime::{Runtime, RuntimeOptions};
pub use solution::{LoadedSolution, Project, ProjectHandle, SolutionHandle};

/// Result type for Lua operations
pub type Result<T> = std::result::Result<T, LuaError>;
