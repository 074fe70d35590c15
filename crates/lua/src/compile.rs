//! Value objects describing one compilation unit

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Diagnostic threshold handed to the compiler service.
///
/// Lua's chunk compiler has no tunable warning channel, so the level is
/// carried through requests and logged rather than altering codegen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningLevel {
    Level0,
    Level1,
    Level2,
    Level3,
    Level4,
}

impl WarningLevel {
    pub const fn ordinal(&self) -> u8 {
        match self {
            WarningLevel::Level0 => 0,
            WarningLevel::Level1 => 1,
            WarningLevel::Level2 => 2,
            WarningLevel::Level3 => 3,
            WarningLevel::Level4 => 4,
        }
    }
}

/// Everything the compiler service needs to produce one artifact
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Where the artifact is written, on disk, always
    pub output_name: PathBuf,
    /// Library or executable flavor; decides nothing at the bytecode
    /// level, but callers pick the artifact extension from it
    pub is_library: bool,
    /// Ordered source list; an empty list is a diagnostic, not a panic
    pub source_files: Vec<PathBuf>,
    /// Joined into a single comma-separated `RIG_DEFINES` value
    pub defines: BTreeSet<String>,
    /// Module names the compiled code expects at load time, validated
    /// against the base module set
    pub referenced_modules: Vec<String>,
    pub warning_level: WarningLevel,
    pub warnings_as_errors: bool,
    /// When false, debug info is stripped from the dumped bytecode
    pub include_debug_info: bool,
    /// Compiler temp space, owned by the cache
    pub scratch_dir: PathBuf,
}

impl CompileRequest {
    pub fn new() -> Self {
        Self {
            output_name: PathBuf::new(),
            is_library: false,
            source_files: Vec::new(),
            defines: BTreeSet::new(),
            referenced_modules: Vec::new(),
            warning_level: WarningLevel::Level4,
            warnings_as_errors: false,
            include_debug_info: false,
            scratch_dir: PathBuf::new(),
        }
    }
}

impl Default for CompileRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one compilation
#[derive(Debug, Clone, Default)]
pub struct CompileResult {
    pub success: bool,
    pub diagnostics: Vec<String>,
}

impl CompileResult {
    pub fn failure(diagnostics: Vec<String>) -> Self {
        Self {
            success: false,
            diagnostics,
        }
    }
}
