//! The compiler service: Lua sources in, bytecode artifact out
//!
//! Maps a `CompileRequest` onto the Lua chunk compiler. Each source file
//! is syntax-checked under its own chunk name so diagnostics point at the
//! right file, then the files are bundled into a single chunk (written to
//! the scratch directory for inspection) and dumped as bytecode to the
//! requested output path.

use std::fs;

use mlua::Lua;
use tracing::{debug, error, info};

use crate::compile::{CompileRequest, CompileResult};

/// Modules the runtime always registers before executing an artifact.
/// Referenced modules outside this set cannot be satisfied at load time.
pub const BASE_MODULES: &[&str] = &["rig"];

/// Compiles Lua sources into on-disk bytecode artifacts
pub struct Compiler {
    lua: Lua,
}

impl Compiler {
    pub fn new() -> Self {
        Self { lua: Lua::new() }
    }

    /// Compile the request into an artifact at `request.output_name`.
    ///
    /// Never panics and never raises: every failure mode (missing source,
    /// syntax error, unknown reference, filesystem trouble) becomes a
    /// diagnostic on the returned result. Zero diagnostics means success.
    pub fn compile(&self, request: &CompileRequest) -> CompileResult {
        let mut diagnostics = Vec::new();

        debug!(
            "Compile {} (library={}, warn={}, warnings_as_errors={})",
            request.output_name.display(),
            request.is_library,
            request.warning_level.ordinal(),
            request.warnings_as_errors,
        );

        if request.source_files.is_empty() {
            diagnostics.push("no source files in compile request".to_string());
        }

        for module in &request.referenced_modules {
            if !BASE_MODULES.contains(&module.as_str()) {
                diagnostics.push(format!("unknown referenced module '{}'", module));
            }
        }

        let mut sources = Vec::new();
        for file in &request.source_files {
            match fs::read_to_string(file) {
                Ok(text) => {
                    // Per-file syntax check; the bundle compile below would
                    // only report positions inside the synthesized chunk.
                    let check = self
                        .lua
                        .load(&text)
                        .set_name(format!("@{}", file.display()))
                        .into_function();
                    match check {
                        Ok(_) => sources.push(text),
                        Err(e) => diagnostics.push(e.to_string()),
                    }
                }
                Err(e) => diagnostics.push(format!("cannot read '{}': {}", file.display(), e)),
            }
        }

        if !diagnostics.is_empty() {
            return self.report(request, diagnostics);
        }

        let bundle = synthesize_bundle(request, &sources);
        let bundle_path = request.scratch_dir.join(format!(
            "{}.lua",
            request
                .output_name
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "bundle".to_string())
        ));
        if let Err(e) = fs::write(&bundle_path, &bundle) {
            diagnostics.push(format!("cannot write '{}': {}", bundle_path.display(), e));
            return self.report(request, diagnostics);
        }

        let function = match self
            .lua
            .load(&bundle)
            .set_name(format!("@{}", bundle_path.display()))
            .into_function()
        {
            Ok(f) => f,
            Err(e) => {
                diagnostics.push(e.to_string());
                return self.report(request, diagnostics);
            }
        };

        let bytecode = function.dump(!request.include_debug_info);
        if let Err(e) = fs::write(&request.output_name, bytecode) {
            diagnostics.push(format!(
                "cannot write '{}': {}",
                request.output_name.display(),
                e
            ));
            return self.report(request, diagnostics);
        }

        info!(
            "Compiled {} from {} source file(s)",
            request.output_name.display(),
            request.source_files.len()
        );

        CompileResult {
            success: true,
            diagnostics: Vec::new(),
        }
    }

    fn report(&self, request: &CompileRequest, diagnostics: Vec<String>) -> CompileResult {
        error!("Failed to build {} due to errors:", request.output_name.display());
        for diagnostic in &diagnostics {
            error!("    {}", diagnostic);
        }
        CompileResult::failure(diagnostics)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap the source files into one chunk: an optional defines preamble,
/// then each file as an ordered unit function. Units run in declaration
/// order and the last unit's value is the chunk result, so a script that
/// assigns globals and a module that returns a table both behave the same
/// as they would loaded directly.
fn synthesize_bundle(request: &CompileRequest, sources: &[String]) -> String {
    let mut out = String::from("-- synthesized by rig; do not edit\n");

    if !request.defines.is_empty() {
        let joined = request
            .defines
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&format!("RIG_DEFINES = \"{}\"\n", joined));
    }

    out.push_str("local __units = {}\n");
    for (index, text) in sources.iter().enumerate() {
        out.push_str(&format!("__units[{}] = function(...)\n", index + 1));
        out.push_str(text);
        if !text.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("end\n");
    }
    out.push_str("local __result\n");
    out.push_str("for __i = 1, #__units do\n");
    out.push_str("  __result = __units[__i](...)\n");
    out.push_str("end\n");
    out.push_str("return __result\n");

    out
}
