//! Build-script loading: locate, derive namespace, check staleness,
//! compile if stale, load, instantiate
//!
//! The loader is a straight-line state machine; the first failing step
//! short-circuits the rest and no partially-built solution ever escapes.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use rig_lua::{CompileRequest, Compiler, LoadedSolution, Runtime, RuntimeOptions};

use crate::workspace::Workspace;
use crate::{CoreError, Result};

/// Well-known build-definition file name, expected at the root
pub const SOLUTION_FILE: &str = "RigSolution.lua";

/// Well-known entry table the script must assign
pub const ENTRY_NAME: &str = "RigSolution";

/// Loads the build definition and instantiates the declared solution
pub struct SolutionLoader;

impl SolutionLoader {
    /// Load the solution declared at the workspace root.
    pub fn load(workspace: &Workspace) -> Result<LoadedSolution> {
        Self::load_from(workspace, workspace.root())
    }

    /// Load a solution declared in `location`, a directory under the
    /// root. The common case is the root itself; for a subdirectory the
    /// entry resolves at a namespace-qualified name derived from the
    /// relative path.
    pub fn load_from(workspace: &Workspace, location: &Path) -> Result<LoadedSolution> {
        let script = location.join(SOLUTION_FILE);
        if !script.is_file() {
            return Err(CoreError::SolutionNotFound(script));
        }

        let namespace = derive_namespace(&script, workspace.root());
        let artifact = workspace
            .cache()
            .cache_dir()
            .join(format!("{}{}.dll", namespace, ENTRY_NAME));

        if needs_compile(&script, &artifact)? {
            let source = if namespace.is_empty() {
                script.clone()
            } else {
                wrap_in_namespace(&script, &namespace, workspace.cache().scratch_dir())?
            };

            let mut request = CompileRequest::new();
            request.output_name = artifact.clone();
            request.is_library = true;
            // Scripts will have errors at some point; keep debug info in
            request.include_debug_info = true;
            request.warnings_as_errors = true;
            request.source_files.push(source);
            request.referenced_modules.push("rig".to_string());
            request.scratch_dir = workspace.cache().scratch_dir().to_path_buf();

            let result = Compiler::new().compile(&request);
            if !result.success {
                return Err(CoreError::ScriptCompile(artifact));
            }
            info!("Compiled build definition {}", script.display());
        } else {
            debug!("Build definition up to date: {}", artifact.display());
        }

        let runtime = Runtime::new(RuntimeOptions {
            root: workspace.root().to_path_buf(),
            scratch_dir: workspace.cache().scratch_dir().to_path_buf(),
            target: workspace.target(),
        })?;

        let qualified = format!("{}{}", namespace, ENTRY_NAME);
        Ok(LoadedSolution::instantiate(runtime, &artifact, &qualified)?)
    }
}

/// Derive the namespace for a build definition from its directory
/// relative to the root: separators become dots, embedded spaces are
/// stripped, and a trailing dot is kept so the entry name can be
/// appended directly. The root itself yields an empty namespace.
pub fn derive_namespace(location: &Path, root: &Path) -> String {
    let dir = match location.parent() {
        Some(parent) => parent,
        None => return String::new(),
    };
    let relative = match dir.strip_prefix(root) {
        Ok(relative) => relative,
        Err(_) => return String::new(),
    };

    let components: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().replace(' ', "")),
            _ => None,
        })
        .filter(|part| !part.is_empty())
        .collect();

    if components.is_empty() {
        String::new()
    } else {
        format!("{}.", components.join("."))
    }
}

/// Timestamp staleness: a missing artifact needs a compile, and so does
/// a source strictly newer than the artifact. Equal timestamps count as
/// fresh; filesystem timestamp resolution is an accepted limitation.
pub fn needs_compile(source: &Path, artifact: &Path) -> Result<bool> {
    if !artifact.exists() {
        return Ok(true);
    }
    let source_time = fs::metadata(source)?.modified()?;
    let artifact_time = fs::metadata(artifact)?.modified()?;
    Ok(source_time > artifact_time)
}

/// Synthesize a scratch copy of the script wrapped in its namespace:
/// the namespace tables are created after the script body runs and the
/// entry global is relocated to the qualified path, so the loader finds
/// it at a name it controls.
fn wrap_in_namespace(script: &Path, namespace: &str, scratch_dir: &Path) -> Result<PathBuf> {
    let mut wrapped = fs::read_to_string(script)?;
    if !wrapped.ends_with('\n') {
        wrapped.push('\n');
    }

    let mut qualified = String::new();
    for piece in namespace.trim_end_matches('.').split('.') {
        if qualified.is_empty() {
            qualified.push_str(piece);
        } else {
            qualified.push('.');
            qualified.push_str(piece);
        }
        wrapped.push_str(&format!("{0} = {0} or {{}}\n", qualified));
    }
    wrapped.push_str(&format!("{}.{1} = {1}\n", qualified, ENTRY_NAME));
    wrapped.push_str(&format!("{} = nil\n", ENTRY_NAME));

    let copy = scratch_dir.join(format!("{}{}", namespace, SOLUTION_FILE));
    fs::write(&copy, wrapped)?;
    debug!("Wrapped {} as {}", script.display(), copy.display());
    Ok(copy)
}
