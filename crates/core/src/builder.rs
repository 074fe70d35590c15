//! Per-project builder
//!
//! Turns one declared project into a compile request with fixed defaults
//! and drives the compiler. The internal request is reset after every
//! build, success or not, so nothing leaks into the next project.

use std::path::PathBuf;
use tracing::info;

use rig_lua::{CompileRequest, Compiler, Project};

use crate::workspace::Workspace;
use crate::{CoreError, Result};

/// Builds declared projects into the binaries directory
pub struct ProjectBuilder {
    compiler: Compiler,
    request: CompileRequest,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self {
            compiler: Compiler::new(),
            request: CompileRequest::new(),
        }
    }

    /// Compile one project. The artifact lands at
    /// `<binaries>/<name with spaces removed>` plus `.dll` for libraries
    /// and `.exe` otherwise. Projects whose normalized names collide
    /// overwrite each other's artifact; that is not guarded.
    pub fn build(&mut self, workspace: &Workspace, project: &Project) -> Result<PathBuf> {
        let extension = if project.is_library() { ".dll" } else { ".exe" };
        let artifact = workspace
            .binaries_dir()
            .join(format!("{}{}", project.name().replace(' ', ""), extension));

        self.request.output_name = artifact.clone();
        self.request.is_library = project.is_library();
        self.request.scratch_dir = workspace.cache().scratch_dir().to_path_buf();
        for file in project.source_files() {
            self.request.source_files.push(workspace.resolve(file));
        }

        info!("Building '{}' -> {}", project.name(), artifact.display());
        let result = self.compiler.compile(&self.request);

        self.reset();

        if result.success {
            Ok(artifact)
        } else {
            Err(CoreError::ProjectBuild(project.name().to_string()))
        }
    }

    fn reset(&mut self) {
        self.request = CompileRequest::new();
    }
}

impl Default for ProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}
