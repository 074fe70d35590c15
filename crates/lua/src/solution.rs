//! The declared-build model and its Lua bindings
//!
//! A build-definition script assigns a global `RigSolution` table whose
//! `new(target)` constructor builds on the orchestrator-provided base:
//! `rig.solution(target)` returns a solution handle exposing the two
//! factory operations (`create_project`, `create_file`) and the
//! overridable pre-build hook (`on_pre_build`).

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use mlua::{Function, RegistryKey, UserData, UserDataMethods, Value};
use tracing::{debug, warn};

use rig_platform::Target;

use crate::error::LuaError;
use crate::runtime::Runtime;
use crate::Result;

/// One named build unit declared by a solution
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    source_files: Vec<String>,
    is_library: bool,
}

impl Project {
    /// Construct a project. An empty name is a construction error, not a
    /// recoverable condition.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(LuaError::EmptyProjectName);
        }
        Ok(Self {
            name,
            source_files: Vec::new(),
            is_library: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_files(&self) -> &[String] {
        &self.source_files
    }

    pub fn is_library(&self) -> bool {
        self.is_library
    }

    pub fn add_source_file(&mut self, file: impl Into<String>) {
        self.source_files.push(file.into());
    }

    pub fn set_library(&mut self, library: bool) {
        self.is_library = library;
    }
}

struct SolutionState {
    target: Target,
    scratch_dir: PathBuf,
    projects: Vec<Project>,
    pre_build: Option<RegistryKey>,
}

/// Userdata handle scripts receive from `rig.solution(target)`.
///
/// Projects are owned exclusively by the solution state; project handles
/// index into it.
#[derive(Clone)]
pub struct SolutionHandle(Rc<RefCell<SolutionState>>);

impl SolutionHandle {
    pub(crate) fn new(target: Target, scratch_dir: PathBuf) -> Self {
        Self(Rc::new(RefCell::new(SolutionState {
            target,
            scratch_dir,
            projects: Vec::new(),
            pre_build: None,
        })))
    }

    fn create_scratch_file(&self, name: &str, contents: &str) -> String {
        let path = self.0.borrow().scratch_dir.join(name);
        if path.exists() {
            // Cannot create what already exists
            warn!("Scratch file already exists: {}", path.display());
            return String::new();
        }
        match fs::write(&path, contents) {
            Ok(()) => path.to_string_lossy().into_owned(),
            Err(e) => {
                warn!("Cannot create scratch file '{}': {}", path.display(), e);
                String::new()
            }
        }
    }
}

impl UserData for SolutionHandle {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("create_project", |_, this, name: String| {
            let project =
                Project::new(name).map_err(|e| mlua::Error::RuntimeError(e.to_string()))?;
            let index = {
                let mut state = this.0.borrow_mut();
                state.projects.push(project);
                state.projects.len() - 1
            };
            Ok(ProjectHandle {
                state: this.0.clone(),
                index,
            })
        });

        methods.add_method("create_file", |_, this, (name, contents): (String, String)| {
            Ok(this.create_scratch_file(&name, &contents))
        });

        methods.add_method("on_pre_build", |lua, this, hook: Function| {
            let key = lua.create_registry_value(hook)?;
            this.0.borrow_mut().pre_build = Some(key);
            Ok(())
        });
    }
}

/// Userdata handle for one declared project
#[derive(Clone)]
pub struct ProjectHandle {
    state: Rc<RefCell<SolutionState>>,
    index: usize,
}

impl UserData for ProjectHandle {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_method("add_source_files", |_, this, files: Value| {
            {
                let mut state = this.state.borrow_mut();
                let project = &mut state.projects[this.index];
                match files {
                    Value::String(file) => project.add_source_file(file.to_str()?.to_string()),
                    Value::Table(list) => {
                        for file in list.sequence_values::<String>() {
                            project.add_source_file(file?);
                        }
                    }
                    _ => {
                        return Err(mlua::Error::RuntimeError(
                            "add_source_files expects a string or a list of strings".to_string(),
                        ));
                    }
                }
            }
            Ok(this.clone())
        });

        methods.add_method("set_library", |_, this, library: bool| {
            this.state.borrow_mut().projects[this.index].set_library(library);
            Ok(this.clone())
        });

        methods.add_method("name", |_, this, ()| {
            Ok(this.state.borrow().projects[this.index].name().to_string())
        });
    }
}

/// A fully instantiated build: the runtime that produced it plus the
/// solution the script constructed. Nothing partial ever escapes: any
/// failure during load or instantiation is an error and no value.
pub struct LoadedSolution {
    runtime: Runtime,
    handle: SolutionHandle,
}

impl std::fmt::Debug for LoadedSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedSolution").finish_non_exhaustive()
    }
}

impl LoadedSolution {
    /// Execute the compiled artifact, resolve the entry table at its
    /// qualified name, and call the fixed-signature constructor once.
    pub fn instantiate(runtime: Runtime, artifact: &Path, qualified: &str) -> Result<Self> {
        runtime.exec_artifact(artifact)?;

        let entry = runtime.resolve_entry(qualified)?;
        let constructor: Function = entry.get("new").map_err(|_| {
            LuaError::InvalidEntry(format!("'{}' has no 'new' constructor", qualified))
        })?;

        let target = runtime.target_table()?;
        let value: Value = constructor.call(target)?;
        let handle = match value {
            Value::UserData(ud) => ud
                .borrow::<SolutionHandle>()
                .map(|h| SolutionHandle::clone(&h))
                .map_err(|_| {
                    LuaError::InvalidEntry(format!(
                        "'{}.new' must return the value of rig.solution(target)",
                        qualified
                    ))
                })?,
            _ => {
                return Err(LuaError::InvalidEntry(format!(
                    "'{}.new' must return a solution handle",
                    qualified
                )));
            }
        };

        debug!(
            "Instantiated '{}' with {} project(s)",
            qualified,
            handle.0.borrow().projects.len()
        );

        Ok(Self { runtime, handle })
    }

    /// Run the script's pre-build hook, if any. The default is success.
    pub fn pre_build(&self) -> Result<bool> {
        let hook: Option<Function> = {
            let state = self.handle.0.borrow();
            match &state.pre_build {
                Some(key) => Some(self.runtime.lua().registry_value(key)?),
                None => None,
            }
        };

        match hook {
            Some(hook) => {
                let this = self.runtime.lua().create_userdata(self.handle.clone())?;
                Ok(hook.call::<bool>(this)?)
            }
            None => Ok(true),
        }
    }

    /// The declared projects, in declaration order
    pub fn projects(&self) -> Vec<Project> {
        self.handle.0.borrow().projects.clone()
    }

    pub fn target(&self) -> Target {
        self.handle.0.borrow().target
    }
}
