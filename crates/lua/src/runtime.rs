//! Lua runtime for executing compiled build-definition artifacts
//!
//! Each run gets a fresh runtime with the `rig` global registered before
//! anything executes, so loaded scripts can call back into the
//! orchestrator-provided factory operations.

use std::fs;
use std::path::{Path, PathBuf};

use mlua::{ChunkMode, Lua, Result as LuaResult, Table, Value};
use tracing::debug;

use rig_platform::{BuildConfig, Os, Target};

use crate::error::LuaError;
use crate::solution::SolutionHandle;
use crate::Result;

/// Paths and target the runtime exposes to scripts
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    /// Solution root; prepended to `package.path` so scripts can
    /// `require` helper modules next to the definition file
    pub root: PathBuf,
    /// Scratch directory backing the `create_file` factory
    pub scratch_dir: PathBuf,
    pub target: Target,
}

/// The Lua runtime environment
pub struct Runtime {
    lua: Lua,
    options: RuntimeOptions,
}

impl Runtime {
    /// Create a new runtime with the `rig` table registered.
    pub fn new(options: RuntimeOptions) -> Result<Self> {
        // Artifacts are precompiled bytecode out of our own cache, and
        // binary chunks only load in an unsafe state.
        let lua = unsafe { Lua::unsafe_new() };

        register_rig_table(&lua, &options)?;
        setup_package_path(&lua, &options.root)?;

        Ok(Self { lua, options })
    }

    /// Execute a compiled artifact from disk.
    pub fn exec_artifact(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(LuaError::ArtifactNotFound(path.to_path_buf()));
        }
        let bytes = fs::read(path)?;
        self.lua
            .load(&bytes[..])
            .set_name(format!("@{}", path.display()))
            .set_mode(ChunkMode::Binary)
            .exec()?;
        debug!("Executed artifact {}", path.display());
        Ok(())
    }

    /// Resolve an entry table at a (possibly dotted) global path, e.g.
    /// `RigSolution` or `Tools.Build.RigSolution`.
    pub fn resolve_entry(&self, qualified: &str) -> Result<Table> {
        let mut current = Value::Table(self.lua.globals());
        for part in qualified.split('.').filter(|p| !p.is_empty()) {
            let table = match current {
                Value::Table(t) => t,
                _ => return Err(LuaError::EntryNotFound(qualified.to_string())),
            };
            current = table.get(part)?;
        }
        match current {
            Value::Table(t) => Ok(t),
            _ => Err(LuaError::EntryNotFound(qualified.to_string())),
        }
    }

    /// The target descriptor as a Lua table, in the shape the solution
    /// constructor expects.
    pub fn target_table(&self) -> Result<Table> {
        Ok(target_to_table(&self.lua, &self.options.target)?)
    }

    pub fn target(&self) -> Target {
        self.options.target
    }

    /// Access to the raw Lua state
    pub fn lua(&self) -> &Lua {
        &self.lua
    }
}

/// Register the global `rig` table: target information plus the solution
/// base constructor scripts build on.
fn register_rig_table(lua: &Lua, options: &RuntimeOptions) -> LuaResult<()> {
    let globals = lua.globals();
    let rig = lua.create_table()?;

    rig.set("version", env!("CARGO_PKG_VERSION"))?;
    rig.set("target", target_to_table(lua, &options.target)?)?;
    rig.set("os", options.target.os.as_str())?;
    rig.set("config", options.target.config.as_str())?;
    rig.set("is_linux", options.target.os == Os::Linux)?;
    rig.set("is_darwin", options.target.os == Os::Darwin)?;
    rig.set("is_windows", options.target.os == Os::Windows)?;

    let scratch_dir = options.scratch_dir.clone();
    let solution = lua.create_function(move |_, target: Table| {
        let target = target_from_table(&target)?;
        Ok(SolutionHandle::new(target, scratch_dir.clone()))
    })?;
    rig.set("solution", solution)?;

    globals.set("rig", rig)?;

    debug!("Registered rig table: {}", options.target);
    Ok(())
}

/// Prepend the solution root to `package.path` for local modules
fn setup_package_path(lua: &Lua, root: &Path) -> LuaResult<()> {
    let package: Table = lua.globals().get("package")?;
    let current: String = package.get("path")?;
    let dir = root.display();
    package.set(
        "path",
        format!("{dir}/?.lua;{dir}/?/init.lua;{current}"),
    )?;
    Ok(())
}

fn target_to_table(lua: &Lua, target: &Target) -> LuaResult<Table> {
    let table = lua.create_table()?;
    table.set("os", target.os.as_str())?;
    table.set("config", target.config.as_str())?;
    Ok(table)
}

fn target_from_table(table: &Table) -> LuaResult<Target> {
    let os_name: String = table.get("os")?;
    let config_name: String = table.get("config")?;
    let os = Os::from_name(&os_name)
        .ok_or_else(|| mlua::Error::RuntimeError(format!("unknown target os '{}'", os_name)))?;
    let config = BuildConfig::parse(&config_name).ok_or_else(|| {
        mlua::Error::RuntimeError(format!("unknown build config '{}'", config_name))
    })?;
    Ok(Target::new(os, config))
}
