//! Dashboard modules.
//!
//! A module implements [`DashboardModule`] and produces a raw payload from
//! `render()`. Everything else (validation, healing of theme and shortcuts,
//! actions, layout defaults) comes from the [`ModuleTileExt`] pipeline, which
//! is implemented once for all modules.

pub mod context;
pub mod debug;
pub mod notes;
pub mod payload;
pub mod tile;
pub mod validation;

pub use context::ModuleContext;
pub use debug::DebugModule;
pub use notes::{Note, NotesModule};
pub use payload::{RawPayload, ShortcutsRef, ThemeRef};
pub use tile::{LayoutDefaults, ModuleAction, ModuleTile, ModuleTileExt};
pub use validation::{MessageSet, ValidationEngine, ValidationResult};

use crate::error::{DashboardError, Result};

/// Capability every dashboard module implements.
pub trait DashboardModule {
    /// Unique identifier (also the storage directory name).
    fn identifier(&self) -> &str;

    /// Human-readable name.
    fn display_name(&self) -> &str;

    /// Short description shown on the tile.
    fn description(&self) -> &str {
        ""
    }

    /// Shared context (configuration, storage root).
    fn context(&self) -> &ModuleContext;

    /// Produces the module's raw payload.
    ///
    /// The default fails with [`DashboardError::NotImplemented`].
    fn render(&self) -> Result<RawPayload> {
        Err(DashboardError::NotImplemented {
            module: self.identifier().to_string(),
        })
    }

    /// Module-specific actions appended after the standard ones.
    fn module_actions(&self) -> Vec<ModuleAction> {
        Vec::new()
    }

    /// Persists pending changes. Modules without state have nothing to do.
    fn autosave(&mut self) -> Result<()> {
        Ok(())
    }
}

/// The bundled modules (notes, diagnostics) sharing one context.
pub fn default_modules(context: &ModuleContext) -> Result<Vec<Box<dyn DashboardModule>>> {
    Ok(vec![
        Box::new(NotesModule::open(context.clone())?),
        Box::new(DebugModule::open(context.clone())?),
    ])
}
