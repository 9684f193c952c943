//! Garnet IR
//!
//! Method-scope construction for the Garnet intermediate representation:
//! per-method variable slots, call signatures derived from argument receipts,
//! and declared argument descriptors for reflection.

pub mod ir;

pub use ir::args::{ArgumentDescriptor, ArgumentKind};
pub use ir::instr::{ArgReceipt, Instr};
pub use ir::manager::IrManager;
pub use ir::method::{MethodScope, MethodSummary};
pub use ir::operands::{LocalVariable, Operand, TemporaryVariable, Variable, BLOCK_VARIABLE_NAME};
pub use ir::scope::{Scope, ScopeId, StaticScopeId};

use garnet_core::FileId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ── Options ─────────────────────────────────────────────────────────

/// Options controlling IR construction.
///
/// Loaded from the `[ir]` table of `garnet.toml`; every field defaults to
/// off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrOptions {
    /// Build IR without wiring it back into parser-side static scopes.
    pub ir_gen_only: bool,
    /// Emit a trace event for every call-signature entry.
    pub trace_signature: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    ir: IrOptions,
}

impl IrOptions {
    /// Parse the `[ir]` table out of a `garnet.toml` document.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.ir)
    }

    pub fn load_from(path: &Path) -> Result<Self, IrError> {
        let content = std::fs::read_to_string(path).map_err(|source| IrError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| IrError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum IrError {
    #[error("unknown scope {0}")]
    UnknownScope(ScopeId),
    #[error("{0} is not a method scope")]
    NotAMethod(ScopeId),
    #[error("unknown static scope {0}")]
    UnknownStaticScope(StaticScopeId),
    #[error("unknown source file {0}")]
    UnknownFile(FileId),
    #[error("invalid toml in '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default_off() {
        let opts = IrOptions::from_toml_str("").unwrap();
        assert_eq!(opts, IrOptions::default());
    }

    #[test]
    fn test_options_from_ir_table() {
        let opts = IrOptions::from_toml_str("[ir]\nir_gen_only = true\n").unwrap();
        assert!(opts.ir_gen_only);
        assert!(!opts.trace_signature);
    }

    #[test]
    fn test_options_reject_bad_types() {
        assert!(IrOptions::from_toml_str("[ir]\nir_gen_only = \"yes\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = IrOptions::load_from(Path::new("/nonexistent/garnet.toml")).unwrap_err();
        assert!(matches!(err, IrError::Io { .. }));
        assert!(err.to_string().starts_with("cannot read '/nonexistent/garnet.toml'"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(IrError::UnknownScope(ScopeId(3)).to_string(), "unknown scope scope#3");
        assert_eq!(IrError::NotAMethod(ScopeId(0)).to_string(), "scope#0 is not a method scope");
    }
}
