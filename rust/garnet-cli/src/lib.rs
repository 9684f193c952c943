//! Garnet CLI support: build method scopes from a JSON body description and
//! report what the IR layer derived from them.

use garnet_ir::ir::operands::is_reserved_name;
use garnet_ir::{
    ArgumentKind, Instr, IrError, IrManager, IrOptions, MethodScope, MethodSummary, Operand,
    ScopeId, TemporaryVariable, Variable,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "garnet.toml";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid unit description: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Ir(#[from] IrError),
    #[error("method '{method}': '{name}' is a reserved name")]
    ReservedName { method: String, name: String },
    #[error("method '{method}': unknown argument kind '{kind}'")]
    UnknownArgumentKind { method: String, kind: String },
}

// ── Input description ───────────────────────────────────────────────

/// A compilation unit: one file and the method bodies defined in it.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitDesc {
    pub file: String,
    #[serde(default)]
    pub methods: Vec<MethodDesc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MethodDesc {
    pub name: String,
    #[serde(default = "default_line")]
    pub line: u32,
    #[serde(default = "default_true")]
    pub instance: bool,
    /// Allocate a parser-side static scope for this method.
    #[serde(default)]
    pub static_scope: bool,
    #[serde(default)]
    pub params: Vec<ParamDesc>,
    #[serde(default)]
    pub body: Vec<BodyOp>,
}

fn default_line() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParamDesc {
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ValueDesc {
    Fixnum(i64),
    Str(String),
    Var { var: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BodyOp {
    RecvArg { name: String, index: u32 },
    RecvOptArg { name: String, index: u32, min_args: u32 },
    RecvKwArg { name: String },
    RecvPostArg { name: String, index: u32, pre_count: u32 },
    RecvRestArg { name: String, index: u32 },
    RecvBlock,
    RecvSelf { name: String },
    Copy { name: String, value: Option<ValueDesc> },
    Call {
        result: Option<String>,
        method: String,
        #[serde(default)]
        args: Vec<ValueDesc>,
    },
    Return { value: Option<ValueDesc> },
    Line { line: u32 },
}

// ── Building ────────────────────────────────────────────────────────

/// Build every method in `unit`, returning the manager and method ids in
/// declaration order.
pub fn build_unit(unit: &UnitDesc, options: IrOptions) -> Result<(IrManager, Vec<ScopeId>), CliError> {
    let mut mgr = IrManager::new(options);
    let script = mgr.new_script(&unit.file, 1);
    let mut ids = Vec::with_capacity(unit.methods.len());
    for desc in &unit.methods {
        let static_scope = desc.static_scope.then(|| mgr.new_static_scope());
        let id = mgr.new_method(script, &desc.name, desc.instance, desc.line, static_scope)?;
        build_method(mgr.method_mut(id)?, desc)?;
        ids.push(id);
    }
    Ok((mgr, ids))
}

fn build_method(method: &mut MethodScope, desc: &MethodDesc) -> Result<(), CliError> {
    for p in &desc.params {
        let kind = ArgumentKind::from_str(&p.kind).map_err(|_| CliError::UnknownArgumentKind {
            method: desc.name.clone(),
            kind: p.kind.clone(),
        })?;
        method.register_argument_descriptor(kind, &p.name);
    }

    let mut temps = 0u32;
    for op in &desc.body {
        let instr = match op {
            BodyOp::RecvArg { name, index } => Instr::ReceivePreReqdArg {
                result: local(method, name)?,
                index: *index,
            },
            BodyOp::RecvOptArg {
                name,
                index,
                min_args,
            } => Instr::ReceiveOptArg {
                result: local(method, name)?,
                index: *index,
                min_args: *min_args,
            },
            BodyOp::RecvKwArg { name } => Instr::ReceiveKeywordArg {
                result: local(method, name)?,
                name: name.clone(),
            },
            BodyOp::RecvPostArg {
                name,
                index,
                pre_count,
            } => Instr::ReceivePostReqdArg {
                result: local(method, name)?,
                index: *index,
                pre_count: *pre_count,
            },
            BodyOp::RecvRestArg { name, index } => Instr::ReceiveRestArg {
                result: local(method, name)?,
                index: *index,
            },
            BodyOp::RecvBlock => Instr::ReceiveClosure {
                result: method.implicit_block_parameter().into(),
            },
            BodyOp::RecvSelf { name } => Instr::ReceiveSelf {
                result: local(method, name)?,
            },
            BodyOp::Copy { name, value } => {
                let value = operand(method, value.as_ref())?;
                Instr::Copy {
                    result: local(method, name)?,
                    value,
                }
            }
            BodyOp::Call {
                result,
                method: callee,
                args,
            } => {
                let args = args
                    .iter()
                    .map(|a| operand(method, Some(a)))
                    .collect::<Result<Vec<_>, _>>()?;
                let result = match result {
                    Some(name) => local(method, name)?,
                    None => {
                        temps += 1;
                        TemporaryVariable { index: temps - 1 }.into()
                    }
                };
                Instr::Call {
                    result,
                    receiver: Operand::SelfValue,
                    name: callee.clone(),
                    args,
                }
            }
            BodyOp::Return { value } => Instr::Return {
                value: operand(method, value.as_ref())?,
            },
            BodyOp::Line { line } => Instr::LineNumber { line: *line },
        };
        method.append_instruction(instr);
    }
    Ok(())
}

/// Resolve a user-supplied name. Reserved names belong to the compiler.
fn local(method: &mut MethodScope, name: &str) -> Result<Variable, CliError> {
    if is_reserved_name(name) {
        return Err(CliError::ReservedName {
            method: method.name().to_string(),
            name: name.to_string(),
        });
    }
    Ok(method.resolve_variable(name, 0).into())
}

fn operand(method: &mut MethodScope, value: Option<&ValueDesc>) -> Result<Operand, CliError> {
    Ok(match value {
        None => Operand::Nil,
        Some(ValueDesc::Fixnum(n)) => Operand::Fixnum(*n),
        Some(ValueDesc::Str(s)) => Operand::Str(s.clone()),
        Some(ValueDesc::Var { var }) => Operand::Variable(local(method, var)?),
    })
}

// ── Reporting ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpReport {
    pub source_hash: String,
    pub methods: Vec<MethodSummary>,
}

/// Parse `source` as a unit description, build it, and summarize each method.
pub fn dump(source: &str, options: IrOptions) -> Result<DumpReport, CliError> {
    let unit: UnitDesc = serde_json::from_str(source)?;
    let (mgr, ids) = build_unit(&unit, options)?;
    let methods = ids
        .into_iter()
        .map(|id| mgr.summarize(id))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(file = %unit.file, methods = methods.len(), "built compilation unit");
    Ok(DumpReport {
        source_hash: format!("sha256:{:x}", Sha256::digest(source.as_bytes())),
        methods,
    })
}

pub fn render_text(report: &DumpReport) -> String {
    let mut out = String::new();
    for m in &report.methods {
        let kind = if m.instance_method { "instance" } else { "singleton" };
        let _ = writeln!(out, "{} {} ({}) at {}:{}", m.scope, m.name, kind, m.file, m.line);
        let vars: Vec<String> = m
            .variables
            .iter()
            .map(|lv| format!("{}@{}", lv.name, lv.slot))
            .collect();
        let _ = writeln!(out, "  variables: {}", vars.join(" "));
        let _ = writeln!(out, "  call signature: [{}]", m.call_signature.join(", "));
        let params: Vec<String> = m.argument_descriptors.iter().map(|d| d.to_string()).collect();
        let _ = writeln!(out, "  parameters: [{}]", params.join(", "));
        for instr in &m.instructions {
            let _ = writeln!(out, "    {}", instr);
        }
    }
    out
}

// ── Configuration ───────────────────────────────────────────────────

/// Search `start` and its ancestors for `garnet.toml`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Resolve IR options: an explicit config path wins over discovery, and
/// discovery falls back to defaults when no file is found.
pub fn load_options(explicit: Option<&Path>, start: &Path) -> Result<IrOptions, CliError> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(start),
    };
    match path {
        Some(p) => {
            tracing::debug!(config = %p.display(), "loading options");
            Ok(IrOptions::load_from(&p)?)
        }
        None => Ok(IrOptions::default()),
    }
}
