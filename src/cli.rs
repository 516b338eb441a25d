//! Minimal CLI: load captured JSON → (typescript | shape)
use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::inference::Inference;
use crate::settings::Settings;

const STDIN: &str = "-";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer TypeScript declarations from captured JSON responses
#[derive(Parser, Debug)]
#[command(name = "json2ts", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and emit TypeScript declarations
    Ts(TsOut),
    /// infer and print the merged shape tree as JSON
    Shape(ShapeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct TsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// settings file with `camelCase` / `namespace` toggles
    #[arg(long)]
    config: Option<PathBuf>,

    /// convert keys to camelCase (overrides the settings file)
    #[arg(long)]
    camel_case: Option<bool>,

    /// wrap output in a namespace (overrides the settings file)
    #[arg(long)]
    namespace: Option<bool>,

    /// request path the namespace name is derived from (e.g. /api/users)
    #[arg(long)]
    namespace_path: Option<String>,

    /// top-level type name
    #[arg(long, default_value = crate::config::DEFAULT_ROOT_NAME)]
    root_type: String,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct ShapeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Every selected document from every input, in input order.
    fn load(&self) -> Result<Vec<Value>> {
        let sources = resolve_file_path_patterns(&self.input)?;
        let per_source = sources
            .par_iter()
            .map(|path| self.load_source(path))
            .collect::<Result<Vec<_>>>()?;
        let docs: Vec<Value> = per_source.into_iter().flatten().collect();
        tracing::info!(sources = sources.len(), documents = docs.len(), "loaded inputs");
        Ok(docs)
    }

    fn load_source(&self, path: &Path) -> Result<Vec<Value>> {
        let source = read_source(path)?;
        let mut out = Vec::new();
        for doc in self.parse(path, &source)? {
            let Some(doc) = self.select(path, doc)? else { continue };
            match self.jq_expr.as_ref() {
                None => out.push(doc),
                Some(jq_expr) => {
                    let docs = crate::jq_exec::run_filter(jq_expr, &doc).map_err(|error| Error::Jq {
                        path: path.to_path_buf(),
                        message: format!("{error:#}"),
                    })?;
                    out.extend(docs);
                }
            }
        }
        Ok(out)
    }

    fn parse(&self, path: &Path, source: &str) -> Result<Vec<Value>> {
        if !self.ndjson {
            let doc = serde_json::from_str::<Value>(source).map_err(|source| Error::Json {
                path: path.to_path_buf(),
                source,
            })?;
            return Ok(vec![doc]);
        }
        source
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str::<Value>(line).map_err(|source| Error::NdjsonLine {
                    path: path.to_path_buf(),
                    line: i + 1,
                    source,
                })
            })
            .collect()
    }

    /// Apply `--json-pointer`. NDJSON records without the node are skipped;
    /// a whole document without it is an error.
    fn select(&self, path: &Path, doc: Value) -> Result<Option<Value>> {
        let Some(pointer) = self.json_pointer.as_deref() else { return Ok(Some(doc)) };
        match doc.pointer(pointer) {
            Some(node) => Ok(Some(node.clone())),
            None if self.ndjson => {
                tracing::warn!(path = %path.display(), pointer, "record has no node at pointer; skipped");
                Ok(None)
            }
            None => Err(Error::Pointer { path: path.to_path_buf(), pointer: pointer.to_string() }),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Ts(target) => {
                let settings = match target.config.as_deref() {
                    Some(path) => Settings::load(path)?,
                    None => Settings::default(),
                }
                .with_overrides(target.camel_case, target.namespace);
                let config = Config::default()
                    .camel_case(settings.camel_case)
                    .root_name(target.root_type.as_str());

                let inference = observe_all(&target.input_settings.load()?);
                let decls = crate::render_shape(&inference.solve(), &config);
                let src = finish_output(&decls, settings.namespace, target.namespace_path.as_deref());
                write_output(target.out.as_deref(), &src)
            }
            Command::Shape(target) => {
                let inference = observe_all(&target.input_settings.load()?);
                let src = serde_json::to_string_pretty(&inference.solve())?;
                write_output(target.out.as_deref(), &src)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn observe_all(docs: &[Value]) -> Inference {
    let mut inference = Inference::new();
    for doc in docs {
        inference.observe_value(doc);
    }
    tracing::info!(samples = inference.samples(), "merged samples");
    inference
}

/// Join declarations and wrap them when a namespace is requested.
fn finish_output(decls: &[String], namespace: bool, namespace_path: Option<&str>) -> String {
    let src = crate::namespace::join(decls);
    match (namespace, namespace_path) {
        (true, Some(path)) => crate::namespace::wrap_namespace(path, &src),
        (true, None) => {
            tracing::warn!("namespace is enabled but no --namespace-path was given; output is not wrapped");
            src
        }
        (false, _) => src,
    }
}

fn read_source(path: &Path) -> Result<String> {
    let read = if path.as_os_str() == STDIN {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(path)
    };
    read.map_err(|source| Error::Read { path: path.to_path_buf(), source })
}

fn write_output(out: Option<&Path>, src: &str) -> anyhow::Result<()> {
    let Some(out) = out else {
        println!("{src}");
        return Ok(());
    };
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(out = %out.display(), bytes = src.len(), "wrote output");
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let before = out.len();
            for entry in glob::glob(pattern)? {
                out.push(entry?);
            }
            if out.len() == before {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                return Err(Error::NoMatch(pattern.to_string()));
            }
        } else {
            // literal path (or '-')
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
