//! Infer TypeScript declarations from captured JSON values.
//!
//! ```
//! use json2ts::{convert, Config};
//! let decls = convert(&serde_json::json!({"user_id": 1}), &Config::default().camel_case(true));
//! assert_eq!(decls, ["interface RootObject {\n  userId: number;\n}"]);
//! ```
pub mod inference;
pub mod fingerprint;
pub mod ir;
pub mod lower;
pub mod registry;
pub mod codegen;
pub mod naming;
pub mod namespace;
pub mod config;
pub mod error;
pub mod settings;
pub mod jq_exec;
pub mod cli;

use serde_json::Value;

pub use config::Config;
pub use error::Error;
pub use inference::{classify, merge, synthesize, Inference, Shape};
pub use registry::ShapeRegistry;

/// Convert one value into ordered, standalone declarations.
pub fn convert(value: &Value, config: &Config) -> Vec<String> {
    let shape = synthesize(value);
    render_shape(&shape, config)
}

/// Merge several samples of one document and convert the result.
pub fn convert_many<'a, I>(values: I, config: &Config) -> Vec<String>
where
    I: IntoIterator<Item = &'a Value>
{
    let shape = inference::infer_from_values(values);
    render_shape(&shape, config)
}

pub fn render_shape(shape: &Shape, config: &Config) -> Vec<String> {
    let registry = ShapeRegistry::new(config);
    let decls = codegen::render(shape, registry);
    tracing::debug!(declarations = decls.len(), root = %config.root_name, "converted");
    decls
}
