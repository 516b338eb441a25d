//! TypeScript rendering of lowered declarations.
use std::fmt::Write as _;

use crate::inference::Shape;
use crate::ir::{Decl, Field, NamedType, Ty};
use crate::lower::lower_to_ir;
use crate::naming;
use crate::registry::ShapeRegistry;

const INDENT: &str = "  ";

#[derive(Debug, Default)]
pub struct Codegen {
    decls: Vec<String>,
}

impl Codegen {
    pub fn new() -> Self { Self::default() }

    pub fn emit(&mut self, decls: &[Decl]) {
        for decl in decls {
            let src = match decl {
                Decl::Interface(t) => render_interface(t),
                Decl::Alias { name, ty } => format!("type {name} = {};", render_ty(ty)),
            };
            tracing::trace!(name = decl.name(), "emitted declaration");
            self.decls.push(src);
        }
    }

    pub fn into_declarations(self) -> Vec<String> { self.decls }
}

/// Render the root shape and everything it references, dependencies first.
pub fn render(root: &Shape, mut registry: ShapeRegistry) -> Vec<String> {
    let decls = lower_to_ir(root, &mut registry);
    let mut cg = Codegen::new();
    cg.emit(&decls);
    cg.into_declarations()
}

fn render_interface(t: &NamedType) -> String {
    if t.fields.is_empty() {
        return format!("interface {} {{}}", t.name);
    }
    let mut out = format!("interface {} {{\n", t.name);
    for f in &t.fields {
        let _ = writeln!(out, "{INDENT}{};", render_field(f));
    }
    out.push('}');
    out
}

fn render_field(f: &Field) -> String {
    let key = if naming::is_identifier(&f.key) {
        f.key.clone()
    } else {
        serde_json::Value::from(f.key.as_str()).to_string()
    };
    let marker = if f.optional { "?" } else { "" };
    format!("{key}{marker}: {}", render_ty(&f.ty))
}

pub fn render_ty(ty: &Ty) -> String {
    match ty {
        Ty::Any => "any".to_string(),
        Ty::Primitive(kind) => kind.keyword().to_string(),
        Ty::Ref(name) => name.clone(),
        Ty::Array(item) => match item.as_ref() {
            Ty::Union(_) => format!("({})[]", render_ty(item)),
            _ => format!("{}[]", render_ty(item)),
        },
        Ty::Union(members) => members.iter().map(render_ty).collect::<Vec<_>>().join(" | "),
    }
}
