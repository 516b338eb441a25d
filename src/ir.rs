// Lowered IR for codegen. Nested objects are references by name here.

use crate::inference::Kind;

#[derive(Debug, Clone, PartialEq)]
pub enum Ty {
    Any,                     // unknown (empty-array element)
    Primitive(Kind),
    Array(Box<Ty>),
    Ref(String),             // registered NamedType
    Union(Vec<Ty>),          // canonical member order from inference
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,         // rendered key (after casing)
    pub ty: Ty,
    pub optional: bool,
}

/// One deduplicated object type.
#[derive(Debug, Clone)]
pub struct NamedType {
    pub name: String,
    pub fields: Vec<Field>,  // first-seen order
    pub reference_count: u64,  // JSON objects that resolved to this type
}

/// One emitted declaration.
#[derive(Debug, Clone)]
pub enum Decl {
    Interface(NamedType),
    Alias { name: String, ty: Ty },
}

impl Decl {
    pub fn name(&self) -> &str {
        match self {
            Decl::Interface(t) => &t.name,
            Decl::Alias { name, .. } => name,
        }
    }
}
