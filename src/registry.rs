//! Structural deduplication and naming of object shapes.
//!
//! One registry lives for one conversion. Every object shape reachable from
//! the root is interned by fingerprint; the first sighting allocates a name,
//! later sightings only bump the reference count.
use std::collections::{HashMap, HashSet};

use crate::config::Config;
use crate::inference::{ObjShape, Shape};
use crate::ir::{Field, NamedType};
use crate::{fingerprint, naming};

/// Names that already denote a TypeScript or DOM global. A generated
/// interface with one of these names would merge with the global
/// declaration, so they are never handed out to nested types.
const RESERVED_NAMES: &[&str] = &[
    "Array", "ArrayBuffer", "BigInt", "Blob", "Boolean", "DataView", "Date",
    "Document", "Element", "Error", "Event", "Exclude", "Extract", "File",
    "Function", "Headers", "Intl", "Iterator", "JSON", "Location", "Map",
    "Math", "Node", "Number", "Object", "Omit", "Partial", "Pick", "Promise",
    "Proxy", "Readonly", "Record", "Reflect", "RegExp", "Request", "Required",
    "Response", "Set", "Storage", "String", "Symbol", "Text", "URL", "WeakMap",
    "WeakSet", "Window",
];

#[derive(Debug)]
pub struct ShapeRegistry {
    pub(crate) config: Config,
    by_fingerprint: HashMap<String, usize>,
    taken: HashSet<String>,
    types: Vec<NamedType>,  // registration order == dependency order
}

impl ShapeRegistry {
    pub fn new(config: &Config) -> Self {
        let root_name = config.root_type_name();
        if root_name != config.root_name {
            tracing::warn!(requested = %config.root_name, used = %root_name, "root name is not an identifier");
        }
        let mut taken: HashSet<String> = RESERVED_NAMES.iter().map(|n| n.to_string()).collect();
        taken.insert(root_name.clone());
        Self {
            config: Config { root_name, ..config.clone() },
            by_fingerprint: HashMap::new(),
            taken,
            types: Vec::new(),
        }
    }

    /// Intern `shape` under a name derived from `context_key`.
    pub fn register(&mut self, shape: &ObjShape, context_key: &str) -> &NamedType {
        self.intern(shape, context_key, None)
    }

    /// Intern the entry object under the reserved root name.
    pub(crate) fn register_root(&mut self, shape: &ObjShape) -> &NamedType {
        let root = self.config.root_name.clone();
        self.intern(shape, &root, Some(root.clone()))
    }

    fn intern(&mut self, shape: &ObjShape, context_key: &str, fixed_name: Option<String>) -> &NamedType {
        let fp = fingerprint::of_object(shape);
        if let Some(&idx) = self.by_fingerprint.get(&fp) {
            self.types[idx].reference_count += shape.instances.max(1);
            // the reused type's children are reached again through it
            self.count_nested(shape);
            tracing::trace!(name = %self.types[idx].name, refs = self.types[idx].reference_count, "reused type");
            return &self.types[idx];
        }

        // children first, so nested objects are references by now
        let fields = self.lower_fields(shape);
        let name = fixed_name.unwrap_or_else(|| self.allocate_name(context_key));
        tracing::debug!(%name, fields = fields.len(), "registered type");

        self.types.push(NamedType {
            name,
            fields,
            reference_count: shape.instances.max(1),
        });
        let idx = self.types.len() - 1;
        self.by_fingerprint.insert(fp, idx);
        &self.types[idx]
    }

    /// Add the instances of every object nested in `shape` to its already
    /// registered type.
    fn count_nested(&mut self, shape: &ObjShape) {
        for field in shape.fields.values() {
            self.count_shape(&field.shape);
        }
    }

    fn count_shape(&mut self, shape: &Shape) {
        match shape {
            Shape::Object(obj) => {
                if let Some(&idx) = self.by_fingerprint.get(&fingerprint::of_object(obj)) {
                    self.types[idx].reference_count += obj.instances.max(1);
                }
                self.count_nested(obj);
            }
            Shape::Array(item) => self.count_shape(item),
            Shape::Union(members) => members.iter().for_each(|m| self.count_shape(m)),
            Shape::Unknown | Shape::Primitive(_) => {}
        }
    }

    fn lower_fields(&mut self, shape: &ObjShape) -> Vec<Field> {
        // keys already in camelCase keep their spelling and win clashes
        let verbatim: HashSet<String> = if self.config.camel_case_key {
            shape.fields.keys().filter(|k| naming::camel_case(k) == **k).cloned().collect()
        } else {
            HashSet::new()
        };
        let mut used = HashSet::new();
        let mut fields = Vec::with_capacity(shape.fields.len());
        for (raw_key, field) in &shape.fields {
            let key = self.field_key(raw_key, &verbatim, &used);
            used.insert(key.clone());
            let ty = self.lower(&field.shape, raw_key);
            fields.push(Field { key, ty, optional: field.optional });
        }
        fields
    }

    /// Rendered key. A camelCase form that clashes with another key keeps
    /// its raw spelling.
    fn field_key(&self, raw_key: &str, verbatim: &HashSet<String>, used: &HashSet<String>) -> String {
        if !self.config.camel_case_key {
            return raw_key.to_string();
        }
        let converted = naming::camel_case(raw_key);
        if converted == raw_key {
            return converted;
        }
        if converted.is_empty() || verbatim.contains(&converted) || used.contains(&converted) {
            raw_key.to_string()
        } else {
            converted
        }
    }

    fn allocate_name(&mut self, context_key: &str) -> String {
        let candidate = if self.config.camel_case_key {
            naming::pascal_case(context_key)
        } else {
            naming::upper_first(context_key)
        };
        let base = if naming::is_identifier(&candidate) {
            candidate
        } else {
            format!("Type{}", self.types.len() + 1)
        };

        let mut name = base.clone();
        let mut n = 2;
        while self.taken.contains(&name) {
            name = format!("{base}{n}");
            n += 1;
        }
        self.taken.insert(name.clone());
        name
    }

    pub fn types(&self) -> &[NamedType] { &self.types }
}
