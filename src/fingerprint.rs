//! Canonical structural encoding used as the deduplication key.
//!
//! Object fields are encoded sorted by key, so discovery order never changes
//! the fingerprint. Keys go through JSON string escaping, so no key can forge
//! a separator.
use crate::inference::{ObjShape, Shape};

pub fn of_object(obj: &ObjShape) -> String {
    let mut out = String::new();
    write_object(obj, &mut out);
    out
}

fn write_shape(shape: &Shape, out: &mut String) {
    match shape {
        Shape::Unknown => out.push('?'),
        Shape::Primitive(kind) => out.push_str(kind.keyword()),
        Shape::Array(item) => {
            out.push('[');
            write_shape(item, out);
            out.push(']');
        }
        Shape::Object(obj) => write_object(obj, out),
        Shape::Union(members) => {
            out.push('(');
            for (i, m) in members.iter().enumerate() {
                if i > 0 { out.push('|'); }
                write_shape(m, out);
            }
            out.push(')');
        }
    }
}

fn write_object(obj: &ObjShape, out: &mut String) {
    out.push('{');
    for (i, (key, field)) in obj.sorted_fields().into_iter().enumerate() {
        if i > 0 { out.push(','); }
        out.push_str(&serde_json::Value::from(key.as_str()).to_string());
        out.push_str(if field.optional { "?:" } else { ":" });
        write_shape(&field.shape, out);
    }
    out.push('}');
}
