use std::collections::BTreeMap;
use super::{Kind, Shape};

/// Union slot. Declaration order is the canonical member order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Class { Array, Object, Number, String, Boolean, Null }

pub fn class_of(s: &Shape) -> Option<Class> {
    match s {
        Shape::Unknown | Shape::Union(_) => None,
        Shape::Array(_) => Some(Class::Array),
        Shape::Object(_) => Some(Class::Object),
        Shape::Primitive(Kind::Number) => Some(Class::Number),
        Shape::Primitive(Kind::String) => Some(Class::String),
        Shape::Primitive(Kind::Boolean) => Some(Class::Boolean),
        Shape::Primitive(Kind::Null) => Some(Class::Null),
    }
}

fn members(s: &Shape) -> &[Shape] {
    match s {
        Shape::Union(ms) => ms,
        Shape::Unknown => &[],
        other => std::slice::from_ref(other),
    }
}

/// Flatten both sides into one slot per class, merging same-class members.
pub(super) fn join(a: &Shape, b: &Shape) -> Shape {
    let mut slots: BTreeMap<Class, Shape> = BTreeMap::new();
    for member in members(a).iter().chain(members(b)) {
        let Some(class) = class_of(member) else { continue };
        let merged = match slots.remove(&class) {
            Some(prev) => super::merge(&prev, member),
            None => member.clone(),
        };
        slots.insert(class, merged);
    }

    let mut out: Vec<Shape> = slots.into_values().collect();
    match out.len() {
        0 => Shape::Unknown,
        1 => out.remove(0),
        _ => Shape::Union(out),
    }
}
