//! Structural shape inference.
//!
//! Classify JSON values, synthesize a `Shape` tree bottom-up, and combine the
//! shapes of values that occupy the same position (sibling array elements,
//! repeated samples) with `merge`.
//!
//! Design goals:
//! - Merge ⊔ is associative/commutative/idempotent → fold order never matters.
//! - A union holds at most one member per shape class, so merging never nests
//!   unions and never drops evidence.
//! - Object equality ignores field order and instance counts; only the key set,
//!   field shapes and optionality are structure.
pub mod obj;
pub mod union;

use serde::Serialize;
use serde_json::{Map, Value};

pub use obj::{FieldShape, ObjShape};

// ------------------------------ Classifier -------------------------------- //

/// Runtime tag of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag { Null, Boolean, Number, String, Array, Object }

/// The four leaf kinds a `Shape::Primitive` can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind { Null, Boolean, Number, String }

pub fn classify(v: &Value) -> Tag {
    match v {
        Value::Null      => Tag::Null,
        Value::Bool(_)   => Tag::Boolean,
        Value::Number(_) => Tag::Number,
        Value::String(_) => Tag::String,
        Value::Array(_)  => Tag::Array,
        Value::Object(_) => Tag::Object,
    }
}

impl Tag {
    /// Leaf kind for scalar tags; containers have none.
    pub fn primitive(self) -> Option<Kind> {
        match self {
            Tag::Null    => Some(Kind::Null),
            Tag::Boolean => Some(Kind::Boolean),
            Tag::Number  => Some(Kind::Number),
            Tag::String  => Some(Kind::String),
            Tag::Array | Tag::Object => None,
        }
    }
}

impl Kind {
    /// TypeScript keyword for the kind.
    pub fn keyword(self) -> &'static str {
        match self {
            Kind::Null    => "null",
            Kind::Boolean => "boolean",
            Kind::Number  => "number",
            Kind::String  => "string",
        }
    }
}

// -------------------------------- Shape ----------------------------------- //

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "lowercase")]
pub enum Shape {
    /// Element of an empty array; identity of `merge`.
    #[default]
    Unknown,
    Primitive(Kind),
    Array(Box<Shape>),
    Object(ObjShape),
    /// Canonical: ≥2 members, ≤1 per `Class`, sorted by `Class`.
    Union(Vec<Shape>),
}

impl Shape {
    pub fn as_object(&self) -> Option<&ObjShape> {
        match self {
            Shape::Object(o) => Some(o),
            _ => None,
        }
    }
}

// ------------------------------ Synthesize -------------------------------- //

/// Build the shape of a single value.
///
/// Recursion depth follows input nesting; `serde_json` already caps parse
/// depth, so no explicit worklist is needed here.
pub fn synthesize(v: &Value) -> Shape {
    match (classify(v), v) {
        (Tag::Array, Value::Array(xs)) => synthesize_array(xs),
        (Tag::Object, Value::Object(m)) => synthesize_object(m),
        (tag, _) => tag.primitive().map_or(Shape::Unknown, Shape::Primitive),
    }
}

fn synthesize_array(xs: &[Value]) -> Shape {
    let item = xs.iter().fold(Shape::Unknown, |acc, el| merge(&acc, &synthesize(el)));
    Shape::Array(Box::new(item))
}

fn synthesize_object(map: &Map<String, Value>) -> Shape {
    let fields = map
        .iter()
        .map(|(k, v)| (k.clone(), FieldShape { shape: synthesize(v), optional: false }))
        .collect();
    Shape::Object(ObjShape { fields, instances: 1 })
}

// -------------------------------- Merge (⊔) ------------------------------- //

pub fn merge(a: &Shape, b: &Shape) -> Shape {
    match (a, b) {
        (Shape::Unknown, x) | (x, Shape::Unknown) => x.clone(),
        (Shape::Primitive(x), Shape::Primitive(y)) if x == y => a.clone(),
        (Shape::Array(x), Shape::Array(y)) => Shape::Array(Box::new(merge(x, y))),
        (Shape::Object(x), Shape::Object(y)) => Shape::Object(ObjShape::join(x, y)),
        _ => union::join(a, b),
    }
}

// ------------------------------- Front API -------------------------------- //

/// Folds many samples of the same document into one shape.
#[derive(Debug, Default)]
pub struct Inference { state: Shape, samples: u64 }

impl Inference {
    pub fn new() -> Self { Self::default() }

    pub fn observe_value(&mut self, v: &Value) {
        let obs = synthesize(v);
        self.state = merge(&self.state, &obs);
        self.samples += 1;
    }

    pub fn samples(&self) -> u64 { self.samples }

    pub fn solve(&self) -> Shape { self.state.clone() }
}

pub fn infer_from_values<'a, I>(values: I) -> Shape
where
    I: IntoIterator<Item = &'a Value>
{
    let mut inf = Inference::new();
    for v in values {
        inf.observe_value(v);
    }
    inf.solve()
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shape(v: Value) -> Shape { synthesize(&v) }

    fn field<'a>(s: &'a Shape, key: &str) -> &'a FieldShape {
        s.as_object().expect("object shape").fields.get(key).expect("field present")
    }

    #[test]
    fn classify_covers_every_value() {
        assert_eq!(classify(&json!(null)), Tag::Null);
        assert_eq!(classify(&json!(true)), Tag::Boolean);
        assert_eq!(classify(&json!(1)), Tag::Number);
        assert_eq!(classify(&json!(1.5)), Tag::Number);
        assert_eq!(classify(&json!("x")), Tag::String);
        assert_eq!(classify(&json!([])), Tag::Array);
        assert_eq!(classify(&json!({})), Tag::Object);
    }

    #[test]
    fn scalar_tags_map_to_kinds() {
        assert_eq!(Tag::Number.primitive(), Some(Kind::Number));
        assert_eq!(Tag::Null.primitive(), Some(Kind::Null));
        assert_eq!(Tag::Array.primitive(), None);
        assert_eq!(shape(json!(false)), Shape::Primitive(Kind::Boolean));
        assert_eq!(shape(json!(null)), Shape::Primitive(Kind::Null));
    }

    #[test]
    fn empty_array_has_unknown_element() {
        assert_eq!(shape(json!([])), Shape::Array(Box::new(Shape::Unknown)));
    }

    #[test]
    fn ints_and_floats_share_one_kind() {
        assert_eq!(shape(json!([1, 2.5, -3])), Shape::Array(Box::new(Shape::Primitive(Kind::Number))));
    }

    #[test]
    fn synthesized_fields_are_required() {
        let s = shape(json!({"a": 1, "b": "x"}));
        assert!(!field(&s, "a").optional);
        assert!(!field(&s, "b").optional);
    }

    #[test]
    fn sibling_objects_mark_missing_keys_optional() {
        let s = shape(json!([{"a": 1, "b": 2}, {"a": 1}]));
        let Shape::Array(item) = s else { panic!("array") };
        assert!(!field(&item, "a").optional);
        assert!(field(&item, "b").optional);
    }

    #[test]
    fn field_order_is_first_seen_union() {
        let s = shape(json!([{"b": 1, "a": 1}, {"c": 1, "a": 1}]));
        let Shape::Array(item) = s else { panic!("array") };
        let keys: Vec<&str> = item.as_object().unwrap().fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn mismatched_kinds_become_union() {
        let s = shape(json!([{"a": 1}, {"a": "x"}]));
        let Shape::Array(item) = s else { panic!("array") };
        assert_eq!(
            field(&item, "a").shape,
            Shape::Union(vec![Shape::Primitive(Kind::Number), Shape::Primitive(Kind::String)])
        );
    }

    #[test]
    fn unions_flatten_instead_of_nesting() {
        let u = shape(json!([1, "x", true, 2, "y", null]));
        let Shape::Array(item) = u else { panic!("array") };
        let Shape::Union(members) = *item else { panic!("union") };
        assert_eq!(members.len(), 4);
        assert!(members.iter().all(|m| !matches!(m, Shape::Union(_))));
    }

    #[test]
    fn objects_inside_unions_still_merge() {
        let s = shape(json!([{"a": 1}, 5, {"b": 2}]));
        let Shape::Array(item) = s else { panic!("array") };
        let Shape::Union(members) = *item else { panic!("union") };
        assert_eq!(members.len(), 2);
        let obj = members.iter().find_map(Shape::as_object).expect("object member");
        assert!(obj.fields["a"].optional && obj.fields["b"].optional);
        assert_eq!(obj.instances, 2);
    }

    #[test]
    fn merge_laws_idempotent_commutative_associative() {
        let samples = [
            shape(json!({"x": 1, "y": [1, 2], "z": {"q": null}})),
            shape(json!({"x": "a", "y": [], "w": true})),
            shape(json!([{"k": 1}, "s"])),
            shape(json!(3)),
            shape(json!(null)),
            shape(json!([[1], ["a"]])),
            Shape::Unknown,
        ];

        for a in &samples {
            assert_eq!(merge(a, a), *a, "idempotent");
            for b in &samples {
                assert_eq!(merge(a, b), merge(b, a), "commutative");
                for c in &samples {
                    assert_eq!(merge(&merge(a, b), c), merge(a, &merge(b, c)), "associative");
                }
            }
        }
    }

    #[test]
    fn unknown_is_identity() {
        let s = shape(json!({"a": [1]}));
        assert_eq!(merge(&Shape::Unknown, &s), s);
        assert_eq!(merge(&s, &Shape::Unknown), s);
    }

    #[test]
    fn inference_folds_samples() {
        let a = json!({"id": 1, "name": "x"});
        let b = json!({"id": 2});
        let mut inf = Inference::new();
        inf.observe_value(&a);
        inf.observe_value(&b);
        let s = inf.solve();
        assert_eq!(inf.samples(), 2);
        assert!(field(&s, "name").optional);
        assert_eq!(s, infer_from_values([&b, &a]));
    }
}
