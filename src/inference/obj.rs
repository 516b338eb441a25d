use indexmap::IndexMap;
use serde::Serialize;
use super::Shape;

#[derive(Clone, Debug, Default, Serialize)]
pub struct ObjShape {
    pub fields: IndexMap<String, FieldShape>,  // first-seen order
    pub instances: u64,                        // objects merged into this shape
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FieldShape {
    pub shape: Shape,
    pub optional: bool,  // some contributing object omitted the key
}

/// `instances` is evidence, not structure.
impl PartialEq for ObjShape {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl ObjShape {
    pub(super) fn join(a: &Self, b: &Self) -> Self {
        let mut out = Self { instances: a.instances + b.instances, ..Self::default() };

        // merge keys from a
        for (k, fa) in &a.fields {
            let field = match b.fields.get(k) {
                None => FieldShape { shape: fa.shape.clone(), optional: true },
                Some(fb) => FieldShape {
                    shape: super::merge(&fa.shape, &fb.shape),
                    optional: fa.optional || fb.optional,
                },
            };
            out.fields.insert(k.clone(), field);
        }
        // add keys only in b
        for (k, fb) in &b.fields {
            if !out.fields.contains_key(k) {
                out.fields.insert(k.clone(), FieldShape { shape: fb.shape.clone(), optional: true });
            }
        }

        out
    }

    /// Keys sorted for order-independent encodings.
    pub fn sorted_fields(&self) -> Vec<(&String, &FieldShape)> {
        let mut fields: Vec<_> = self.fields.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        fields
    }
}
