use crate::inference::Shape;
use crate::ir::{Decl, Ty};
use crate::naming;
use crate::registry::ShapeRegistry;

impl ShapeRegistry {
    /// Lower a field shape; objects are interned and become references.
    pub(crate) fn lower(&mut self, shape: &Shape, context_key: &str) -> Ty {
        match shape {
            Shape::Unknown => Ty::Any,
            Shape::Primitive(kind) => Ty::Primitive(*kind),
            Shape::Array(item) => {
                let item_key = naming::singular(context_key);
                Ty::Array(Box::new(self.lower(item, &item_key)))
            }
            Shape::Object(obj) => Ty::Ref(self.register(obj, context_key).name.clone()),
            Shape::Union(members) => {
                Ty::Union(members.iter().map(|m| self.lower(m, context_key)).collect())
            }
        }
    }
}

/// Lower the whole tree into declarations, dependencies first.
///
/// An object root becomes the last interface; any other root becomes a type
/// alias named after the root.
pub fn lower_to_ir(root: &Shape, registry: &mut ShapeRegistry) -> Vec<Decl> {
    let root_name = registry.config.root_name.clone();
    let alias = match root {
        Shape::Object(obj) => {
            registry.register_root(obj);
            None
        }
        Shape::Array(item) => {
            let item_key = format!("{root_name}Item");
            let ty = Ty::Array(Box::new(registry.lower(item, &item_key)));
            Some(Decl::Alias { name: root_name, ty })
        }
        other => {
            let ty = registry.lower(other, &root_name);
            Some(Decl::Alias { name: root_name, ty })
        }
    };

    let mut decls: Vec<Decl> = registry.types().iter().cloned().map(Decl::Interface).collect();
    decls.extend(alias);
    decls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::inference::{synthesize, Kind};
    use serde_json::json;

    fn lower(v: serde_json::Value) -> Vec<Decl> {
        let mut reg = ShapeRegistry::new(&Config::default());
        lower_to_ir(&synthesize(&v), &mut reg)
    }

    #[test]
    fn object_root_is_last_interface() {
        let decls = lower(json!({"a": {"b": 1}}));
        let names: Vec<&str> = decls.iter().map(Decl::name).collect();
        assert_eq!(names, ["A", "RootObject"]);
        assert!(matches!(decls[1], Decl::Interface(_)));
    }

    #[test]
    fn array_root_is_alias_over_item_type() {
        let decls = lower(json!([{"id": 1}, {"id": 2}]));
        assert_eq!(decls.len(), 2);
        let Decl::Interface(item) = &decls[0] else { panic!("interface") };
        assert_eq!(item.name, "RootObjectItem");
        assert_eq!(item.reference_count, 2);
        let Decl::Alias { name, ty } = &decls[1] else { panic!("alias") };
        assert_eq!(name, "RootObject");
        assert_eq!(*ty, Ty::Array(Box::new(Ty::Ref("RootObjectItem".into()))));
    }

    #[test]
    fn empty_root_array_is_any_list() {
        let decls = lower(json!([]));
        let [Decl::Alias { name, ty }] = decls.as_slice() else { panic!("single alias") };
        assert_eq!(name, "RootObject");
        assert_eq!(*ty, Ty::Array(Box::new(Ty::Any)));
    }

    #[test]
    fn primitive_root_is_alias() {
        let decls = lower(json!("hello"));
        let [Decl::Alias { ty, .. }] = decls.as_slice() else { panic!("single alias") };
        assert_eq!(*ty, Ty::Primitive(Kind::String));
    }

    #[test]
    fn array_elements_are_named_by_singular_key() {
        let decls = lower(json!({"categories": [{"id": 1}]}));
        assert_eq!(decls[0].name(), "Category");
    }
}
