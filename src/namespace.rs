//! Caller-side post-processing: join declarations and wrap them in a
//! namespace named after a request path.
use crate::naming;

const FALLBACK_NAMESPACE: &str = "Api";

pub fn join(decls: &[String]) -> String {
    decls.join("\n\n")
}

/// `/api/user-list` → `apiUserList`.
pub fn namespace_name(path: &str) -> String {
    let name = naming::camel_case(path);
    if naming::is_identifier(&name) {
        name
    } else {
        FALLBACK_NAMESPACE.to_string()
    }
}

/// Wrap `body` in `namespace <name> { ... }`, indenting every non-empty line.
pub fn wrap_namespace(path: &str, body: &str) -> String {
    let mut out = format!("namespace {} {{\n", namespace_name(path));
    for line in body.lines() {
        if !line.is_empty() {
            out.push_str("  ");
            out.push_str(line);
        }
        out.push('\n');
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_from_paths() {
        assert_eq!(namespace_name("/api/user-list"), "apiUserList");
        assert_eq!(namespace_name("/v2/orders"), "v2Orders");
        assert_eq!(namespace_name("/"), "Api");
        assert_eq!(namespace_name("/2024/report"), "Api");
    }

    #[test]
    fn wraps_and_reindents() {
        let body = join(&[
            "interface A {\n  b: number;\n}".to_string(),
            "interface RootObject {\n  a: A;\n}".to_string(),
        ]);
        assert_eq!(
            wrap_namespace("/api/things", &body),
            "namespace apiThings {\n  interface A {\n    b: number;\n  }\n\n  interface RootObject {\n    a: A;\n  }\n}"
        );
    }
}
