//! Identifier casing for keys, type names and namespaces.
use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Split on separators and case humps: `user_ID-list` → `user`, `ID`, `list`;
/// `HTTPServer` → `HTTP`, `Server`.
pub fn words(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    for chunk in SEPARATORS.split(input).filter(|c| !c.is_empty()) {
        split_humps(chunk, &mut out);
    }
    out
}

fn split_humps(chunk: &str, out: &mut Vec<String>) {
    let chars: Vec<char> = chunk.chars().collect();
    let mut start = 0;
    for i in 1..chars.len() {
        let (prev, cur) = (chars[i - 1], chars[i]);
        let next_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
        let boundary = (!prev.is_uppercase() && cur.is_uppercase())
            || (prev.is_uppercase() && cur.is_uppercase() && next_lower);
        if boundary {
            out.push(chars[start..i].iter().collect());
            start = i;
        }
    }
    out.push(chars[start..].iter().collect());
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `user_id` → `userId`, `Content-Type` → `contentType`.
pub fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, word) in words(input).iter().enumerate() {
        if i == 0 {
            out.extend(word.chars().flat_map(char::to_lowercase));
        } else {
            out.push_str(&capitalize_word(word));
        }
    }
    out
}

/// `user_id` → `UserId`.
pub fn pascal_case(input: &str) -> String {
    words(input).iter().map(|w| capitalize_word(w)).collect()
}

/// Upper-case the first letter only; the rest is kept verbatim.
pub fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Naive English singular for array keys: `categories` → `category`,
/// `items` → `item`. Anything else is returned unchanged.
pub fn singular(input: &str) -> String {
    if let Some(stem) = input.strip_suffix("ies").filter(|s| !s.is_empty()) {
        return format!("{stem}y");
    }
    if input.ends_with("ss") || input.ends_with("us") {
        return input.to_string();
    }
    match input.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => input.to_string(),
    }
}

/// Valid bare TypeScript identifier (ASCII subset).
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_separators_and_humps() {
        assert_eq!(words("user_id"), ["user", "id"]);
        assert_eq!(words("kebab-case-key"), ["kebab", "case", "key"]);
        assert_eq!(words("fooBarBaz"), ["foo", "Bar", "Baz"]);
        assert_eq!(words("HTTPServer"), ["HTTP", "Server"]);
        assert_eq!(words("/api/v1/users"), ["api", "v1", "users"]);
        assert!(words("__").is_empty());
    }

    #[test]
    fn camel_and_pascal() {
        assert_eq!(camel_case("user_id"), "userId");
        assert_eq!(camel_case("Content-Type"), "contentType");
        assert_eq!(camel_case("already_camelCase"), "alreadyCamelCase");
        assert_eq!(camel_case("ID"), "id");
        assert_eq!(pascal_case("user_id"), "UserId");
        assert_eq!(pascal_case("items"), "Items");
        assert_eq!(pascal_case(""), "");
    }

    #[test]
    fn singularizes_common_plurals() {
        assert_eq!(singular("items"), "item");
        assert_eq!(singular("categories"), "category");
        assert_eq!(singular("address"), "address");
        assert_eq!(singular("status"), "status");
        assert_eq!(singular("data"), "data");
        assert_eq!(singular("s"), "s");
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("userId"));
        assert!(is_identifier("$ref"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier("2fa"));
        assert!(!is_identifier("content-type"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn upper_first_keeps_the_tail() {
        assert_eq!(upper_first("user_id"), "User_id");
        assert_eq!(upper_first(""), "");
    }
}
