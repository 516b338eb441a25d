//! jq pre-selection of captured documents (e.g. `.data.items[]`).
use anyhow::{anyhow, Context, Result};
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Run `filter_src` against `input`; every jq output becomes one document.
pub fn run_filter(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(format_parse_errors)
        .with_context(|| format!("in `{filter_src}`"))?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)
        .with_context(|| format!("in `{filter_src}`"))?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut docs = Vec::new();
    for item in outputs {
        let val = item.map_err(|e| anyhow!("{e:?}"))?;
        // Val renders as JSON text
        let text = val.to_string();
        let doc = serde_json::from_str::<Value>(&text)
            .with_context(|| format!("jq produced non-JSON output: {text}"))?;
        docs.push(doc);
    }
    Ok(docs)
}

/// Load failures carry no position we can map back, so keep the
/// debug rendering of each one.
fn format_parse_errors(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> anyhow::Error {
    let detail = errs.iter().map(|(_, err)| format!("{err:?}")).collect::<Vec<_>>();
    anyhow!("cannot parse jq filter: {}", detail.join("; "))
}

fn format_undefined_errors(
    errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>,
) -> anyhow::Error {
    let names = errs
        .iter()
        .flat_map(|(_, list)| list.iter().map(|(name, undef)| format!("{name} ({undef:?})")))
        .collect::<Vec<_>>();
    anyhow!("jq filter uses undefined names: {}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn each_output_is_a_document() {
        let docs = run_filter(".items[]", &json!({"items": [{"a": 1}, {"a": 2}]})).unwrap();
        assert_eq!(docs, [json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn syntax_errors_surface() {
        let err = run_filter(".items[", &json!({})).unwrap_err();
        let text = format!("{err:#}");
        assert!(text.contains(".items["), "{text}");
        assert!(text.contains("cannot parse jq filter"), "{text}");
    }

    #[test]
    fn undefined_functions_are_named() {
        let err = run_filter("nosuchfn(1)", &json!({})).unwrap_err();
        let text = format!("{err:#}");
        assert!(text.contains("undefined names: nosuchfn"), "{text}");
    }
}
