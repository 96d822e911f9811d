use serde_json::Value;

use wikigate_common::Article;

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Structural equality where strings compare with all whitespace removed.
pub fn is_deep_equal(base: &Value, comparison: &Value) -> bool {
    match (base, comparison) {
        (Value::String(a), Value::String(b)) => a == b || strip_whitespace(a) == strip_whitespace(b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| is_deep_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| is_deep_equal(x, y)))
        }
        _ => base == comparison,
    }
}

/// Whether an edit changed anything beyond whitespace.
pub fn is_unchanged(previous: &Article, edited: &Article) -> Result<bool, serde_json::Error> {
    Ok(is_deep_equal(
        &serde_json::to_value(previous)?,
        &serde_json::to_value(edited)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wikigate_common::WikiReference;

    #[test]
    fn strings_ignore_whitespace() {
        assert!(is_deep_equal(&json!("a b\tc\n"), &json!("abc")));
        assert!(!is_deep_equal(&json!("abc"), &json!("abd")));
    }

    #[test]
    fn objects_compare_by_keys_and_values() {
        assert!(is_deep_equal(
            &json!({"a": 1, "b": {"c": "x y"}}),
            &json!({"b": {"c": "xy"}, "a": 1})
        ));
        assert!(!is_deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!is_deep_equal(&json!({"a": 1}), &json!({"b": 1})));
    }

    #[test]
    fn arrays_compare_in_order() {
        assert!(is_deep_equal(&json!([1, "a "]), &json!([1, "a"])));
        assert!(!is_deep_equal(&json!([1, 2]), &json!([2, 1])));
    }

    #[test]
    fn mismatched_types_differ() {
        assert!(!is_deep_equal(&json!("1"), &json!(1)));
        assert!(!is_deep_equal(&json!(null), &json!(false)));
        assert!(is_deep_equal(&json!(null), &json!(null)));
    }

    #[test]
    fn whitespace_only_edit_is_unchanged() {
        let before = Article::builder().title("Bitcoin").content("A  peer to peer\ncash").build();
        let after = Article::builder().title("Bitcoin").content("A peer to peer cash").build();
        assert!(is_unchanged(&before, &after).unwrap());

        let edited = Article::builder().title("Bitcoin").content("A peer to peer coin").build();
        assert!(!is_unchanged(&before, &edited).unwrap());
    }

    #[test]
    fn related_wiki_edits_are_changes() {
        let before = Article::builder().title("Ethereum").build();
        let after = Article::builder()
            .title("Ethereum")
            .founder_wikis(vec![WikiReference {
                id: "vitalik-buterin".into(),
                title: "Vitalik Buterin".into(),
            }])
            .build();
        assert!(!is_unchanged(&before, &after).unwrap());
    }
}
