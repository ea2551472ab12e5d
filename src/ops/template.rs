//! Placeholder extraction and substitution for script command templates.
//!
//! A placeholder is `{{name}}`. Whitespace just inside the braces is ignored,
//! so `{{ name }}` and `{{name}}` name the same slot. Anything that does not
//! form a complete, non-empty `{{...}}` pair on one line is plain text.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([^{}\n]*)\}\}").expect("placeholder pattern is valid")
});

fn placeholder_name<'a>(caps: &Captures<'a>) -> Option<&'a str> {
    let name = caps.get(1)?.as_str().trim();
    (!name.is_empty()).then_some(name)
}

/// Distinct placeholder names in first-occurrence order.
///
/// `"git commit -m {{message}}"` yields `["message"]`.
pub fn placeholders(command: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(command) {
        if let Some(name) = placeholder_name(&caps)
            && !names.iter().any(|n| n == name)
        {
            names.push(name.to_string());
        }
    }
    names
}

/// Replace every placeholder that has a value in `values`.
///
/// Placeholders without a value are left exactly as written. Values are
/// inserted verbatim.
pub fn substitute(command: &str, values: &HashMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(command, |caps: &Captures| {
            match placeholder_name(caps).and_then(|name| values.get(name)) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Names from `placeholders(command)` that have no entry in `values`
pub fn missing(command: &str, values: &HashMap<String, String>) -> Vec<String> {
    placeholders(command)
        .into_iter()
        .filter(|name| !values.contains_key(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn single_placeholder() {
        assert_eq!(placeholders("git commit -m {{message}}"), vec!["message"]);
    }

    #[test]
    fn distinct_names_in_first_occurrence_order() {
        assert_debug_snapshot!(
            placeholders("scp {{file}} {{host}}:{{dir}} && ssh {{host}} ls {{dir}}/{{file}}"),
            @r#"
        [
            "file",
            "host",
            "dir",
        ]
        "#
        );
    }

    #[test]
    fn no_placeholders() {
        assert!(placeholders("echo 'hello world'").is_empty());
        assert!(placeholders("").is_empty());
    }

    #[test]
    fn malformed_delimiters_are_text() {
        assert!(placeholders("echo {{unclosed").is_empty());
        assert!(placeholders("echo closed}}").is_empty());
        assert!(placeholders("echo {single}").is_empty());
        assert!(placeholders("echo {{}}").is_empty());
        assert!(placeholders("echo {{   }}").is_empty());
        assert!(placeholders("echo {{a\nb}}").is_empty());
    }

    #[test]
    fn inner_pair_is_recognized_inside_extra_braces() {
        assert_eq!(placeholders("echo {{{x}}}"), vec!["x"]);
    }

    #[test]
    fn whitespace_inside_braces_is_trimmed() {
        assert_eq!(placeholders("echo {{ msg }} {{msg}}"), vec!["msg"]);
    }

    #[test]
    fn substitute_full_mapping() {
        let out = substitute("git commit -m {{message}}", &values(&[("message", "fix bug")]));
        assert_eq!(out, "git commit -m fix bug");
    }

    #[test]
    fn substitute_replaces_every_occurrence() {
        let out = substitute("{{a}}-{{ a }}-{{b}}", &values(&[("a", "1"), ("b", "2")]));
        assert_eq!(out, "1-1-2");
    }

    #[test]
    fn unresolved_placeholders_stay_literal() {
        let cmd = "cp {{src}} {{ dst }}";
        assert_eq!(substitute(cmd, &HashMap::new()), cmd);
        assert_eq!(
            substitute(cmd, &values(&[("src", "a.txt")])),
            "cp a.txt {{ dst }}"
        );
    }

    #[test]
    fn values_are_not_expanded() {
        let out = substitute("echo {{x}}", &values(&[("x", "$1 {{y}}")]));
        assert_eq!(out, "echo $1 {{y}}");
    }

    #[test]
    fn missing_lists_unanswered_names() {
        let cmd = "make {{target}} JOBS={{jobs}}";
        assert_eq!(missing(cmd, &values(&[("jobs", "4")])), vec!["target"]);
        assert!(missing(cmd, &values(&[("jobs", "4"), ("target", "all")])).is_empty());
    }
}
