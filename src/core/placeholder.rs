//! Textual placeholder substitution for config templates.
//!
//! Templates are plain strings with bracketed tokens such as `[jobID]`.
//! There is no escaping and no nesting: each field is scanned once, left to
//! right, and text inserted for a token is never scanned again.

use regex::Regex;
use std::sync::OnceLock;

pub const JOB_ID: &str = "[jobID]";
pub const RUN_NO: &str = "[runNo]";
pub const DIR_NO: &str = "[dirNo]";
pub const INPUT: &str = "[input]";

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[(jobID|runNo|dirNo|input)\]").expect("placeholder pattern is valid")
    })
}

/// Replace every token of `pairs` in `template` in a single pass
pub fn substitute(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    'scan: while !rest.is_empty() {
        if rest.starts_with('[') {
            for &(token, value) in pairs {
                if let Some(tail) = rest.strip_prefix(token) {
                    out.push_str(value);
                    rest = tail;
                    continue 'scan;
                }
            }
        }
        let step = rest.chars().next().map_or(1, char::len_utf8);
        let next = rest[step..].find('[').map_or(rest.len(), |i| i + step);
        out.push_str(&rest[..next]);
        rest = &rest[next..];
    }

    out
}

/// Whether `template` mentions the run/directory token under either name
pub fn has_run_token(template: &str) -> bool {
    template.contains(RUN_NO) || template.contains(DIR_NO)
}

/// Placeholder tokens still present in `text`
pub fn unresolved(text: &str) -> Vec<&str> {
    placeholder_re().find_iter(text).map(|m| m.as_str()).collect()
}
