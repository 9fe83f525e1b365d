//! Multi-query expansion: paraphrase the query n ways.

use regex::Regex;
use std::sync::OnceLock;

use fathom_core::constants::MIN_VARIANT_CHARS;

use super::language::ScriptFamily;

fn numbered_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*\d+[.)]\s*(.+)$").expect("static regex"))
}

/// Build the paraphrase prompt for the detected script family.
pub(crate) fn prompt(query: &str, n: usize, script: ScriptFamily) -> String {
    match script {
        ScriptFamily::Hangul => format!(
            "다음 검색 질의를 의미는 같지만 표현이 다른 {n}가지 질의로 바꿔 쓰세요. \
             번호를 붙인 목록으로만 답하세요. 질의: {query}"
        ),
        ScriptFamily::Latin => format!(
            "Rewrite the following search query in {n} different ways that keep its meaning. \
             Answer only with a numbered list. Query: {query}"
        ),
    }
}

/// Parse a numbered-list response into at most `n` variants plus the
/// original query. Variants shorter than the minimum length, duplicates,
/// and restatements of the original are discarded.
pub(crate) fn parse(query: &str, response: &str, n: usize) -> Vec<String> {
    let mut variants = vec![query.to_string()];

    for capture in numbered_line().captures_iter(response) {
        if variants.len() > n {
            break;
        }
        let variant = capture[1].trim();
        if variant.chars().count() < MIN_VARIANT_CHARS {
            continue;
        }
        if variants.iter().any(|v| v.eq_ignore_ascii_case(variant)) {
            continue;
        }
        variants.push(variant.to_string());
    }

    variants
}
