//! Semantic expansion: append related terms to the query text.

use fathom_core::constants::SEMANTIC_EXPANSION_TERMS;

use super::language::ScriptFamily;

/// Build the related-terms prompt for the detected script family.
pub(crate) fn prompt(query: &str, script: ScriptFamily) -> String {
    match script {
        ScriptFamily::Hangul => format!(
            "다음 검색 질의와 관련된 동의어나 연관 용어를 쉼표로 구분해 나열하세요. \
             용어만 답하세요. 질의: {query}"
        ),
        ScriptFamily::Latin => format!(
            "List synonyms or closely related terms for the following search query, \
             separated by commas. Answer with the terms only. Query: {query}"
        ),
    }
}

/// One variant per related term: `query + " " + term`, for the top terms
/// from a comma-separated response.
pub(crate) fn parse(query: &str, response: &str) -> Vec<String> {
    let mut variants = vec![query.to_string()];

    for term in response
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty() && !query.eq_ignore_ascii_case(t))
        .take(SEMANTIC_EXPANSION_TERMS)
    {
        variants.push(format!("{query} {term}"));
    }

    variants
}
