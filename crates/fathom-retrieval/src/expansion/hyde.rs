//! Hypothetical Document Embedding (HyDE).
//!
//! Asks the generation capability for a plausible answer to the query and
//! retrieves with that answer as an additional variant: queries expressed
//! as answers retrieve better against passages written as answers.

use super::language::ScriptFamily;

/// Build the HyDE prompt for the detected script family.
pub(crate) fn prompt(query: &str, script: ScriptFamily) -> String {
    match script {
        ScriptFamily::Hangul => format!(
            "다음 질문에 대한 그럴듯한 답변 단락을 한 문단으로 작성하세요. \
             사실이 아니어도 됩니다. 질문: {query}"
        ),
        ScriptFamily::Latin => format!(
            "Write one plausible paragraph that answers the following question. \
             It does not need to be factually accurate. Question: {query}"
        ),
    }
}

/// Variants from a generation response: the original query plus the
/// hypothetical answer, when the answer is non-empty.
pub(crate) fn parse(query: &str, response: &str) -> Vec<String> {
    let answer = response.trim();
    if answer.is_empty() {
        vec![query.to_string()]
    } else {
        vec![query.to_string(), answer.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_becomes_second_variant() {
        let variants = parse("what is rust", "Rust is a systems language focused on safety.");
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0], "what is rust");
        assert!(variants[1].starts_with("Rust is"));
    }

    #[test]
    fn blank_answer_collapses_to_original() {
        assert_eq!(parse("q", "   \n"), vec!["q".to_string()]);
    }

    #[test]
    fn prompt_follows_script() {
        assert!(prompt("질문", ScriptFamily::Hangul).contains("질문"));
        assert!(prompt("query", ScriptFamily::Latin).contains("Question: query"));
    }
}
