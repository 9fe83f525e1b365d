//! Script detection for prompt-template selection.
//!
//! Queries are classified by character-class ratio over a fixed alphabet
//! set: Hangul syllables/jamo versus basic Latin letters. Anything
//! ambiguous (digits, symbols, an even mix) defaults to Latin.

/// The script family a prompt template targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFamily {
    Hangul,
    Latin,
}

/// Classify a query by the dominant script among its letter characters.
pub fn detect(query: &str) -> ScriptFamily {
    let mut hangul = 0usize;
    let mut latin = 0usize;

    for c in query.chars() {
        if is_hangul(c) {
            hangul += 1;
        } else if c.is_ascii_alphabetic() {
            latin += 1;
        }
    }

    if hangul > latin {
        ScriptFamily::Hangul
    } else {
        ScriptFamily::Latin
    }
}

fn is_hangul(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7A3}' // syllables
        | '\u{1100}'..='\u{11FF}' // jamo
        | '\u{3130}'..='\u{318F}' // compatibility jamo
    )
}
