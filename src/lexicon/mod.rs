//! Per-language tables of spelled-out quantities and units.
//!
//! The quantity recovery pass and the validators are driven entirely by these
//! tables; adding a language means adding a `Lexicon` value, not code.

use std::borrow::Cow;

mod english;
mod romanian;

pub use english::ENGLISH;
pub use romanian::ROMANIAN;

/// Word lists for one language. All entries are lower-case.
#[derive(Debug)]
pub struct Lexicon {
    /// ISO 639-1 code, e.g. "ro"
    pub code: &'static str,
    /// English name of the language, used in prompts and logs
    pub name: &'static str,
    /// Cardinal number words to digit strings, gendered forms included
    pub numbers: &'static [(&'static str, &'static str)],
    /// Fraction phrases to fraction strings
    pub fractions: &'static [(&'static str, &'static str)],
    /// Weight and metric volume units, written glued to the number ("700g")
    pub metric_units: &'static [(&'static str, &'static str)],
    /// Spoon, cup and glass units, written after a space ("2 linguri")
    pub volume_units: &'static [(&'static str, &'static str)],
    /// Countable units such as bunch, root, piece
    pub count_units: &'static [(&'static str, &'static str)],
    /// Prepositions linking a unit to the ingredient ("de", "of")
    pub links: &'static [&'static str],
    /// Size adjectives that belong with a count ("2 large")
    pub size_words: &'static [&'static str],
    /// Ingredients normally weighed or poured, never counted
    pub measured_keywords: &'static [&'static str],
    /// Ingredients normally counted
    pub counted_keywords: &'static [&'static str],
}

/// Every lexicon shipped with the crate.
pub static ALL: [&Lexicon; 2] = [&ROMANIAN, &ENGLISH];

/// Language whose quantity tokens must never appear in a clean name.
pub static DEFAULT_LANGUAGE: &Lexicon = &ENGLISH;

impl Lexicon {
    /// Look up a lexicon by its language code.
    pub fn for_code(code: &str) -> Option<&'static Lexicon> {
        let code = code.trim();
        ALL.iter()
            .copied()
            .find(|lexicon| lexicon.code.eq_ignore_ascii_case(code))
    }

    /// Digit string for a spelled-out number word.
    pub fn number(&self, word: &str) -> Option<&'static str> {
        lookup(self.numbers, word)
    }

    /// Fraction string ("1/2") for a spelled-out fraction phrase.
    pub fn fraction(&self, phrase: &str) -> Option<&'static str> {
        let phrase = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        lookup(self.fractions, &phrase)
    }

    /// Canonical abbreviation for any unit word in this language.
    pub fn unit(&self, word: &str) -> Option<&'static str> {
        lookup(self.metric_units, word)
            .or_else(|| lookup(self.volume_units, word))
            .or_else(|| lookup(self.count_units, word))
    }

    /// Digits pass through; number words are translated.
    pub fn number_or_digits(&self, token: &str) -> Option<String> {
        let token = token.trim();
        if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            return Some(token.to_string());
        }
        self.number(token).map(str::to_string)
    }
}

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    let key = fold_diacritics(key.trim()).to_lowercase();
    table
        .iter()
        .find(|(word, _)| *word == key)
        .map(|(_, value)| *value)
}

/// Map cedilla spellings of Romanian s/t to the comma-below letters the
/// tables use. Web text mixes both freely.
pub fn fold_diacritics(text: &str) -> Cow<'_, str> {
    if !text.contains(&['ş', 'Ş', 'ţ', 'Ţ'][..]) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| match c {
                'ş' => 'ș',
                'Ş' => 'Ș',
                'ţ' => 'ț',
                'Ţ' => 'Ț',
                other => other,
            })
            .collect(),
    )
}
