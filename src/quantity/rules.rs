//! Ordered pattern table for locating a quantity next to an ingredient name.
//!
//! Templates use `{placeholder}` slots that are filled from a [`Lexicon`] and
//! the escaped ingredient name before compiling. A rule whose slots need a
//! table the lexicon leaves empty is skipped for that language.

use crate::lexicon::Lexicon;
use regex::Captures;

// Separators are spaces or tabs only, so a match never spans two lines.

/// Start of text or a character that cannot continue a number or word.
const PRE: &str = r"(?:^|[^\p{L}\p{N}/.,])";
/// "2", "1.5", "2 1/4", "1 ½", "1/2", "½"
const AMOUNT: &str = r"(?:\d+(?:[.,]\d+)?(?:[ \t]+\d+/\d+|[ \t]*[½¼¾⅓⅔])?|\d+/\d+|[½¼¾⅓⅔])";
/// Up to two descriptive words between the unit and the name ("all-purpose")
const GAP: &str = r"(?:[\p{L}'’-]+[ \t]+){0,2}?";

pub(crate) struct QuantityRule {
    pub name: &'static str,
    template: &'static str,
    extract: fn(&Captures, &Lexicon) -> Option<String>,
}

/// Most specific first; the first rule that matches and extracts wins.
pub(crate) static RULES: &[QuantityRule] = &[
    QuantityRule {
        name: "fractional_metric",
        template: r"{pre}(?P<int>\d+)?[ \t]*(?P<vulgar>[½¼¾])[ \t]*(?P<unit>{metric})[ \t]+(?:{link}[ \t]+)?{gap}{name}",
        extract: fractional_metric,
    },
    QuantityRule {
        name: "metric",
        template: r"{pre}(?P<amount>\d+(?:[.,]\d+)?(?:[ \t]*-[ \t]*\d+(?:[.,]\d+)?)?)[ \t]*(?P<unit>{metric})[ \t]+(?:{link}[ \t]+)?{gap}{name}",
        extract: metric,
    },
    QuantityRule {
        name: "volume_range",
        template: r"{pre}(?P<low>\d+|{numword})(?:[ \t]*[-–][ \t]*|[ \t]+)(?P<high>\d+|{numword})[ \t]*(?P<unit>{volume})[ \t]+(?:{link}[ \t]+)?{gap}{name}",
        extract: volume_range,
    },
    QuantityRule {
        name: "volume",
        template: r"{pre}(?P<amount>{amount}|{numword})[ \t]*(?P<unit>{volume})[ \t]+(?:{link}[ \t]+)?{gap}{name}",
        extract: amount_with_unit,
    },
    QuantityRule {
        name: "count",
        template: r"{pre}(?P<amount>{amount})[ \t]+{name}",
        extract: amount_only,
    },
    QuantityRule {
        name: "number_word",
        template: r"{pre}(?P<amount>{numword})[ \t]+{name}",
        extract: amount_only,
    },
    QuantityRule {
        name: "fraction_word",
        template: r"{pre}(?P<fraction>{fraction})[ \t]+(?:{link}[ \t]+)?{name}",
        extract: fraction_word,
    },
    QuantityRule {
        name: "count_unit",
        template: r"{pre}(?P<amount>\d+|{numword})[ \t]+(?P<unit>{count})[ \t]+(?:{link}[ \t]+)?{gap}{name}",
        extract: amount_with_unit,
    },
    QuantityRule {
        name: "qualified",
        template: r"{pre}(?P<amount>{amount}|{numword})[ \t]+(?:(?P<size>{size})[ \t]+)?{name}(?:[ \t]+\p{L}+)?",
        extract: qualified,
    },
    QuantityRule {
        name: "leading_digits",
        template: r"{pre}(?P<digits>\d+)[^\n\d]{0,30}?{name}",
        extract: leading_digits,
    },
];

impl QuantityRule {
    /// Fill the template for one lexicon, leaving the `{name}` slot open.
    ///
    /// Returns `None` when the lexicon has no words for a slot the template
    /// uses, since an empty alternation would match anything.
    pub fn pattern(&self, lexicon: &Lexicon) -> Option<String> {
        let mut pattern = self
            .template
            .replace("{pre}", PRE)
            .replace("{amount}", AMOUNT)
            .replace("{gap}", GAP);

        let slots: [(&str, Vec<&str>); 7] = [
            ("{metric}", keys(lexicon.metric_units)),
            ("{volume}", keys(lexicon.volume_units)),
            ("{count}", keys(lexicon.count_units)),
            ("{numword}", keys(lexicon.numbers)),
            ("{fraction}", keys(lexicon.fractions)),
            ("{link}", lexicon.links.to_vec()),
            ("{size}", lexicon.size_words.to_vec()),
        ];

        for (slot, words) in slots {
            if !pattern.contains(slot) {
                continue;
            }
            if words.is_empty() {
                return None;
            }
            pattern = pattern.replace(slot, &alternation(&words));
        }

        Some(format!("(?i){}", pattern))
    }

    pub fn extract(&self, caps: &Captures, lexicon: &Lexicon) -> Option<String> {
        (self.extract)(caps, lexicon)
    }
}

/// Put an escaped ingredient name into a filled template.
pub(crate) fn with_name(pattern: &str, name_pattern: &str) -> String {
    pattern.replace("{name}", name_pattern)
}

/// Regex for a name, literal except that any run of spaces or tabs matches
/// any other run.
pub(crate) fn name_pattern(name: &str) -> String {
    name.split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"[ \t]+")
}

fn keys(table: &[(&'static str, &'static str)]) -> Vec<&'static str> {
    table.iter().map(|(word, _)| *word).collect()
}

// Longest first, so "lingurițe" is not cut short to "linguri" and
// "o jumătate" wins over "o".
fn alternation(words: &[&str]) -> String {
    let mut words = words.to_vec();
    words.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    let parts: Vec<String> = words.iter().map(|w| name_pattern(w)).collect();
    format!("(?:{})", parts.join("|"))
}

fn vulgar_decimal(c: &str) -> Option<&'static str> {
    match c {
        "½" => Some(".5"),
        "¼" => Some(".25"),
        "¾" => Some(".75"),
        _ => None,
    }
}

fn vulgar_fraction(c: char) -> Option<&'static str> {
    match c {
        '½' => Some("1/2"),
        '¼' => Some("1/4"),
        '¾' => Some("3/4"),
        '⅓' => Some("1/3"),
        '⅔' => Some("2/3"),
        _ => None,
    }
}

/// "1 ½" -> "1 1/2", "½" -> "1/2"; number words become digits.
fn normalize_amount(raw: &str, lexicon: &Lexicon) -> Option<String> {
    let raw = raw.trim();
    if let Some(digits) = lexicon.number(raw) {
        return Some(digits.to_string());
    }

    let mut out = String::new();
    for c in raw.chars() {
        match vulgar_fraction(c) {
            Some(fraction) => {
                let trimmed = out.trim_end().len();
                out.truncate(trimmed);
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(fraction);
            }
            None if c.is_whitespace() => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            None => out.push(c),
        }
    }

    let out = out.trim().to_string();
    if out.chars().any(|c| c.is_ascii_digit()) {
        Some(out)
    } else {
        None
    }
}

fn unit_text(caps: &Captures) -> Option<String> {
    caps.name("unit")
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
}

fn fractional_metric(caps: &Captures, lexicon: &Lexicon) -> Option<String> {
    let whole = caps.name("int").map_or("0", |m| m.as_str());
    let decimal = vulgar_decimal(caps.name("vulgar")?.as_str())?;
    let unit = lexicon.unit(caps.name("unit")?.as_str())?;
    Some(format!("{}{}{}", whole, decimal, unit))
}

fn metric(caps: &Captures, lexicon: &Lexicon) -> Option<String> {
    let amount: String = caps
        .name("amount")?
        .as_str()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let unit = lexicon.unit(caps.name("unit")?.as_str())?;
    Some(format!("{}{}", amount, unit))
}

fn volume_range(caps: &Captures, lexicon: &Lexicon) -> Option<String> {
    let low = lexicon.number_or_digits(caps.name("low")?.as_str())?;
    let high = lexicon.number_or_digits(caps.name("high")?.as_str())?;
    Some(format!("{}-{} {}", low, high, unit_text(caps)?))
}

fn amount_with_unit(caps: &Captures, lexicon: &Lexicon) -> Option<String> {
    let amount = normalize_amount(caps.name("amount")?.as_str(), lexicon)?;
    Some(format!("{} {}", amount, unit_text(caps)?))
}

fn amount_only(caps: &Captures, lexicon: &Lexicon) -> Option<String> {
    normalize_amount(caps.name("amount")?.as_str(), lexicon)
}

fn fraction_word(caps: &Captures, lexicon: &Lexicon) -> Option<String> {
    lexicon
        .fraction(caps.name("fraction")?.as_str())
        .map(str::to_string)
}

fn qualified(caps: &Captures, lexicon: &Lexicon) -> Option<String> {
    let amount = normalize_amount(caps.name("amount")?.as_str(), lexicon)?;
    match caps.name("size") {
        Some(size) => Some(format!("{} {}", amount, size.as_str().to_lowercase())),
        None => Some(amount),
    }
}

fn leading_digits(caps: &Captures, _lexicon: &Lexicon) -> Option<String> {
    caps.name("digits").map(|m| m.as_str().to_string())
}
