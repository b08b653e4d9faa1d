//! Best-effort recovery of quantities the completion service dropped.
//!
//! For each ingredient whose quantity is empty or a placeholder, the original
//! recipe text is searched for the ingredient name and the amount written in
//! front of it. Recovery never fails: an ingredient either gains a quantity or
//! comes back unchanged.

mod rules;

use crate::lexicon::{self, fold_diacritics, Lexicon};
use crate::model::ParsedIngredient;
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use rules::{name_pattern, with_name, QuantityRule, RULES};

lazy_static! {
    /// Every rule filled in for every shipped lexicon, name slot still open.
    static ref TEMPLATES: Vec<(&'static str, &'static Lexicon, Option<String>)> = RULES
        .iter()
        .flat_map(|rule| {
            lexicon::ALL
                .iter()
                .map(move |lexicon| (rule.name, *lexicon, rule.pattern(lexicon)))
        })
        .collect();
}

fn template(rule: &QuantityRule, lexicon: &'static Lexicon) -> Option<String> {
    TEMPLATES
        .iter()
        .find(|(name, cached, _)| *name == rule.name && std::ptr::eq(*cached, lexicon))
        .map_or_else(|| rule.pattern(lexicon), |(_, _, pattern)| pattern.clone())
}

/// Quantities that carry no information and trigger recovery.
pub const PLACEHOLDER_QUANTITIES: &[&str] = &["not specified", "sufficient", "to taste"];

/// True when a quantity is empty or one of [`PLACEHOLDER_QUANTITIES`].
pub fn needs_repair(quantity: &str) -> bool {
    let quantity = quantity.trim();
    quantity.is_empty()
        || PLACEHOLDER_QUANTITIES
            .iter()
            .any(|placeholder| quantity.eq_ignore_ascii_case(placeholder))
}

/// Regex cascade over one or more lexicons, tried in the given order.
#[derive(Debug, Clone)]
pub struct QuantityRecovery {
    lexicons: Vec<&'static Lexicon>,
}

impl Default for QuantityRecovery {
    fn default() -> Self {
        QuantityRecovery {
            lexicons: lexicon::ALL.to_vec(),
        }
    }
}

impl QuantityRecovery {
    pub fn new(lexicons: Vec<&'static Lexicon>) -> Self {
        QuantityRecovery { lexicons }
    }

    /// Build from language codes, ignoring codes with no lexicon.
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Self {
        let lexicons: Vec<&'static Lexicon> = codes
            .iter()
            .filter_map(|code| {
                let found = Lexicon::for_code(code.as_ref());
                if found.is_none() {
                    warn!("No lexicon for language '{}', skipping", code.as_ref());
                }
                found
            })
            .collect();

        if lexicons.is_empty() {
            Self::default()
        } else {
            Self::new(lexicons)
        }
    }

    pub fn lexicons(&self) -> &[&'static Lexicon] {
        &self.lexicons
    }

    /// Copy with the lexicon for `code` moved to the front, if present.
    pub fn prioritized(&self, code: &str) -> Self {
        let mut lexicons = self.lexicons.clone();
        if let Some(pos) = lexicons.iter().position(|l| l.code == code) {
            let preferred = lexicons.remove(pos);
            lexicons.insert(0, preferred);
        }
        QuantityRecovery { lexicons }
    }

    /// Fill in missing quantities from `original_text`.
    ///
    /// Ingredients that already hold a real quantity are returned as-is, and
    /// only the `quantity` field of the others is ever replaced.
    pub fn recover(
        &self,
        original_text: &str,
        ingredients: &[ParsedIngredient],
    ) -> Vec<ParsedIngredient> {
        let text = fold_diacritics(original_text);

        ingredients
            .iter()
            .map(|ingredient| {
                if !needs_repair(&ingredient.quantity) {
                    return ingredient.clone();
                }

                debug!("Looking for a quantity for '{}'", ingredient.clean_name);
                match self.find_quantity(&text, &ingredient.clean_name) {
                    Some(quantity) => {
                        info!(
                            "Recovered quantity for {}: \"{}\" -> \"{}\"",
                            ingredient.clean_name, ingredient.quantity, quantity
                        );
                        ParsedIngredient {
                            quantity,
                            ..ingredient.clone()
                        }
                    }
                    None => {
                        warn!("No quantity found for {}", ingredient.clean_name);
                        ingredient.clone()
                    }
                }
            })
            .collect()
    }

    /// Search `text` for the amount written with `clean_name`.
    ///
    /// Only names that occur in `text` at all get the full cascade, which is
    /// compiled per name since every rule anchors on it.
    pub fn find_quantity(&self, text: &str, clean_name: &str) -> Option<String> {
        let text = fold_diacritics(text);
        let name = fold_diacritics(clean_name.trim());
        if name.is_empty() {
            return None;
        }
        let name = name_pattern(&name);

        match Regex::new(&format!("(?i){}", name)) {
            Ok(re) if !re.is_match(&text) => return None,
            Ok(_) => {}
            Err(e) => {
                warn!("Cannot search for '{}': {}", clean_name, e);
                return None;
            }
        }

        for rule in RULES {
            for lexicon in &self.lexicons {
                let Some(pattern) = template(rule, *lexicon) else {
                    continue;
                };
                let re = match Regex::new(&with_name(&pattern, &name)) {
                    Ok(re) => re,
                    Err(e) => {
                        warn!("Skipping rule {} for {}: {}", rule.name, lexicon.code, e);
                        continue;
                    }
                };

                if let Some(caps) = re.captures(&text) {
                    debug!(
                        "Rule {} ({}) matched \"{}\"",
                        rule.name,
                        lexicon.code,
                        caps.get(0).map_or("", |m| m.as_str().trim())
                    );
                    if let Some(quantity) = rule.extract(&caps, lexicon) {
                        return Some(quantity);
                    }
                }
            }
        }

        None
    }
}

/// Recover quantities using every shipped lexicon.
pub fn recover_quantities(
    original_text: &str,
    ingredients: &[ParsedIngredient],
) -> Vec<ParsedIngredient> {
    QuantityRecovery::default().recover(original_text, ingredients)
}
