//! Free-text message to [`ParsedTransaction`].
//!
//! The extractor is a pure function of `(text, catalog)`: it keeps no state
//! between calls, so one instance can be shared by every request.
//!
//! Extraction never fails. Missing pieces resolve to fallbacks instead:
//!
//! - no amount => `0.00`
//! - no income marker => [`Direction::Expense`]
//! - nothing left of the description => the configured placeholder
//! - no keyword => the configured fallback category, then the expense fallback
//!
//! Validating the result (e.g. rejecting a `0.00` expense) is the caller's job.

use regex::Regex;

use crate::{
    Amount, CategoryLookup, Direction, ExtractorRules, ParsedTransaction, ResultEngine,
    categories::name_key,
};

/// Optional currency marker (`$`, `r$`) followed by digits with at most one
/// `,`/`.` separator.
///
/// `1.234,56` therefore captures `1.234`: thousands separators are not
/// understood.
pub const AMOUNT_PATTERN: &str = r"(?:r?\$)?\s?([0-9]+[,.]?[0-9]*)";

#[derive(Debug, Clone)]
pub struct Extractor {
    rules: ExtractorRules,
    amount: Regex,
    stop_words: Option<Regex>,
    keywords: Vec<(String, String)>,
    income_markers: Vec<String>,
}

impl Extractor {
    /// Return a builder for `Extractor`.
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::default()
    }

    fn new(rules: ExtractorRules) -> ResultEngine<Self> {
        rules.validate()?;

        let amount = Regex::new(AMOUNT_PATTERN)?;
        let stop_words = if rules.stop_words.is_empty() {
            None
        } else {
            let alternation = rules
                .stop_words
                .iter()
                .map(|word| regex::escape(&fold(word.trim())))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"\b(?:{alternation})\b"))?)
        };
        let keywords = rules
            .keywords
            .iter()
            .map(|rule| (fold(&rule.keyword), rule.category.clone()))
            .collect();
        let income_markers = rules.income_markers.iter().map(|m| fold(m)).collect();

        Ok(Self {
            rules,
            amount,
            stop_words,
            keywords,
            income_markers,
        })
    }

    pub fn rules(&self) -> &ExtractorRules {
        &self.rules
    }

    /// Turns a message into a transaction guess.
    ///
    /// Accepts any string, including the empty one.
    pub fn extract<L>(&self, text: &str, catalog: &L) -> ParsedTransaction
    where
        L: CategoryLookup + ?Sized,
    {
        let lowered = fold(text);

        let (amount, amount_text) = self.amount(&lowered);
        let direction = self.direction(&lowered);
        let description = self.description(&lowered, amount_text);
        let category_name = self.category(&lowered, direction, catalog);

        ParsedTransaction {
            amount,
            description,
            direction,
            category_name,
        }
    }

    /// First amount in reading order and the text it was read from.
    fn amount<'t>(&self, lowered: &'t str) -> (Amount, Option<&'t str>) {
        let Some(captures) = self.amount.captures(lowered) else {
            return (Amount::zero(), None);
        };
        let (Some(whole), Some(digits)) = (captures.get(0), captures.get(1)) else {
            return (Amount::zero(), None);
        };
        let amount = Amount::from_captured(digits.as_str()).unwrap_or_default();
        (amount, Some(whole.as_str()))
    }

    fn direction(&self, lowered: &str) -> Direction {
        if self
            .income_markers
            .iter()
            .any(|marker| lowered.contains(marker.as_str()))
        {
            Direction::Income
        } else {
            Direction::Expense
        }
    }

    /// Every occurrence of the amount text is dropped, not only the one the
    /// amount was read from.
    fn description(&self, lowered: &str, amount_text: Option<&str>) -> String {
        let without_amount = match amount_text {
            Some(matched) => lowered.replace(matched, ""),
            None => lowered.to_string(),
        };

        let without_stop_words = match &self.stop_words {
            Some(re) => re.replace_all(&without_amount, "").into_owned(),
            None => without_amount,
        };

        let collapsed = without_stop_words
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if collapsed.is_empty() {
            return self.rules.placeholder.clone();
        }
        title_case(&collapsed)
    }

    fn category<L>(&self, lowered: &str, direction: Direction, catalog: &L) -> Option<String>
    where
        L: CategoryLookup + ?Sized,
    {
        let label = self
            .keywords
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword.as_str()))
            .map_or(self.rules.fallback_category.as_str(), |(_, label)| {
                label.as_str()
            });

        if let Some(category) = catalog.find_by_name(label) {
            return Some(category.name);
        }
        if direction == Direction::Expense && !self.rules.expense_fallback_category.is_empty() {
            return catalog
                .find_by_name(&self.rules.expense_fallback_category)
                .map(|category| category.name);
        }
        None
    }
}

/// NFC + lower case, the form every table and message is compared in.
fn fold(text: &str) -> String {
    name_key(text)
}

/// Upper-cases every letter that follows a non-letter.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.push(ch);
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

#[derive(Default, Debug)]
pub struct ExtractorBuilder {
    rules: Option<ExtractorRules>,
}

impl ExtractorBuilder {
    pub fn rules(mut self, rules: ExtractorRules) -> ExtractorBuilder {
        self.rules = Some(rules);
        self
    }

    pub fn build(self) -> ResultEngine<Extractor> {
        Extractor::new(self.rules.unwrap_or_default())
    }
}
