//! Configuration tables driving the extractor.
//!
//! The defaults are the Brazilian Portuguese tables the tracker ships with.
//! Every table can be replaced at startup (see the `[rules]` section of
//! `settings.toml`); the extractor never reads literals outside this module.

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// One entry of the keyword table: if `keyword` occurs anywhere in the
/// lower-cased message, the message belongs to `category`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub category: String,
}

impl KeywordRule {
    pub fn new(keyword: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            category: category.into(),
        }
    }
}

/// Tables used by [`Extractor`](crate::Extractor).
///
/// `keywords` is ordered: the first keyword found in the text wins, whatever
/// its position in the text, so reordering the table changes results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorRules {
    pub keywords: Vec<KeywordRule>,
    pub income_markers: Vec<String>,
    pub stop_words: Vec<String>,
    /// Description used when nothing is left after cleaning.
    pub placeholder: String,
    /// Label used when no keyword matches.
    pub fallback_category: String,
    /// Label looked up for expenses whose label is not in the catalog.
    pub expense_fallback_category: String,
}

impl Default for ExtractorRules {
    fn default() -> Self {
        let keywords = [
            ("comida", "Alimentação"),
            ("lanche", "Alimentação"),
            ("ifood", "Alimentação"),
            ("restaurante", "Alimentação"),
            ("mercado", "Alimentação"),
            ("uber", "Transporte"),
            ("gasolina", "Transporte"),
            ("ônibus", "Transporte"),
            ("transporte", "Transporte"),
            ("aluguel", "Moradia"),
            ("luz", "Moradia"),
            ("internet", "Moradia"),
            ("casa", "Moradia"),
            ("remedio", "Saúde"),
            ("remédio", "Saúde"),
            ("farmacia", "Saúde"),
            ("farmácia", "Saúde"),
            ("medico", "Saúde"),
            ("médico", "Saúde"),
            ("cinema", "Lazer"),
            ("jogo", "Lazer"),
            ("sair", "Lazer"),
            ("salario", "Salário"),
            ("salário", "Salário"),
            ("pagamento", "Salário"),
            ("freela", "Freelance"),
            ("projeto", "Freelance"),
        ]
        .into_iter()
        .map(|(keyword, category)| KeywordRule::new(keyword, category))
        .collect();

        Self {
            keywords,
            income_markers: to_strings(&[
                "recebi",
                "ganhei",
                "salário",
                "salario",
                "depósito",
                "deposito",
                "pix recebido",
            ]),
            stop_words: to_strings(&[
                "gastei", "paguei", "recebi", "ganhei", "no", "na", "com", "em", "de", "do", "da",
            ]),
            placeholder: "Nova Transação".to_string(),
            fallback_category: "Outros".to_string(),
            expense_fallback_category: "Compras".to_string(),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

impl ExtractorRules {
    /// Checks the tables can drive an extraction.
    pub fn validate(&self) -> ResultEngine<()> {
        if self.placeholder.trim().is_empty() {
            return Err(EngineError::InvalidRules(
                "placeholder must not be empty".to_string(),
            ));
        }
        if self.fallback_category.trim().is_empty() {
            return Err(EngineError::InvalidRules(
                "fallback_category must not be empty".to_string(),
            ));
        }
        if let Some(rule) = self
            .keywords
            .iter()
            .find(|rule| rule.keyword.trim().is_empty() || rule.category.trim().is_empty())
        {
            return Err(EngineError::InvalidRules(format!(
                "keyword rule {:?} -> {:?} has an empty side",
                rule.keyword, rule.category
            )));
        }
        if self.income_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(EngineError::InvalidRules(
                "income markers must not be empty".to_string(),
            ));
        }
        if let Some(word) = self
            .stop_words
            .iter()
            .find(|w| w.trim().is_empty() || w.split_whitespace().count() > 1)
        {
            return Err(EngineError::InvalidRules(format!(
                "stop word {word:?} must be a single word"
            )));
        }
        Ok(())
    }
}
