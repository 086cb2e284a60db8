//! Query Resolver - maps a typed question to a canned response
//!
//! Resolution order, first match wins:
//! 1. Exact match against the predefined questions (lowercased, trimmed)
//! 2. Ordered keyword rules
//! 3. The "unknown query" message

use crate::facts::FactTable;
use crate::responses::Reply;
use std::collections::HashMap;
use tracing::debug;

/// Predefined questions, already normalized
pub const PREDEFINED_QUERIES: [(&str, Reply); 6] = [
    ("what is the total revenue?", Reply::TotalRevenue),
    ("which company has the highest revenue?", Reply::HighestRevenue),
    ("what is tesla's growth rate?", Reply::TeslaGrowth),
    ("how has microsoft's net income changed?", Reply::MicrosoftIncomeChange),
    ("compare revenue across companies", Reply::CompareRevenues),
    ("what is apple's recent performance?", Reply::ApplePerformance),
];

/// Keyword rule: every clause needs at least one of its keywords present
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub clauses: &'static [&'static [&'static str]],
    pub reply: Reply,
}

impl KeywordRule {
    pub fn matches(&self, normalized: &str) -> bool {
        self.clauses
            .iter()
            .all(|any_of| any_of.iter().any(|kw| normalized.contains(kw)))
    }
}

const FALLBACK_RULES: [KeywordRule; 7] = [
    KeywordRule {
        clauses: &[&["revenue"], &["total", "combined"]],
        reply: Reply::TotalRevenue,
    },
    KeywordRule {
        clauses: &[&["highest"], &["revenue"]],
        reply: Reply::HighestRevenue,
    },
    KeywordRule {
        clauses: &[&["tesla"], &["growth"]],
        reply: Reply::TeslaGrowth,
    },
    KeywordRule {
        clauses: &[&["microsoft"], &["income", "profit"]],
        reply: Reply::MicrosoftIncomeChange,
    },
    KeywordRule {
        clauses: &[&["compare"], &["revenue"]],
        reply: Reply::CompareRevenues,
    },
    KeywordRule {
        clauses: &[&["apple"], &["performance"]],
        reply: Reply::ApplePerformance,
    },
    KeywordRule {
        clauses: &[&["help", "commands"]],
        reply: Reply::Help,
    },
];

/// How a query was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Direct(Reply),
    /// Index into the fallback rule list
    Rule(usize, Reply),
    Default,
}

impl Resolution {
    pub fn reply(&self) -> Reply {
        match *self {
            Resolution::Direct(reply) | Resolution::Rule(_, reply) => reply,
            Resolution::Default => Reply::Unknown,
        }
    }
}

pub struct QueryResolver {
    facts: FactTable,
    queries: HashMap<&'static str, Reply>,
    rules: Vec<KeywordRule>,
}

impl QueryResolver {
    pub fn new() -> Self {
        Self {
            facts: FactTable::new(),
            queries: PREDEFINED_QUERIES.iter().copied().collect(),
            rules: FALLBACK_RULES.to_vec(),
        }
    }

    pub fn facts(&self) -> &FactTable {
        &self.facts
    }

    /// Lowercase and trim. Inner whitespace is left alone.
    pub fn normalize(raw: &str) -> String {
        raw.to_lowercase().trim().to_string()
    }

    pub fn classify(&self, raw: &str) -> Resolution {
        let normalized = Self::normalize(raw);

        if let Some(&reply) = self.queries.get(normalized.as_str()) {
            return Resolution::Direct(reply);
        }

        self.rules
            .iter()
            .position(|rule| rule.matches(&normalized))
            .map(|idx| Resolution::Rule(idx, self.rules[idx].reply))
            .unwrap_or(Resolution::Default)
    }

    /// Answer a question. Never fails; unmatched input gets the unknown-query message.
    pub fn resolve(&self, raw: &str) -> String {
        let resolution = self.classify(raw);
        debug!("Resolved {:?} as {:?}", raw, resolution);
        resolution.reply().render(&self.facts)
    }

    pub fn help(&self) -> String {
        Reply::Help.render(&self.facts)
    }
}

impl Default for QueryResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_inner_spaces() {
        assert_eq!(QueryResolver::normalize("  TESLA   growth  "), "tesla   growth");
        assert_eq!(QueryResolver::normalize("\tHelp\n"), "help");
    }

    #[test]
    fn test_direct_match_short_circuits_rules() {
        let resolver = QueryResolver::new();
        // Also satisfies the "highest" + "revenue" rule
        assert_eq!(
            resolver.classify("Which company has the highest revenue?"),
            Resolution::Direct(Reply::HighestRevenue)
        );
        // Also satisfies the "revenue" + "total" rule
        assert_eq!(
            resolver.classify("  WHAT IS THE TOTAL REVENUE?  "),
            Resolution::Direct(Reply::TotalRevenue)
        );
    }

    #[test]
    fn test_extra_inner_space_falls_through_to_rules() {
        let resolver = QueryResolver::new();
        assert_eq!(
            resolver.classify("what is tesla's  growth rate?"),
            Resolution::Rule(2, Reply::TeslaGrowth)
        );
    }

    #[test]
    fn test_rule_order() {
        let resolver = QueryResolver::new();
        // "total revenue" wins over "highest revenue"
        assert_eq!(
            resolver.classify("highest total revenue"),
            Resolution::Rule(0, Reply::TotalRevenue)
        );
        assert_eq!(
            resolver.classify("compare tesla growth and revenue"),
            Resolution::Rule(2, Reply::TeslaGrowth)
        );
        assert_eq!(
            resolver.classify("microsoft profit"),
            Resolution::Rule(3, Reply::MicrosoftIncomeChange)
        );
        assert_eq!(
            resolver.classify("apple performance, help"),
            Resolution::Rule(5, Reply::ApplePerformance)
        );
        assert_eq!(resolver.classify("commands"), Resolution::Rule(6, Reply::Help));
    }

    #[test]
    fn test_bare_total_is_unknown() {
        let resolver = QueryResolver::new();
        assert_eq!(resolver.classify("total"), Resolution::Default);
        assert_eq!(resolver.classify("What is Google's revenue?"), Resolution::Default);
    }

    #[test]
    fn test_empty_input_does_not_panic() {
        let resolver = QueryResolver::new();
        assert_eq!(resolver.resolve(""), crate::responses::UNKNOWN);
        assert_eq!(resolver.resolve("   "), crate::responses::UNKNOWN);
    }
}
