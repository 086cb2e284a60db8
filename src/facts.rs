//! Static financial figures the chatbot answers from.
//!
//! All amounts are in millions of US dollars, taken from the companies' 10-K filings.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Company {
    Microsoft,
    Tesla,
    Apple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearFigures {
    pub revenue: i64,
    /// Absent where the filing analysis did not extract it
    pub net_income: Option<i64>,
}

/// The one precomputed growth percentage stored per company
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthMetric {
    /// Year-over-year revenue growth, 2023 to 2024
    GrowthRate(f64),
    /// Compound annual growth rate, 2021 to 2023
    Cagr(f64),
    /// Revenue growth in fiscal 2024
    Growth2024(f64),
}

impl GrowthMetric {
    pub fn percent(&self) -> f64 {
        match *self {
            GrowthMetric::GrowthRate(p) | GrowthMetric::Cagr(p) | GrowthMetric::Growth2024(p) => p,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompanyFacts {
    pub years: HashMap<String, YearFigures>,
    pub growth: GrowthMetric,
}

impl CompanyFacts {
    fn new(growth: GrowthMetric, years: &[(&str, i64, Option<i64>)]) -> Self {
        let years = years
            .iter()
            .map(|&(year, revenue, net_income)| {
                (year.to_string(), YearFigures { revenue, net_income })
            })
            .collect();
        Self { years, growth }
    }

    /// Most recent fiscal year on record
    pub fn latest_year(&self) -> Option<&str> {
        self.years.keys().max().map(|y| y.as_str())
    }
}

/// Immutable per-company figures, built once when a resolver is constructed
#[derive(Debug, Clone)]
pub struct FactTable {
    companies: HashMap<Company, CompanyFacts>,
}

impl FactTable {
    pub fn new() -> Self {
        let mut companies = HashMap::new();
        companies.insert(
            Company::Microsoft,
            CompanyFacts::new(
                GrowthMetric::GrowthRate(15.7),
                &[("2024", 245122, Some(88136)), ("2023", 211915, Some(72361))],
            ),
        );
        companies.insert(
            Company::Tesla,
            CompanyFacts::new(
                GrowthMetric::Cagr(34.0),
                &[
                    ("2023", 96773, None),
                    ("2022", 81462, Some(12556)),
                    ("2021", 53823, Some(5524)),
                ],
            ),
        );
        companies.insert(
            Company::Apple,
            CompanyFacts::new(
                GrowthMetric::Growth2024(2.0),
                &[
                    ("2024", 391035, None),
                    ("2023", 383285, None),
                    ("2022", 394328, None),
                ],
            ),
        );
        Self { companies }
    }

    pub fn company(&self, company: Company) -> Option<&CompanyFacts> {
        self.companies.get(&company)
    }

    pub fn figures(&self, company: Company, year: &str) -> Option<&YearFigures> {
        self.company(company)?.years.get(year)
    }

    pub fn revenue(&self, company: Company, year: &str) -> Option<i64> {
        self.figures(company, year).map(|f| f.revenue)
    }

    pub fn net_income(&self, company: Company, year: &str) -> Option<i64> {
        self.figures(company, year)?.net_income
    }

    pub fn growth(&self, company: Company) -> Option<GrowthMetric> {
        self.company(company).map(|c| c.growth)
    }
}

impl Default for FactTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_company_is_seeded() {
        let facts = FactTable::new();
        for company in [Company::Microsoft, Company::Tesla, Company::Apple] {
            assert!(facts.company(company).is_some(), "missing {:?}", company);
        }
    }

    #[test]
    fn test_latest_years() {
        let facts = FactTable::new();
        assert_eq!(facts.company(Company::Microsoft).unwrap().latest_year(), Some("2024"));
        assert_eq!(facts.company(Company::Tesla).unwrap().latest_year(), Some("2023"));
        assert_eq!(facts.company(Company::Apple).unwrap().latest_year(), Some("2024"));
    }

    #[test]
    fn test_absent_net_income() {
        let facts = FactTable::new();
        assert_eq!(facts.net_income(Company::Tesla, "2023"), None);
        assert_eq!(facts.net_income(Company::Tesla, "2022"), Some(12556));
        assert_eq!(facts.net_income(Company::Apple, "2024"), None);
        assert_eq!(facts.revenue(Company::Apple, "1999"), None);
    }

    #[test]
    fn test_growth_metrics() {
        let facts = FactTable::new();
        assert_eq!(facts.growth(Company::Microsoft), Some(GrowthMetric::GrowthRate(15.7)));
        assert_eq!(facts.growth(Company::Tesla).map(|g| g.percent()), Some(34.0));
        assert_eq!(facts.growth(Company::Apple), Some(GrowthMetric::Growth2024(2.0)));
    }
}
