//! Canned responses rendered from the fact table.

use crate::facts::{Company, FactTable};

const HIGHEST_REVENUE: &str = "Apple has the highest revenue at $391,035M in fiscal 2024, followed by Microsoft at $245,122M (2024), and Tesla at $96,773M (2023).";

const COMPARE_REVENUES: &str = concat!(
    "Revenue Comparison (Latest Available Year):\n",
    "        1. Apple (2024): $391,035M - Market leader with largest revenue base\n",
    "        2. Microsoft (2024): $245,122M - Strong enterprise and cloud growth\n",
    "        3. Tesla (2023): $96,773M - Fastest growing but smallest of the three\n",
    "\n",
    "        Growth Patterns: Tesla shows highest growth rate (~34% CAGR), Microsoft shows steady growth (15.7% YoY), Apple shows modest recovery (2.0% growth in 2024).",
);

const APPLE_PERFORMANCE: &str = "Apple's recent performance shows recovery with 2.0% revenue growth in 2024 ($391,035M) after a decline in 2023. Despite slower growth compared to competitors, Apple maintains the largest revenue base among the three tech giants.";

pub const HELP: &str = concat!(
    "Available Financial Queries:\n",
    "        1. 'What is the total revenue?' - Get combined revenue figures\n",
    "        2. 'Which company has the highest revenue?' - Revenue leader identification\n",
    "        3. 'What is Tesla's growth rate?' - Tesla's growth analysis\n",
    "        4. 'How has Microsoft's net income changed?' - Microsoft profitability trends\n",
    "        5. 'Compare revenue across companies' - Cross-company revenue comparison\n",
    "        6. 'What is Apple's recent performance?' - Apple's recent financial performance\n",
    "\n",
    "        You can also use partial phrases like 'Tesla growth' or 'Microsoft income'.",
);

pub const UNKNOWN: &str = concat!(
    "Sorry, I can only provide information on predefined queries. Try asking:\n",
    "            - 'What is the total revenue?'\n",
    "            - 'Which company has the highest revenue?'\n",
    "            - 'What is Tesla's growth rate?'\n",
    "            - 'How has Microsoft's net income changed?'\n",
    "            - 'Compare revenue across companies'\n",
    "            - 'What is Apple's recent performance?'\n",
    "            - 'Help' for this message",
);

/// Which fixed answer a query resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    TotalRevenue,
    HighestRevenue,
    TeslaGrowth,
    MicrosoftIncomeChange,
    CompareRevenues,
    ApplePerformance,
    Help,
    Unknown,
}

impl Reply {
    /// Render the response text. Identical on every call for the same table.
    pub fn render(&self, facts: &FactTable) -> String {
        let rendered = match self {
            Reply::TotalRevenue => total_revenue(facts),
            Reply::HighestRevenue => Some(HIGHEST_REVENUE.to_string()),
            Reply::TeslaGrowth => tesla_growth(facts),
            Reply::MicrosoftIncomeChange => microsoft_income_change(facts),
            Reply::CompareRevenues => Some(COMPARE_REVENUES.to_string()),
            Reply::ApplePerformance => Some(APPLE_PERFORMANCE.to_string()),
            Reply::Help => Some(HELP.to_string()),
            Reply::Unknown => None,
        };
        rendered.unwrap_or_else(|| UNKNOWN.to_string())
    }
}

/// Format an amount in millions as `$1,234M`
pub fn format_millions(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}${}M", sign, grouped)
}

fn latest_revenue(facts: &FactTable, company: Company) -> Option<(String, i64)> {
    let year = facts.company(company)?.latest_year()?;
    Some((year.to_string(), facts.revenue(company, year)?))
}

fn total_revenue(facts: &FactTable) -> Option<String> {
    let (msft_year, msft) = latest_revenue(facts, Company::Microsoft)?;
    let (tsla_year, tsla) = latest_revenue(facts, Company::Tesla)?;
    let (aapl_year, aapl) = latest_revenue(facts, Company::Apple)?;
    let total = msft + tsla + aapl;

    Some(format!(
        "Total combined revenue: Microsoft ({}): {}, Tesla ({}): {}, Apple ({}): {}. Combined total: {}",
        msft_year,
        format_millions(msft),
        tsla_year,
        format_millions(tsla),
        aapl_year,
        format_millions(aapl),
        format_millions(total)
    ))
}

fn tesla_growth(facts: &FactTable) -> Option<String> {
    let cagr = facts.growth(Company::Tesla)?.percent();
    let start = facts.revenue(Company::Tesla, "2021")?;
    let end = facts.revenue(Company::Tesla, "2023")?;

    Some(format!(
        "Tesla demonstrates exceptional growth with a compound annual growth rate (CAGR) of approximately {:.1}% from 2021-2023, growing from {} to {} in revenue.",
        cagr,
        format_millions(start),
        format_millions(end)
    ))
}

fn microsoft_income_change(facts: &FactTable) -> Option<String> {
    let income_2024 = facts.net_income(Company::Microsoft, "2024")?;
    let income_2023 = facts.net_income(Company::Microsoft, "2023")?;
    // The stored 2023 figure is non-zero
    let change = (income_2024 - income_2023) as f64 / income_2023 as f64 * 100.0;

    Some(format!(
        "Microsoft's net income increased from {} in 2023 to {} in 2024, representing a {:.1}% increase.",
        format_millions(income_2023),
        format_millions(income_2024),
        change
    ))
}
