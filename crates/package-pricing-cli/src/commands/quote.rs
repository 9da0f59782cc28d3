use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use package_pricing_core::quote;
use package_pricing_core::{FeeSchedules, QuoteInput, TransactionVolume};

use crate::input;

/// Client figures, from a JSON request or from flags
#[derive(Args)]
pub struct ClientArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Projected annual turnover
    #[arg(long)]
    pub turnover: Option<Decimal>,

    /// Sales invoices per month (standard business model)
    #[arg(long, conflicts_with = "monthly_payouts")]
    pub monthly_sales: Option<u64>,

    /// Platform payouts per month (consolidated-payout business model)
    #[arg(long)]
    pub monthly_payouts: Option<u64>,

    /// Expense items per month
    #[arg(long, default_value_t = 0)]
    pub monthly_expenses: u64,

    /// Annual entry count, when already known
    #[arg(long, conflicts_with_all = ["monthly_sales", "monthly_payouts"])]
    pub annual_entries: Option<u64>,
}

impl ClientArgs {
    fn volume(&self) -> Option<TransactionVolume> {
        if let Some(annual_entries) = self.annual_entries {
            return Some(TransactionVolume::Annual { annual_entries });
        }
        if let Some(monthly_sales) = self.monthly_sales {
            return Some(TransactionVolume::Standard {
                monthly_sales,
                monthly_expenses: self.monthly_expenses,
            });
        }
        self.monthly_payouts
            .map(|monthly_payouts| TransactionVolume::ConsolidatedPayout {
                monthly_payouts,
                monthly_expenses: self.monthly_expenses,
            })
    }

    /// Input file first, then flags, then piped stdin.
    fn into_request(self) -> Result<QuoteInput, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_json(path);
        }
        if let Some(turnover) = self.turnover {
            let volume = self.volume().ok_or(
                "one of --monthly-sales, --monthly-payouts or --annual-entries is required",
            )?;
            return Ok(QuoteInput { turnover, volume });
        }
        if let Some(request) = input::stdin::read_request()? {
            return Ok(request);
        }
        Err("--input <file.json>, --turnover with a volume flag, or stdin required".into())
    }
}

pub fn run_quote(
    args: ClientArgs,
    schedules: &FeeSchedules,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = args.into_request()?;
    let result = quote::evaluate_quote(schedules, &request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_bronze(
    args: ClientArgs,
    schedules: &FeeSchedules,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = args.into_request()?;
    let result = quote::quote_bronze(schedules, &request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_silver(
    args: ClientArgs,
    schedules: &FeeSchedules,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = args.into_request()?;
    let result = quote::quote_silver(schedules, &request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_gold(
    args: ClientArgs,
    schedules: &FeeSchedules,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = args.into_request()?;
    let result = quote::quote_gold(schedules, &request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_platinum(
    args: ClientArgs,
    schedules: &FeeSchedules,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = args.into_request()?;
    let result = quote::quote_platinum(schedules, &request)?;
    Ok(serde_json::to_value(result)?)
}
