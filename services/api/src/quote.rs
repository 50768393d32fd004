use chrono::{DateTime, Utc};
use clap::Args;
use growfund::error::AppError;
use growfund::lending::{available_offers, submit_application, LoanOffer, LoanRequest, LoanTerms};
use growfund::members::{compute_score, SavingsFrequency};
use growfund::money::Naira;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Consecutive savings payments made
    #[arg(long)]
    pub(crate) streak: u32,
    /// Total naira saved so far
    #[arg(long)]
    pub(crate) total_saved: f64,
    /// Behavioral score (defaults to the score implied by streak and savings)
    #[arg(long)]
    pub(crate) score: Option<u16>,
    /// Savings plan frequency (weekly or monthly)
    #[arg(long)]
    pub(crate) frequency: Option<SavingsFrequency>,
    /// Loan product to price when an amount is given
    #[arg(long, default_value = "boost")]
    pub(crate) product: String,
    /// Requested loan amount in naira
    #[arg(long)]
    pub(crate) amount: Option<f64>,
    /// Repayment method (one-time, two-part, installmental)
    #[arg(long, default_value = "one-time")]
    pub(crate) method: String,
    /// Application date (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) on: Option<DateTime<Utc>>,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let score = args
        .score
        .unwrap_or_else(|| compute_score(args.streak, args.total_saved, 0));
    let offers = available_offers(args.streak, args.total_saved, score, args.frequency);

    println!(
        "Loan quote for streak {} | saved {} | score {}",
        args.streak,
        Naira(args.total_saved),
        score
    );
    render_offers(&offers);

    let Some(amount) = args.amount else {
        return Ok(());
    };

    let request = LoanRequest {
        loan_type: args.product,
        amount,
        repayment_method: args.method,
    };
    let applied_at = args.on.unwrap_or_else(Utc::now);
    match submit_application(&offers, &request, applied_at) {
        Ok(terms) => render_terms(&terms),
        Err(err) => println!("\nApplication rejected ({}): {}", err.kind().label(), err),
    }
    Ok(())
}

pub(crate) fn render_offers(offers: &[LoanOffer]) {
    if offers.is_empty() {
        println!("No loans unlocked yet. Keep saving to build your streak.");
        return;
    }

    for offer in offers {
        println!(
            "- {} (x{}): up to {}",
            offer.label,
            offer.multiplier,
            Naira(offer.max_amount)
        );
        for (method, fee) in &offer.fees {
            println!(
                "    {}: {}% fee ({}% effective annual)",
                method, fee.fee_percent, fee.effective_annual_rate
            );
        }
    }
}

pub(crate) fn render_terms(terms: &LoanTerms) {
    println!(
        "\n{} {} via {}: fee {} ({}%), total repayment {}",
        terms.product,
        Naira(terms.amount),
        terms.repayment_method,
        Naira(terms.fee),
        terms.fee_percent,
        Naira(terms.total_repayment)
    );
    for (index, installment) in terms.schedule.iter().enumerate() {
        println!(
            "  {}. {} due {}",
            index + 1,
            Naira(installment.amount),
            installment.due_date.format("%Y-%m-%d")
        );
    }
}
