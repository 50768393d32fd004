use crate::infra::{InMemoryLoanRepository, InMemoryMemberRepository, InMemoryTransactionLedger};
use crate::quote::render_offers;
use crate::routes::Services;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use growfund::dashboard::DashboardView;
use growfund::error::AppError;
use growfund::lending::{LoanRequest, LoanStatus, RepaymentMethod};
use growfund::members::{MemberProfile, SavingsFrequency};
use growfund::money::Naira;
use growfund::savings::{PaymentRequest, PlanRequest};
use growfund::tools::{InvoiceItem, InvoiceRequest};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Date of the first savings payment (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: Option<DateTime<Utc>>,
    /// Number of weekly payments to record before applying for a loan
    #[arg(long, default_value_t = 4)]
    pub(crate) weeks: u32,
    /// Weekly contribution in naira
    #[arg(long, default_value_t = 25_000.0)]
    pub(crate) contribution: f64,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        start,
        weeks,
        contribution,
    } = args;
    let start = start.unwrap_or_else(Utc::now);

    let services = Services::new(
        Arc::new(InMemoryMemberRepository::default()),
        Arc::new(InMemoryTransactionLedger::default()),
        Arc::new(InMemoryLoanRepository::default()),
        10,
    );

    println!("GrowFund savings-to-loan demo");
    let member = services.savings.open_account(
        MemberProfile {
            name: "Adaeze Nwosu".to_string(),
            phone: "+2348012345678".to_string(),
            email: Some("adaeze@nwosutailoring.ng".to_string()),
            business: Some("Nwosu Tailoring".to_string()),
        },
        start,
    )?;
    let id = member.member_id.clone();
    println!("- Opened account {} for {}", id, member.profile.name);

    let plan = services.savings.create_plan(
        &id,
        PlanRequest {
            frequency: SavingsFrequency::Weekly,
            amount: contribution,
        },
        start,
    )?;
    println!(
        "- Weekly plan of {} active, first payment due {}",
        Naira(plan.savings_plan.amount),
        plan.next_payment_date.format("%Y-%m-%d")
    );

    let mut paid_at = start;
    for week in 0..weeks {
        paid_at = start + Duration::weeks(i64::from(week));
        let receipt = services.savings.record_payment(
            &id,
            PaymentRequest {
                amount: contribution,
                payment_method: Some("bank_transfer".to_string()),
                transaction_ref: Some(format!("DEMO-{:03}", week + 1)),
            },
            paid_at,
        )?;
        println!(
            "  payment {} on {}: saved {} (streak {})",
            week + 1,
            paid_at.format("%Y-%m-%d"),
            Naira(receipt.total_saved),
            receipt.savings_streak
        );
    }

    let invoice = services.invoices.create(
        &id,
        InvoiceRequest {
            client_name: "Lekki Events Ltd".to_string(),
            client_email: Some("orders@lekkievents.ng".to_string()),
            items: vec![
                InvoiceItem {
                    description: "Bridesmaid dresses".to_string(),
                    quantity: 6.0,
                    price: 18_500.0,
                },
                InvoiceItem {
                    description: "Alterations".to_string(),
                    quantity: 2.0,
                    price: 4_000.0,
                },
            ],
            due_date: Some((paid_at + Duration::days(14)).date_naive()),
        },
        paid_at,
    )?;
    println!(
        "- Issued invoice {} to {} from {} for {}",
        invoice.invoice_number,
        invoice.client_name,
        invoice.business_name,
        Naira(invoice.total)
    );

    let view = services.dashboard.snapshot(&id)?;
    render_dashboard("Dashboard after saving", &view);

    let Some(boost) = view.available_offers.first() else {
        println!("\nNo loan unlocked; record at least 4 weekly payments to unlock Boost.");
        return Ok(());
    };

    let applied_at = paid_at + Duration::days(1);
    let request = LoanRequest {
        loan_type: boost.product.code().to_string(),
        amount: (boost.max_amount * 0.6).floor(),
        repayment_method: RepaymentMethod::TwoPart.code().to_string(),
    };
    let loan = services.lending.submit(&id, request, applied_at)?;
    println!(
        "\nApplied for {} {} ({}): fee {}, total {}",
        loan.product,
        Naira(loan.amount),
        loan.repayment_method,
        Naira(loan.fee),
        Naira(loan.total_repayment)
    );
    for installment in &loan.repayments {
        println!(
            "  {} due {}",
            Naira(installment.amount),
            installment.due_date.format("%Y-%m-%d")
        );
    }

    let mut at = applied_at;
    for status in [
        LoanStatus::Approved,
        LoanStatus::Disbursed,
        LoanStatus::Active,
    ] {
        at += Duration::days(1);
        services.lending.transition(&loan.loan_id, status, at)?;
        println!("  {} -> {}", loan.loan_id, status);
    }
    if let Err(err) = services
        .lending
        .transition(&loan.loan_id, LoanStatus::Pending, at)
    {
        println!("  rejected move: {}", err);
    }
    services
        .lending
        .transition(&loan.loan_id, LoanStatus::Completed, loan.due_date)?;
    println!("  {} -> {}", loan.loan_id, LoanStatus::Completed);

    let repaid = services.dashboard.snapshot(&id)?;
    render_dashboard("Dashboard after repayment", &repaid);
    println!(
        "\nScore moved {} -> {} after completing the loan",
        view.score, repaid.score
    );

    Ok(())
}

fn render_dashboard(title: &str, view: &DashboardView) {
    println!("\n{title}");
    println!(
        "- Score {} (base {} + streak {} + savings {} + loans {})",
        view.score,
        view.score_breakdown.base,
        view.score_breakdown.streak_points,
        view.score_breakdown.savings_points,
        view.score_breakdown.loan_points
    );
    println!(
        "- Saved {} over a {}-payment streak",
        Naira(view.total_saved),
        view.savings_streak
    );
    if let Some(next) = view.next_payment_date {
        println!("- Next payment due {}", next.format("%Y-%m-%d"));
    }
    println!(
        "- {} recent transactions, {} active loans",
        view.recent_transactions.len(),
        view.active_loans.len()
    );
    render_offers(&view.available_offers);
}
