use crate::infra::{load_catalog, parse_loan_type_arg};
use clap::Args;
use loan_advisor::config::AppConfig;
use loan_advisor::error::AppError;
use loan_advisor::workflows::intake::format_rubles;
use loan_advisor::workflows::offers::{LoanType, OfferEngine, OfferQuery, RankedOffer};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct OffersArgs {
    /// Loan type (cash, auto, mortgage, refinance or their Russian names). All types when omitted.
    #[arg(long = "type", value_parser = parse_loan_type_arg)]
    pub(crate) loan_type: Option<LoanType>,
    /// Desired amount in rubles
    #[arg(long)]
    pub(crate) amount: u64,
    /// Desired term in months
    #[arg(long)]
    pub(crate) months: u64,
    /// Offer catalog to read instead of APP_OFFERS_PATH
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the ranked offers as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_offers_report(args: OffersArgs) -> Result<(), AppError> {
    let OffersArgs {
        loan_type,
        amount,
        months,
        catalog,
        json,
    } = args;

    let catalog_path = match catalog {
        Some(path) => path,
        None => AppConfig::load()?.advisor.offers_path,
    };
    let engine = OfferEngine::new(load_catalog(&catalog_path)?);
    let query = OfferQuery {
        loan_type,
        amount,
        months,
    };
    let offers = engine.rank(&query);

    if json {
        let rendered = serde_json::to_string_pretty(&offers).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_offers(&query, &offers));
    }

    Ok(())
}

fn render_offers(query: &OfferQuery, offers: &[RankedOffer]) -> String {
    let mut out = String::new();
    let type_label = query
        .loan_type
        .map(|loan_type| loan_type.label())
        .unwrap_or("Все типы");

    out.push_str(&format!(
        "Offers for {}: {} over {} months\n",
        type_label,
        format_rubles(query.amount),
        query.months
    ));

    if offers.is_empty() {
        out.push_str("No matching offers\n");
        return out;
    }

    for (position, offer) in offers.iter().enumerate() {
        let rate = offer
            .annual_rate
            .map(|rate| format!("{:.2}%", rate * 100.0))
            .unwrap_or_else(|| "rate not published".to_string());
        let payment = match (offer.monthly_payment, offer.overpay) {
            (Some(payment), Some(overpay)) => format!(
                "{} / month, overpay {}",
                format_rubles(payment.round() as u64),
                format_rubles(overpay.max(0.0).round() as u64)
            ),
            _ => "payment not estimated".to_string(),
        };
        out.push_str(&format!(
            "{}. {} | {} | {}\n",
            position + 1,
            offer.title,
            rate,
            payment
        ));
    }

    out
}
