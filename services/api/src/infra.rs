use loan_advisor::config::AdvisorConfig;
use loan_advisor::error::AppError;
use loan_advisor::workflows::intake::{parse_loan_type, LoanIntakeService, Vocabulary};
use loan_advisor::workflows::offers::{LoanType, OfferCatalog, OfferEngine};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_catalog(path: &Path) -> Result<Arc<OfferCatalog>, AppError> {
    let catalog = OfferCatalog::from_path(path)?;
    info!(path = %path.display(), offers = catalog.len(), "offer catalog loaded");
    Ok(Arc::new(catalog))
}

pub(crate) fn load_vocabulary(path: Option<&Path>) -> Result<Arc<Vocabulary>, AppError> {
    let vocabulary = match path {
        Some(path) => {
            let vocabulary = Vocabulary::from_path(path)?;
            info!(path = %path.display(), "vocabulary override loaded");
            vocabulary
        }
        None => Vocabulary::russian(),
    };
    Ok(Arc::new(vocabulary))
}

pub(crate) fn build_intake_service(config: &AdvisorConfig) -> Result<LoanIntakeService, AppError> {
    let catalog = load_catalog(&config.offers_path)?;
    let vocabulary = load_vocabulary(config.vocabulary_path.as_deref())?;
    Ok(LoanIntakeService::new(OfferEngine::new(catalog), vocabulary))
}

/// Accepts the same loan type words the chat understands.
pub(crate) fn parse_loan_type_arg(raw: &str) -> Result<LoanType, String> {
    parse_loan_type(raw, &Vocabulary::russian())
        .ok_or_else(|| format!("unknown loan type '{raw}' (try cash, auto, mortgage, refinance)"))
}
