use crate::offers_report::{run_offers_report, OffersArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Advisor",
    about = "Serve the conversational loan advisor or rank offers from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank catalog offers for a loan type, amount, and term
    Offers(OffersArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Offers(args) => run_offers_report(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_advisor::workflows::offers::LoanType;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["loan-advisor-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_offers_arguments_with_localized_type() {
        let cli = Cli::try_parse_from([
            "loan-advisor-api",
            "offers",
            "--type",
            "Ипотека",
            "--amount",
            "500000",
            "--months",
            "24",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Offers(args)) => {
                assert_eq!(args.loan_type, Some(LoanType::Mortgage));
                assert_eq!(args.amount, 500_000);
                assert_eq!(args.months, 24);
                assert!(args.catalog.is_none());
            }
            other => panic!("expected offers command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_loan_type() {
        let result = Cli::try_parse_from([
            "loan-advisor-api",
            "offers",
            "--type",
            "лизинг",
            "--amount",
            "1000",
            "--months",
            "12",
        ]);
        assert!(result.is_err());
    }
}
