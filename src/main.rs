use clap::{Parser, ValueEnum};
use loanplan::application::app::LoanApp;
use loanplan::application::submitter::SubmitOutcome;
use loanplan::config::ClientConfig;
use loanplan::domain::loan::{LoanInput, TERM_YEARS};
use loanplan::domain::ports::PlanGatewayBox;
use loanplan::domain::validation::Validator;
use loanplan::infrastructure::http::HttpPlanGateway;
use loanplan::interfaces::output_file::DeferredFile;
use loanplan::interfaces::terminal::{OutputFormat, TerminalView};
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Csv,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Table => OutputFormat::Table,
            Format::Csv => OutputFormat::Csv,
        }
    }
}

/// Requests a loan payment plan and prints it.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Loan amount
    #[arg(long, allow_hyphen_values = true)]
    principal: Option<String>,

    /// Yearly interest rate, in percent
    #[arg(long, allow_hyphen_values = true)]
    interest_rate: Option<String>,

    /// Years the loan is paid over
    #[arg(long, allow_hyphen_values = true)]
    term_years: Option<String>,

    /// Additional form field, as NAME=VALUE (repeatable)
    #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_field, allow_hyphen_values = true)]
    fields: Vec<(String, String)>,

    /// Base URL of the loan server [env: LOAN_API_BASE_URL, default: http://127.0.0.1:8000]
    #[arg(long)]
    base_url: Option<String>,

    /// Milliseconds to wait for the server [env: LOAN_API_TIMEOUT_MS, default: 8000]
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Output format of the payment plan
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Write the payment plan to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Leave the term limit to the server
    #[arg(long)]
    skip_term_check: bool,
}

impl Cli {
    fn loan_input(&self) -> LoanInput {
        let named = [
            ("principal", &self.principal),
            ("interest_rate", &self.interest_rate),
            (TERM_YEARS, &self.term_years),
        ];
        let mut input: LoanInput = named
            .into_iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name, v.clone())))
            .collect();
        for (name, value) in &self.fields {
            input.insert(name.clone(), value.clone());
        }
        input
    }
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "loanplan=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let input = cli.loan_input();
    if input.is_empty() {
        return Err(miette::miette!(
            "no form fields given; pass --principal, --interest-rate, --term-years or --field"
        ));
    }

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url).into_diagnostic()?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout(Duration::from_millis(timeout_ms));
    }
    let gateway: PlanGatewayBox = Box::new(HttpPlanGateway::new(&config).into_diagnostic()?);
    let validator = if cli.skip_term_check {
        Validator::without_term_bound()
    } else {
        Validator::new()
    };

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(DeferredFile::new(path)),
        None => Box::new(io::stdout()),
    };
    let view = TerminalView::new(out, io::stderr(), cli.format.into());

    let mut app = LoanApp::new(gateway, validator, config.timeout, view);
    let outcome = app.submit(input).await;
    app.into_view().finish().into_diagnostic()?;

    Ok(match outcome {
        SubmitOutcome::Loaded => ExitCode::SUCCESS,
        SubmitOutcome::Invalid | SubmitOutcome::Failed(_) => ExitCode::FAILURE,
    })
}
