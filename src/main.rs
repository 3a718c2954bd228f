use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_service::application::factory::ProcessorFactory;
use payment_service::application::service::PaymentService;
use payment_service::config::{DEFAULT_CURRENCY, DEFAULT_GATEWAY_URL, GatewayConfig};
use payment_service::domain::customer::CustomerRecord;
use payment_service::domain::payment::{PaymentRequest, PaymentResult};
use payment_service::domain::ports::SharedGateway;
use payment_service::domain::validation::validate_customer;
use payment_service::error::PaymentError;
use payment_service::infrastructure::file_log::{DEFAULT_LOG_PATH, FileTransactionLog};
use payment_service::infrastructure::in_memory::InMemoryGateway;
use payment_service::infrastructure::notifiers::{DEFAULT_SMS_GATEWAY, NotifierKind};
use payment_service::infrastructure::stripe::StripeGateway;
use payment_service::interfaces::csv::payment_reader::PaymentReader;
use payment_service::interfaces::csv::result_writer::ResultWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input payments CSV file (name,email,phone,amount,currency,source,type)
    input: PathBuf,

    /// Append-only transaction log
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log_path: PathBuf,

    /// Secret key for the payment gateway
    #[arg(long, env = "PAYMENT_GATEWAY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the payment gateway API
    #[arg(long, env = "PAYMENT_GATEWAY_URL", default_value = DEFAULT_GATEWAY_URL)]
    gateway_url: String,

    /// Currency accepted for gateway payments (repeatable)
    #[arg(long = "currency", default_values_t = [DEFAULT_CURRENCY.to_string()])]
    currencies: Vec<String>,

    /// Name of the SMS provider used for text notifications
    #[arg(long, default_value = DEFAULT_SMS_GATEWAY)]
    sms_gateway: String,

    /// Use an in-memory gateway that approves every charge instead of the real API
    #[arg(long)]
    stub_gateway: bool,
}

async fn process_row(
    cli: &Cli,
    factory: &ProcessorFactory,
    log: &Arc<FileTransactionLog>,
    customer: &CustomerRecord,
    payment: &PaymentRequest,
) -> payment_service::error::Result<PaymentResult> {
    validate_customer(customer)?;
    let kind = NotifierKind::for_customer(customer)
        .ok_or_else(|| PaymentError::ValidationError("no notification channel".to_string()))?;
    // Notifications go to stderr so stdout stays machine-readable.
    let notifier = kind.build(&cli.sms_gateway, io::stderr());
    let service = PaymentService::for_payment(factory, payment, notifier, Box::new(log.clone()))?;
    service.process_transaction(customer, payment).await
}

fn build_factory(cli: &Cli) -> Result<ProcessorFactory> {
    let config = GatewayConfig::new(cli.api_key.clone().unwrap_or_default())
        .with_base_url(cli.gateway_url.clone())
        .with_supported_currencies(cli.currencies.clone());

    let gateway: SharedGateway = if cli.stub_gateway {
        Arc::new(InMemoryGateway::new())
    } else if cli.api_key.is_some() {
        Arc::new(StripeGateway::new(&config).into_diagnostic()?)
    } else {
        tracing::warn!("no gateway API key configured, gateway payments will be rejected");
        return Ok(ProcessorFactory::offline_only());
    };
    Ok(ProcessorFactory::new(gateway, &config))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let factory = build_factory(&cli)?;
    let log = Arc::new(
        FileTransactionLog::open(&cli.log_path)
            .await
            .into_diagnostic()?,
    );

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = PaymentReader::new(file);
    let stdout = io::stdout();
    let mut writer = ResultWriter::new(stdout.lock());

    for row in reader.payments() {
        let (customer, payment) = match row {
            Ok(row) => row.into_records(),
            Err(e) => {
                eprintln!("Error reading payment: {}", e);
                continue;
            }
        };

        let outcome = process_row(&cli, &factory, &log, &customer, &payment).await;

        match outcome {
            Ok(result) => writer.write_result(&customer, &result).into_diagnostic()?,
            Err(e) => eprintln!("Error processing payment: {}", e),
        }
    }

    Ok(())
}
