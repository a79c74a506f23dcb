// 從命令列跑一次聯絡表單流程：驗證、送到設定的 relay、回報結果
// 不開瀏覽器就能檢查 relay 部署

use clap::Parser;
use folio::core::relay::relay_from_config;
use folio::domain::model::{FormField, SubmissionOutcome};
use folio::utils::{logger, validation::Validate};
use folio::{ContactForm, RelayConfig, RelayMode};

#[derive(Debug, Parser)]
#[command(name = "send_contact")]
#[command(about = "Send one contact message through the configured relay")]
struct Args {
    /// Relay TOML file with a [relay] table
    #[arg(long, short = 'c', conflicts_with = "endpoint")]
    config: Option<String>,

    /// Relay endpoint, used instead of a config file
    #[arg(long)]
    endpoint: Option<String>,

    #[arg(long, value_enum, default_value = "backend")]
    mode: ModeArg,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    message: String,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    Backend,
    Script,
}

impl From<ModeArg> for RelayMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Backend => RelayMode::Backend,
            ModeArg::Script => RelayMode::Script,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let relay_config = match (&args.config, &args.endpoint) {
        (Some(path), _) => RelayConfig::from_file(path)?,
        (None, Some(endpoint)) => RelayConfig::new(args.mode.into(), endpoint.clone()),
        (None, None) => anyhow::bail!("either --config or --endpoint is required"),
    };

    if let Err(e) = relay_config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!(
        "Using {:?} relay at {} (timeout {:?})",
        relay_config.mode,
        relay_config.endpoint,
        relay_config.timeout()
    );

    let form = ContactForm::with_timeout(relay_from_config(&relay_config), relay_config.timeout());
    form.set_field(FormField::Name, args.name);
    form.set_field(FormField::Email, args.email);
    form.set_field(FormField::Message, args.message);

    match form.submit().await {
        SubmissionOutcome::Sent => {
            println!("✅ Message Sent Successfully!");
            Ok(())
        }
        SubmissionOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("❌ {}: {}", field, message);
            }
            std::process::exit(2);
        }
        SubmissionOutcome::Failed(reason) => {
            tracing::error!("Submission failed: {}", reason);
            eprintln!("❌ {}", form.failure_notice().unwrap_or("Submission failed"));
            std::process::exit(3);
        }
        SubmissionOutcome::Busy => anyhow::bail!("form was not ready to submit"),
    }
}
