mod cli;
mod core;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::cli::billing_cmd;
use crate::core::config::AppConfig;

#[derive(Parser)]
#[command(name = "sxb", about = "Satellite billing and account CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text|json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(short = 'j', long = "json", global = true)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the account balance
    Balance,
    /// Set up the payment account
    Setup,
    /// Show usage and charges per project
    Charges {
        /// Start of the period (YYYY-MM-DD, default: first day of this month)
        #[arg(long)]
        since: Option<NaiveDate>,
        /// End of the period (YYYY-MM-DD, default: now)
        #[arg(long)]
        before: Option<NaiveDate>,
    },
    /// Show unit prices for project usage
    Pricing,
    /// Manage credit cards
    Cards {
        #[command(subcommand)]
        action: CardsAction,
    },
    /// Show invoices, transactions and other billing history
    History,
    /// Show native token payments
    TokenHistory,
    /// Show or apply a coupon
    Coupon {
        #[command(subcommand)]
        action: CouponAction,
    },
    /// Show or claim the token wallet
    Wallet {
        #[command(subcommand)]
        action: WalletAction,
    },
    /// Partner pricing packages
    Package {
        #[command(subcommand)]
        action: PackageAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print the install directory from a storage node service command line
    InstallDir {
        /// Service command line of the storage node
        service_cmd: Option<String>,
    },
}

#[derive(Subcommand)]
enum CardsAction {
    /// List credit cards
    List,
    /// Add a credit card from a payment processor token
    Add { token: String },
    /// Remove a credit card
    Remove { card_id: String },
    /// Make a credit card the default
    Default { card_id: String },
}

#[derive(Subcommand)]
enum CouponAction {
    /// Show the active coupon
    Show,
    /// Apply a coupon code
    Apply { code: String },
}

#[derive(Subcommand)]
enum WalletAction {
    /// Show the wallet
    Show,
    /// Claim a new wallet
    Claim,
}

#[derive(Subcommand)]
enum PackageAction {
    /// Check whether a pricing package is available
    Available,
    /// Purchase the pricing package
    Purchase { token: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Generate default config file
    Init {
        /// Satellite base URL
        #[arg(long)]
        url: Option<String>,
        /// Session token
        #[arg(long)]
        token: Option<String>,
    },
    /// Update satellite url or session token
    Set {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        token: Option<String>,
    },
    /// Validate config file
    Check,
    /// Print the config file path
    Path,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::load_or_default();

    let format = if cli.json {
        cli::output::OutputFormat::Json
    } else {
        cli::output::parse_format(
            cli.format
                .as_deref()
                .or(Some(config.settings.default_format.as_str())),
        )
    };
    let output_opts = cli::output::OutputOptions {
        format,
        pretty: cli.pretty,
        use_color: cli::output::detect_color(!cli.no_color, &config.settings.color),
    };
    let opts = &output_opts;

    match cli.command {
        Commands::Balance => billing_cmd::balance(&config, opts).await?,
        Commands::Setup => billing_cmd::setup(&config, opts).await?,
        Commands::Charges { since, before } => {
            billing_cmd::charges(&config, since, before, opts).await?
        }
        Commands::Pricing => billing_cmd::pricing(&config, opts).await?,
        Commands::Cards { action } => match action {
            CardsAction::List => billing_cmd::cards_list(&config, opts).await?,
            CardsAction::Add { token } => billing_cmd::cards_add(&config, &token, opts).await?,
            CardsAction::Remove { card_id } => {
                billing_cmd::cards_remove(&config, &card_id, opts).await?
            }
            CardsAction::Default { card_id } => {
                billing_cmd::cards_default(&config, &card_id, opts).await?
            }
        },
        Commands::History => billing_cmd::history(&config, opts).await?,
        Commands::TokenHistory => billing_cmd::token_history(&config, opts).await?,
        Commands::Coupon { action } => match action {
            CouponAction::Show => billing_cmd::coupon_show(&config, opts).await?,
            CouponAction::Apply { code } => billing_cmd::coupon_apply(&config, &code, opts).await?,
        },
        Commands::Wallet { action } => match action {
            WalletAction::Show => billing_cmd::wallet_show(&config, opts).await?,
            WalletAction::Claim => billing_cmd::wallet_claim(&config, opts).await?,
        },
        Commands::Package { action } => match action {
            PackageAction::Available => billing_cmd::package_available(&config, opts).await?,
            PackageAction::Purchase { token } => {
                billing_cmd::package_purchase(&config, &token, opts).await?
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Init { url, token } => cli::config_cmd::init(url, token)?,
            ConfigAction::Set { url, token } => cli::config_cmd::set(url, token)?,
            ConfigAction::Check => cli::config_cmd::check()?,
            ConfigAction::Path => cli::config_cmd::path()?,
        },
        Commands::InstallDir { service_cmd } => {
            cli::installer_cmd::install_dir(service_cmd.as_deref())?
        }
    }

    Ok(())
}
