use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::entities::PayoutMethod;

#[derive(Debug, Parser)]
#[command(
    name = "taptap-driver",
    version,
    about = "Terminal console for TapTapGo drivers",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Backend base URL.
    #[arg(long, env = "TAPTAP_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Session token, used when none is stored in the keyring.
    #[arg(long, env = "TAPTAP_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Pending-ride poll interval in milliseconds.
    #[arg(long, global = true)]
    pub poll_interval_ms: Option<u64>,

    /// Enable desktop notifications.
    #[arg(long, global = true)]
    pub enable_desktop_notifications: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Open the driver console (default).
    Run,
    /// City pricing administration (admin accounts).
    Pricing {
        #[command(subcommand)]
        action: PricingCommand,
    },
    /// Driver wallet.
    Wallet {
        #[command(subcommand)]
        action: WalletCommand,
    },
    /// Payout methods used for withdrawals.
    Payout {
        #[command(subcommand)]
        action: PayoutCommand,
    },
    /// Show account notifications, newest first, and mark them read.
    Inbox {
        /// List without marking anything read.
        #[arg(long)]
        keep_unread: bool,
    },
    /// Forget the stored session token.
    Logout,
}

#[derive(Debug, Clone, Subcommand)]
pub enum PricingCommand {
    /// List cities and their pricing.
    List,
    /// Change pricing of one city. Omitted values stay unchanged.
    Set {
        city_id: String,
        #[arg(long)]
        base_fare: Option<f64>,
        #[arg(long)]
        per_km: Option<f64>,
        #[arg(long)]
        per_min: Option<f64>,
        #[arg(long)]
        surge: Option<f64>,
        /// Platform commission in percent.
        #[arg(long)]
        commission: Option<f64>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum WalletCommand {
    /// Show the current balance.
    Balance,
    /// Request a payout.
    Withdraw {
        amount: f64,
        /// moncash, natcash or bank.
        #[arg(long, default_value = "moncash")]
        method: PayoutMethod,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum PayoutCommand {
    /// Show the payout methods on the profile.
    Show,
    /// Change payout methods. Options not given keep their current value.
    Set {
        /// Enable MonCash with this number (+509XXXXXXXX).
        #[arg(long, value_name = "PHONE")]
        moncash: Option<String>,
        /// Enable NatCash with this number (+509XXXXXXXX).
        #[arg(long, value_name = "PHONE")]
        natcash: Option<String>,
        #[arg(long)]
        bank_name: Option<String>,
        #[arg(long)]
        bank_account_name: Option<String>,
        #[arg(long)]
        bank_account_number: Option<String>,
        /// Disable a method. May be repeated.
        #[arg(long, value_name = "METHOD")]
        disable: Vec<PayoutMethod>,
        /// Method used when none is given on withdrawal.
        #[arg(long = "default", value_name = "METHOD")]
        default_method: Option<PayoutMethod>,
    },
}
