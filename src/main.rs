use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use taptap_driver::application::use_cases::{
    InboxUseCase, InboxView, PricingUseCase, ProfileUseCase, WalletUseCase, require_role,
};
use taptap_driver::application::{LoginUseCase, ResolveTokenUseCase};
use taptap_driver::domain::entities::{
    City, PayoutMethod, PayoutMethods, PricingUpdate, User, UserType,
};
use taptap_driver::infrastructure::config::{PayoutCommand, PricingCommand, WalletCommand};
use taptap_driver::infrastructure::{
    AppConfig, CliArgs, Command, DesktopAlertService, KeyringTokenStorage, StorageManager,
    SystemMapLauncher, TapTapClient,
};
use taptap_driver::presentation::{App, AppOptions, AppPorts};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

struct Context {
    config: AppConfig,
    storage: StorageManager,
    client: Arc<TapTapClient>,
    token_storage: Arc<KeyringTokenStorage>,
    cli_token: Option<String>,
}

fn load_context(args: &CliArgs) -> Result<Context> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    init_logging(&config)?;
    info!(version = taptap_driver::VERSION, api = %config.api_url, "Starting TapTap driver");

    let client = Arc::new(TapTapClient::new(
        config.api_url.clone(),
        config.request_timeout(),
    )?);

    Ok(Context {
        config,
        storage,
        client,
        token_storage: Arc::new(KeyringTokenStorage::new()),
        cli_token: args.token.clone(),
    })
}

/// Restores the stored session for one-shot commands.
async fn signed_in_user(ctx: &Context) -> Result<User> {
    let resolved = ResolveTokenUseCase::new(ctx.token_storage.clone())
        .execute(ctx.cli_token.clone())
        .await?
        .ok_or_else(|| eyre!("not signed in; open the console or pass --token"))?;

    let login = LoginUseCase::new(ctx.client.clone(), ctx.token_storage.clone());
    let response = login.restore(resolved.token, resolved.source).await?;
    Ok(response.user)
}

async fn run_console(ctx: Context) -> Result<()> {
    let Context {
        config,
        storage,
        client,
        token_storage,
        cli_token,
    } = ctx;

    let ports = AppPorts {
        auth: client.clone(),
        rides: client.clone(),
        profile: client.clone(),
        wallet: client,
        token_storage,
        alerts: Arc::new(DesktopAlertService::new(config.enable_desktop_notifications)),
        map_launcher: Arc::new(SystemMapLauncher),
    };
    let options = AppOptions {
        poll_interval_ms: config.poll_interval_ms,
        map_url_base: config.map_url_base.clone(),
        dashboard_refresh: Duration::from_secs(config.ui.dashboard_refresh_secs),
        profile_refresh: Duration::from_secs(config.ui.profile_refresh_secs),
        notification_duration: Duration::from_secs(config.ui.notification_duration),
    };
    let app = App::new(ports, options, storage);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal, cli_token).await;
    ratatui::restore();

    result
}

fn print_cities(cities: &[City]) {
    let cell = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));

    println!(
        "{:<6} {:<24} {:>6} {:>10} {:>8} {:>8} {:>6} {:>10}",
        "ID", "CITY", "ACTIVE", "BASE", "PER KM", "PER MIN", "SURGE", "COMMISSION"
    );
    for city in cities {
        println!(
            "{:<6} {:<24} {:>6} {:>10} {:>8} {:>8} {:>6.2} {:>10}",
            city.id,
            city.name,
            if city.is_active { "yes" } else { "no" },
            cell(city.pricing.base_fare),
            cell(city.pricing.price_per_km),
            cell(city.pricing.price_per_min),
            city.pricing.surge(),
            cell(city.pricing.commission_rate),
        );
    }
}

async fn run_pricing(ctx: Context, action: PricingCommand) -> Result<()> {
    let user = signed_in_user(&ctx).await?;
    let pricing = PricingUseCase::new(ctx.client.clone());

    match action {
        PricingCommand::List => {
            let cities = pricing.list(&user).await?;
            print_cities(&cities);
        }
        PricingCommand::Set {
            city_id,
            base_fare,
            per_km,
            per_min,
            surge,
            commission,
        } => {
            let update = PricingUpdate {
                base_fare,
                price_per_km: per_km,
                price_per_min: per_min,
                surge_multiplier: surge,
                commission_rate: commission,
            };
            let city = pricing.update(&user, &city_id, &update).await?;
            println!("Updated pricing for {}", city.name);
            print_cities(std::slice::from_ref(&city));
        }
    }
    Ok(())
}

async fn run_wallet(ctx: Context, action: WalletCommand) -> Result<()> {
    let user = signed_in_user(&ctx).await?;
    require_role(&user, |role| role == UserType::Driver)?;
    let wallet = WalletUseCase::new(ctx.client.clone());

    match action {
        WalletCommand::Balance => {
            let snapshot = wallet.balance().await?;
            println!("Balance: {:.2} {}", snapshot.balance(), snapshot.currency);
            if let Some(pending) = snapshot.pending_withdrawals.filter(|p| *p > 0.0) {
                println!("Pending payouts: {pending:.2} {}", snapshot.currency);
            }
        }
        WalletCommand::Withdraw { amount, method } => {
            if !user.payout.is_enabled(method) {
                warn!(%method, "Withdrawal to a payout method that is not enabled on the profile");
            }
            let request = wallet.withdraw(amount, method).await?;
            println!(
                "Withdrawal {} requested: {:.2} HTG via {method} ({})",
                request.id,
                request.amount.unwrap_or(amount),
                if request.status.is_empty() { "pending" } else { request.status.as_str() },
            );
        }
    }
    Ok(())
}

fn print_payout(methods: &PayoutMethods) {
    let state = |enabled: bool| if enabled { "enabled" } else { "disabled" };
    println!(
        "MonCash  {:<8} {}",
        state(methods.moncash_enabled),
        methods.moncash_phone
    );
    println!(
        "NatCash  {:<8} {}",
        state(methods.natcash_enabled),
        methods.natcash_phone
    );
    println!(
        "Bank     {:<8} {} {} {}",
        state(methods.bank_enabled),
        methods.bank_name,
        methods.bank_account_name,
        methods.bank_account_number
    );
    println!(
        "Default  {}",
        methods
            .default_method
            .map_or("none", PayoutMethod::as_str)
    );
}

async fn run_payout(ctx: Context, action: PayoutCommand) -> Result<()> {
    let user = signed_in_user(&ctx).await?;
    require_role(&user, |role| role == UserType::Driver)?;

    match action {
        PayoutCommand::Show => print_payout(&user.payout),
        PayoutCommand::Set {
            moncash,
            natcash,
            bank_name,
            bank_account_name,
            bank_account_number,
            disable,
            default_method,
        } => {
            let mut methods = user.payout.clone();
            if let Some(phone) = moncash {
                methods.moncash_enabled = true;
                methods.moncash_phone = phone;
            }
            if let Some(phone) = natcash {
                methods.natcash_enabled = true;
                methods.natcash_phone = phone;
            }
            for (value, field) in [
                (bank_name, &mut methods.bank_name),
                (bank_account_name, &mut methods.bank_account_name),
                (bank_account_number, &mut methods.bank_account_number),
            ] {
                if let Some(value) = value {
                    *field = value;
                    methods.bank_enabled = true;
                }
            }
            for method in disable {
                match method {
                    PayoutMethod::Moncash => methods.moncash_enabled = false,
                    PayoutMethod::Natcash => methods.natcash_enabled = false,
                    PayoutMethod::Bank => methods.bank_enabled = false,
                }
                if methods.default_method == Some(method) {
                    methods.default_method = None;
                }
            }
            if default_method.is_some() {
                methods.default_method = default_method;
            }

            let profile = ProfileUseCase::new(ctx.client.clone());
            let updated = profile.save_payout(&user, &methods).await?;
            println!("Payout methods saved.");
            print_payout(&updated.payout);
        }
    }
    Ok(())
}

fn print_inbox(view: &InboxView) {
    if view.notifications.is_empty() {
        println!("No notifications.");
        return;
    }
    for notification in &view.notifications {
        let when = notification
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let marker = if notification.is_unread() { "*" } else { " " };
        println!("{marker} {when:<16}  {}", notification.display_title());
        if !notification.body.is_empty() {
            println!("  {:<16}  {}", "", notification.body);
        }
    }
    println!("{} unread", view.unread);
}

async fn run_inbox(ctx: Context, keep_unread: bool) -> Result<()> {
    signed_in_user(&ctx).await?;
    let view = InboxUseCase::new(ctx.client.clone())
        .open(!keep_unread)
        .await?;

    print_inbox(&view);
    if !keep_unread && !view.marked_read {
        warn!("Notifications could not be marked read");
        println!("Could not mark notifications read; they will show as unread next time.");
    }
    Ok(())
}

async fn run_logout(ctx: Context) -> Result<()> {
    LoginUseCase::new(ctx.client.clone(), ctx.token_storage.clone())
        .delete_token()
        .await?;
    println!("Signed out.");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    let ctx = load_context(&args)?;

    match args.command.unwrap_or(Command::Run) {
        Command::Run => run_console(ctx).await,
        Command::Pricing { action } => run_pricing(ctx, action).await,
        Command::Wallet { action } => run_wallet(ctx, action).await,
        Command::Payout { action } => run_payout(ctx, action).await,
        Command::Inbox { keep_unread } => run_inbox(ctx, keep_unread).await,
        Command::Logout => run_logout(ctx).await,
    }
}
