use anyhow::Context;
use clap::{Parser, Subcommand};
use jamaeya_core::{Config, GroupDraft, GroupId, Interval, Jamaeya, PayoutOrder};
use rust_decimal::Decimal;
use tracing::info;

#[derive(Parser)]
#[command(name = "jamaeya-demo", about = "Drive the mock jamaeya ledger and wallet from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the wallet state
    Wallet,
    /// Connect a fresh mock wallet
    Connect,
    /// Disconnect and forget the wallet
    Disconnect,
    /// List groups with progress for the current caller
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Deposit the current round's contribution
    Deposit { group_id: String },
    /// Create a new circle
    Create {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value_t = 5)]
        members: u32,
        #[arg(long, default_value = "10")]
        amount: Decimal,
        #[arg(long, default_value = "monthly", value_parser = parse_interval)]
        interval: Interval,
        #[arg(long, default_value = "fixed", value_parser = parse_order)]
        order: PayoutOrder,
    },
    /// Join a circle by invite code
    Join { code: String },
}

fn parse_interval(s: &str) -> Result<Interval, String> {
    Interval::from_str(s).ok_or_else(|| format!("unknown interval '{}' (weekly|monthly)", s))
}

fn parse_order(s: &str) -> Result<PayoutOrder, String> {
    PayoutOrder::from_str(s).ok_or_else(|| format!("unknown payout order '{}' (fixed|random)", s))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jamaeya_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let app = Jamaeya::open(&config)
        .with_context(|| format!("opening storage at {}", config.storage_path.display()))?;

    match cli.command {
        Command::Wallet => {
            let w = app.wallet().state();
            if w.is_connected {
                println!("connected {} balance {}", w.account, w.balance);
            } else {
                println!("not connected");
            }
        }
        Command::Connect => {
            let w = app.wallet().connect().await?;
            println!("connected {} balance {}", w.account, w.balance);
        }
        Command::Disconnect => {
            app.wallet().disconnect()?;
            println!("disconnected");
        }
        Command::List { search } => {
            for (g, s) in app.summaries(&search).await? {
                let next = s
                    .next_recipient
                    .as_ref()
                    .map(|slot| if slot.name.is_empty() { "(open seat)" } else { slot.name.as_str() })
                    .unwrap_or("-");
                println!(
                    "{}  {}  round {}/{} ({:.0}%)  {} {} x{}  pot {}  next: {}{}{}",
                    g.id,
                    g.name,
                    g.current_round,
                    g.total_rounds,
                    s.progress_percentage,
                    g.interval,
                    g.amount,
                    g.member_count,
                    s.total_pot,
                    next,
                    if s.is_next_recipient { " (you)" } else { "" },
                    if s.needs_deposit { "  [deposit due]" } else { "" },
                );
            }
        }
        Command::Deposit { group_id } => {
            let id = GroupId::parse(&group_id)?;
            let d = app.deposit(&id).await?;
            println!("deposited {} for round {} in {}", d.amount, d.round, id);
        }
        Command::Create {
            name,
            members,
            amount,
            interval,
            order,
        } => {
            let draft = GroupDraft {
                name,
                member_count: members,
                amount,
                interval,
                payout_order: order,
            };
            let g = app.create_group(draft).await?;
            info!(group_id = %g.id, "created");
            println!("created {} invite code {}", g.id, g.invite_code);
        }
        Command::Join { code } => {
            let id = app.join(&code).await?;
            println!("joined {}", id);
        }
    }
    Ok(())
}
