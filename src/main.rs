use analytics::{HarvestInput, MetricsCalculator};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{Config, LogFormat, init_tracing, load_config};
use core_types::FlowDirection;
use reports::{CycleComparisonRow, FinanceFilter, Period};
use risk::RiskClassifier;
use rust_decimal::Decimal;
use serde::Serialize;
use snapshot::FarmSnapshot;
use std::path::PathBuf;

mod render;
mod snapshot;

/// The main entry point for the shrimp farm metrics tool.
fn main() -> Result<()> {
    // A .env file is optional; it only feeds SHRIMPFARM__* overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    let _log_guard = init_tracing(&config.logging)?;

    let snapshot = FarmSnapshot::load(&cli.snapshot)?;
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let ctx = App {
        config,
        snapshot,
        today,
        json: cli.json,
    };

    // Execute the appropriate command
    match cli.command {
        Commands::Cycle { cycle } => handle_cycle(&ctx, &cycle),
        Commands::Harvest(args) => handle_harvest(&ctx, args),
        Commands::Alerts { cycle } => handle_alerts(&ctx, &cycle),
        Commands::Finance(command) => handle_finance(&ctx, command),
        Commands::Compare => handle_compare(&ctx),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Cultivation-cycle metrics, risk alerts and finance reports for a shrimp farm.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON snapshot of the farm records.
    #[arg(long, short, global = true, default_value = "farm.json")]
    snapshot: PathBuf,

    /// Optional TOML configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Reference date for active cycles and finance periods (format: YYYY-MM-DD). Defaults to today.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Overrides the configured console log format.
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Productivity indicators of one cycle.
    Cycle {
        /// Cycle id or name.
        cycle: String,
    },
    /// Preview the settlement of a harvest without finalizing anything.
    Harvest(HarvestArgs),
    /// Risk level and active alerts of one cycle.
    Alerts {
        /// Cycle id or name.
        cycle: String,
    },
    /// Finance aggregations for charts and exports.
    #[command(subcommand)]
    Finance(FinanceCommands),
    /// Compare every cycle in the snapshot.
    Compare,
}

#[derive(Parser)]
struct HarvestArgs {
    /// Cycle id or name.
    cycle: String,

    /// Final harvest weight in kg.
    #[arg(long)]
    weight: Decimal,

    /// Sale price per kg.
    #[arg(long)]
    price: Decimal,

    /// Harvest cost (labor, ice, transport).
    #[arg(long)]
    cost: Option<Decimal>,

    /// Harvest date (format: YYYY-MM-DD). Defaults to the reference date.
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum FinanceCommands {
    /// Totals per calendar month, in first-seen order.
    Monthly {
        #[arg(long, value_enum)]
        direction: DirectionArg,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Totals per category.
    Categories {
        #[arg(long, value_enum)]
        direction: DirectionArg,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Day-by-day inflow and outflow over an inclusive range.
    Daily {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
    /// Revenue, expenses and balance of the current day, month or year.
    Summary {
        #[arg(long, value_enum, default_value_t = PeriodArg::Month)]
        period: PeriodArg,
    },
}

#[derive(Parser)]
struct FilterArgs {
    /// Only records on or after this date.
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Only records on or before this date.
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Only records of this category.
    #[arg(long)]
    category: Option<String>,
}

impl From<FilterArgs> for FinanceFilter {
    fn from(args: FilterArgs) -> Self {
        FinanceFilter {
            start: args.from,
            end: args.to,
            category: args.category,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Inflow,
    Outflow,
}

impl From<DirectionArg> for FlowDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Inflow => FlowDirection::Inflow,
            DirectionArg::Outflow => FlowDirection::Outflow,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PeriodArg {
    Day,
    Month,
    Year,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Day => Period::Day,
            PeriodArg::Month => Period::Month,
            PeriodArg::Year => Period::Year,
        }
    }
}

// ==============================================================================
// Command Handlers
// ==============================================================================

/// Everything a command needs, resolved once at startup.
struct App {
    config: Config,
    snapshot: FarmSnapshot,
    today: NaiveDate,
    json: bool,
}

impl App {
    fn calculator(&self) -> Result<MetricsCalculator> {
        Ok(MetricsCalculator::new(self.config.farm.feed_cost_per_kg)?)
    }

    fn currency(&self) -> &str {
        &self.config.farm.currency
    }

    /// Prints `value` as JSON when requested, otherwise the rendered table.
    fn emit<T: Serialize>(&self, value: &T, table: impl FnOnce() -> comfy_table::Table) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", table());
        }
        Ok(())
    }
}

fn handle_cycle(ctx: &App, key: &str) -> Result<()> {
    let cycle = ctx.snapshot.find_cycle(key)?;
    let records = ctx.snapshot.records_for(cycle.id);

    let report = ctx
        .calculator()?
        .cycle_report(cycle, &records.biometrics, &records.feedings, ctx.today)?;
    let level = risk::evaluate_cycle(cycle, &records.biometrics, &records.feedings, &records.water);

    tracing::info!(cycle = %cycle.name, %level, "Cycle report ready.");
    ctx.emit(&report, || render::cycle_report(cycle, &report, level))
}

fn handle_harvest(ctx: &App, args: HarvestArgs) -> Result<()> {
    let cycle = ctx.snapshot.find_cycle(&args.cycle)?;
    let records = ctx.snapshot.records_for(cycle.id);
    let input = HarvestInput {
        harvest_date: args.date.unwrap_or(ctx.today),
        final_weight_kg: args.weight,
        price_per_kg: args.price,
        harvest_cost: args.cost,
    };

    let calculator = ctx.calculator()?;
    let harvest = calculator.settle_harvest(cycle, &input, &records.feedings)?;

    ctx.emit(&harvest, || {
        render::harvest(&harvest, calculator.feed_cost_per_kg(), ctx.currency())
    })
}

fn handle_alerts(ctx: &App, key: &str) -> Result<()> {
    let cycle = ctx.snapshot.find_cycle(key)?;
    let records = ctx.snapshot.records_for(cycle.id);

    let fca = analytics::metrics::cycle_fca(cycle, &records.biometrics, &records.feedings);
    let level = risk::ThresholdClassifier.classify(&records.water, &records.feedings, fca);
    let alerts = risk::generate_alerts(&records.water, &records.feedings, fca, ctx.today);

    if !ctx.json {
        println!("{}: {}", cycle.name, level);
    }
    ctx.emit(&alerts, || render::alerts(&alerts))
}

fn handle_finance(ctx: &App, command: FinanceCommands) -> Result<()> {
    let ledger = &ctx.snapshot.finance;
    match command {
        FinanceCommands::Monthly { direction, filter } => {
            let records = FinanceFilter::from(filter).apply(ledger);
            let months = reports::group_by_month(&records, direction.into());
            ctx.emit(&months, || render::months(&months, ctx.currency()))
        }
        FinanceCommands::Categories { direction, filter } => {
            let records = FinanceFilter::from(filter).apply(ledger);
            let categories = reports::group_by_category(&records, direction.into());
            ctx.emit(&categories, || render::categories(&categories, ctx.currency()))
        }
        FinanceCommands::Daily { from, to } => {
            let series = reports::daily_series(ledger, from, to)?;
            ctx.emit(&series, || render::daily(&series, ctx.currency()))
        }
        FinanceCommands::Summary { period } => {
            let summary = reports::period_summary(ledger, period.into(), ctx.today)?;
            ctx.emit(&summary, || render::period(&summary, ctx.currency()))
        }
    }
}

fn handle_compare(ctx: &App) -> Result<()> {
    let rows: Vec<CycleComparisonRow> = ctx
        .snapshot
        .cycles
        .iter()
        .map(|cycle| CycleComparisonRow::from_cycle(cycle, ctx.today))
        .collect();
    let summary = reports::comparison_summary(&rows);

    #[derive(Serialize)]
    struct Comparison<'a> {
        rows: &'a [CycleComparisonRow],
        summary: &'a reports::ComparisonSummary,
    }

    ctx.emit(&Comparison { rows: &rows, summary: &summary }, || {
        render::comparison(&rows, &summary, ctx.currency())
    })
}
