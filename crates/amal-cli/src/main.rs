use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use faraidh_types::{EstateInputs, HeirCategory, HeirCounts};

#[derive(Parser)]
#[command(name = "amal", about = "Faraidh inheritance engine and companion calculators")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the heir catalog
    Heirs {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show which categories a heir set excludes through Hajb
    Blocked {
        #[arg(long = "heir", value_name = "CATEGORY=COUNT", value_parser = parse_heir_count)]
        heirs: Vec<(HeirCategory, u32)>,
    },

    /// Distribute an estate across a set of heirs
    Inherit(InheritArgs),

    /// Zakat assessments
    Zakat {
        #[command(subcommand)]
        command: ZakatCommands,
    },

    /// Period key and due check for a habit schedule
    Due(DueArgs),
}

#[derive(Args)]
struct InheritArgs {
    /// Already-netted estate value; skips the netting step
    #[arg(long, conflicts_with = "gross")]
    net: Option<f64>,

    /// Gross estate value, to be netted against debts and bequest
    #[arg(long)]
    gross: Option<f64>,

    #[arg(long, default_value_t = 0.0)]
    asset_debt: f64,

    #[arg(long, default_value_t = 0.0)]
    non_asset_debt: f64,

    #[arg(long, default_value_t = 0.0)]
    funeral: f64,

    #[arg(long, default_value_t = 0.0)]
    bequest: f64,

    /// Heir head counts, repeatable (e.g. --heir wife=1 --heir son=2)
    #[arg(long = "heir", value_name = "CATEGORY=COUNT", value_parser = parse_heir_count)]
    heirs: Vec<(HeirCategory, u32)>,

    /// Emit the full result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum ZakatCommands {
    /// Zakat al-fitr for a household
    Fitrah {
        #[arg(long)]
        people: u32,
        #[arg(long)]
        rice_price: f64,
    },
    /// Zakat on accumulated wealth
    Maal {
        #[arg(long)]
        wealth: f64,
        #[arg(long)]
        gold_price: f64,
    },
    /// Zakat on monthly income
    Income {
        #[arg(long)]
        monthly: f64,
        #[arg(long, default_value_t = 0.0)]
        expenses: f64,
        #[arg(long)]
        gold_price: f64,
    },
    /// Zakat on a harvest
    Agriculture {
        #[arg(long)]
        harvest_kg: f64,
        #[arg(long)]
        price_per_kg: f64,
        /// Watered at cost rather than rain-fed (halves the rate)
        #[arg(long)]
        irrigated: bool,
    },
    /// Zakat on trade assets
    Trade {
        #[arg(long)]
        assets: f64,
        #[arg(long, default_value_t = 0.0)]
        capital: f64,
        #[arg(long, default_value_t = 0.0)]
        receivables: f64,
        #[arg(long, default_value_t = 0.0)]
        debt: f64,
        #[arg(long)]
        gold_price: f64,
    },
    /// Zakat on livestock
    Livestock {
        #[arg(long)]
        kind: LivestockArg,
        #[arg(long)]
        count: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LivestockArg {
    Goat,
    Cattle,
    Camel,
}

impl From<LivestockArg> for amal_zakat::LivestockKind {
    fn from(arg: LivestockArg) -> Self {
        match arg {
            LivestockArg::Goat => amal_zakat::LivestockKind::Goat,
            LivestockArg::Cattle => amal_zakat::LivestockKind::Cattle,
            LivestockArg::Camel => amal_zakat::LivestockKind::Camel,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FrequencyArg {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Special,
}

impl From<FrequencyArg> for amal_schedule::Frequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Daily => amal_schedule::Frequency::Daily,
            FrequencyArg::Weekly => amal_schedule::Frequency::Weekly,
            FrequencyArg::Monthly => amal_schedule::Frequency::Monthly,
            FrequencyArg::Yearly => amal_schedule::Frequency::Yearly,
            FrequencyArg::Special => amal_schedule::Frequency::Special,
        }
    }
}

#[derive(Args)]
struct DueArgs {
    #[arg(long)]
    freq: FrequencyArg,

    /// Date to check; defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Day-of-week selectors, 0 = Sunday
    #[arg(long)]
    dow: Vec<u32>,

    /// Day-of-month selectors
    #[arg(long)]
    dom: Vec<u32>,

    #[arg(long)]
    month: Option<u32>,

    #[arg(long)]
    mdom: Vec<u32>,

    /// Explicit dates for special-frequency habits
    #[arg(long = "on")]
    dates: Vec<NaiveDate>,

    /// Interpret monthly/yearly selectors against the Hijri calendar
    #[arg(long)]
    hijri: bool,

    #[arg(long)]
    hdom: Vec<u32>,

    #[arg(long)]
    hmonth: Option<u32>,

    #[arg(long)]
    hmdom: Vec<u32>,
}

fn parse_heir_count(s: &str) -> Result<(HeirCategory, u32), String> {
    let (name, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=COUNT, got '{s}'"))?;
    let category = name.parse::<HeirCategory>().map_err(|e| e.to_string())?;
    let count = count
        .parse::<u32>()
        .map_err(|e| format!("invalid count '{count}': {e}"))?;
    Ok((category, count))
}

fn heir_counts(entries: &[(HeirCategory, u32)]) -> HeirCounts {
    entries.iter().copied().collect()
}

fn run_heirs(json: bool) -> Result<()> {
    if json {
        let catalog: Vec<_> = faraidh_engine::heir_list()
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "id": entry.id.as_str(),
                    "group": entry.group.as_str(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        for entry in faraidh_engine::heir_list() {
            println!("{:<24} {}", entry.id, entry.group);
        }
    }
    Ok(())
}

fn run_blocked(heirs: &[(HeirCategory, u32)]) -> Result<()> {
    let blocked = faraidh_engine::blocked_heirs(&heir_counts(heirs));
    if blocked.is_empty() {
        println!("no categories are excluded");
    } else {
        for category in blocked {
            println!("{category}");
        }
    }
    Ok(())
}

fn run_inherit(args: &InheritArgs) -> Result<()> {
    let heirs = heir_counts(&args.heirs);
    let result = match (args.net, args.gross) {
        (Some(net), _) => faraidh_engine::calculate(net, &heirs),
        (None, Some(gross)) => {
            let inputs = EstateInputs {
                gross_estate: gross,
                asset_debt: args.asset_debt,
                non_asset_debt: args.non_asset_debt,
                funeral_expenses: args.funeral,
                bequest: args.bequest,
            };
            faraidh_engine::settle(&inputs, &heirs)
        }
        (None, None) => bail!("either --net or --gross is required"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in &result.distribution {
            println!(
                "{:<24} x{:<3} {:<16} {:<8} {:.2}",
                line.beneficiary, line.count, line.share_text, line.reason, line.amount
            );
        }
        for warning in &result.warnings {
            eprintln!("warning: {warning}");
        }
        for error in &result.errors {
            eprintln!("error: {error}");
        }
    }

    if result.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_assessment(assessment: &amal_zakat::ZakatAssessment) {
    match assessment {
        amal_zakat::ZakatAssessment::NotDue { nisab } => {
            println!("not due (below nisab {nisab:.2})");
        }
        amal_zakat::ZakatAssessment::Due { amount, nisab } => {
            println!("due: {amount:.2} (nisab {nisab:.2})");
        }
        amal_zakat::ZakatAssessment::InKind { description } => {
            println!("due in kind: {description}");
        }
    }
}

fn run_zakat(command: &ZakatCommands) -> Result<()> {
    match command {
        ZakatCommands::Fitrah { people, rice_price } => {
            let due = amal_zakat::fitrah(*people, *rice_price);
            println!("due: {:.2} ({} kg of rice)", due.total_value, due.total_kg);
        }
        ZakatCommands::Maal { wealth, gold_price } => {
            print_assessment(&amal_zakat::maal(*wealth, *gold_price)?);
        }
        ZakatCommands::Income {
            monthly,
            expenses,
            gold_price,
        } => {
            print_assessment(&amal_zakat::income(*monthly, *expenses, *gold_price)?);
        }
        ZakatCommands::Agriculture {
            harvest_kg,
            price_per_kg,
            irrigated,
        } => {
            let irrigation = if *irrigated {
                amal_zakat::Irrigation::Irrigated
            } else {
                amal_zakat::Irrigation::RainFed
            };
            print_assessment(&amal_zakat::agriculture(*harvest_kg, *price_per_kg, irrigation));
        }
        ZakatCommands::Trade {
            assets,
            capital,
            receivables,
            debt,
            gold_price,
        } => {
            print_assessment(&amal_zakat::trade(
                *assets,
                *capital,
                *receivables,
                *debt,
                *gold_price,
            )?);
        }
        ZakatCommands::Livestock { kind, count } => {
            print_assessment(&amal_zakat::livestock((*kind).into(), *count));
        }
    }
    Ok(())
}

fn run_due(args: &DueArgs) -> Result<()> {
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let freq: amal_schedule::Frequency = args.freq.into();
    let schedule = amal_schedule::Schedule {
        dow: args.dow.clone(),
        dom: args.dom.clone(),
        month: args.month,
        mdom: args.mdom.clone(),
        dates: args.dates.clone(),
        use_hijri: args.hijri,
        hdom: args.hdom.clone(),
        hmonth: args.hmonth,
        hmdom: args.hmdom.clone(),
        ..Default::default()
    };

    println!("period: {}", amal_schedule::period_key(freq, date));
    let hijri = amal_schedule::gregorian_to_hijri(date);
    println!("hijri:  {}-{:02}-{:02}", hijri.year, hijri.month, hijri.day);
    if amal_schedule::is_due_on(&schedule, freq, date) {
        println!("due:    yes");
    } else {
        println!("due:    no");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Heirs { json } => run_heirs(*json),
        Commands::Blocked { heirs } => run_blocked(heirs),
        Commands::Inherit(args) => run_inherit(args),
        Commands::Zakat { command } => run_zakat(command),
        Commands::Due(args) => run_due(args),
    }
}
