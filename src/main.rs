use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use invoice_print::config::{
    config_dir, load_profile, resolve_output_dir, ExportFormat, Profile, CONFIG_TEMPLATE,
    SAMPLE_INVOICE_TEMPLATE,
};
use invoice_print::error::{InvoiceError, Result};
use invoice_print::export::exporter_for;
use invoice_print::invoice::{
    compute_balance_due, document_title, load_record, DarkMode, InvoiceRecord, InvoiceView,
    Strictness,
};

#[derive(Parser)]
#[command(name = "invoice-print")]
#[command(version, about = "Render invoices into print-ready HTML or PDF documents", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.invoice-print)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a business profile and a sample invoice
    Init,

    /// Render an invoice file and export it for printing
    Render {
        /// Invoice record (.toml or .json)
        file: PathBuf,

        /// Use the dark color scheme
        #[arg(long)]
        dark: bool,

        /// Export format (default: [export].format from config.toml)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Output directory (default: [export].output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Accept invoices without line items
        #[arg(long)]
        lenient: bool,

        /// Open the print dialog when the HTML page loads
        #[arg(long)]
        auto_print: bool,

        /// Open the exported file with the system default viewer
        #[arg(long)]
        open: bool,
    },

    /// Print the balance due of an invoice file
    Total {
        /// Invoice record (.toml or .json)
        file: PathBuf,

        /// Accept invoices without line items
        #[arg(long)]
        lenient: bool,
    },

    /// Print the export title of an invoice file
    Title {
        /// Invoice record (.toml or .json)
        file: PathBuf,
    },

    /// Show the invoice table in the terminal
    Preview {
        /// Invoice record (.toml or .json)
        file: PathBuf,

        /// Accept invoices without line items
        #[arg(long)]
        lenient: bool,
    },
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("INVOICE_PRINT_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Render {
            file,
            dark,
            format,
            output,
            lenient,
            auto_print,
            open,
        } => cmd_render(
            &cfg_dir,
            &file,
            RenderArgs {
                dark,
                format,
                output,
                lenient,
                auto_print,
                open,
            },
        ),
        Commands::Total { file, lenient } => cmd_total(&cfg_dir, &file, lenient),
        Commands::Title { file } => cmd_title(&file),
        Commands::Preview { file, lenient } => cmd_preview(&cfg_dir, &file, lenient),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(InvoiceError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(
        cfg_dir.join("sample-invoice.toml"),
        SAMPLE_INVOICE_TEMPLATE.replace("DATE", &today),
    )?;

    println!("Initialized invoice-print config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your business, bank and contact details:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Try the sample invoice:  invoice-print render {}/sample-invoice.toml",
        cfg_dir.display()
    );

    Ok(())
}

struct RenderArgs {
    dark: bool,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
    lenient: bool,
    auto_print: bool,
    open: bool,
}

fn strictness(profile: &Profile, lenient: bool) -> Strictness {
    if lenient {
        Strictness::Lenient
    } else {
        Strictness::from_flag(profile.invoice.strict)
    }
}

fn currency<'a>(record: &'a InvoiceRecord, profile: &'a Profile) -> &'a str {
    record
        .currency
        .as_deref()
        .unwrap_or(&profile.invoice.currency)
}

/// Render and export an invoice
fn cmd_render(cfg_dir: &Path, file: &Path, args: RenderArgs) -> Result<()> {
    let profile = load_profile(cfg_dir)?;
    let record = load_record(file)?;
    let strictness = strictness(&profile, args.lenient);

    let balance_due = compute_balance_due(&record, strictness)?;

    let mut view = InvoiceView::new(&record, &profile, strictness);
    view.set_dark_mode(DarkMode::from(args.dark));

    let output_dir = match args.output {
        Some(dir) => dir,
        None => resolve_output_dir(&profile.export.output_dir, cfg_dir),
    };
    let format = args.format.unwrap_or(profile.export.format);
    let exporter = exporter_for(format, &output_dir, args.auto_print);

    let path = view.export(exporter.as_ref())?;

    println!("Rendered {}", document_title(&record.client_name));
    println!("  Client:    {}", record.client_name);
    println!(
        "  Total Due: {}",
        balance_due.with_currency(currency(&record, &profile))
    );
    println!("  Saved:     {}", path.display());

    if args.open {
        open_path(&path)?;
    }

    Ok(())
}

/// Print the balance due
fn cmd_total(cfg_dir: &Path, file: &Path, lenient: bool) -> Result<()> {
    let profile = load_profile(cfg_dir)?;
    let record = load_record(file)?;

    let balance_due = compute_balance_due(&record, strictness(&profile, lenient))?;
    println!(
        "Total Due: {}",
        balance_due.with_currency(currency(&record, &profile))
    );

    Ok(())
}

/// Print the export title
fn cmd_title(file: &Path) -> Result<()> {
    let record = load_record(file)?;
    println!("{}", document_title(&record.client_name));
    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "NO")]
    no: String,
    #[tabled(rename = "SERVICE")]
    service: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "TOTAL")]
    total: String,
}

#[derive(Tabled)]
struct SummaryLine {
    #[tabled(rename = "")]
    label: String,
    #[tabled(rename = "")]
    value: String,
}

/// Show the invoice table in the terminal
fn cmd_preview(cfg_dir: &Path, file: &Path, lenient: bool) -> Result<()> {
    let profile = load_profile(cfg_dir)?;
    let record = load_record(file)?;

    let view = InvoiceView::new(&record, &profile, strictness(&profile, lenient));
    let document = view.document()?;

    println!(
        "Invoice #{} ({})",
        document.header.invoice_number, document.header.date
    );
    println!("  Client:  {}", document.customer.client_name);
    if !document.customer.client_contact.is_empty() {
        println!("  Contact: {}", document.customer.client_contact);
    }
    println!();

    if document.table.rows.is_empty() {
        println!("No line items.");
    } else {
        let rows: Vec<PreviewRow> = document
            .table
            .rows
            .iter()
            .map(|row| PreviewRow {
                no: row.label.clone(),
                service: row.service.clone(),
                description: row.description.clone(),
                amount: row.amount.clone().unwrap_or_default(),
                total: row.total.clone(),
            })
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }

    let summary: Vec<SummaryLine> = document
        .table
        .summary
        .iter()
        .map(|line| SummaryLine {
            label: line.label.to_string(),
            value: line.value.clone(),
        })
        .collect();
    let table = Table::new(summary).with(Style::rounded()).to_string();
    println!("{table}");

    if let Some(warning) = &document.warning {
        println!();
        println!("Note: {warning}");
    }

    Ok(())
}

fn open_path(path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .arg("/C")
            .arg("start")
            .arg("")
            .arg(path)
            .spawn()?;
    }
    Ok(())
}
