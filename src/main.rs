mod audit;
mod corrupt;
mod generator;
mod iban;
mod logging;
mod models;
mod registry;
mod util;

use audit::{AuditReport, IssueLevel};
use clap::{Parser, Subcommand};
use generator::{generate_records, GeneratorConfig};
use models::IbanRecord;
use rand::Rng;
use registry::BankRegistry;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::time::Instant;
use util::format_grouped;

#[derive(Parser)]
#[command(name = "saiban-demo")]
#[command(about = "Saudi IBAN synthetic test data generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate checksum-valid test IBANs
    Generate(GenerateArgs),
    /// Validate a candidate IBAN string
    Validate(ValidateArgs),
    /// List the known banks and their codes
    Banks,
    /// Inject defects into a batch of valid IBANs
    Corrupt(CorruptArgs),
    /// Validate every IBAN in a CSV and summarize defects
    Audit(AuditArgs),
}

#[derive(Parser)]
struct GenerateArgs {
    /// Bank display name or 2-digit code; drawn per sample when omitted
    #[arg(long)]
    bank: Option<String>,
    #[arg(long, default_value_t = 1)]
    count: usize,
    #[arg(long)]
    seed: Option<u64>,
    /// Write a CSV batch instead of printing
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct ValidateArgs {
    iban: String,
}

#[derive(Parser)]
struct CorruptArgs {
    #[arg(long, default_value = "data/synthetic/ibans.csv")]
    input: PathBuf,
    #[arg(long, default_value = "data/synthetic/ibans_invalid.csv")]
    output: PathBuf,
    #[arg(long, default_value_t = 0.5)]
    error_rate: f64,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser)]
struct AuditArgs {
    #[arg(long, default_value = "data/synthetic/ibans.csv")]
    input: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    logging::init_logging()?;
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Validate(args) => run_validate(args),
        Command::Banks => run_banks(),
        Command::Corrupt(args) => run_corrupt(args),
        Command::Audit(args) => run_audit(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let registry = BankRegistry::builtin();
    let bank_code = match args.bank.as_deref() {
        Some(value) => Some(resolve_bank(value, &registry)?),
        None => None,
    };
    let seed = args.seed.unwrap_or_else(random_seed);

    let config = GeneratorConfig {
        count: args.count,
        bank_code,
    };
    log::info!(
        "Generating {} IBAN(s), bank {} (seed {})",
        config.count,
        config.bank_code.as_deref().unwrap_or("random"),
        seed
    );

    let gen_start = Instant::now();
    let records = generate_records(&config, &registry, seed)?;
    let gen_elapsed = gen_start.elapsed();

    match args.output {
        Some(path) => {
            write_csv(&path, &records)?;
            emit_info_line(&format!(
                "generated {} record(s), seed {}, output {}",
                records.len(),
                seed,
                path.display()
            ));
        }
        None => {
            for record in &records {
                emit_info_line(&format!(
                    "{}  ({})  {}",
                    record.iban,
                    format_grouped(&record.iban),
                    record.bank_name
                ));
            }
        }
    }
    emit_info_line(&format!("Generation time: {} ms", gen_elapsed.as_millis()));

    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let registry = BankRegistry::builtin();
    let result = iban::validate_iban(&args.iban, &registry);

    if !result.bank_name.is_empty() {
        emit_info_line(&format!("Bank: {}", result.bank_name));
    }
    if result.is_valid {
        emit_info_line(&result.message);
        Ok(())
    } else {
        Err(result.message)
    }
}

fn run_banks() -> Result<(), String> {
    let registry = BankRegistry::builtin();
    for (name, code) in registry.entries() {
        emit_info_line(&format!("{}  {}", code, name));
    }
    Ok(())
}

fn run_corrupt(args: CorruptArgs) -> Result<(), String> {
    let seed = args.seed.unwrap_or_else(random_seed);
    let summary = corrupt::corrupt_csv(&args.input, &args.output, args.error_rate, seed)?;

    emit_info_line(&format!(
        "Corrupt: input={} output={} seed={}",
        args.input.display(),
        args.output.display(),
        seed
    ));
    emit_info_line(&format!(
        "Corrupted records: {} / {}",
        summary.corrupted_records, summary.total_records
    ));
    emit_info_line(&format!(
        "Corruptions: truncated={} appended={} country={} symbol={} account_digit={} check_digits={}",
        summary.truncated_tail,
        summary.appended_digit,
        summary.swapped_country,
        summary.injected_symbol,
        summary.altered_account_digit,
        summary.bumped_check_digits
    ));
    Ok(())
}

fn run_audit(args: AuditArgs) -> Result<(), String> {
    let registry = BankRegistry::builtin();
    let audit_start = Instant::now();
    let report = audit::audit_csv(&args.input, &registry)?;
    let audit_elapsed = audit_start.elapsed();

    emit_info_line(&format!(
        "Audit: records={} valid={} invalid={} unknown_bank={}",
        report.total_records,
        report.valid_records,
        report.invalid_records,
        report.unknown_bank_records
    ));
    emit_info_line(&format!(
        "Defects: length={} prefix={} characters={} checksum={}",
        report.length_defects,
        report.prefix_defects,
        report.character_defects,
        report.checksum_defects
    ));
    emit_issue_lines("error", &report, IssueLevel::Error);
    emit_issue_lines("warning", &report, IssueLevel::Warning);
    emit_info_line(&format!("Audit time: {} ms", audit_elapsed.as_millis()));

    if report.invalid_records > 0 {
        return Err(format!(
            "audit failed with {} invalid record(s)",
            report.invalid_records
        ));
    }
    Ok(())
}

fn emit_issue_lines(label: &str, report: &AuditReport, level: IssueLevel) {
    let max_items = 10usize;
    let selected: Vec<_> = report
        .issues
        .iter()
        .filter(|issue| issue.level == level)
        .collect();
    for issue in selected.iter().take(max_items) {
        emit_info_line(&format!("Audit {}: row {}: {}", label, issue.row, issue.message));
    }
    if selected.len() > max_items {
        emit_info_line(&format!(
            "Audit {}s: {} additional not shown",
            label,
            selected.len() - max_items
        ));
    }
}

fn resolve_bank(value: &str, registry: &BankRegistry) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.len() == 2 && trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        if registry.contains_code(trimmed) {
            return Ok(trimmed.to_string());
        }
        return Err(format!("bank code {} is not in the registry", trimmed));
    }
    registry
        .code_for(trimmed)
        .map(|code| code.to_string())
        .ok_or_else(|| format!("unknown bank: {}", trimmed))
}

fn random_seed() -> u64 {
    let mut rng = rand::rngs::OsRng;
    rng.gen()
}

fn write_csv(output: &Path, records: &[IbanRecord]) -> Result<(), String> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|err| err.to_string())?;
        }
    }
    let mut writer = csv::Writer::from_path(output).map_err(|err| err.to_string())?;
    for record in records {
        writer.serialize(record).map_err(|err| err.to_string())?;
    }
    writer.flush().map_err(|err| err.to_string())
}

fn emit_info_line(message: &str) {
    if log::log_enabled!(log::Level::Info) {
        log::info!("{}", message);
    } else {
        println!("{message}");
    }
}
