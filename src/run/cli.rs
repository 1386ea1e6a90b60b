use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use credflow::config::Config;
use credflow::format::{format_amount, format_rupees, truncate};
use credflow::models::{
    ApplicationStatus, LoanApplication, LoanTerms, Occupation, Transaction, UnderwritingResult,
    UserProfile, AGE_RANGES,
};
use credflow::offer::{amount_options, select_offer, DEFAULT_TENURE, TENURE_OPTIONS};
use credflow::sms::{SmsParser, SAMPLE_SMS};
use credflow::store::{KeyValueStore, LoanStore};
use credflow::Underwriter;

pub(crate) fn as_cli<S: KeyValueStore>(
    args: &[String],
    store: &mut LoanStore<S>,
    config: &Config,
) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "sample" => {
            println!("{SAMPLE_SMS}");
            Ok(())
        }
        "parse" | "p" => cli_parse(&args[2..]),
        "profile" => cli_profile(&args[2..], store),
        "sms" => cli_sms(&args[2..], store),
        "eligibility" | "e" => cli_eligibility(&args[2..], store, config),
        "emi" => cli_emi(&args[2..], config),
        "apply" => cli_apply(&args[2..], store, config),
        "status" | "s" => cli_status(store),
        "language" => cli_language(&args[2..], store),
        "reset" => {
            store.clear_all()?;
            println!("Cleared saved application data");
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("credflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("credflow — bank SMS parsing and loan eligibility");
    println!();
    println!("Usage: credflow <command>");
    println!();
    println!("Commands:");
    println!("  sample                        Print a demo bank SMS statement");
    println!("  parse <file|->                Show transactions found in SMS text");
    println!("    --csv                       Write them as CSV instead");
    println!("  profile                       Show the saved applicant profile");
    println!("  profile set                   Save the applicant profile");
    println!("    --name <name>  --age <range>  --occupation <occupation>");
    println!("    --locality <place>  [--income <monthly>]");
    println!("  sms <file|->                  Save bank SMS text for scoring");
    println!("  eligibility [file|-]          Score the profile and show the loan offer");
    println!("  emi <principal> <months>      Quote a monthly instalment");
    println!("    --rate <percent>            Annual rate (default from CREDFLOW_ANNUAL_RATE or 24)");
    println!("  apply [amount] [months]       Apply for an amount (default: the eligible amount)");
    println!("  status                        Show the submitted application");
    println!("  language [code]               Show or set the preferred language");
    println!("  reset                         Forget the saved profile and application");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

// ── Parsing ──────────────────────────────────────────────────

fn cli_parse(args: &[String]) -> Result<()> {
    let source = source_arg(args)
        .ok_or_else(|| anyhow::anyhow!("Usage: credflow parse <file|-> [--csv]"))?;
    let text = read_input(source)?;
    let transactions = SmsParser::new()?.parse(&text);

    if args.iter().any(|a| a == "--csv") {
        write_csv(&transactions)
    } else {
        print_transactions(&transactions);
        Ok(())
    }
}

fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions found");
        return;
    }

    println!(
        "{:<6} {:<10} {:>12} {:>12}  Description",
        "Kind", "Date", "Amount", "Balance"
    );
    println!("{}", "─".repeat(80));
    for txn in transactions {
        let balance = txn
            .balance_after
            .map(format_amount)
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<6} {:<10} {:>12} {:>12}  {}",
            txn.kind.as_str(),
            txn.occurred_at.format("%Y-%m-%d").to_string(),
            format_amount(txn.amount),
            balance,
            truncate(&txn.description, 34),
        );
    }

    let credits = transactions.iter().filter(|t| t.is_credit()).count();
    println!();
    println!(
        "Parsed {} transactions ({credits} credits, {} debits)",
        transactions.len(),
        transactions.len() - credits
    );
}

fn write_csv(transactions: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record(["kind", "date", "amount", "balance", "description"])?;
    for txn in transactions {
        let date = txn.occurred_at.format("%Y-%m-%d").to_string();
        let amount = txn.amount.to_string();
        let balance = txn.balance_after.map(|b| b.to_string()).unwrap_or_default();
        wtr.write_record([
            txn.kind.as_str(),
            date.as_str(),
            amount.as_str(),
            balance.as_str(),
            txn.description.as_str(),
        ])?;
    }
    wtr.flush().context("Failed to write CSV")?;
    Ok(())
}

// ── Profile & documents ──────────────────────────────────────

fn cli_profile<S: KeyValueStore>(args: &[String], store: &mut LoanStore<S>) -> Result<()> {
    if args.first().map(String::as_str) == Some("set") {
        let profile = profile_from_flags(&args[1..])?;
        profile.validate()?;
        store.save_profile(&profile)?;
        store.save_progress("profile-complete", Some(serde_json::to_value(&profile)?))?;
        info!(occupation = %profile.occupation, "profile saved");
        println!("Saved profile for {}", profile.name);
        return Ok(());
    }

    match store.profile()? {
        Some(profile) => {
            println!("Name:        {}", profile.name);
            println!("Age range:   {}", profile.age_range);
            println!("Occupation:  {}", profile.occupation);
            println!("Locality:    {}", profile.locality);
            match profile.monthly_income {
                Some(income) => println!("Income:      {} / month", format_rupees(income)),
                None => println!("Income:      not declared"),
            }
        }
        None => println!("No profile saved"),
    }
    Ok(())
}

fn profile_from_flags(args: &[String]) -> Result<UserProfile> {
    let occupation_raw = required_flag(args, "--occupation")?;
    let occupation = Occupation::parse(occupation_raw);
    if occupation == Occupation::Other && !occupation_raw.eq_ignore_ascii_case("other") {
        eprintln!("Warning: unrecognised occupation '{occupation_raw}', treating as 'other'");
    }

    let monthly_income = flag_value(args, "--income")
        .map(parse_amount_arg)
        .transpose()?;

    let age_range = required_flag(args, "--age").with_context(|| {
        format!("Age range must be one of {}", AGE_RANGES.join(", "))
    })?;

    Ok(UserProfile::new(
        required_flag(args, "--name")?.to_string(),
        age_range.to_string(),
        occupation,
        required_flag(args, "--locality")?.to_string(),
        monthly_income,
    ))
}

fn cli_sms<S: KeyValueStore>(args: &[String], store: &mut LoanStore<S>) -> Result<()> {
    let source =
        source_arg(args).ok_or_else(|| anyhow::anyhow!("Usage: credflow sms <file|->"))?;
    let text = read_input(source)?;
    let found = SmsParser::new()?.parse(&text).len();

    store.save_bank_sms(&text)?;
    store.save_progress(
        "documents-sms",
        Some(serde_json::json!({ "transactions": found })),
    )?;
    println!("Saved bank SMS ({found} transactions recognised)");
    Ok(())
}

// ── Eligibility & offer ──────────────────────────────────────

fn cli_eligibility<S: KeyValueStore>(
    args: &[String],
    store: &mut LoanStore<S>,
    config: &Config,
) -> Result<()> {
    let profile = saved_profile(store)?;
    let text = match source_arg(args) {
        Some(source) => {
            let text = read_input(source)?;
            store.save_bank_sms(&text)?;
            text
        }
        None => store.bank_sms()?.unwrap_or_default(),
    };

    let underwriter = Underwriter::new(config.annual_rate);
    let transactions = SmsParser::new()?.parse(&text);
    let result = underwriter.underwrite(&profile, &transactions);
    store.save_progress(
        "eligibility-calculated",
        Some(serde_json::to_value(&result)?),
    )?;
    info!(score = result.score, eligible = %result.eligible_amount, "eligibility calculated");

    print_result(&result, &underwriter);
    Ok(())
}

fn print_result(result: &UnderwritingResult, underwriter: &Underwriter) {
    println!(
        "Score:       {}/100 (confidence {}%)",
        result.score, result.confidence
    );
    println!(
        "Eligible:    {}  (max {})",
        format_rupees(result.eligible_amount),
        format_rupees(result.max_amount)
    );
    println!();
    println!("{}", result.explanation);

    if !result.risk_factors.is_empty() {
        println!();
        println!("Risk factors:");
        for risk in &result.risk_factors {
            println!("  - {risk}");
        }
    }
    if !result.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for tip in &result.recommendations {
            println!("  - {tip}");
        }
    }

    println!();
    let options = amount_options(result);
    let Some(largest) = options.last().copied() else {
        println!("No loan amount available yet");
        return;
    };
    let labels: Vec<String> = options.iter().map(|a| format_rupees(*a)).collect();
    println!("Loan amounts: {}", labels.join("  "));
    println!(
        "EMI for {} at {}% p.a.:",
        format_rupees(largest),
        underwriter.annual_rate()
    );
    for tenure in TENURE_OPTIONS {
        println!(
            "  {tenure:>2} months  {}",
            format_rupees(Decimal::from(underwriter.emi(largest, *tenure)))
        );
    }
}

fn cli_emi(args: &[String], config: &Config) -> Result<()> {
    let (Some(principal), Some(tenure)) = (args.first(), args.get(1)) else {
        anyhow::bail!("Usage: credflow emi <principal> <months> [--rate <percent>]");
    };
    let principal = parse_amount_arg(principal)?;
    let tenure: u32 = tenure
        .parse()
        .with_context(|| format!("Invalid tenure '{tenure}'"))?;
    let rate = match flag_value(args, "--rate") {
        Some(raw) => Decimal::from_str(raw.trim())
            .with_context(|| format!("Invalid rate '{raw}'"))?,
        None => config.annual_rate,
    };

    let terms = LoanTerms::new(principal, tenure, rate);
    print_terms(&terms);
    Ok(())
}

fn print_terms(terms: &LoanTerms) {
    println!("Amount:      {}", format_rupees(terms.amount));
    println!(
        "Tenure:      {} months at {}% p.a.",
        terms.tenure_months, terms.annual_rate
    );
    println!("EMI:         {}", format_rupees(Decimal::from(terms.emi)));
    println!("Total:       {}", format_rupees(terms.total_amount));
    println!("Interest:    {}", format_rupees(terms.total_interest));
}

fn cli_apply<S: KeyValueStore>(
    args: &[String],
    store: &mut LoanStore<S>,
    config: &Config,
) -> Result<()> {
    let tenure = match args.get(1) {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("Invalid tenure '{raw}'"))?,
        None => DEFAULT_TENURE,
    };

    let profile = saved_profile(store)?;
    let bank_sms = store.bank_sms()?;
    let transactions = SmsParser::new()?.parse(bank_sms.as_deref().unwrap_or_default());
    let result = Underwriter::new(config.annual_rate).underwrite(&profile, &transactions);

    // No amount (or `eligible`) takes the full eligible amount.
    let amount = match args.first().map(String::as_str) {
        None | Some("eligible") => result.eligible_amount,
        Some(raw) => parse_amount_arg(raw)?,
    };
    let terms = select_offer(&result, amount, tenure, config.annual_rate)?;

    store.save_progress("loan-selected", Some(serde_json::to_value(&terms)?))?;

    let mut application = LoanApplication::new(profile);
    application.bank_sms = bank_sms;
    application.eligibility = Some(result);
    application.loan_terms = Some(terms.clone());
    application.status = ApplicationStatus::Processing;
    store.save_application(&application)?;
    info!(id = %application.application_id, "application submitted");

    println!("Application {} submitted", application.application_id);
    print_terms(&terms);
    Ok(())
}

fn cli_status<S: KeyValueStore>(store: &LoanStore<S>) -> Result<()> {
    let Some(application) = store.application()? else {
        match store.progress()? {
            Some(progress) => {
                println!(
                    "No application submitted (last step: {})",
                    progress.current_step
                );
            }
            None => println!("No application submitted"),
        }
        return Ok(());
    };

    println!("Application: {}", application.application_id);
    println!("Applicant:   {}", application.profile.name);
    println!("Status:      {}", application.status);
    if let Some(submitted) = chrono::DateTime::from_timestamp_millis(application.timestamp) {
        println!("Submitted:   {}", submitted.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(result) = &application.eligibility {
        println!("Score:       {}/100", result.score);
    }
    if let Some(terms) = &application.loan_terms {
        println!();
        print_terms(terms);
    }
    Ok(())
}

fn cli_language<S: KeyValueStore>(args: &[String], store: &mut LoanStore<S>) -> Result<()> {
    match args.first() {
        Some(code) => {
            store.save_language(code)?;
            println!("Language set to {code}");
        }
        None => {
            let language = store.language()?.unwrap_or_else(|| "en".into());
            println!("{language}");
        }
    }
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────

fn saved_profile<S: KeyValueStore>(store: &LoanStore<S>) -> Result<UserProfile> {
    store.profile()?.ok_or_else(|| {
        anyhow::anyhow!("No profile saved. Run `credflow help` for the profile fields")
    })
}

/// First positional argument; `-` means stdin.
fn source_arg(args: &[String]) -> Option<&str> {
    args.first()
        .map(String::as_str)
        .filter(|a| *a == "-" || !a.starts_with('-'))
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }

    let path = Path::new(source);
    if !path.exists() {
        anyhow::bail!("File not found: {source}");
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {source}"))
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn required_flag<'a>(args: &'a [String], flag: &str) -> Result<&'a str> {
    flag_value(args, flag).ok_or_else(|| anyhow::anyhow!("Missing required flag {flag}"))
}

fn parse_amount_arg(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.replace([',', '₹'], "").trim())
        .with_context(|| format!("Invalid amount '{raw}'"))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
