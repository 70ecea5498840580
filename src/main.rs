use crossterm::style::Stylize;
use nullsweep::cleaning::filler::RandomSidePicker;
use nullsweep::cleaning::pipeline::{clean_file, CleanSummary};
use nullsweep::config::config::Config;
use nullsweep::data::exporter::TableExporter;
use std::path::{Path, PathBuf};

fn print_help() {
    println!("{}", "nullsweep - CSV dataset cleaner".blue().bold());
    println!();
    println!("Fills missing cells from neighboring rows, sorts, and writes the result.");
    println!();
    println!("{}", "Usage:".yellow());
    println!("  nullsweep [OPTIONS] FILE.csv|FILE.json");
    println!();
    println!("{}", "Options:".yellow());
    println!(
        "  {} <path>     - Destination file (default: cleaned_<input name>)",
        "--output".green()
    );
    println!(
        "  {} <column>     - Sort by this column instead of the default date ordering",
        "--sort".green()
    );
    println!(
        "  {}          - Also write a timestamped JSON run report",
        "--report".green()
    );
    println!(
        "  {} - Generate config file with defaults",
        "--generate-config".green()
    );
    println!("  {}            - Show this help", "--help".green());
    println!();
    println!("{}", "Sorting:".yellow());
    println!("  Numeric columns sort descending, text columns ascending.");
    println!("  Without --sort, recognized year/month columns order rows chronologically.");
    println!();
}

// cleaned_<name> next to the input, as users of the tool expect
fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("output.csv");
    input.with_file_name(format!("cleaned_{}", name))
}

fn print_report(summary: &CleanSummary, config: &Config) {
    let color = config.display.use_color;

    println!();
    if color {
        println!("{}", format!("Processing {}...", summary.input).cyan());
    } else {
        println!("Processing {}...", summary.input);
    }
    println!(
        "Original shape: {} rows x {} columns",
        summary.rows, summary.columns
    );
    if config.display.show_columns {
        println!("Columns: {}", summary.column_names.join(", "));
    }
    println!(
        "Missing values before cleaning: {}",
        summary.missing_before
    );
    for col in summary.columns_with_missing() {
        println!(
            "  '{}' column: {} missing, {} replaced",
            col.name, col.missing, col.filled
        );
    }
    println!("Missing values after cleaning: {}", summary.missing_after);
    if summary.unresolved > 0 {
        println!(
            "  {} cells had no usable neighbor and were left empty",
            summary.unresolved
        );
    }
    println!("Sort applied: {}", summary.sort_key);
    if color {
        println!(
            "{}",
            format!("Cleaned file saved to: {}", summary.output).green()
        );
    } else {
        println!("Cleaned file saved to: {}", summary.output);
    }

    println!();
    let rule = "=".repeat(60);
    println!("{}", rule);
    if color {
        println!("{}", "CLEANING SUMMARY".bold());
    } else {
        println!("CLEANING SUMMARY");
    }
    println!("{}", rule);
    println!("Records processed: {}", summary.rows);
    println!("Missing values replaced: {}", summary.filled);
    println!("Missing values remaining: {}", summary.unresolved);
}

fn main() {
    nullsweep::logging::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.contains(&"--help".to_string()) {
        print_help();
        return;
    }

    // Check for config file generation
    if args.contains(&"--generate-config".to_string()) {
        match Config::get_config_path() {
            Ok(path) => {
                let config_content = Config::create_default_with_comments();
                if let Some(parent) = path.parent() {
                    if let Err(e) = std::fs::create_dir_all(parent) {
                        eprintln!("Error creating config directory: {}", e);
                        std::process::exit(1);
                    }
                }
                if let Err(e) = std::fs::write(&path, config_content) {
                    eprintln!("Error writing config file: {}", e);
                    std::process::exit(1);
                }
                println!("Configuration file created at: {:?}", path);
                println!("Edit this file to customize cleaning defaults.");
                return;
            }
            Err(e) => {
                eprintln!("Error determining config path: {}", e);
                std::process::exit(1);
            }
        }
    }

    let output_flag = args
        .iter()
        .position(|arg| arg == "--output")
        .and_then(|pos| args.get(pos + 1))
        .cloned();
    let sort_flag = args
        .iter()
        .position(|arg| arg == "--sort")
        .and_then(|pos| args.get(pos + 1))
        .cloned();
    let write_report = args.contains(&"--report".to_string());

    // The input file is the first positional argument, skipping flags and
    // the values they consumed
    let flag_values: Vec<usize> = ["--output", "--sort"]
        .iter()
        .filter_map(|flag| args.iter().position(|a| a == flag).map(|pos| pos + 1))
        .collect();
    let input = args
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(i, arg)| !arg.starts_with("--") && !flag_values.contains(i))
        .map(|(_, arg)| arg.clone())
        .next();

    let input = match input {
        Some(path) => PathBuf::from(path),
        None => {
            print_help();
            std::process::exit(1);
        }
    };

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: could not read config file: {}. Using defaults.", e);
        Config::default()
    });

    let output = output_flag
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(&input));

    let mut picker = RandomSidePicker;
    let summary = match clean_file(
        &input,
        &output,
        sort_flag.as_deref(),
        &config.sort,
        &mut picker,
    ) {
        Ok(summary) => summary,
        Err(e) => {
            if config.display.use_color {
                eprintln!("{}", format!("Error: {:#}", e).red());
            } else {
                eprintln!("Error: {:#}", e);
            }
            std::process::exit(1);
        }
    };

    print_report(&summary, &config);

    if write_report {
        match TableExporter::write_json_report(&summary, "clean_report") {
            Ok(path) => println!("Run report written to: {}", path.display()),
            Err(e) => {
                eprintln!("Error writing run report: {}", e);
                std::process::exit(1);
            }
        }
    }
}
