use clap::Parser;
use seat_plan::{cli, config, error, export, reader};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use seat_plan_common::export::block_layout::today;
use seat_plan_common::partitioner::process_table;
use seat_plan_common::{SeatingConfig, SeatingData};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();

    let config = Config::load(cli.config.as_deref())?.with_block_size(cli.block_size)?;

    match cli.command {
        Commands::Process { input, output } => {
            println!("🪑 seat-plan - process\n");

            let data = process_roster(&input, &config.seating)?;

            println!("[3/3] Saving result...");
            let output = output.unwrap_or_else(|| input.with_extension("seating.json"));
            write_seating(&data, &output)?;
            println!("✔ Saved: {}", output.display());

            print_summary(&data, &config.seating);
            println!("\n✅ Done");
        }

        Commands::Export { input, format, output, block } => {
            println!("📄 seat-plan - export\n");

            let data = read_seating(&input)?;
            let selected = export::select_block(&data, block.as_deref())?;
            let stem = match selected.blocks.as_slice() {
                [only] if block.is_some() => export::block_stem(&only.block_name),
                _ => export::default_stem(chrono::Local::now().naive_local()),
            };

            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            export::export_seating(&selected, &format, &output_dir, &stem, &config.seating, today())?;

            println!("\n✅ Export complete");
        }

        Commands::Run { input, format, output } => {
            println!("🚀 seat-plan - run\n");

            let data = process_roster(&input, &config.seating)?;

            println!("[3/3] Exporting ({})...", format);
            let output_dir = output.unwrap_or_else(|| {
                input.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."))
            });
            let stem = export::default_stem(chrono::Local::now().naive_local());
            export::export_seating(&data, &format, &output_dir, &stem, &config.seating, today())?;

            print_summary(&data, &config.seating);
            println!("\n✅ Done");
        }

        Commands::Show { input, students } => {
            let data = read_seating(&input)?;
            print_summary(&data, &config.seating);

            for block in &data.blocks {
                println!(
                    "\n{}  students: {}  year: {}  branch: {}",
                    block.block_name, block.total_students, block.year, block.branch
                );
                println!("  PRN range: {} → {}", block.prn_from, block.prn_to);

                if students {
                    for student in &block.students {
                        println!(
                            "  {:>3}  {:<16} {:<28} {} ({})",
                            student.desk_no, student.prn, student.name, student.branch, student.year
                        );
                    }
                }
            }
        }

        Commands::Config { show, init } => {
            if init {
                let path = match &cli.config {
                    Some(path) => path.clone(),
                    None => Config::config_path()?,
                };
                if path.exists() {
                    println!("Config file already exists: {}", path.display());
                } else {
                    Config::default().save(&path)?;
                    println!("✔ Wrote default config: {}", path.display());
                }
            }

            if show || !init {
                let source = config
                    .source
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "built-in defaults".into());
                let seating = &config.seating;
                println!("Config ({}):", source);
                println!("  Institution: {}", seating.institution_name);
                println!("  Center code: {}", seating.center_code);
                println!("  Students per block: {}", seating.students_per_block);
                println!("  Default year: {}", seating.default_year);
                println!("  Branch codes:");
                for branch in &seating.branch_codes {
                    println!("    {} → {}", branch.code, branch.label);
                }
                println!("  Seasons:");
                for season in &seating.seasons {
                    println!("    {} → months {:?}", season.label, season.months);
                }
            }
        }
    }

    Ok(())
}

fn process_roster(input: &Path, seating: &SeatingConfig) -> Result<SeatingData> {
    println!("[1/3] Reading roster...");
    let table = reader::read_roster(input)?;
    println!("✔ {} rows\n", table.len());

    println!("[2/3] Assigning blocks...");
    let data = process_table(&table, seating)?;
    println!("✔ {} blocks\n", data.blocks.len());

    Ok(data)
}

fn read_seating(path: &Path) -> Result<SeatingData> {
    if !path.exists() {
        return Err(error::SeatPlanError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_seating(data: &SeatingData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn print_summary(data: &SeatingData, seating: &SeatingConfig) {
    println!("\nSummary:");
    println!("  Total students: {}", data.total_students);
    println!("  Total blocks: {}", data.blocks.len());
    println!("  Students per block: {}", seating.students_per_block);

    if data.blocks.is_empty() {
        println!("⚠ No seating blocks generated. Check the PRN column and branch codes.");
        println!(
            "  rows before filter: {}, after filter: {}, recognized codes: {}",
            data.debug.rows_before_filter,
            data.debug.rows_after_filter,
            data.debug.recognized_branch_codes.join(", ")
        );
    }
}
