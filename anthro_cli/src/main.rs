use anthro_core::*;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anthro")]
#[command(about = "Anthropometric risk indices (BMI, WHR, WHtR)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the indices and print them (default)
    Calc {
        #[command(flatten)]
        measurements: MeasurementArgs,

        /// Abort if any measurement or the sex is missing or invalid
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Compute the indices and write them to a CSV file
    Export {
        #[command(flatten)]
        measurements: MeasurementArgs,

        /// Abort if any measurement or the sex is missing or invalid
        #[arg(long)]
        strict: bool,

        /// Output directory (defaults to the configured export dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Output filename (defaults to the configured filename)
        #[arg(long)]
        filename: Option<String>,
    },
}

#[derive(Args, Default)]
struct MeasurementArgs {
    /// Body mass in kilograms
    #[arg(long, allow_negative_numbers = true)]
    mass: Option<f64>,

    /// Height in metres
    #[arg(long, allow_negative_numbers = true)]
    height: Option<f64>,

    /// Waist circumference in centimetres
    #[arg(long, allow_negative_numbers = true)]
    waist: Option<f64>,

    /// Hip circumference in centimetres
    #[arg(long, allow_negative_numbers = true)]
    hip: Option<f64>,

    /// Biological sex (male, female, m, f)
    #[arg(long)]
    sex: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

fn main() {
    // Initialize logging
    anthro_core::logging::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Calc {
            measurements,
            strict,
            format,
        }) => cmd_calc(measurements, strict, format, &config),
        Some(Commands::Export {
            measurements,
            strict,
            out_dir,
            filename,
        }) => cmd_export(measurements, strict, out_dir, filename, &config),
        None => {
            // Default to "calc" with nothing filled in
            cmd_calc(MeasurementArgs::default(), false, Format::Text, &config)
        }
    }
}

fn cmd_calc(args: MeasurementArgs, strict: bool, format: Format, config: &Config) -> Result<()> {
    let mode = resolve_mode(strict, config);
    let mut hub = build_hub(mode);
    let record = hub.compute(args.into_input(mode)?)?;

    match format {
        Format::Text => println!("{}", render_text(&display_lines(&record.report))),
        Format::Json => println!("{}", export::to_json(record)?),
        Format::Csv => print!("{}", export::to_csv(record)?),
    }

    Ok(())
}

fn cmd_export(
    args: MeasurementArgs,
    strict: bool,
    out_dir: Option<PathBuf>,
    filename: Option<String>,
    config: &Config,
) -> Result<()> {
    let mode = resolve_mode(strict, config);
    let mut hub = build_hub(mode);
    let record = hub.compute(args.into_input(mode)?)?;

    if record.report.is_empty() {
        println!("{}", render_text(&display_lines(&record.report)));
        return Ok(());
    }

    let dir = out_dir.unwrap_or_else(|| config.export.dir.clone());
    let filename = filename.unwrap_or_else(|| config.export.csv_filename.clone());
    let path = export::write_csv(record, &dir, &filename)?;

    println!("✓ Exported indices to CSV");
    println!("  CSV: {}", path.display());

    Ok(())
}

fn resolve_mode(strict: bool, config: &Config) -> ValidationMode {
    if strict {
        ValidationMode::Strict
    } else {
        config.calculation.mode
    }
}

fn build_hub(mode: ValidationMode) -> ResultHub {
    let mut hub = ResultHub::new(mode);
    hub.register_observer(|record: &ResultRecord| {
        tracing::debug!(
            bmi = ?record.report.bmi,
            whr = ?record.report.whr,
            whtr = ?record.report.whtr,
            "Computed result"
        );
    });
    hub
}

impl MeasurementArgs {
    /// Convert flags into a measurement input.
    ///
    /// An unrecognised sex is an error in strict mode and unknown otherwise.
    /// Strict mode reports bad measurements before a bad sex.
    fn into_input(self, mode: ValidationMode) -> Result<MeasurementInput> {
        let mut input = MeasurementInput {
            mass_kg: self.mass,
            height_m: self.height,
            waist_cm: self.waist,
            hip_cm: self.hip,
            sex: None,
        };

        if let Some(raw) = self.sex.as_deref() {
            match raw.parse::<Sex>() {
                Ok(sex) => input.sex = Some(sex),
                Err(e) if mode == ValidationMode::Strict => {
                    calculator::validate_measurements(&input)?;
                    return Err(e);
                }
                Err(_) => {
                    tracing::warn!("Unrecognised sex {:?}, treating as unknown", raw);
                }
            }
        }

        Ok(input)
    }
}
