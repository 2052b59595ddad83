use std::io::Write;
use std::path::PathBuf;
use std::process;
use clap::{Parser, ValueEnum};
use anyhow::{Result, Context};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use airdrop_config::{codec, compare, get_config, Format};

#[derive(Parser, Debug)]
#[command(name = "airdrop-config")]
#[command(about = "Export the airdrop allocation table as JSON or CSV", long_about = None)]
struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, default_value_t = false)]
    pretty: bool,

    /// Print decimals and entry count
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Reference JSON or CSV file to compare the table against
    #[arg(long, conflicts_with_all = ["output", "format", "pretty"])]
    compare: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Format::Json,
            OutputFormat::Csv => Format::Csv,
        }
    }
}

/// Executes one invocation and returns the process exit code: 1 when a
/// comparison finds differences, 0 otherwise.
fn run(args: &Args, out: &mut impl Write) -> Result<i32> {
    let table = get_config();

    if args.verbose {
        info!("Decimals: {}", table.decimals);
        info!("Total addresses: {}", table.len());
    }

    if let Some(reference_path) = &args.compare {
        info!("Loading reference table from {:?}", reference_path);
        let reference = codec::read_file(reference_path, table.decimals)
            .with_context(|| format!("Failed to load reference file: {:?}", reference_path))?;

        let result = compare(table, &reference);
        write!(out, "{}", result)?;

        if !result.is_success() {
            warn!("Allocation table differs from {:?}", reference_path);
            return Ok(1);
        }
        return Ok(0);
    }

    let format = Format::from(args.format);
    if args.pretty && format == Format::Csv {
        warn!("--pretty has no effect on CSV output");
    }

    match &args.output {
        Some(path) => {
            codec::write_file(path, table, format, args.pretty)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            info!("Wrote {} allocations to {:?}", table.len(), path);
        }
        None => {
            let rendered = codec::render(table, format, args.pretty)?;
            out.write_all(rendered.as_bytes())
                .context("Failed to write to stdout")?;
            if !rendered.ends_with('\n') {
                writeln!(out)?;
            }
        }
    }

    Ok(0)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let exit_code = run(&args, &mut std::io::stdout().lock())?;

    if exit_code != 0 {
        process::exit(exit_code);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use airdrop_config::AllocationTable;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("airdrop-config-cli-{}-{}", std::process::id(), name))
    }

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("airdrop-config").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_export_json_to_stdout() {
        let mut out = Vec::new();
        assert_eq!(run(&parse(&[]), &mut out).unwrap(), 0);

        let table = codec::from_json(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(&table, get_config());
    }

    #[test]
    fn test_export_csv_to_stdout() {
        let mut out = Vec::new();
        assert_eq!(run(&parse(&["--format", "csv"]), &mut out).unwrap(), 0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("address,amount\n"));
        assert_eq!(codec::from_csv(&text, 18).unwrap(), *get_config());
    }

    #[test]
    fn test_export_to_file() {
        let path = temp_path("export.csv");
        let path_str = path.to_str().unwrap();
        let mut out = Vec::new();

        assert_eq!(run(&parse(&["-f", "csv", "-o", path_str]), &mut out).unwrap(), 0);
        assert!(out.is_empty());

        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(written, codec::to_csv(get_config()).unwrap());
    }

    #[test]
    fn test_compare_matching_reference() {
        let path = temp_path("same.json");
        codec::write_file(&path, get_config(), Format::Json, false).unwrap();

        let mut out = Vec::new();
        let code = run(&parse(&["--compare", path.to_str().unwrap()]), &mut out).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(code, 0);
        assert!(String::from_utf8(out).unwrap().contains("result: identical"));
    }

    #[test]
    fn test_compare_changed_reference() {
        let mut airdrop = get_config().airdrop.clone();
        airdrop.insert("0xDED270233f774c902Bb77CB8A1e2960D33601B69".to_string(), 724);
        let reference = AllocationTable::new(18, airdrop);

        let path = temp_path("changed.csv");
        codec::write_file(&path, &reference, Format::Csv, false).unwrap();

        let mut out = Vec::new();
        let code = run(&parse(&["--compare", path.to_str().unwrap()]), &mut out).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(code, 1);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("0xDED270233f774c902Bb77CB8A1e2960D33601B69: 723 (reference 724)"));
    }

    #[test]
    fn test_compare_missing_reference_fails() {
        let path = temp_path("absent.json");
        let mut out = Vec::new();
        assert!(run(&parse(&["--compare", path.to_str().unwrap()]), &mut out).is_err());
    }

    #[test]
    fn test_compare_conflicts_with_export_flags() {
        for extra in [["--output", "x.json"], ["--format", "csv"]] {
            let argv = ["airdrop-config", "--compare", "ref.json", extra[0], extra[1]];
            assert!(Args::try_parse_from(argv).is_err());
        }
        assert!(Args::try_parse_from(["airdrop-config", "--compare", "ref.json", "--pretty"]).is_err());
        assert!(Args::try_parse_from(["airdrop-config", "--compare", "ref.json", "--verbose"]).is_ok());
    }
}
