use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the production line dice game as a Monte Carlo simulation
    Simulate(SimulateArgs),
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Optional simulation config YAML; flags override its values
    #[arg(short, long)]
    pub config: Option<String>,
    /// Number of days per iteration
    #[arg(short, long)]
    pub days: Option<usize>,
    /// Number of workers on the line
    #[arg(short, long)]
    pub workers: Option<usize>,
    /// Number of simulation iterations
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,
    /// Lowest possible roll
    #[arg(long)]
    pub low: Option<f64>,
    /// Highest possible roll
    #[arg(long)]
    pub high: Option<f64>,
    /// Allow decimal rolls instead of rounding to whole numbers
    #[arg(long)]
    pub decimals: bool,
    /// Seed for reproducible rolls
    #[arg(long)]
    pub seed: Option<u64>,
    /// Use this capacity for every cell instead of rolling
    #[arg(long)]
    pub fixed_roll: Option<f64>,
    /// Output file
    #[arg(short, long, default_value_t = default_output_path())]
    pub output: String,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
    /// Include every iteration's grid in the output file
    #[arg(long)]
    pub include_iterations: bool,
    /// Also write all sheets as tab-separated text to this file
    #[arg(long)]
    pub sheets: Option<String>,
    /// Also render a histogram of daily output to this PNG file
    #[arg(long)]
    pub histogram: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

fn default_output_path() -> String {
    format!("DiceGameOutput_{}.yaml", Local::now().format("%Y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_defaults_output_to_timestamped_file() {
        let args = CliArgs::parse_from(["dicegame", "simulate"]);

        if let Commands::Simulate(args) = args.command {
            assert!(args.output.starts_with("DiceGameOutput_"));
            assert!(args.output.ends_with(".yaml"));
            assert_eq!(args.format, OutputFormat::Yaml);
            assert_eq!(args.days, None);
            assert!(!args.decimals);
        } else {
            panic!("expected simulate command");
        }
    }

    #[test]
    fn simulate_parses_line_options() {
        let args = CliArgs::parse_from([
            "dicegame",
            "simulate",
            "-d",
            "5",
            "-w",
            "3",
            "-n",
            "20",
            "--low",
            "2",
            "--high",
            "4",
            "--decimals",
            "--seed",
            "7",
            "-f",
            "json",
            "-o",
            "out.json",
        ]);

        if let Commands::Simulate(args) = args.command {
            assert_eq!(args.days, Some(5));
            assert_eq!(args.workers, Some(3));
            assert_eq!(args.iterations, Some(20));
            assert_eq!(args.low, Some(2.0));
            assert_eq!(args.high, Some(4.0));
            assert!(args.decimals);
            assert_eq!(args.seed, Some(7));
            assert_eq!(args.format, OutputFormat::Json);
            assert_eq!(args.output, "out.json");
        } else {
            panic!("expected simulate command");
        }
    }
}
