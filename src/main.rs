use anyhow::Result;
use clap::Parser;
use pwforge::random::SEED_LEN;
use pwforge::{GenerationConfig, KeystreamSource, generate, ui};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "pwforge",
    version,
    about = "Generate a random password with character-class constraints"
)]
struct Cli {
    /// Length of the password
    #[arg(short, long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(1..))]
    length: u32,

    /// Include letters (a-z, A-Z)
    #[arg(long, overrides_with = "no_letters")]
    letters: bool,

    /// Exclude letters
    #[arg(long, overrides_with = "letters")]
    no_letters: bool,

    /// Include numbers (0-9)
    #[arg(long, overrides_with = "no_numbers")]
    numbers: bool,

    /// Exclude numbers
    #[arg(long, overrides_with = "numbers")]
    no_numbers: bool,

    /// Include symbols (!@#$%^&* etc.)
    #[arg(long, overrides_with = "no_symbols")]
    symbols: bool,

    /// Exclude symbols
    #[arg(long, overrides_with = "symbols")]
    no_symbols: bool,

    /// Enforce complexity (at least one of each selected type)
    #[arg(short = 'c', long)]
    enforce_complexity: bool,

    /// Characters to exclude from the password
    #[arg(short, long, default_value = "")]
    exclude: String,

    /// Prompt for the settings on the terminal
    #[arg(short, long)]
    interactive: bool,

    /// 64 hex digits seeding the keystream for reproducible output
    #[arg(long, value_parser = parse_seed)]
    seed: Option<[u8; SEED_LEN]>,

    /// Show settings and generation stats
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn generation_config(&self) -> GenerationConfig {
        GenerationConfig::default()
            .with_length(self.length as usize)
            .letters(self.letters || !self.no_letters)
            .digits(self.numbers || !self.no_numbers)
            .symbols(self.symbols || !self.no_symbols)
            .enforce_complexity(self.enforce_complexity)
            .exclude(&self.exclude)
    }
}

fn parse_seed(s: &str) -> Result<[u8; SEED_LEN], String> {
    let bytes = hex::decode(s.trim()).map_err(|e| format!("invalid hex seed: {}", e))?;
    <[u8; SEED_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
        format!(
            "seed must be {} bytes ({} hex digits), got {} bytes",
            SEED_LEN,
            SEED_LEN * 2,
            bytes.len()
        )
    })
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: !cli.no_color && ui::detect_color_support(),
        verbose: cli.verbose,
    };

    if cli.interactive {
        ui::run_interactive(&options)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = cli.generation_config();
    let mut rng = match cli.seed {
        Some(seed) => KeystreamSource::from_seed(&seed),
        None => KeystreamSource::from_entropy(),
    };

    match generate(&config, &mut rng) {
        Ok(password) => {
            ui::display_output(&password, &config, &options);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            ui::display_error(&err, &options);
            Ok(ExitCode::FAILURE)
        }
    }
}
