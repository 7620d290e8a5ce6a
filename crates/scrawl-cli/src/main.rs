//! Scrawl CLI - render a challenge image from the command line

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use scrawl::fontdb::FontCatalog;
use scrawl::{ChallengeRenderer, Hinting, RenderConfig};

/// Scrawl - text-to-challenge-image generator
#[derive(Parser, Debug)]
#[command(name = "scrawl")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Text to render; use \n in quotes for multiple lines
    text: String,

    /// Directory of font files (.ttf, .ttc, .otf)
    #[arg(short = 'f', long = "fonts")]
    fonts: PathBuf,

    /// Output image path
    #[arg(short = 'o', long = "output", default_value = "challenge.png")]
    output: PathBuf,

    /// Font size in points
    #[arg(short = 's', long = "size", default_value = "72")]
    size: f32,

    /// Raster resolution in dots per inch
    #[arg(long = "dpi", default_value = "72")]
    dpi: f32,

    /// Outline hinting mode
    #[arg(long = "hinting", value_enum, default_value = "full")]
    hinting: HintingArg,

    /// Apply the randomized distortion pipeline
    #[arg(short = 'e', long = "effects")]
    effects: bool,

    /// Also write <output>.json with the chosen effect parameters
    #[arg(long = "metadata")]
    metadata: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum HintingArg {
    None,
    Full,
}

impl From<HintingArg> for Hinting {
    fn from(value: HintingArg) -> Self {
        match value {
            HintingArg::None => Hinting::None,
            HintingArg::Full => Hinting::Full,
        }
    }
}

fn run(cli: &Cli) -> scrawl::error::Result<()> {
    let catalog = FontCatalog::scan(&cli.fonts)?;

    let config = RenderConfig {
        size: cli.size,
        dpi: cli.dpi,
        hinting: cli.hinting.into(),
    };
    let renderer = ChallengeRenderer::new(catalog, config);

    // The shell hands "\n" through as two characters
    let text = cli.text.replace("\\n", "\n");
    let challenge = renderer.generate(&text, cli.effects)?;

    std::fs::write(&cli.output, &challenge.png)?;
    println!(
        "wrote {} ({}x{})",
        cli.output.display(),
        challenge.width,
        challenge.height
    );

    if cli.metadata {
        if let Some(params) = &challenge.effects {
            let mut path = cli.output.clone();
            path.as_mut_os_string().push(".json");
            let json = serde_json::to_string_pretty(params).map_err(std::io::Error::other)?;
            std::fs::write(&path, json)?;
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
