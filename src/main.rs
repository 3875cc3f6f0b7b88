use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use image::imageops::FilterType;

use hudkit_renderer::{AssetSet, DensityExporter, FontBook, SceneComposer, SceneSpec, Theme};

/// hudkit: render store artwork and export launcher icons
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a built-in asset set
    Scenes {
        /// Asset set to render
        #[clap(short, long, value_enum, default_value = "all")]
        set: SetArg,

        /// Output directory
        #[clap(short, long, default_value = "play_console_assets")]
        out: PathBuf,

        #[clap(flatten)]
        style: StyleArgs,
    },

    /// Render scenes from a JSON file (one scene or an array)
    Render {
        /// Path to the scene JSON file
        input: PathBuf,

        /// Output directory
        #[clap(short, long, default_value = ".")]
        out: PathBuf,

        #[clap(flatten)]
        style: StyleArgs,
    },

    /// Export density-bucketed launcher icons from a master image
    Icons {
        /// Path to the master icon
        master: PathBuf,

        /// Resource directory receiving the mipmap-* folders
        #[clap(short, long)]
        out: PathBuf,

        /// Allow targets larger than the master
        #[clap(long)]
        allow_upscale: bool,

        /// Resampling filter
        #[clap(long, value_enum, default_value = "lanczos3")]
        filter: FilterArg,
    },

    /// Print a built-in theme as JSON
    Theme {
        #[clap(value_enum, default_value = "futuristic")]
        set: SetArg,
    },
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Theme JSON overriding the asset set's theme
    #[clap(long)]
    theme: Option<PathBuf>,

    /// Extra TrueType font files to load (repeatable)
    #[clap(long = "font")]
    fonts: Vec<PathBuf>,

    /// Load the operating system's fonts
    #[clap(long)]
    system_fonts: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SetArg {
    Futuristic,
    Dev,
    All,
}

impl SetArg {
    fn sets(self) -> Vec<AssetSet> {
        match self {
            Self::Futuristic => vec![AssetSet::Futuristic],
            Self::Dev => vec![AssetSet::Dev],
            Self::All => AssetSet::ALL.to_vec(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FilterArg {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<FilterArg> for FilterType {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Nearest => FilterType::Nearest,
            FilterArg::Triangle => FilterType::Triangle,
            FilterArg::CatmullRom => FilterType::CatmullRom,
            FilterArg::Gaussian => FilterType::Gaussian,
            FilterArg::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl StyleArgs {
    fn fonts(&self) -> FontBook {
        let mut builder = FontBook::builder();
        if self.system_fonts {
            builder = builder.system_fonts();
        }
        for path in &self.fonts {
            builder = builder.font_file(path);
        }
        builder.build()
    }

    fn theme_or(&self, fallback: Theme) -> Result<Theme, Box<dyn Error>> {
        match &self.theme {
            Some(path) => Ok(Theme::from_json(&read(path)?)?),
            None => Ok(fallback),
        }
    }
}

fn read(path: &Path) -> Result<String, Box<dyn Error>> {
    fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()).into())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Scenes { set, out, style } => {
            let fonts = style.fonts();
            for set in set.sets() {
                let composer = SceneComposer::new(style.theme_or(set.theme())?, fonts.clone());
                let written = composer.render_all(&set.scenes(), &out)?;
                log::info!("{}: wrote {} scenes to {}", set.name(), written.len(), out.display());
            }
        }
        Command::Render { input, out, style } => {
            let scenes = SceneSpec::list_from_json(&read(&input)?)?;
            let composer = SceneComposer::new(style.theme_or(Theme::default())?, style.fonts());
            let written = composer.render_all(&scenes, &out)?;
            log::info!("wrote {} scenes to {}", written.len(), out.display());
        }
        Command::Icons {
            master,
            out,
            allow_upscale,
            filter,
        } => {
            let report = DensityExporter::new()
                .allow_upscale(allow_upscale)
                .with_filter(filter.into())
                .export(&master, &out)?;
            log::info!("wrote {} icons to {}", report.file_count(), report.out_dir.display());
        }
        Command::Theme { set } => {
            let theme = match set {
                SetArg::Dev => Theme::dev(),
                SetArg::Futuristic | SetArg::All => Theme::futuristic(),
            };
            println!("{}", theme.to_json_pretty()?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
