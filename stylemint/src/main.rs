use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use stylemint_lib::{stylemint, BuildConfig, Production, StaticBlocks};

const STYLEMINT_INTRO: &str = r#"
         __        __                 _       __
   _____/ /___  __/ /__  ____ ___  (_)___  / /_
  / ___/ __/ / / / / _ \/ __ `__ \/ / __ \/ __/
 (__  ) /_/ /_/ / /  __/ / / / / / / / / / /_
/____/\__/\__, /_/\___/_/ /_/ /_/_/_/ /_/\__/
         /____/

    Computed styles in, authored stylesheet out.
"#;

#[derive(Parser)]
#[command(name = "stylemint")]
#[command(about = "Rebuild a production stylesheet from a computed-style dump")]
struct Cli {
    /// Do not print the banner.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stage one only: write the generated stylesheet.
    Extract {
        /// Computed-style dump (JSON).
        dump: PathBuf,

        #[command(flatten)]
        selection: Selection,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Both stages: write the production stylesheet.
    Build {
        /// Computed-style dump (JSON).
        dump: PathBuf,

        #[command(flatten)]
        selection: Selection,

        #[command(flatten)]
        assets: AssetArgs,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Stage two only, over a previously generated stylesheet.
    Polish {
        /// Generated stylesheet.
        input: PathBuf,

        /// JSON build configuration; only its thresholds are used.
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        assets: AssetArgs,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct Selection {
    /// JSON build configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit provenance comments.
    #[arg(long)]
    comments: bool,

    /// Only emit selectors containing this keyword. Repeatable.
    #[arg(long = "keyword")]
    keywords: Vec<String>,
}

#[derive(Args)]
struct AssetArgs {
    /// CSS file placed before the generated rules. Repeatable, kept in order.
    #[arg(long)]
    preamble: Vec<PathBuf>,

    /// CSS file placed after the generated rules. Repeatable, kept in order.
    #[arg(long)]
    postamble: Vec<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // parse the args given in terminal
    let cli = Cli::parse();
    if !cli.quiet {
        eprintln!("{}", STYLEMINT_INTRO);
    }

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Extract {
            dump,
            selection,
            output,
        } => {
            let config = selection.into_config()?;
            let dump_json = read(&dump)?;
            let sheet = stylemint::extract(&dump_json, &config)?;
            log::info!(
                "extracted {} id rules and {} class rules from {} elements",
                sheet.id_rules.len(),
                sheet.class_rules.len(),
                sheet.element_count
            );
            write(output.as_deref(), &sheet.to_css())
        }
        Command::Build {
            dump,
            selection,
            assets,
            output,
        } => {
            let config = selection.into_config()?;
            let assets = assets.load()?;
            let dump_json = read(&dump)?;
            let production = stylemint::build(&dump_json, &config, &assets)?;
            report(&production);
            write(output.as_deref(), &production.css)
        }
        Command::Polish {
            input,
            config,
            assets,
            output,
        } => {
            let config = load_config(config.as_deref())?;
            let assets = assets.load()?;
            let generated = read(&input)?;
            let production = stylemint::polish(&generated, &config.thresholds, &assets);
            report(&production);
            write(output.as_deref(), &production.css)
        }
    }
}

impl Selection {
    /// Config file first, then command line flags on top.
    fn into_config(self) -> Result<BuildConfig> {
        let mut config = load_config(self.config.as_deref())?;
        if self.comments {
            config.include_comments = true;
        }
        if !self.keywords.is_empty() {
            config.selector_keywords = self.keywords;
        }
        Ok(config)
    }
}

impl AssetArgs {
    fn load(&self) -> Result<StaticBlocks> {
        let preamble = self.preamble.iter().map(|p| read(p)).collect::<Result<_>>()?;
        let postamble = self.postamble.iter().map(|p| read(p)).collect::<Result<_>>()?;
        Ok(StaticBlocks::new(preamble, postamble))
    }
}

fn load_config(path: Option<&Path>) -> Result<BuildConfig> {
    match path {
        Some(path) => {
            let json = read(path)?;
            BuildConfig::from_json(&json)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
        None => Ok(BuildConfig::default()),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write(output: Option<&Path>, css: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, css).with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
            Ok(())
        }
        None => {
            print!("{}", css);
            Ok(())
        }
    }
}

fn report(production: &Production) {
    let r = &production.report;
    log::info!(
        "{} elements -> {} id rules, {} class rules ({} tag-only elements skipped)",
        r.elements,
        r.id_rules,
        r.class_rules,
        r.tag_elements
    );
    log::info!(
        "recovered {} centered elements, collapsed {} border radii",
        r.centered,
        r.radius_collapsed
    );
}
