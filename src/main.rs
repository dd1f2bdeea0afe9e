use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;
use tweetmeta::config::Config;
use tweetmeta::{Error, Input};

#[derive(Parser)]
#[command(name = "tweetmeta", about = "tweetmeta — normalize tweet snapshots into catalogue metadata")]
struct Cli {
    /// Input JSON file with `hint` and optional `snapshot` ("-" for stdin)
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the site base URL used for profile, page and tag links
    #[arg(long)]
    site_url: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log filter when RUST_LOG is unset (default: warn)
    #[arg(long)]
    log: Option<String>,
}

fn die(err: &Error) -> ! {
    eprintln!("error: {}", err);
    process::exit(1);
}

fn load_config(cli: &Cli) -> Config {
    if let Some(ref path) = cli.config {
        return Config::from_file(path).unwrap_or_else(|e| die(&e));
    }
    for p in &["tweetmeta.config.json", "config/tweetmeta.config.json"] {
        let path = PathBuf::from(p);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "using config file");
            return Config::from_file(&path).unwrap_or_else(|e| die(&e));
        }
    }
    Config::default()
}

fn main() {
    let cli = Cli::parse();
    tweetmeta::logging::init_logging(cli.log.as_deref());

    let mut config = load_config(&cli);
    if let Some(ref site_url) = cli.site_url {
        config.site_url = site_url.clone();
    }

    let input = Input::from_path(&cli.input).unwrap_or_else(|e| die(&e));
    let meta = input.normalize(&config);

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&meta)
    } else {
        serde_json::to_string(&meta)
    };
    let mut result = rendered.unwrap_or_else(|e| die(&Error::Output(e)));
    result.push('\n');

    if let Some(ref output_path) = cli.output {
        fs::write(output_path, &result).unwrap_or_else(|source| {
            die(&Error::Write {
                path: output_path.clone(),
                source,
            })
        });
        eprintln!(
            "normalized {} -> {} ({} image url(s))",
            cli.input.display(),
            output_path.display(),
            meta.image_urls.len()
        );
    } else {
        print!("{}", result);
    }
}
