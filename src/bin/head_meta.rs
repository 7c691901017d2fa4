//! Command line front end: prints the head metadata of a file, stdin, or a
//! URL as JSON.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use head_meta::{HeadMetadata, Options};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "head-meta", version, about = "Extract metadata from the <head> of an HTML document")]
struct Cli {
    /// HTML file to read, `-` or nothing for stdin.
    input: Option<PathBuf>,

    /// Fetch the document from this URL instead of reading a file.
    #[cfg(feature = "fetch")]
    #[arg(long, conflicts_with = "input")]
    url: Option<String>,

    /// Fetch timeout in seconds.
    #[arg(long, env = "HEAD_META_TIMEOUT", default_value_t = 10)]
    timeout: u64,

    /// User-Agent header sent when fetching.
    #[arg(long, env = "HEAD_META_USER_AGENT")]
    user_agent: Option<String>,

    /// Fail when a single token needs more than this many bytes.
    #[arg(long, env = "HEAD_META_MAX_BUFFER")]
    max_buffer: Option<usize>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn options(&self) -> Options {
        let mut options = Options {
            timeout: Duration::from_secs(self.timeout),
            max_buffer: self.max_buffer,
            ..Options::default()
        };
        if let Some(user_agent) = &self.user_agent {
            options.user_agent.clone_from(user_agent);
        }
        options
    }

    fn run(&self) -> head_meta::Result<HeadMetadata> {
        let options = self.options();

        #[cfg(feature = "fetch")]
        if let Some(url) = &self.url {
            return head_meta::process_url(url, &options);
        }

        match &self.input {
            Some(path) if path.as_os_str() != "-" => {
                let file = File::open(path)?;
                head_meta::parse_reader_with_options(BufReader::new(file), &options)
            }
            _ => head_meta::parse_reader_with_options(io::stdin().lock(), &options),
        }
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let metadata = match cli.run() {
        Ok(metadata) => metadata,
        Err(err) => {
            eprintln!("head-meta: {err}");
            return ExitCode::FAILURE;
        }
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&metadata)
    } else {
        serde_json::to_string(&metadata)
    };
    match json {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("head-meta: {err}");
            ExitCode::FAILURE
        }
    }
}
