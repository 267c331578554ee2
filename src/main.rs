use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use modwatch::config::AppConfig;
use modwatch::report::render_table;
use modwatch::run::{Pipeline, RunOptions};

#[derive(Parser)]
#[command(name = "modwatch")]
#[command(version, about = "Report the latest releases of tracked Thunderstore mods")]
struct Cli {
    /// URL (or path) of the JSON mod list
    #[arg(long)]
    mods_url: Option<String>,

    /// Write the results as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prior snapshot (URL or path) to diff against
    #[arg(long)]
    snapshot: Option<String>,

    /// Send a Telegram notification with the changes
    #[arg(long)]
    send_telegram: bool,

    /// Show and save every field instead of name, version, date and URL
    #[arg(long)]
    full_output: bool,

    /// Maximum number of registry requests in flight
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Also write JSON logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    telegram_token: Option<String>,

    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    telegram_chat_id: Option<String>,
}

impl Cli {
    fn into_options(self, config: &AppConfig) -> RunOptions {
        let defaults = RunOptions::from_config(config);
        RunOptions {
            mods_url: self.mods_url.unwrap_or(defaults.mods_url),
            snapshot: self.snapshot.or(defaults.snapshot),
            output: self.output,
            full_output: self.full_output,
            send_notification: self.send_telegram,
            concurrency: self.concurrency.unwrap_or(defaults.concurrency).max(1),
            telegram_token: self.telegram_token,
            telegram_chat_id: self.telegram_chat_id,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = modwatch::logging::init(cli.verbose, cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load_default(),
    };
    let full_output = cli.full_output;
    let options = cli.into_options(&config);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let pipeline = Pipeline::new(config)?;
            let summary = pipeline.collect(&options).await?;
            println!("{}", render_table(summary.records(), full_output));
            pipeline.report(&summary, &options).await
        })
}
