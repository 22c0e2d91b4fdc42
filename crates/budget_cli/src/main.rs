mod commands;
mod shell;

use anyhow::{Context, Result};
use base::notifier::{ConsoleNotifier, Notifier, WebhookNotifier};
use base::requests::ureq::UreqRequestApi;
use budget_calculator::{BudgetCalculator, Catalog, CatalogApi, HttpCatalogApi, Settings};
use crossbeam::channel::{self, Receiver};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::thread;

use crate::commands::Command;
use crate::shell::Flow;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

fn init_logger(settings: &Settings) -> Result<()> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let mut config =
        Config::builder().appender(Appender::builder().build("stderr", Box::new(stderr)));
    let mut root = Root::builder().appender("stderr");

    if let Some(path) = &settings.log_file {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(path)
            .context(format!("an error on opening the log file {}", path.display()))?;

        config = config.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    let config = config
        .build(root.build(settings.log_level))
        .context("invalid logger configuration")?;

    log4rs::init_config(config).context("an error on initializing the logger")?;
    Ok(())
}

fn notifier(settings: &Settings) -> Box<dyn Notifier> {
    match &settings.notification_webhook_url {
        Some(url) => Box::new(WebhookNotifier::new(url.clone(), UreqRequestApi::new())),
        None => Box::new(ConsoleNotifier::new()),
    }
}

/// Fetches the catalog off the input thread. The response arrives on the returned
/// channel whenever the service answers.
fn spawn_catalog_load<N: Notifier>(
    settings: &Settings,
    calculator: &mut BudgetCalculator<N>,
) -> Receiver<Result<Catalog>> {
    let (sender, receiver) = channel::bounded(1);

    if calculator.request_catalog_load() {
        let api = HttpCatalogApi::new(
            settings.catalog_api_url.clone(),
            settings.catalog_auth_token.clone(),
            UreqRequestApi::new(),
        );

        thread::spawn(move || {
            if sender.send(api.search_products()).is_err() {
                log::debug!("the shell exited before the catalog was loaded");
            }
        });
    }

    receiver
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let settings = Settings::from_env()?;
    init_logger(&settings)?;

    let mut calculator = BudgetCalculator::new(notifier(&settings))
        .with_notification_title(&settings.notification_title);
    let catalog_responses = spawn_catalog_load(&settings, &mut calculator);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "type `help` to list the commands")?;

    for line in stdin.lock().lines() {
        let line = line.context("an error on reading a command")?;

        if let Ok(response) = catalog_responses.try_recv() {
            calculator.on_catalog_loaded(response);
        }

        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::from_str(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(stdout, "{}, type `help` to list the commands", e)?;
                continue;
            }
        };

        if let Flow::Quit = shell::execute(command, &mut calculator, &mut stdout)? {
            break;
        }

        stdout.flush()?;
    }

    Ok(())
}
