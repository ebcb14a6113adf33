use anyhow::Context;
use clap::Parser;
use poetic_mail::config::cli::{ComposeArgs, DraftArgs};
use poetic_mail::config::{Command, LogFormat};
use poetic_mail::utils::error::ErrorSeverity;
use poetic_mail::utils::{logger, validation::Validate};
use poetic_mail::{
    AppConfig, CliConfig, ComposedMessage, Composer, ComposerError, Dispatcher, Draft,
    OpenAiGenerator, SmtpMailer, Transformer,
};
use std::io::{self, BufRead, Write};

type PoeticComposer = Composer<OpenAiGenerator, SmtpMailer>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Logging first so config errors are recorded.
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting poetic-mail");

    // Credentials must be present before any action runs.
    let config = match AppConfig::load(&cli).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    let generator = match OpenAiGenerator::from_config(&config) {
        Ok(generator) => generator,
        Err(e) => exit_with(&e),
    };
    let dispatcher = Dispatcher::new(SmtpMailer::from_config(&config), config.sender.clone());
    let composer = Composer::new(Transformer::new(generator), dispatcher);

    let outcome = match &cli.command {
        Command::Preview(args) => preview(&composer, args).await,
        Command::Send(args) => send(&composer, args).await,
        Command::Compose(args) => compose(&composer, args).await,
    };

    if let Err(e) = outcome {
        match e.downcast_ref::<ComposerError>() {
            Some(composer_error) => exit_with(composer_error),
            None => return Err(e),
        }
    }

    Ok(())
}

async fn preview(composer: &PoeticComposer, args: &DraftArgs) -> anyhow::Result<()> {
    let composed = composer.preview(&Draft::from(args)).await?;
    print_preview(&composed);
    Ok(())
}

async fn send(composer: &PoeticComposer, args: &DraftArgs) -> anyhow::Result<()> {
    // A separate process has nothing cached; the message is generated here.
    let mut cache = None;
    composer.send(&Draft::from(args), &mut cache).await?;
    println!("Email sent successfully! ✨");
    Ok(())
}

async fn compose(composer: &PoeticComposer, args: &ComposeArgs) -> anyhow::Result<()> {
    let draft = Draft::from(&args.draft);

    let mut cache: Option<ComposedMessage> = Some(composer.preview(&draft).await?);
    if let Some(composed) = &cache {
        print_preview(composed);
    }

    if !args.yes && !confirm("Send this email?")? {
        println!("Not sent.");
        return Ok(());
    }

    loop {
        match composer.send(&draft, &mut cache).await {
            Ok(()) => {
                println!("Email sent successfully! ✨");
                return Ok(());
            }
            Err(e @ ComposerError::DeliveryError { .. }) if !args.yes => {
                eprintln!("❌ {}", e.user_friendly_message());
                if !confirm("Retry sending the same message?")? {
                    return Err(e.into());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn print_preview(composed: &ComposedMessage) {
    println!("Preview of Your Poetic Email:");
    println!("Subject: {}", composed.subject);
    println!();
    println!("{}", composed.body);
    println!();
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush().context("failed to flush stdout")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read answer from stdin")?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn exit_with(e: &ComposerError) -> ! {
    tracing::error!(
        "❌ poetic-mail failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
