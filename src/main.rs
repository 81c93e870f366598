//! LingoTalks - translate, speak and define from the terminal
//!
//! The desktop app lives in `lingotalks-launcher`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lingotalks::audio::RodioDevice;
use lingotalks::config::Config;
use lingotalks::dictionary::DictionaryClient;
use lingotalks::languages::{Language, SUPPORTED};
use lingotalks::playback::{PlayState, PlaybackController};
use lingotalks::translate::{GoogleTranslator, TranslationClient};
use lingotalks::{notes, tts};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate English text
    Translate {
        #[arg(required = true)]
        text: Vec<String>,

        /// Target language code (e.g. es, hi, ja)
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// Translate text, then speak it aloud
    Speak {
        #[arg(required = true)]
        text: Vec<String>,

        #[arg(short, long)]
        lang: Option<Language>,

        /// Speak the text as given
        #[arg(long)]
        no_translate: bool,
    },

    /// Show the meaning of an English word
    Define {
        word: String,

        /// Also translate the definition
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// Work with notes files
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },

    /// List supported languages
    Languages,
}

#[derive(Subcommand, Debug)]
enum NotesAction {
    /// Translate a notes file
    Translate {
        path: PathBuf,

        #[arg(short, long)]
        lang: Option<Language>,

        /// Write the translation here instead of printing it
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load().unwrap_or_default();

    lingotalks::logging::init(args.verbose, &config.log_level)?;
    info!("🌍 LingoTalks v{} starting...", env!("CARGO_PKG_VERSION"));

    let default_lang = Language::from_code_or_default(&config.default_language);
    let translator = GoogleTranslator::from_config(&config);

    match args.command {
        Commands::Translate { text, lang } => {
            let target = lang.unwrap_or(default_lang);
            let translated = translator
                .translate(&text.join(" "), "auto", target.code)
                .await?;
            println!("{}", translated);
        }
        Commands::Speak {
            text,
            lang,
            no_translate,
        } => {
            let target = lang.unwrap_or(default_lang);
            speak(&config, &translator, &text.join(" "), target, no_translate).await?;
        }
        Commands::Define { word, lang } => {
            let target = lang.unwrap_or(default_lang);
            let dictionary = DictionaryClient::from_config(&config);
            let text = dictionary.describe(&word, target.code, &translator).await?;
            println!("{}", text.trim_end());
        }
        Commands::Notes {
            action: NotesAction::Translate { path, lang, out },
        } => {
            let target = lang.unwrap_or(default_lang);
            let translated =
                notes::translate_file(&translator, &path, target.code, out.as_deref()).await?;
            match out {
                Some(out) => println!("Saved translation to {}", out.display()),
                None => println!("{}", translated),
            }
        }
        Commands::Languages => {
            for lang in SUPPORTED {
                println!("{:>4}  {}", lang.code, lang.name);
            }
        }
    }

    Ok(())
}

async fn speak(
    config: &Config,
    translator: &GoogleTranslator,
    text: &str,
    target: Language,
    no_translate: bool,
) -> Result<()> {
    let spoken = if no_translate {
        text.to_string()
    } else {
        info!("🌐 Translating to {}...", target);
        let translated = translator.translate(text, "auto", target.code).await?;
        println!("{}", translated);
        translated
    };

    let controller = PlaybackController::new(
        Arc::new(tts::build_synthesizer(config)),
        Arc::new(RodioDevice::new()),
    );

    info!("🎙️ Generating audio...");
    controller
        .generate(&spoken, target.code)
        .await
        .context("Speech generation failed")?;
    controller.play().context("Playback failed")?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                warn!("🛑 Interrupted");
                controller.stop();
                break;
            }
            _ = tokio::time::sleep(Duration::from_millis(200)) => {
                if controller.state() != PlayState::Playing {
                    break;
                }
            }
        }
    }

    controller.cleanup();
    Ok(())
}
