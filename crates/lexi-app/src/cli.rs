use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use lexi_capability::definitions;
use lexi_capability::remote::RemoteTranslatorFactory;
use lexi_capability::translator::{self, TranslationRequest};
use lexi_capability::{Capabilities, LifecyclePolicy};
use lexi_config::Config;
use lexi_lang_english::{DeepLTranslator, FallbackDictionary};
use lexi_store::{JsonFileStore, Store, now_ms};
use lexi_types::{ReadingLevel, TranslationRecord};

use crate::controller::AppController;
use crate::host::{HostCommand, HostEvent};
use crate::state::AppState;
use crate::{page, profile};

#[derive(Debug, Parser)]
#[command(name = "lexi", version, about = "Immersive reading and vocabulary engine")]
pub struct Cli {
    /// Config profile under the user config directory
    #[arg(long, global = true, default_value = "main")]
    pub profile: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the words that would be highlighted on a plain-text page
    Highlight {
        file: PathBuf,
        /// beginner, intermediate or advanced; the saved level otherwise
        #[arg(long)]
        level: Option<ReadingLevel>,
    },
    /// Show learning statistics
    Stats,
    /// List the most recent vocabulary words
    Vocab {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Translate and define a word through the remote translator
    Lookup { word: String },
    /// Create a profile copied from main
    NewProfile { name: String },
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Command::Highlight { file, level } => highlight(config, &file, level).await,
        Command::Stats => stats(config).await,
        Command::Vocab { limit } => vocab(config, limit).await,
        Command::Lookup { word } => lookup(config, &word).await,
        Command::NewProfile { name } => {
            let file = profile::add_profile_from_default(&name)?;
            println!("{}", file.display());
            Ok(())
        }
    }
}

fn open_store(config: &Config) -> anyhow::Result<Store> {
    let dir = match &config.data_dir {
        Some(dir) => dir.clone(),
        None => dirs::data_local_dir()
            .map(|d| d.join("lexi"))
            .ok_or_else(|| anyhow::anyhow!("No data directory, set LEXI_DATA_DIR"))?,
    };
    tracing::debug!("Store at {}", dir.display());
    Ok(Store::new(
        Arc::new(JsonFileStore::new(dir)),
        config.limits.clone(),
    ))
}

/// Run the engine over a text file with immersive mode on
async fn highlight(config: Config, file: &Path, level: Option<ReadingLevel>) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(file).await?;
    let doc = page::text_page(&format!("file://{}", file.display()), &text)?;

    let store = open_store(&config)?;
    let mut settings = store.init_settings().await?;
    if let Some(level) = level {
        settings.reading_level = level;
    }

    let state = Arc::new(AppState::new(
        config,
        settings,
        doc,
        store,
        Capabilities::default(),
    ));
    let controller = AppController::new(state.clone());
    let mut tasks = controller.spawn_tasks();
    let commands = controller.host_commands();

    controller
        .host_sender()
        .send(HostEvent::SetImmersive { enabled: true })
        .await?;

    let count = loop {
        match tokio::time::timeout(Duration::from_secs(5), commands.recv()).await {
            Ok(Ok(HostCommand::Highlighted { count })) => break count,
            Ok(Ok(other)) => tracing::debug!("Ignoring {other:?}"),
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => anyhow::bail!("Highlighting did not finish"),
        }
    };

    let words = {
        let page = state.page.lock().await;
        page.highlighter.highlighted_words(&page.doc)
    };

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Task ended with error: {e:#}"),
            Err(e) => tracing::error!("Task panicked: {e}"),
        }
    }

    let level = state.core.reading_level().await;
    println!("{count} highlights at {level}");
    for word in words {
        println!("{word}");
    }
    Ok(())
}

async fn stats(config: Config) -> anyhow::Result<()> {
    let store = open_store(&config)?;
    let stats = store.stats().await;

    println!("Articles read:     {}", stats.articles_read);
    println!("Words learned:     {}", stats.words_learned);
    println!("Practice sessions: {}", stats.practice_sessions);
    println!("Current streak:    {}", stats.current_streak);
    match stats.last_active_date {
        Some(day) => println!("Last active:       {day}"),
        None => println!("Last active:       never"),
    }
    println!("Vocabulary:        {}", store.vocabulary_count().await);
    Ok(())
}

async fn vocab(config: Config, limit: usize) -> anyhow::Result<()> {
    let store = open_store(&config)?;
    let words = store.recent_words(limit).await;
    if words.is_empty() {
        println!("No words saved yet");
        return Ok(());
    }

    for w in words {
        println!(
            "{} → {} ({}→{}, reviewed {}x{})",
            w.word,
            w.translation,
            w.source_lang,
            w.target_lang,
            w.review_count,
            if w.practiced { ", practiced" } else { "" }
        );
    }
    Ok(())
}

async fn lookup(config: Config, word: &str) -> anyhow::Result<()> {
    let remote = &config.capability.remote_translator;
    if !remote.is_usable() {
        anyhow::bail!("Remote translator not configured, set LEXI_TRANSLATOR_API_KEY");
    }

    let caps = Capabilities {
        translator: Some(Arc::new(RemoteTranslatorFactory::new(DeepLTranslator::new(
            remote.api_key.clone(),
            remote.api_url.clone(),
        )))),
        ..Capabilities::default()
    };
    let store = open_store(&config)?;
    let settings = store.init_settings().await?;
    let policy = LifecyclePolicy::new(config.capability.allow_download);

    let outcome = translator::translate(
        &caps,
        &config.capability,
        TranslationRequest {
            text: word,
            source: "en",
            target: &settings.target_language,
            native: &settings.native_language,
        },
        &policy,
    )
    .await?;

    let record = TranslationRecord {
        original: word.to_string(),
        translation: outcome.text.clone(),
        source_lang: outcome.source.clone(),
        target_lang: outcome.target.clone(),
        timestamp: now_ms(),
    };
    if let Err(e) = store.add_translation(record).await {
        tracing::warn!("Lookup not kept in history: {e}");
    }

    let fallback = FallbackDictionary::with_defaults();
    let definition = definitions::define(&caps, &fallback, word, &outcome.source, &policy).await;

    println!("{word} ({}) → {} ({})", outcome.source, outcome.text, outcome.target);
    if let Some(ipa) = &definition.pronunciation {
        println!("{ipa}");
    }
    println!("{}", definition.definition);
    println!("e.g. {}", definition.example);
    Ok(())
}
