use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use rolecall::{
    parse_transcript_file, sample_transcript, write_verdict, AnchorSet, ClassifierConfig,
    HashingEncoder, HashingEncoderConfig, RemoteEncoder, RemoteEncoderConfig, RoleClassifier,
    TextEncoder, Utterance, Verdict,
};

#[derive(Parser)]
#[command(name = "rolecall")]
#[command(author, version, about = "Identify the agent and the customer in a two-party transcript", long_about = None)]
struct Cli {
    /// Transcript JSON file (utterance array, diarized segments, or Deepgram).
    /// A built-in two-line example is used when omitted.
    transcript: Option<PathBuf>,

    /// Text encoder used for anchors and utterances
    #[arg(long, value_enum, default_value = "hashing")]
    encoder: EncoderKind,

    /// Anchor phrase file replacing the bundled English/Spanish set
    #[arg(long)]
    anchors: Option<PathBuf>,

    /// Restrict anchors to these language codes (repeatable)
    #[arg(long = "language")]
    languages: Vec<String>,

    /// Number of leading utterances to examine
    #[arg(long, default_value = "6")]
    max_turns: usize,

    /// Minimum trimmed characters for an utterance to be scored
    #[arg(long, default_value = "5")]
    min_chars: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EncoderKind {
    /// Offline hashed bag-of-words vectors
    Hashing,
    /// OpenAI-compatible embeddings endpoint (configured from the environment)
    Remote,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let utterances = match &cli.transcript {
        Some(path) => {
            info!("Loading transcript from {:?}", path);
            parse_transcript_file(path).context("Failed to parse input transcript")?
        }
        None => {
            info!("No transcript given, using built-in example");
            sample_transcript()
        }
    };
    info!("Loaded {} utterances", utterances.len());

    let anchors = load_anchors(&cli)?;
    let config = ClassifierConfig {
        max_turns: cli.max_turns,
        min_text_chars: cli.min_chars,
    };

    let verdict = match cli.encoder {
        EncoderKind::Hashing => {
            let encoder = HashingEncoder::new(HashingEncoderConfig::default())?;
            classify(encoder, anchors, config, &utterances).await?
        }
        EncoderKind::Remote => {
            let encoder = RemoteEncoder::new(RemoteEncoderConfig::from_env()?);
            classify(encoder, anchors, config, &utterances).await?
        }
    };

    write_verdict(std::io::stdout().lock(), &verdict)
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_anchors(cli: &Cli) -> Result<AnchorSet> {
    let anchors = match &cli.anchors {
        Some(path) => {
            info!("Loading anchors from {:?}", path);
            AnchorSet::load(path)?
        }
        None => AnchorSet::builtin(),
    };

    let anchors = if cli.languages.is_empty() {
        anchors
    } else {
        anchors
            .filter_languages(&cli.languages)
            .with_context(|| format!("No usable anchors for languages {:?}", cli.languages))?
    };

    debug!(
        "Using {} anchors in languages {:?}",
        anchors.len(),
        anchors.languages()
    );
    Ok(anchors)
}

async fn classify<E: TextEncoder>(
    encoder: E,
    anchors: AnchorSet,
    config: ClassifierConfig,
    utterances: &[Utterance],
) -> Result<Verdict> {
    let classifier = RoleClassifier::new(encoder, anchors, config);
    let classification = classifier.classify_detailed(utterances).await?;

    for (speaker, score) in classification.tally.iter() {
        debug!("Speaker {}: agent-ness {:+.3}", speaker, score);
    }

    Ok(classification.verdict)
}
