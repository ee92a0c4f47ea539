//! parasail-stt — 配置、选项与转录的命令行工具
//!
//! Usage:
//!   parasail-stt setup --api-key <key> [--model <id>]    Validate credentials and store an entry
//!   parasail-stt options <entry_id> --model <id>         Change the model of an entry
//!   parasail-stt transcribe <file> [--lang <xx>]         Transcribe a WAV/OGG file
//!   parasail-stt models | languages                      List offered models / languages

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use bytes::Bytes;
use parasail_stt::audio::{AudioCodec, AudioFormat, AudioMetadata};
use parasail_stt::config::flow::{ConfigFlow, FlowResult, OptionsFlow, OptionsInput, UserInput};
use parasail_stt::config::{ClientSettings, ConfigEntry, ConfigStore};
use parasail_stt::entity::{async_setup_entry, SpeechToTextEntity};
use parasail_stt::models::SUPPORTED_LANGUAGES;
use parasail_stt::registry::get_entity_registry;
use parasail_stt::stt::{ParasailClient, TranscriptionBackend};
use parasail_stt::SttModel;
use tracing_subscriber::EnvFilter;

const CHUNK_SIZE: usize = 4096;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("parasail_stt=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "setup" => cmd_setup(&args[2..]).await,
        "options" => cmd_options(&args[2..]).await,
        "transcribe" => cmd_transcribe(&args[2..]).await,
        "models" => {
            cmd_models();
            Ok(())
        }
        "languages" => {
            println!("{}", SUPPORTED_LANGUAGES.join(" "));
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("parasail-stt {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = outcome {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"parasail-stt — Parasail speech-to-text

USAGE:
    parasail-stt <COMMAND> [OPTIONS]

COMMANDS:
    setup --api-key <key> [--model <id>]     Validate credentials and store a config entry
    options <entry_id> --model <id>          Change the model of a stored entry
    transcribe <file> [--lang <xx>] [--entry <id>]
                                             Transcribe a .wav/.ogg file
    models                                   List offered models
    languages                                List supported languages
    version                                  Show version information
    help                                     Show this help message

GLOBAL OPTIONS:
    --store <path>                           Config entry file (default: parasail_stt.yaml)

ENVIRONMENT:
    PARASAIL_API_KEY                         API key for setup when --api-key is omitted
    PARASAIL_API_BASE                        Override the API base URL
    PARASAIL_HTTP_TIMEOUT_SECS               HTTP timeout in seconds (default 60)
    PARASAIL_STT_STORE                       Config entry file path
    RUST_LOG                                 Log filter (default parasail_stt=info)"#
    );
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn positional(args: &[String]) -> Option<&str> {
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
            continue;
        }
        if arg.starts_with("--") {
            skip = true;
            continue;
        }
        return Some(arg);
    }
    None
}

fn store_path(args: &[String]) -> PathBuf {
    flag(args, "--store")
        .map(PathBuf::from)
        .or_else(|| std::env::var("PARASAIL_STT_STORE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("parasail_stt.yaml"))
}

fn backend() -> anyhow::Result<Arc<dyn TranscriptionBackend>> {
    let client = ParasailClient::from_settings(&ClientSettings::from_env())?;
    Ok(Arc::new(client))
}

fn parse_model(args: &[String]) -> anyhow::Result<Option<SttModel>> {
    flag(args, "--model")
        .map(|m| m.parse::<SttModel>().map_err(anyhow::Error::from))
        .transpose()
}

fn form_errors(result: FlowResult<impl std::fmt::Debug>) -> anyhow::Error {
    match result {
        FlowResult::Form { errors, .. } if !errors.is_empty() => {
            let joined = errors
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join(", ");
            anyhow!("setup rejected ({joined})")
        }
        other => anyhow!("unexpected flow result: {other:?}"),
    }
}

async fn cmd_setup(args: &[String]) -> anyhow::Result<()> {
    let api_key = flag(args, "--api-key")
        .map(String::from)
        .or_else(|| std::env::var("PARASAIL_API_KEY").ok())
        .context("--api-key or PARASAIL_API_KEY is required")?;
    let model = parse_model(args)?.unwrap_or_default();

    let flow = ConfigFlow::new(backend()?);
    match flow.step_user(Some(UserInput { api_key, model })).await {
        FlowResult::CreateEntry { title, data } => {
            let mut store = ConfigStore::load(store_path(args)).await?;
            let entry = ConfigEntry::new(title, data);
            println!("{} ({})", entry.title, entry.entry_id);
            store.upsert(entry);
            store.save().await?;
            Ok(())
        }
        other => Err(form_errors(other)),
    }
}

async fn cmd_options(args: &[String]) -> anyhow::Result<()> {
    let entry_id = positional(args).context("entry id is required")?;
    let mut store = ConfigStore::load(store_path(args)).await?;
    let entry = store.resolve(Some(entry_id))?.clone();
    let flow = OptionsFlow::new(&entry);

    let Some(model) = parse_model(args)? else {
        if let FlowResult::Form { schema, .. } = flow.step_init(None) {
            let current = schema
                .field("model")
                .and_then(|f| f.default.clone())
                .unwrap_or_default();
            println!("current model: {current}");
        }
        return Ok(());
    };

    match flow.step_init(Some(OptionsInput { model })) {
        FlowResult::CreateEntry { data, .. } => {
            store.set_options(&entry.entry_id, data)?;
            store.save().await?;
            println!("model set to {model}");
            Ok(())
        }
        other => Err(form_errors(other)),
    }
}

fn metadata_for(path: &Path, language: Option<&str>) -> AudioMetadata {
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .map(AudioFormat::from_extension)
        .unwrap_or_else(|| AudioFormat::Other(String::new()));
    let codec = match format {
        AudioFormat::Ogg => AudioCodec::Opus,
        _ => AudioCodec::Pcm,
    };
    let mut metadata = AudioMetadata::wav_pcm_16k_mono()
        .with_format(format)
        .with_codec(codec);
    metadata.language = language.map(String::from);
    metadata
}

async fn cmd_transcribe(args: &[String]) -> anyhow::Result<()> {
    let file = positional(args).context("audio file is required")?;
    let path = Path::new(file);
    let store = ConfigStore::load(store_path(args)).await?;
    let entry = store.resolve(flag(args, "--entry"))?.clone();

    let entity = async_setup_entry(get_entity_registry(), entry, backend()?).await?;
    let metadata = metadata_for(path, flag(args, "--lang"));
    if !entity.check_metadata(&metadata) {
        tracing::warn!(?metadata, "Audio metadata is outside the declared capabilities");
    }

    let audio = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let chunks: Vec<parasail_stt::Result<Bytes>> = audio
        .chunks(CHUNK_SIZE)
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();

    let result = entity
        .process_audio_stream(metadata, Box::pin(futures::stream::iter(chunks)))
        .await;
    if !result.is_success() {
        bail!("transcription failed (see log for details)");
    }
    println!("{}", result.text);
    Ok(())
}

fn cmd_models() {
    for model in SttModel::ALL {
        let marker = if model == SttModel::default() { " (default)" } else { "" };
        println!("{model}{marker}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flag_reads_following_value() {
        let a = args(&["clip.wav", "--lang", "de", "--entry", "abc"]);
        assert_eq!(flag(&a, "--lang"), Some("de"));
        assert_eq!(flag(&a, "--entry"), Some("abc"));
        assert_eq!(flag(&a, "--store"), None);
        assert_eq!(flag(&args(&["--lang"]), "--lang"), None);
    }

    #[test]
    fn test_positional_skips_flag_values() {
        let a = args(&["--store", "x.yaml", "clip.ogg", "--lang", "en"]);
        assert_eq!(positional(&a), Some("clip.ogg"));
        assert_eq!(positional(&args(&["--model", "m"])), None);
        assert_eq!(positional(&[]), None);
    }

    #[test]
    fn test_store_path_prefers_flag() {
        let a = args(&["--store", "/tmp/entries.yaml"]);
        assert_eq!(store_path(&a), PathBuf::from("/tmp/entries.yaml"));
    }

    #[test]
    fn test_parse_model() {
        let a = args(&["--model", "openai/whisper-large-v3"]);
        assert_eq!(parse_model(&a).unwrap(), Some(SttModel::WhisperLargeV3));
        assert_eq!(parse_model(&[]).unwrap(), None);
        assert!(parse_model(&args(&["--model", "nope"])).is_err());
    }

    #[test]
    fn test_metadata_for_extension() {
        let wav = metadata_for(Path::new("a/b/clip.WAV"), Some("en"));
        assert_eq!(wav.format, AudioFormat::Wav);
        assert_eq!(wav.codec, AudioCodec::Pcm);
        assert_eq!(wav.language.as_deref(), Some("en"));

        let ogg = metadata_for(Path::new("clip.ogg"), None);
        assert_eq!(ogg.format, AudioFormat::Ogg);
        assert_eq!(ogg.codec, AudioCodec::Opus);
        assert_eq!(ogg.language, None);

        let raw = metadata_for(Path::new("clip"), None);
        assert_eq!(raw.format, AudioFormat::Other(String::new()));
        assert_eq!(raw.codec, AudioCodec::Pcm);

        let flac = metadata_for(Path::new("clip.flac"), None);
        assert_eq!(flac.format, AudioFormat::Other("flac".into()));
    }
}
