//! phonetic-dict — synthesize English pronunciation and look up translations.
//!
//! Credentials come from flags or the environment:
//!   OPENAI_BASE_URL, OPENAI_API_KEY       speech provider
//!   YOUDAO_APP_ID, YOUDAO_APP_SECRET      translation provider
//!   PHONETIC_HTTP_TIMEOUT_SECS, PHONETIC_PROXY_URL, PHONETIC_JSONP_TIMEOUT_SECS

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use phonetic_dict::config::{HttpConfig, JsonpConfig};
use phonetic_dict::interceptors::TracingInterceptor;
use phonetic_dict::jsonp::JsonpBridge;
use phonetic_dict::router::Router;
use phonetic_dict::speech::{AudioOutput, SpeechClient, SpeechOptions, Voice};
use phonetic_dict::transport::HttpClient;
use phonetic_dict::translate::{TranslationResult, Translator};

#[derive(Parser)]
#[command(name = "phonetic-dict")]
#[command(version)]
#[command(about = "AI-synthesized English pronunciation and English-Chinese lookup", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize speech for text and save it as MP3
    Speak {
        /// Text to pronounce
        text: String,
        #[command(flatten)]
        speech: SpeechArgs,
    },

    /// Translate English text to Simplified Chinese
    Translate {
        /// Text to translate
        text: String,
        #[command(flatten)]
        youdao: YoudaoArgs,
    },

    /// Translate and synthesize at the same time
    Lookup {
        /// Word or phrase to look up
        text: String,
        #[command(flatten)]
        speech: SpeechArgs,
        #[command(flatten)]
        youdao: YoudaoArgs,
    },

    /// Resolve a page path and print its title
    Route {
        /// Path to navigate to
        #[arg(default_value = "/")]
        path: String,
    },
}

#[derive(Args)]
struct SpeechArgs {
    /// Speech provider base URL
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com")]
    base_url: String,
    /// Speech provider API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Voice: alloy, echo, fable, onyx, nova or shimmer
    #[arg(short, long, default_value = "alloy")]
    voice: Voice,
    /// Playback speed (0.25 to 4.0)
    #[arg(short, long, default_value_t = 1.0)]
    speed: f64,
    /// Output file
    #[arg(short, long, default_value = "speech.mp3")]
    out: PathBuf,
}

#[derive(Args)]
struct YoudaoArgs {
    /// Youdao application ID
    #[arg(long, env = "YOUDAO_APP_ID")]
    app_id: Option<String>,
    /// Youdao application secret
    #[arg(long, env = "YOUDAO_APP_SECRET", hide_env_values = true)]
    app_secret: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    let http = Arc::new(
        HttpClient::new(&HttpConfig::from_env())
            .context("failed to build HTTP client")?
            .with_interceptor(TracingInterceptor),
    );

    match cli.command {
        Commands::Speak { text, speech } => {
            let audio = synthesize(&http, &speech, &text).await?;
            save(&speech.out, &audio).await
        }
        Commands::Translate { text, youdao } => {
            let value = lookup(&http, &youdao, &text).await?;
            print_translation(value)
        }
        Commands::Lookup {
            text,
            speech,
            youdao,
        } => {
            let (audio, value) = tokio::join!(
                synthesize(&http, &speech, &text),
                lookup(&http, &youdao, &text)
            );
            print_translation(value?)?;
            save(&speech.out, &audio?).await
        }
        Commands::Route { path } => {
            let mut router = Router::new("./");
            let nav = router.navigate(&path)?;
            println!("{} -> {} ({})", nav.path, nav.view.name(), router.document().title);
            Ok(())
        }
    }
}

async fn synthesize(
    http: &Arc<HttpClient>,
    args: &SpeechArgs,
    text: &str,
) -> anyhow::Result<AudioOutput> {
    let Some(api_key) = args.api_key.as_deref() else {
        bail!("speech API key missing: pass --api-key or set OPENAI_API_KEY");
    };
    let client = SpeechClient::builder()
        .http_client(http.clone())
        .base_url(args.base_url.as_str())
        .api_key(api_key)
        .build()?;
    let options = SpeechOptions {
        voice: args.voice,
        speed: args.speed,
    };
    Ok(client
        .synthesize(text, &options)
        .await
        .context("speech synthesis failed")?)
}

async fn lookup(
    http: &Arc<HttpClient>,
    args: &YoudaoArgs,
    text: &str,
) -> anyhow::Result<serde_json::Value> {
    let (Some(app_id), Some(app_secret)) = (args.app_id.as_deref(), args.app_secret.as_deref())
    else {
        bail!("Youdao credentials missing: set YOUDAO_APP_ID and YOUDAO_APP_SECRET");
    };
    let bridge = Arc::new(JsonpBridge::over_http(http.clone(), JsonpConfig::from_env()));
    let translator = Translator::new(bridge);
    Ok(translator
        .translate(app_id, app_secret, text)
        .await
        .context("translation failed")?)
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn print_translation(value: serde_json::Value) -> anyhow::Result<()> {
    let result = TranslationResult::from_value(value).context("unexpected translation payload")?;
    for line in render_translation(&result)? {
        println!("{}", line);
    }
    Ok(())
}

/// Output lines for a successful lookup. US/UK phonetics win over the plain one.
fn render_translation(result: &TranslationResult) -> anyhow::Result<Vec<String>> {
    if !result.is_success() {
        bail!("translation provider returned errorCode {}", result.error_code);
    }
    let mut lines = result.translation.clone();
    if let Some(basic) = &result.basic {
        if let Some(us) = &basic.us_phonetic {
            lines.push(format!("US /{}/", us));
        }
        if let Some(uk) = &basic.uk_phonetic {
            lines.push(format!("UK /{}/", uk));
        }
        if let Some(phonetic) = basic.phonetic.as_ref().filter(|_| basic.us_phonetic.is_none()) {
            lines.push(format!("/{}/", phonetic));
        }
        lines.extend(basic.explains.iter().map(|e| format!("  {}", e)));
    }
    Ok(lines)
}

async fn save(path: &Path, audio: &AudioOutput) -> anyhow::Result<()> {
    tokio::fs::write(path, &audio.data)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(bytes = audio.len(), path = %path.display(), "saved {}", audio.mime_type());
    Ok(())
}
