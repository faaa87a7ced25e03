//! CLI for Campaign Forge - weekly LinkedIn campaigns and banners.

use campaign_forge::image::{
    ImageGenerator, ImageJobOptions, ImageProvider, PromptStyle, Watermark,
};
use campaign_forge::{
    load_campaign, CampaignError, CampaignGenerator, OpenAiTextProvider, Settings,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "campaign-forge")]
#[command(about = "Generate a week of LinkedIn posts and matching banner images via AI APIs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (TOML). Defaults to ./campaign-forge.toml when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate this week's campaign and save it to the archive and current files
    Campaign,

    /// Generate one image per day of the current campaign
    Images(ImagesArgs),
}

#[derive(Args)]
struct ImagesArgs {
    /// Provider to use
    #[arg(short, long, value_enum, default_value = "gemini")]
    provider: ImageProviderArg,

    /// Prompt template (default: banner for Gemini, post for OpenAI)
    #[arg(long, value_enum)]
    style: Option<StyleArg>,

    /// Normalize sensitive topic terms and watermark every image
    #[arg(long)]
    hardened: bool,

    /// Watermark images with the configured logo
    #[arg(long)]
    watermark: bool,

    /// Campaign file to read (default: the configured current file)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory (default: the configured output directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ImageProviderArg {
    Gemini,
    Openai,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    Banner,
    Post,
    Safe,
}

impl From<StyleArg> for PromptStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Banner => PromptStyle::Banner,
            StyleArg::Post => PromptStyle::Post,
            StyleArg::Safe => PromptStyle::Safe,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("campaign_forge=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = run(cli).await;

    if let Err(e) = &result {
        if e
            .downcast_ref::<CampaignError>()
            .is_some_and(CampaignError::is_fatal)
        {
            tracing::error!(error = %e, "aborted before any work was done");
        }
    }
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Campaign => {
            generate_campaign(&settings, cli.json).await?;
        }
        Commands::Images(args) => {
            generate_images(args, settings, cli.json).await?;
        }
    }

    Ok(())
}

async fn generate_campaign(settings: &Settings, json_output: bool) -> anyhow::Result<()> {
    // Credentials first: a missing key stops the run before anything else
    let provider = OpenAiTextProvider::builder()
        .model(settings.text_model.clone())
        .build()?;

    let generator = CampaignGenerator::from_settings(Box::new(provider), settings);

    let campaign = match generator.run().await {
        Ok(campaign) => campaign,
        Err(CampaignError::Parse { reason, raw }) => {
            eprintln!("\nJSON Error: {reason}");
            eprintln!("\nRaw model output:\n{raw}");
            anyhow::bail!("no campaign saved: model output did not contain valid JSON");
        }
        Err(e) => return Err(e.into()),
    };

    if json_output {
        let result = serde_json::json!({
            "type": "campaign",
            "success": true,
            "week": campaign.week,
            "topic": campaign.topic,
            "current": settings.current_path.display().to_string(),
            "archive": settings.archive_path.display().to_string(),
            "campaign": campaign,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "\nSaved latest campaign to {}",
            settings.current_path.display()
        );
        println!("Appended campaign to {}", settings.archive_path.display());
        println!("Week number: {}", campaign.week);
        println!("\nPreview:\n{}", serde_json::to_string_pretty(&campaign)?);
    }

    Ok(())
}

fn build_image_provider(
    provider: ImageProviderArg,
    settings: &Settings,
) -> anyhow::Result<Box<dyn ImageProvider>> {
    match provider {
        ImageProviderArg::Gemini => {
            #[cfg(feature = "gemini-image")]
            {
                Ok(Box::new(campaign_forge::GeminiProvider::builder().build()?))
            }
            #[cfg(not(feature = "gemini-image"))]
            {
                let _ = settings;
                anyhow::bail!("Gemini provider not enabled");
            }
        }
        ImageProviderArg::Openai => {
            #[cfg(feature = "openai-image")]
            {
                Ok(Box::new(
                    campaign_forge::OpenAiImageProvider::builder()
                        .download_timeout(std::time::Duration::from_secs(
                            settings.download_timeout_secs,
                        ))
                        .build()?,
                ))
            }
            #[cfg(not(feature = "openai-image"))]
            {
                let _ = settings;
                anyhow::bail!("OpenAI image provider not enabled");
            }
        }
    }
}

async fn generate_images(
    args: ImagesArgs,
    mut settings: Settings,
    json_output: bool,
) -> anyhow::Result<()> {
    // Credentials and logo first: fail before any API call is made
    let provider = build_image_provider(args.provider, &settings)?;

    let watermark = if args.hardened || args.watermark {
        Some(Watermark::open(&settings.logo_path).map_err(|e| {
            anyhow::anyhow!("cannot load logo {}: {e}", settings.logo_path.display())
        })?)
    } else {
        None
    };

    if let Some(output) = args.output {
        settings.output_dir = output;
    }
    let input = args.input.unwrap_or_else(|| settings.current_path.clone());
    let campaign = load_campaign(&input)
        .map_err(|e| anyhow::anyhow!("cannot read campaign {}: {e}", input.display()))?;

    let style = match (args.hardened, args.style, args.provider) {
        (true, _, _) => PromptStyle::Safe,
        (false, Some(style), _) => style.into(),
        (false, None, ImageProviderArg::Gemini) => PromptStyle::Banner,
        (false, None, ImageProviderArg::Openai) => PromptStyle::Post,
    };

    tracing::info!(
        provider = provider.name(),
        week = campaign.week,
        days = campaign.days.len(),
        style = ?style,
        "generating images"
    );

    let mut generator =
        ImageGenerator::new(provider, ImageJobOptions::from_settings(&settings, style));
    if let Some(watermark) = watermark {
        generator = generator.with_watermark(watermark);
    }

    let report = generator.run(&campaign).await?;

    if json_output {
        let result = serde_json::json!({
            "type": "images",
            "week": campaign.week,
            "attempted": report.attempted(),
            "saved": report.succeeded().len(),
            "outcomes": report.outcomes,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for outcome in &report.outcomes {
            match &outcome.result {
                Ok(path) => println!("Day {}: saved image to {}", outcome.day, path.display()),
                Err(e) => println!("Day {}: failed: {}", outcome.day, e),
            }
        }
        println!(
            "\n{} of {} images saved to {}",
            report.succeeded().len(),
            report.attempted(),
            settings.output_dir.display()
        );
    }

    Ok(())
}
