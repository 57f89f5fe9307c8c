use adforge::ai::reference;
use adforge::app::AdGenerator;
use adforge::models::{FormInput, ImagePreference, Platform};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "adforge")]
#[command(about = "Generate shareable ad ideas for a product")]
struct CliArgs {
    /// What the product is.
    #[arg(long)]
    product: String,

    /// Who the target customers are.
    #[arg(long)]
    customers: String,

    /// The product's unique feature.
    #[arg(long = "unique-feature")]
    unique_feature: String,

    /// Target platform: facebook, instagram, whatsapp, or other.
    #[arg(long, default_value = "other", value_parser = parse_platform_arg)]
    platform: Platform,

    /// Optional product photo to anchor the first ad's image.
    #[arg(long = "image", value_name = "PATH")]
    image_path: Option<PathBuf>,

    /// Image sourcing preference: ai, stock, or mixed.
    #[arg(long = "image-type", default_value = "ai", value_parser = parse_image_type_arg)]
    image_type: ImagePreference,

    /// Write the JSON result here instead of stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn parse_platform_arg(input: &str) -> std::result::Result<Platform, String> {
    match input.to_ascii_lowercase().as_str() {
        "facebook" => Ok(Platform::Facebook),
        "instagram" => Ok(Platform::Instagram),
        "whatsapp" => Ok(Platform::WhatsApp),
        "other" => Ok(Platform::Other),
        _ => Err(format!(
            "Invalid platform '{}'. Expected: facebook, instagram, whatsapp, or other",
            input
        )),
    }
}

fn parse_image_type_arg(input: &str) -> std::result::Result<ImagePreference, String> {
    match input.to_ascii_lowercase().as_str() {
        "ai" => Ok(ImagePreference::Ai),
        "stock" => Ok(ImagePreference::Stock),
        "mixed" => Ok(ImagePreference::Mixed),
        _ => Err(format!(
            "Invalid image type '{}'. Expected: ai, stock, or mixed",
            input
        )),
    }
}

fn build_form_input(args: &CliArgs) -> Result<FormInput> {
    let product_image = match &args.image_path {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            info!("Loaded product photo ({} bytes) from {}", bytes.len(), path.display());
            Some(reference::to_data_uri(&bytes))
        }
        None => None,
    };

    Ok(FormInput {
        product: args.product.clone(),
        customers: args.customers.clone(),
        unique_feature: args.unique_feature.clone(),
        platform: args.platform,
        product_image,
        preferred_image_type: args.image_type,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adforge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting adforge");

    let args = CliArgs::parse();
    let form = build_form_input(&args)?;

    let generator = match AdGenerator::new() {
        Ok(generator) => generator,
        Err(e) => {
            error!("Failed to initialize generator: {}", e);
            std::process::exit(1);
        }
    };

    match generator.generate_ad_ideas(&form).await {
        Ok(result) => {
            let json = serde_json::to_string_pretty(&result)?;
            match &args.output {
                Some(path) => {
                    std::fs::write(path, &json)?;
                    info!("Wrote ad ideas to {}", path.display());
                }
                None => println!("{}", json),
            }
            Ok(())
        }
        Err(e) => {
            error!("Generation failed: {}", e);
            std::process::exit(1);
        }
    }
}
