//! Deterministic templated ad ideas used when the text service fails.
//!
//! Every substitution is plain string interpolation: this path has no
//! external dependency and produces identical text for identical input.

use crate::models::{DraftIdea, FormInput, Platform, VisualKeywords};

struct PlatformElements {
    ctas: &'static [&'static str],
    format: &'static str,
}

fn platform_elements(platform: Platform) -> PlatformElements {
    match platform {
        Platform::Facebook => PlatformElements {
            ctas: &["Learn More", "Shop Now", "Sign Up", "Contact Us"],
            format: "carousel ad, video ad, or static image",
        },
        Platform::Instagram => PlatformElements {
            ctas: &["Swipe Up", "Tap to Shop", "DM for Details"],
            format: "story, reel, or carousel post",
        },
        Platform::WhatsApp => PlatformElements {
            ctas: &["Message Us", "Click to Chat", "Get Quote"],
            format: "status update or direct message",
        },
        Platform::Other => PlatformElements {
            ctas: &["Learn More", "Get Started", "Contact Now"],
            format: "banner ad or sponsored post",
        },
    }
}

/// Three fixed idea templates with distinct mood/action/setting combinations.
/// The CTA for idea `i` is chosen by index, never randomly.
pub fn generate_drafts(form: &FormInput) -> [DraftIdea; 3] {
    let elements = platform_elements(form.platform);
    let product = form.product.to_lowercase();
    let customers = form.customers.to_lowercase();
    let feature = form.unique_feature.to_lowercase();

    let cta = |index: usize| elements.ctas[index % elements.ctas.len()];

    [
        DraftIdea {
            hook: format!(
                "Tired of ordinary {}? Discover what makes ours different.",
                product
            ),
            caption: format!(
                "Introducing our {} {} designed specifically for {}. \
                 We've spent years perfecting it so you get exactly what you deserve. {}!",
                feature, product, customers, cta(0)
            ),
            visual_suggestion: format!(
                "{} showing the {} being used by a satisfied customer at home, \
                 highlighting the {} feature with a text overlay explaining the benefits.",
                elements.format, product, feature
            ),
            keywords: VisualKeywords {
                subject: product.clone(),
                action: "using".to_string(),
                mood: "happy".to_string(),
                setting: "home".to_string(),
            },
        },
        DraftIdea {
            hook: format!(
                "Attention {}: this {} will change how you think about your day.",
                form.customers, product
            ),
            caption: format!(
                "Our {} isn't for everyone. But if you expect more, you'll love how the {} \
                 makes all the difference for {} like you. {}!",
                product, feature, customers, cta(1)
            ),
            visual_suggestion: format!(
                "Energetic {} of {} enjoying the {} outdoors, \
                 focused on capturing the emotional benefit.",
                elements.format, customers, product
            ),
            keywords: VisualKeywords {
                subject: product.clone(),
                action: "enjoying".to_string(),
                mood: "excited".to_string(),
                setting: "outdoors".to_string(),
            },
        },
        DraftIdea {
            hook: format!(
                "The secret is out. Introducing our {} {}.",
                feature, product
            ),
            caption: format!(
                "We created this {} because {} deserved better. Now, thanks to the {}, \
                 you can finally stop settling. {}!",
                product, customers, feature, cta(2)
            ),
            visual_suggestion: format!(
                "Close-up detail {} of the {}'s {} in a clean studio, with bright, \
                 attention-grabbing colors and simple text highlighting the main selling point.",
                elements.format, product, feature
            ),
            keywords: VisualKeywords {
                subject: product,
                action: "showcasing".to_string(),
                mood: "peaceful".to_string(),
                setting: "studio".to_string(),
            },
        },
    ]
}
