use crate::models::FormInput;

pub const AD_BATCH: &str = include_str!("../data/prompts/ad_batch.txt");
pub const REFINE_IMAGE: &str = include_str!("../data/prompts/refine_image.txt");
pub const IMAGE_WITH_REFERENCE: &str = include_str!("../data/prompts/image_with_reference.txt");
pub const IMAGE_STUDIO: &str = include_str!("../data/prompts/image_studio.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Build the batch prompt asking the text service for exactly 3 ad ideas as
/// a JSON array. Pure string construction, no error conditions.
pub fn build_batch_prompt(form: &FormInput) -> String {
    render(
        AD_BATCH,
        &[
            ("product", &form.product),
            ("customers", &form.customers),
            ("unique_feature", &form.unique_feature),
            ("platform", &form.platform.to_string()),
        ],
    )
}
