use crate::domain::DomainError;

const PROMPT_PREFIX: &str = "A professional, appetizing food photograph of ";
const PROMPT_SUFFIX: &str = ". Beautifully plated and styled, soft natural studio lighting, \
shallow depth of field, rich true-to-life colors, high detail, shot like a restaurant menu \
or food blog hero image. No text, no captions, no logos, no watermarks.";

/// Wrap a dish description into the fixed photography prompt sent to the
/// image-generation endpoint.
pub fn build_image_prompt(food_description: &str) -> Result<String, DomainError> {
    let description = food_description.trim();
    if description.is_empty() {
        return Err(DomainError::invalid_input(
            "Food description for the image prompt must not be empty",
        ));
    }

    Ok(format!("{PROMPT_PREFIX}{description}{PROMPT_SUFFIX}"))
}
