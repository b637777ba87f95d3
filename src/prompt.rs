// Prompt assembly for the two generation routes. Pure string formatting;
// the builders never fail.

use crate::constants::{DESIGN_CONCEPT_COUNT, PITCH_CONCEPT_TARGET};

/// System instruction for the design-concept flow. States the exact count,
/// the JSON shape, and forbids prose outside the JSON. When a style is
/// requested, every concept is pinned to it; otherwise the model picks one
/// per concept.
pub fn design_system_prompt(style: Option<&str>) -> String {
    let style_rule = match style {
        Some(style) => format!(
            "Every concept must use the \"{style}\" style, and its \"style\" field must be exactly \"{style}\"."
        ),
        None => {
            "Pick a fitting visual style for each concept (for example Minimal, Vintage, Bold or Playful)."
                .to_string()
        }
    };

    format!(
        "You are a merchandise design assistant helping a creator turn an idea into t-shirt design concepts.\n\
        Create exactly {DESIGN_CONCEPT_COUNT} distinct design concepts.\n\
        Respond with a JSON array of exactly {DESIGN_CONCEPT_COUNT} objects, each containing:\n\
        {{\"title\": \"Short concept name\", \"description\": \"One or two sentences describing the design\", \"style\": \"The visual style\"}}\n\
        {style_rule}\n\
        Respond only with the JSON array. Do not add any prose, markdown or explanation outside the JSON."
    )
}

pub fn design_user_prompt(prompt: &str) -> String {
    format!("Generate merch design concepts for: {prompt}")
}

/// System instruction for the pitch-pack flow. Asks for a JSON object so it
/// can pair with the adapter's json_object response-format hint.
pub fn pitch_system_prompt() -> String {
    format!(
        "You are a pitch strategist helping a creator quickly generate powerful messaging ideas for their merch, brand, or product.\n\
        Create exactly {PITCH_CONCEPT_TARGET} distinct pitch angles. Each angle must include:\n\
        1. A short, catchy name for the pitch direction (like \"Hype Reel Hook\" or \"Community Champion\")\n\
        2. A 1-line summary explaining the pitch direction and strategy\n\
        3. An example headline that captures the essence of this angle\n\
        Respond with a JSON object of the form:\n\
        {{\"concepts\": [{{\"title\": \"Name of pitch angle\", \"description\": \"One-line strategic summary\", \"headline\": \"Example headline\"}}]}}\n\
        with exactly {PITCH_CONCEPT_TARGET} entries in the array.\n\
        Make each pitch angle distinct and compelling. Focus on emotional hooks, cultural relevance, and memorable phrases.\n\
        Respond only with the JSON object, without any prose outside it."
    )
}

pub fn pitch_user_prompt(prompt: &str, tone: Option<&str>) -> String {
    match tone {
        Some(tone) => format!("Generate pitch ideas for: {prompt}\nDesired tone: {tone}"),
        None => format!("Generate pitch ideas for: {prompt}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_prompt_pins_requested_style() {
        let prompt = design_system_prompt(Some("Vintage"));
        assert!(prompt.contains("exactly 4 distinct design concepts"));
        assert!(prompt.contains("must be exactly \"Vintage\""));
        assert!(prompt.contains("Respond only with the JSON array"));
    }

    #[test]
    fn test_design_prompt_leaves_style_open_when_absent() {
        let prompt = design_system_prompt(None);
        assert!(prompt.contains("Pick a fitting visual style"));
        assert!(!prompt.contains("must be exactly"));
    }

    #[test]
    fn test_pitch_prompt_declares_object_shape() {
        let prompt = pitch_system_prompt();
        assert!(prompt.contains("\"concepts\""));
        assert!(prompt.contains("exactly 4 distinct pitch angles"));
        assert!(prompt.contains("Respond only with the JSON object"));
    }

    #[test]
    fn test_pitch_user_prompt_appends_tone_only_when_present() {
        let with_tone = pitch_user_prompt("retro gaming brand", Some("playful"));
        assert!(with_tone.contains("Desired tone: playful"));

        let without_tone = pitch_user_prompt("retro gaming brand", None);
        assert!(!without_tone.contains("Desired tone"));
    }
}
