// Fixed values shared across both generation routes, plus the hardcoded
// fallback batches served when generation fails.

use crate::models::{Concept, PitchConcept};

/// Number of design concepts a generation request must produce.
pub const DESIGN_CONCEPT_COUNT: usize = 4;

/// The pitch prompt asks for exactly this many angles.
pub const PITCH_CONCEPT_TARGET: usize = 4;
/// Accepted size band for a pitch pack; anything outside is a count mismatch.
pub const PITCH_CONCEPT_MIN: usize = 3;
pub const PITCH_CONCEPT_MAX: usize = 5;

pub const GENERATION_TEMPERATURE: f32 = 0.7;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Local asset served for concepts without a generated mockup.
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.svg";

/// Style applied when neither the model nor the request names one.
pub const DEFAULT_STYLE: &str = "Modern";

lazy_static::lazy_static! {
    /// Returned verbatim whenever design generation fails at any step, so
    /// the page always has something to render.
    pub static ref FALLBACK_CONCEPTS: Vec<Concept> = vec![
        Concept {
            title: "Simple Black Tee".to_string(),
            description: "A clean, versatile black t-shirt that goes with everything.".to_string(),
            style: "Minimal".to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
        },
        Concept {
            title: "White Essential".to_string(),
            description: "A crisp white staple tee for everyday wear.".to_string(),
            style: "Classic".to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
        },
        Concept {
            title: "Vintage Wash".to_string(),
            description: "A softly faded tee with a lived-in, retro feel.".to_string(),
            style: "Vintage".to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
        },
        Concept {
            title: "Modern Cut".to_string(),
            description: "A tailored fit with minimal detailing and bold lines.".to_string(),
            style: "Modern".to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
        },
    ];

    /// Fallback batch for the pitch-pack route, same contract as above.
    pub static ref FALLBACK_PITCHES: Vec<PitchConcept> = vec![
        PitchConcept {
            title: "Community Champion".to_string(),
            description: "Lead with the fans who already love what you make.".to_string(),
            headline: "Made for the ones who were here first.".to_string(),
        },
        PitchConcept {
            title: "Hype Reel Hook".to_string(),
            description: "Short, loud, and built for the feed.".to_string(),
            headline: "You've never seen merch move like this.".to_string(),
        },
        PitchConcept {
            title: "Origin Story".to_string(),
            description: "Sell the journey behind the product, not just the product.".to_string(),
            headline: "It started in a bedroom. It ends on your back.".to_string(),
        },
        PitchConcept {
            title: "Limited Drop".to_string(),
            description: "Build urgency around a small, numbered release.".to_string(),
            headline: "48 hours. Then it's gone.".to_string(),
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_concepts_are_complete() {
        assert_eq!(FALLBACK_CONCEPTS.len(), DESIGN_CONCEPT_COUNT);
        for concept in FALLBACK_CONCEPTS.iter() {
            assert!(!concept.title.is_empty());
            assert!(!concept.description.is_empty());
            assert!(!concept.style.is_empty());
            assert_eq!(concept.image, PLACEHOLDER_IMAGE);
        }
    }

    #[test]
    fn test_fallback_pitches_fit_the_accepted_band() {
        assert!(FALLBACK_PITCHES.len() >= PITCH_CONCEPT_MIN);
        assert!(FALLBACK_PITCHES.len() <= PITCH_CONCEPT_MAX);
        for pitch in FALLBACK_PITCHES.iter() {
            assert!(!pitch.title.is_empty());
            assert!(!pitch.description.is_empty());
            assert!(!pitch.headline.is_empty());
        }
    }
}
