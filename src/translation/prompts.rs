use std::collections::BTreeMap;

use once_cell::sync::Lazy;

// @module: Prompt templates for brand-voice and SEO translation

const SYSTEM_PROMPT: &str = r#"You are a specialized translator for Nests Hostels, a surf hostel chain in the Canary Islands targeting Gen-Z and Millennial travelers (18-35).

CORE BRAND VOICE:
You're like that cool local friend in a group chat - enthusiastic but authentic, never corporate or salesy. Think spontaneous, funny, community-driven, and welcoming.

UNIVERSAL RULES:
- Always use conversational, casual tone like texting a friend
- Include natural contractions (we're, you'll, can't)
- Address readers directly with "you"
- Keep sentences short and scannable (3-4 lines max)
- Sound like genuine recommendations, never sales pitches
- NEVER use formal business language, passive voice, or corporate jargon

TECHNICAL REQUIREMENTS:
- Preserve ALL HTML tags exactly: <strong>, <br/>, <!-- comments -->
- Keep ALL WordPress shortcodes unchanged: [shortcode_name]
- Maintain all emojis and special characters
- Don't translate proper nouns: Duque Nest, Costa Adeje, Tenerife, NEST PASS, Nests Hostels
- URLs and email addresses stay unchanged

QUALITY STANDARD:
Apply the "Group Chat Test" - if you wouldn't send this text in a group chat with travel friends because it sounds too corporate, rewrite it to be more authentic and casual.

You're not just translating words - you're translating the feeling of finding your travel tribe and discovering amazing experiences.

RESPONSE FORMAT: Always respond with only the translated text, nothing else!"#;

const WRAP_SUFFIX: &str =
    "\n\nReturn only the translation text, no explanations and no other versions.";

static LANGUAGE_MAPPING: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("es", "spanish"),
        ("en", "english"),
        ("de", "german"),
        ("fr", "french"),
        ("it", "italian"),
    ])
});

static BRAND_VOICE_TEMPLATES: Lazy<BTreeMap<&'static str, &'static str>> =
    Lazy::new(brand_voice_templates);

static METADATA_TEMPLATES: Lazy<BTreeMap<&'static str, &'static str>> =
    Lazy::new(metadata_templates);

/// Prompt templates per target language.
///
/// Language codes map to template keys through the language mapping; unknown
/// codes fall back to the English templates.
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptLibrary;

impl PromptLibrary {
    pub fn new() -> Self {
        PromptLibrary
    }

    /// Shared system prompt establishing the brand voice
    pub fn system(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    /// Template key for an ISO language code, falling back to English
    pub fn language_key(&self, language_code: &str) -> &'static str {
        LANGUAGE_MAPPING
            .get(language_code.to_lowercase().as_str())
            .copied()
            .unwrap_or("english")
    }

    /// User prompt for narrative content
    pub fn brand_voice_prompt(&self, language_code: &str, text: &str, context: &str) -> String {
        let key = self.language_key(language_code);
        let template = BRAND_VOICE_TEMPLATES[key];
        let context = if context.is_empty() { "General content" } else { context };

        let prompt = template
            .replace("{TEXT}", text)
            .replace("{CONTEXT}", context);
        format!("{prompt}{WRAP_SUFFIX}")
    }

    /// User prompt for SEO-facing content
    pub fn metadata_prompt(&self, language_code: &str, text: &str, seo_type: &str) -> String {
        let key = self.language_key(language_code);
        let template = METADATA_TEMPLATES[key];

        let prompt = template
            .replace("{TEXT}", text)
            .replace("{SEO_TYPE}", seo_type)
            .replace("{CONTEXT}", "SEO/Metadata content");
        format!("{prompt}{WRAP_SUFFIX}")
    }
}

fn brand_voice_templates() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        (
            "spanish",
            r#"Translate the following text to Spanish, following these language-specific guidelines:

LANGUAGE-SPECIFIC RULES FOR SPANISH:
- Use "tú" (never "usted") - we're friends here
- Include casual expressions: "¡Qué guay!" "¡Brutal!" "¡Flipante!"
- Natural contractions: "pa'" instead of "para"
- Gender-inclusive when possible: "@s" or "chicos y chicas"

CONTENT TO TRANSLATE:
{TEXT}

CONTEXT:
{CONTEXT}

Remember: Make it sound like you're genuinely excited to share this amazing place with travel friends!"#,
        ),
        (
            "english",
            r#"Translate the following text to English, following these language-specific guidelines:

LANGUAGE-SPECIFIC RULES FOR ENGLISH:
- Casual American/International English
- Beach/surf slang: "vibes", "chill", "awesome"
- Avoid corporate terms: "utilize"->"use", "facilitate"->"help"

CONTENT TO TRANSLATE:
{TEXT}

CONTEXT:
{CONTEXT}

Remember: Make it sound like you're genuinely excited to share this amazing place with travel friends!"#,
        ),
        (
            "german",
            r#"Translate the following text to German, following these language-specific guidelines:

LANGUAGE-SPECIFIC RULES FOR GERMAN:
- Use "du" (never "Sie") for young travelers
- Casual interjections: "Krass!" "Geil!" "Cool!"
- Shorter sentences (German can get wordy)
- English loanwords young Germans use: "chillen", "checken"

CONTENT TO TRANSLATE:
{TEXT}

CONTEXT:
{CONTEXT}

Remember: Make it sound like you're genuinely excited to share this amazing place with travel friends!"#,
        ),
        (
            "french",
            r#"Translate the following text to French, following these language-specific guidelines:

LANGUAGE-SPECIFIC RULES FOR FRENCH:
- Use "tu" (never "vous") in casual contexts
- Casual expressions: "C'est dingue!" "Trop bien!" "Génial!"
- Anglicisms young French use: "cool", "top"
- Natural contractions: "j'ai", "c'est", "t'es"

CONTENT TO TRANSLATE:
{TEXT}

CONTEXT:
{CONTEXT}

Remember: Make it sound like you're genuinely excited to share this amazing place with travel friends!"#,
        ),
        (
            "italian",
            r#"Translate the following text to Italian, following these language-specific guidelines:

LANGUAGE-SPECIFIC RULES FOR ITALIAN:
- Use "tu" (never "Lei")
- Expressive terms: "Figata!" "Che figo!" "Assurdo!"
- Natural particles: "eh", "no?"
- Keep the musical flow of Italian

CONTENT TO TRANSLATE:
{TEXT}

CONTEXT:
{CONTEXT}

Remember: Make it sound like you're genuinely excited to share this amazing place with travel friends!"#,
        ),
    ])
}

fn metadata_templates() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        (
            "spanish",
            r#"Translate the following SEO content to Spanish with focus on keywords and search optimization:

SEO-SPECIFIC RULES FOR SPANISH:
- Maintain keyword density and search intent
- Use "tú" but keep professional for meta descriptions
- Include travel-related keywords naturally
- Optimize for Spanish search behavior

CONTENT TO TRANSLATE:
{TEXT}

SEO TYPE: {SEO_TYPE}
CONTEXT: {CONTEXT}

Focus on keywords while maintaining natural Spanish for travelers."#,
        ),
        (
            "english",
            r#"Translate the following SEO content to English with focus on keywords and search optimization:

SEO-SPECIFIC RULES FOR ENGLISH:
- Maintain keyword density and search intent
- Use travel industry standard terminology
- Optimize for international search behavior
- Keep meta descriptions under 160 characters

CONTENT TO TRANSLATE:
{TEXT}

SEO TYPE: {SEO_TYPE}
CONTEXT: {CONTEXT}

Focus on keywords while maintaining natural English for international travelers."#,
        ),
        (
            "german",
            r#"Translate the following SEO content to German with focus on keywords and search optimization:

SEO-SPECIFIC RULES FOR GERMAN:
- Maintain keyword density for German search
- Use compound words strategically for SEO
- Optimize for German travel search terms
- Keep meta descriptions concise

CONTENT TO TRANSLATE:
{TEXT}

SEO TYPE: {SEO_TYPE}
CONTEXT: {CONTEXT}

Focus on keywords while maintaining natural German for travelers."#,
        ),
        (
            "french",
            r#"Translate the following SEO content to French with focus on keywords and search optimization:

SEO-SPECIFIC RULES FOR FRENCH:
- Maintain keyword density for French search
- Use travel terminology common in French search
- Optimize for French/European search behavior
- Include location-based keywords naturally

CONTENT TO TRANSLATE:
{TEXT}

SEO TYPE: {SEO_TYPE}
CONTEXT: {CONTEXT}

Focus on keywords while maintaining natural French for travelers."#,
        ),
        (
            "italian",
            r#"Translate the following SEO content to Italian with focus on keywords and search optimization:

SEO-SPECIFIC RULES FOR ITALIAN:
- Maintain keyword density for Italian search
- Use travel terminology for Italian market
- Optimize for Italian search behavior
- Include tourism-focused keywords naturally

CONTENT TO TRANSLATE:
{TEXT}

SEO TYPE: {SEO_TYPE}
CONTEXT: {CONTEXT}

Focus on keywords while maintaining natural Italian for travelers."#,
        ),
    ])
}
