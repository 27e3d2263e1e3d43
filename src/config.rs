//! Holistic interpretation configuration: theme-group membership, the fixed
//! narrative templates, section labels and significance thresholds. Kept in
//! one place so the wording can change without touching engine logic.

use crate::rules::TemplateKey;
use crate::{ChartPoint, Planet};

// ---------------------------
// ## Theme groups
// ---------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeGroup {
    pub members: Vec<ChartPoint>,
    pub description: &'static str,
    pub label: &'static str,
}

impl ThemeGroup {
    pub fn contains(&self, point: ChartPoint) -> bool {
        self.members.contains(&point)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeGroups {
    pub identity_emotions: ThemeGroup,
    pub mind_communication: ThemeGroup,
    pub love_sex: ThemeGroup,
    pub growth_challenges: ThemeGroup,
}

/// Theme membership tables, with the chart ruler folded into the
/// identity/emotions group. Membership is exact-match on chart points;
/// a planet may belong to several groups.
pub fn theme_groups(chart_ruler: Planet) -> ThemeGroups {
    let mut identity = vec![
        ChartPoint::Planet(Planet::Sun),
        ChartPoint::Planet(Planet::Moon),
        ChartPoint::Ascendant,
    ];
    let ruler_point = ChartPoint::Planet(chart_ruler);
    if !identity.contains(&ruler_point) {
        identity.push(ruler_point);
    }

    ThemeGroups {
        identity_emotions: ThemeGroup {
            members: identity,
            description: "Sun, Moon, Ascendant, Chart Ruler aspects",
            label: "IDENTITY & EMOTIONS",
        },
        mind_communication: ThemeGroup {
            members: vec![ChartPoint::Planet(Planet::Mercury)],
            description: "Mercury aspects",
            label: "MIND & COMMUNICATION",
        },
        love_sex: ThemeGroup {
            members: vec![
                ChartPoint::Planet(Planet::Venus),
                ChartPoint::Planet(Planet::Mars),
            ],
            description: "Venus, Mars aspects",
            label: "LOVE & SEX",
        },
        growth_challenges: ThemeGroup {
            members: vec![
                ChartPoint::Planet(Planet::Jupiter),
                ChartPoint::Planet(Planet::Saturn),
                ChartPoint::Planet(Planet::Uranus),
                ChartPoint::Planet(Planet::Neptune),
                ChartPoint::Planet(Planet::Pluto),
            ],
            description: "Jupiter, Saturn, Outer Planets aspects",
            label: "GROWTH & CHALLENGES",
        },
    }
}

// ---------------------------
// ## Aspect narrative templates
// ---------------------------

// Placeholders: {planet1Name}, {planet2Name}, {planet1Sign}, {planet2Sign},
// {planet1Core}, {planet2Core}, {planet1SignCore}, {planet2SignCore},
// {planet1Keyword}, {planet2Keyword}

const MERGED_TEMPLATE: &str = "Your {planet1Name} in {planet1Sign} and {planet2Name} in {planet2Sign} are merged through a conjunction. \
This creates a unified expression where {planet1Core} and {planet2Core} work together as one force. \
The {planet1Sign} expression of {planet1Name} blends with the {planet2Sign} expression of {planet2Name}, \
creating a combined energy that is both {planet1SignCore} and {planet2SignCore}.";

const POLARIZED_TEMPLATE: &str = "Your {planet1Name} in {planet1Sign} and {planet2Name} in {planet2Sign} are in opposition, creating a polarized dynamic. \
Your {planet1Core} expressed through {planet1Sign} seeks {planet1SignCore}, \
while your {planet2Core} expressed through {planet2Sign} need {planet2SignCore}. \
This creates tension where you may feel pulled between {planet1Keyword} and {planet2Keyword}, \
requiring you to find balance between these opposing forces.";

const FRICTION_TEMPLATE: &str = "Your {planet1Name} in {planet1Sign} and {planet2Name} in {planet2Sign} form a square, creating friction and challenge. \
Your {planet1Core} wants {planet1SignCore}, while your {planet2Core} need {planet2SignCore}. \
This square creates internal conflict where you may vacillate between {planet1Keyword} and {planet2Keyword}, \
pushing you to grow through the tension between these competing needs.";

const FLOWING_TEMPLATE: &str = "Your {planet1Name} in {planet1Sign} and {planet2Name} in {planet2Sign} form a trine, creating flowing harmony. \
Your {planet1Core} expressed through {planet1Sign} naturally supports your {planet2Core} expressed through {planet2Sign}. \
This creates ease where {planet1Keyword} and {planet2Keyword} work together seamlessly, \
allowing you to express both energies with natural grace.";

const COOPERATIVE_TEMPLATE: &str = "Your {planet1Name} in {planet1Sign} and {planet2Name} in {planet2Sign} form a sextile, creating cooperative energy. \
Your {planet1Core} and {planet2Core} can work together harmoniously, \
with {planet1Sign} expression supporting {planet2Sign} expression. \
This creates opportunities where you can integrate {planet1Keyword} with {planet2Keyword} \
through conscious effort and awareness.";

pub fn aspect_template(key: TemplateKey) -> &'static str {
    match key {
        TemplateKey::Merged => MERGED_TEMPLATE,
        TemplateKey::Polarized => POLARIZED_TEMPLATE,
        TemplateKey::Friction => FRICTION_TEMPLATE,
        TemplateKey::Flowing => FLOWING_TEMPLATE,
        TemplateKey::Cooperative => COOPERATIVE_TEMPLATE,
    }
}

// ---------------------------
// ## Report structure
// ---------------------------

/// Ordered guidance lines emitted in the report header.
pub const HOLISTIC_INSTRUCTIONS: [&str; 7] = [
    "Start with the CORE PERSONALITY SYNTHESIS - this is the foundation.",
    "Use ASPECT-DRIVEN narrative - combine placements that aspect each other.",
    "Avoid repeating isolated placement descriptions when aspects already cover them.",
    "Group aspects by theme (Identity/Emotions, Mind/Communication, Love/Sex, Growth/Challenges).",
    "Use planet significance scores to emphasize heavily aspected planets.",
    "Include BOTH positive and negative qualities throughout.",
    "Show relationships between chart pieces, not just isolated descriptions.",
];

pub const SYNTHESIS_SECTION_TITLE: &str =
    "CORE PERSONALITY SYNTHESIS (Luminaries + Chart Ruler)";
pub const FOUNDATION_LABEL: &str = "FOUNDATION:";
pub const IDENTITY_EMOTIONS_LABEL: &str = "IDENTITY & EMOTIONS (Sun-Moon {aspect}):";
pub const IDENTITY_EMOTIONS_NO_ASPECT_LABEL: &str = "IDENTITY & EMOTIONS (Sun-Moon):";
pub const IDENTITY_EXPRESSION_LABEL: &str = "IDENTITY & EXPRESSION (Sun-{ruler} {aspect}):";
pub const EMOTIONS_EXPRESSION_LABEL: &str = "EMOTIONS & EXPRESSION (Moon-{ruler} {aspect}):";
pub const STRESS_RESPONSE_LABEL: &str = "STRESS RESPONSE:";

pub const SECTION_ASPECT_DRIVEN: &str = "ASPECT-DRIVEN INTERPRETATIONS (Grouped by Theme)";
pub const SECTION_PLANET_SIGNIFICANCE: &str =
    "PLANET SIGNIFICANCE SCORES (Higher = More Important)";
pub const SECTION_PLACEMENT_DETAILS: &str = "PLACEMENT DETAILS (Technical Reference)";

pub const STRESS_RESPONSE_TEMPLATE: &str = "When under stress, your {ascendantSign} Ascendant may show {ascendantNegative}, \
while your {moonSign} Moon reacts with {moonNegative}. \
{rulerInfluence}";

pub const RULER_INFLUENCE_TEMPLATE: &str =
    "Your chart ruler {rulerPlanet} in {rulerSign} influences how you {rulerNegative}.";

pub const NO_ASPECT_SUN_MOON_TEMPLATE: &str = "Your {sunSign} Sun makes you {sunPositive}, while your {moonSign} Moon needs {moonPositive}. \
Without a major aspect between them, these energies operate somewhat independently, \
creating a dynamic where your identity and emotional needs may not always align.";

// ---------------------------
// ## Significance thresholds
// ---------------------------

pub const SIGNIFICANCE_HIGH: f64 = 0.7;
pub const SIGNIFICANCE_MEDIUM: f64 = 0.5;
pub const SIGNIFICANCE_LOW: f64 = 0.0;

/// Display tier for a raw significance score. The raw score is always kept;
/// this label only decorates it.
pub fn significance_label(score: f64) -> &'static str {
    if score >= SIGNIFICANCE_HIGH {
        "HIGH"
    } else if score >= SIGNIFICANCE_MEDIUM {
        "MEDIUM"
    } else {
        "LOW"
    }
}

// ---------------------------
// ## Placeholder substitution
// ---------------------------

/// Replace every `{key}` occurrence for each supplied pair. Empty values
/// erase the token entirely; no literal placeholder survives substitution.
pub fn replace_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in values {
        let token = format!("{{{}}}", key);
        result = result.replace(&token, value);
    }
    result
}
