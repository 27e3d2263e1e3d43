//! Static interpretation rules: planet, sign and house meanings under both
//! polarities, aspect tone and style lookups, and the planet significance
//! score. Every lookup is total; a miss yields an empty [`Meaning`] so the
//! renderers never branch on absence.

use serde::Serialize;
use std::fmt;

use crate::{Aspect, AspectKind, BirthChart, ChartPoint, Planet, ZodiacSign};

/// One rule-table entry: a core phrase plus supporting theme and keyword lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meaning {
    pub core: String,
    pub themes: Vec<String>,
    pub keywords: Vec<String>,
}

impl Meaning {
    fn new(core: &str, themes: [&str; 3], keywords: [&str; 3]) -> Meaning {
        Meaning {
            core: core.to_string(),
            themes: themes.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// First keyword, or a caller-supplied fallback phrase.
    pub fn keyword_or(&self, fallback: &str) -> String {
        self.keywords
            .first()
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Polarity {
    Positive,
    Negative,
}

/// Meaning of a planet's energy under the given polarity.
pub fn planet_meaning(planet: Planet, polarity: Polarity) -> Meaning {
    use Planet::*;
    use Polarity::*;
    match (planet, polarity) {
        (Sun, Positive) => Meaning::new(
            "your core identity and life force",
            ["identity", "vitality", "purpose"],
            ["radiant", "confident", "creative"],
        ),
        (Sun, Negative) => Meaning::new(
            "ego inflation and need for recognition",
            ["pride", "self-centeredness", "domination"],
            ["arrogant", "attention-seeking", "overbearing"],
        ),
        (Moon, Positive) => Meaning::new(
            "your emotional instincts and needs",
            ["feelings", "nurturing", "memory"],
            ["intuitive", "caring", "responsive"],
        ),
        (Moon, Negative) => Meaning::new(
            "moodiness and emotional reactivity",
            ["insecurity", "dependency", "oversensitivity"],
            ["moody", "clingy", "defensive"],
        ),
        (Mercury, Positive) => Meaning::new(
            "your thinking and communication style",
            ["mind", "language", "curiosity"],
            ["articulate", "quick", "perceptive"],
        ),
        (Mercury, Negative) => Meaning::new(
            "scattered thinking and overanalysis",
            ["nervousness", "gossip", "indecision"],
            ["restless", "critical", "inconsistent"],
        ),
        (Venus, Positive) => Meaning::new(
            "how you love and what you value",
            ["affection", "beauty", "harmony"],
            ["loving", "charming", "artistic"],
        ),
        (Venus, Negative) => Meaning::new(
            "indulgence and people-pleasing",
            ["vanity", "laziness", "dependence"],
            ["indulgent", "superficial", "placating"],
        ),
        (Mars, Positive) => Meaning::new(
            "your drive and assertive energy",
            ["action", "courage", "desire"],
            ["energetic", "brave", "decisive"],
        ),
        (Mars, Negative) => Meaning::new(
            "impatience and combative energy",
            ["anger", "recklessness", "conflict"],
            ["aggressive", "impulsive", "domineering"],
        ),
        (Jupiter, Positive) => Meaning::new(
            "your growth and search for meaning",
            ["expansion", "optimism", "wisdom"],
            ["generous", "adventurous", "philosophical"],
        ),
        (Jupiter, Negative) => Meaning::new(
            "excess and overconfidence",
            ["overreach", "extravagance", "dogma"],
            ["excessive", "preachy", "restless"],
        ),
        (Saturn, Positive) => Meaning::new(
            "your discipline and sense of structure",
            ["responsibility", "mastery", "endurance"],
            ["disciplined", "reliable", "patient"],
        ),
        (Saturn, Negative) => Meaning::new(
            "restriction and self-doubt",
            ["fear", "limitation", "pessimism"],
            ["rigid", "cold", "self-critical"],
        ),
        (Uranus, Positive) => Meaning::new(
            "your urge for freedom and innovation",
            ["originality", "awakening", "independence"],
            ["inventive", "progressive", "electric"],
        ),
        (Uranus, Negative) => Meaning::new(
            "rebellious disruption and detachment",
            ["instability", "contrariness", "alienation"],
            ["erratic", "rebellious", "aloof"],
        ),
        (Neptune, Positive) => Meaning::new(
            "your imagination and compassion",
            ["dreams", "spirituality", "empathy"],
            ["imaginative", "compassionate", "inspired"],
        ),
        (Neptune, Negative) => Meaning::new(
            "escapism and blurred boundaries",
            ["illusion", "confusion", "avoidance"],
            ["escapist", "deceptive", "ungrounded"],
        ),
        (Pluto, Positive) => Meaning::new(
            "your capacity for deep transformation",
            ["regeneration", "power", "depth"],
            ["transformative", "penetrating", "resilient"],
        ),
        (Pluto, Negative) => Meaning::new(
            "control struggles and obsession",
            ["compulsion", "manipulation", "crisis"],
            ["obsessive", "controlling", "secretive"],
        ),
    }
}

/// Meaning of a zodiac sign's expression under the given polarity.
pub fn sign_meaning(sign: ZodiacSign, polarity: Polarity) -> Meaning {
    use Polarity::*;
    use ZodiacSign::*;
    match (sign, polarity) {
        (Aries, Positive) => Meaning::new(
            "direct, courageous initiative",
            ["independence", "leadership", "new beginnings"],
            ["pioneering", "bold", "energetic"],
        ),
        (Aries, Negative) => Meaning::new(
            "impulsiveness and a quick temper",
            ["impatience", "self-interest", "rashness"],
            ["impulsive", "combative", "headstrong"],
        ),
        (Taurus, Positive) => Meaning::new(
            "steady, sensual persistence",
            ["stability", "loyalty", "material comfort"],
            ["grounded", "patient", "dependable"],
        ),
        (Taurus, Negative) => Meaning::new(
            "stubbornness and resistance to change",
            ["possessiveness", "inertia", "fixity"],
            ["stubborn", "possessive", "complacent"],
        ),
        (Gemini, Positive) => Meaning::new(
            "curious, adaptable expression",
            ["communication", "versatility", "learning"],
            ["curious", "witty", "adaptable"],
        ),
        (Gemini, Negative) => Meaning::new(
            "restlessness and scattered focus",
            ["inconsistency", "superficiality", "nervous energy"],
            ["scattered", "fickle", "distracted"],
        ),
        (Cancer, Positive) => Meaning::new(
            "nurturing emotional depth",
            ["home", "protection", "belonging"],
            ["nurturing", "intuitive", "protective"],
        ),
        (Cancer, Negative) => Meaning::new(
            "defensiveness and clinging to the past",
            ["moodiness", "withdrawal", "over-attachment"],
            ["defensive", "clingy", "brooding"],
        ),
        (Leo, Positive) => Meaning::new(
            "warm, expressive confidence",
            ["creativity", "generosity", "self-expression"],
            ["warm", "dramatic", "magnanimous"],
        ),
        (Leo, Negative) => Meaning::new(
            "pride and a need for admiration",
            ["vanity", "stubbornness", "theatrics"],
            ["proud", "demanding", "showy"],
        ),
        (Virgo, Positive) => Meaning::new(
            "precise, helpful discernment",
            ["service", "craft", "improvement"],
            ["meticulous", "practical", "analytical"],
        ),
        (Virgo, Negative) => Meaning::new(
            "perfectionism and self-criticism",
            ["worry", "nitpicking", "overthinking"],
            ["perfectionist", "anxious", "critical"],
        ),
        (Libra, Positive) => Meaning::new(
            "harmonizing, fair-minded grace",
            ["partnership", "balance", "diplomacy"],
            ["diplomatic", "gracious", "fair"],
        ),
        (Libra, Negative) => Meaning::new(
            "indecision and conflict avoidance",
            ["dependency", "appeasement", "vacillation"],
            ["indecisive", "conflict-averse", "approval-seeking"],
        ),
        (Scorpio, Positive) => Meaning::new(
            "intense, transformative focus",
            ["depth", "loyalty", "regeneration"],
            ["intense", "magnetic", "perceptive"],
        ),
        (Scorpio, Negative) => Meaning::new(
            "jealousy and emotional control",
            ["suspicion", "secrecy", "vengefulness"],
            ["jealous", "controlling", "guarded"],
        ),
        (Sagittarius, Positive) => Meaning::new(
            "adventurous, optimistic vision",
            ["exploration", "faith", "honesty"],
            ["adventurous", "optimistic", "candid"],
        ),
        (Sagittarius, Negative) => Meaning::new(
            "bluntness and overreach",
            ["tactlessness", "restlessness", "exaggeration"],
            ["blunt", "restless", "preachy"],
        ),
        (Capricorn, Positive) => Meaning::new(
            "ambitious, disciplined mastery",
            ["achievement", "structure", "perseverance"],
            ["ambitious", "responsible", "strategic"],
        ),
        (Capricorn, Negative) => Meaning::new(
            "rigidity and emotional reserve",
            ["pessimism", "workaholism", "coldness"],
            ["rigid", "severe", "distant"],
        ),
        (Aquarius, Positive) => Meaning::new(
            "original, humanitarian thinking",
            ["innovation", "community", "ideals"],
            ["original", "humanitarian", "independent"],
        ),
        (Aquarius, Negative) => Meaning::new(
            "aloofness and contrarian detachment",
            ["emotional distance", "rebellion", "unpredictability"],
            ["aloof", "contrarian", "detached"],
        ),
        (Pisces, Positive) => Meaning::new(
            "compassionate, imaginative sensitivity",
            ["empathy", "artistry", "transcendence"],
            ["compassionate", "dreamy", "gentle"],
        ),
        (Pisces, Negative) => Meaning::new(
            "escapism and porous boundaries",
            ["avoidance", "martyrdom", "confusion"],
            ["escapist", "passive", "boundary-less"],
        ),
    }
}

/// Meaning of a house placement under the given polarity.
pub fn house_meaning(house: crate::House, polarity: Polarity) -> Meaning {
    use crate::House::*;
    use Polarity::*;
    match (house, polarity) {
        (First, Positive) => Meaning::new(
            "self-presentation and fresh starts",
            ["appearance", "initiative", "first impressions"],
            ["self-aware", "visible", "direct"],
        ),
        (First, Negative) => Meaning::new(
            "self-absorption and image fixation",
            ["vanity", "impatience", "defensiveness"],
            ["self-focused", "reactive", "guarded"],
        ),
        (Second, Positive) => Meaning::new(
            "material security and self-worth",
            ["resources", "values", "stability"],
            ["resourceful", "steady", "grounded"],
        ),
        (Second, Negative) => Meaning::new(
            "possessiveness and fear of loss",
            ["hoarding", "materialism", "scarcity thinking"],
            ["possessive", "acquisitive", "anxious"],
        ),
        (Third, Positive) => Meaning::new(
            "learning, language and local ties",
            ["communication", "siblings", "daily connections"],
            ["curious", "expressive", "connected"],
        ),
        (Third, Negative) => Meaning::new(
            "mental restlessness and scattered talk",
            ["gossip", "distraction", "overload"],
            ["restless", "scattered", "chatty"],
        ),
        (Fourth, Positive) => Meaning::new(
            "home, roots and inner foundation",
            ["family", "belonging", "emotional base"],
            ["rooted", "nurturing", "private"],
        ),
        (Fourth, Negative) => Meaning::new(
            "withdrawal into the past",
            ["family baggage", "insularity", "nostalgia"],
            ["withdrawn", "stuck", "insular"],
        ),
        (Fifth, Positive) => Meaning::new(
            "creative play and heartfelt romance",
            ["creativity", "children", "pleasure"],
            ["playful", "expressive", "romantic"],
        ),
        (Fifth, Negative) => Meaning::new(
            "drama-seeking and risky indulgence",
            ["gambling", "ego display", "fickle romance"],
            ["dramatic", "risk-prone", "attention-hungry"],
        ),
        (Sixth, Positive) => Meaning::new(
            "daily work, craft and wellbeing",
            ["routine", "health", "service"],
            ["diligent", "helpful", "organized"],
        ),
        (Sixth, Negative) => Meaning::new(
            "worry and overwork",
            ["anxiety", "perfectionism", "burnout"],
            ["worried", "overworked", "self-critical"],
        ),
        (Seventh, Positive) => Meaning::new(
            "partnership and one-to-one bonds",
            ["marriage", "cooperation", "mirroring"],
            ["partnering", "diplomatic", "committed"],
        ),
        (Seventh, Negative) => Meaning::new(
            "losing yourself in others",
            ["codependency", "projection", "open conflict"],
            ["dependent", "projecting", "contentious"],
        ),
        (Eighth, Positive) => Meaning::new(
            "shared resources and deep renewal",
            ["intimacy", "transformation", "inheritance"],
            ["deep", "regenerative", "trusting"],
        ),
        (Eighth, Negative) => Meaning::new(
            "power struggles over what is shared",
            ["jealousy", "entanglement", "crisis"],
            ["entangled", "suspicious", "controlling"],
        ),
        (Ninth, Positive) => Meaning::new(
            "exploration, belief and higher study",
            ["travel", "philosophy", "teaching"],
            ["broad-minded", "seeking", "principled"],
        ),
        (Ninth, Negative) => Meaning::new(
            "dogmatism and perpetual wandering",
            ["preaching", "escape through travel", "overpromising"],
            ["dogmatic", "scattered", "restless"],
        ),
        (Tenth, Positive) => Meaning::new(
            "career, reputation and public role",
            ["ambition", "achievement", "authority"],
            ["accomplished", "visible", "respected"],
        ),
        (Tenth, Negative) => Meaning::new(
            "status anxiety and overidentification with work",
            ["image management", "workaholism", "fear of failure"],
            ["status-driven", "overextended", "guarded"],
        ),
        (Eleventh, Positive) => Meaning::new(
            "friendship, groups and future hopes",
            ["community", "ideals", "networks"],
            ["sociable", "idealistic", "forward-looking"],
        ),
        (Eleventh, Negative) => Meaning::new(
            "detachment from intimacy",
            ["crowd-following", "utopianism", "impersonal ties"],
            ["detached", "scattered", "impersonal"],
        ),
        (Twelfth, Positive) => Meaning::new(
            "solitude, dreams and hidden strength",
            ["reflection", "compassion", "the unconscious"],
            ["reflective", "compassionate", "private"],
        ),
        (Twelfth, Negative) => Meaning::new(
            "self-undoing and avoidance",
            ["isolation", "escapism", "hidden fears"],
            ["avoidant", "isolated", "self-sabotaging"],
        ),
    }
}

/// One-line blend of a planet's energy with its sign's expression.
pub fn planet_sign_interpretation(
    planet: Planet,
    sign: ZodiacSign,
    polarity: Polarity,
) -> String {
    let planet_m = planet_meaning(planet, polarity);
    let sign_m = sign_meaning(sign, polarity);
    match polarity {
        Polarity::Positive => format!(
            "Your {} channels {} through {}.",
            planet.display_name(),
            planet_m.core,
            sign_m.core
        ),
        Polarity::Negative => format!(
            "Under pressure, your {} can slip into {} colored by {}.",
            planet.display_name(),
            planet_m.core,
            sign_m.core
        ),
    }
}

/// Broad tone of an aspect, used to annotate per-planet aspect lists.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectTone {
    Harmonious,
    Challenging,
    Neutral,
}

impl fmt::Display for AspectTone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            AspectTone::Harmonious => "harmonious",
            AspectTone::Challenging => "challenging",
            AspectTone::Neutral => "neutral",
        };
        write!(f, "{}", s)
    }
}

pub fn aspect_tone(kind: &AspectKind) -> AspectTone {
    match kind {
        AspectKind::Conjunction | AspectKind::Trine | AspectKind::Sextile => {
            AspectTone::Harmonious
        }
        AspectKind::Square | AspectKind::Opposition => AspectTone::Challenging,
        AspectKind::Quincunx | AspectKind::Other(_) => AspectTone::Neutral,
    }
}

/// Which of the five fixed narrative templates an aspect renders with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKey {
    Merged,
    Polarized,
    Friction,
    Flowing,
    Cooperative,
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TemplateKey::Merged => "merged",
            TemplateKey::Polarized => "polarized",
            TemplateKey::Friction => "friction",
            TemplateKey::Flowing => "flowing",
            TemplateKey::Cooperative => "cooperative",
        };
        write!(f, "{}", s)
    }
}

/// Display descriptor for an aspect: template key plus tension and strength
/// labels for the synthesis section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectStyle {
    pub polarity: TemplateKey,
    pub tension: &'static str,
    pub strength: &'static str,
}

/// Unknown kinds (quincunx included) fall back to the cooperative style.
pub fn aspect_style(kind: &AspectKind) -> AspectStyle {
    match kind {
        AspectKind::Conjunction => AspectStyle {
            polarity: TemplateKey::Merged,
            tension: "low",
            strength: "very strong",
        },
        AspectKind::Opposition => AspectStyle {
            polarity: TemplateKey::Polarized,
            tension: "high",
            strength: "very strong",
        },
        AspectKind::Square => AspectStyle {
            polarity: TemplateKey::Friction,
            tension: "high",
            strength: "strong",
        },
        AspectKind::Trine => AspectStyle {
            polarity: TemplateKey::Flowing,
            tension: "low",
            strength: "strong",
        },
        AspectKind::Sextile => AspectStyle {
            polarity: TemplateKey::Cooperative,
            tension: "low",
            strength: "moderate",
        },
        AspectKind::Quincunx | AspectKind::Other(_) => AspectStyle {
            polarity: TemplateKey::Cooperative,
            tension: "subtle",
            strength: "mild",
        },
    }
}

// ---------------------------
// ## Significance scoring
// ---------------------------

// Hard aspects outrank soft ones; the orb factor stays in [0.5, 1.0] so
// adding an aspect never lowers the total.
const WEIGHT_CONJUNCTION: f64 = 0.20;
const WEIGHT_OPPOSITION: f64 = 0.18;
const WEIGHT_SQUARE: f64 = 0.16;
const WEIGHT_TRINE: f64 = 0.12;
const WEIGHT_SEXTILE: f64 = 0.10;
const WEIGHT_MINOR: f64 = 0.08;

const ANGULAR_HOUSE_BONUS: f64 = 0.15;
const CHART_RULER_BONUS: f64 = 0.15;
const LUMINARY_BONUS: f64 = 0.05;

fn aspect_weight(kind: &AspectKind) -> f64 {
    match kind {
        AspectKind::Conjunction => WEIGHT_CONJUNCTION,
        AspectKind::Opposition => WEIGHT_OPPOSITION,
        AspectKind::Square => WEIGHT_SQUARE,
        AspectKind::Trine => WEIGHT_TRINE,
        AspectKind::Sextile => WEIGHT_SEXTILE,
        AspectKind::Quincunx | AspectKind::Other(_) => WEIGHT_MINOR,
    }
}

fn orb_factor(orb: f64) -> f64 {
    1.0 - orb.clamp(0.0, 10.0) / 20.0
}

/// How prominent a planet is in this chart, in [0, 1]. Driven by the count
/// and kind of aspects touching it (tighter orb scores higher), with bonuses
/// for angular placement, chart rulership and the luminaries.
pub fn planet_significance(planet: Planet, aspects: &[Aspect], chart: &BirthChart) -> f64 {
    let point = ChartPoint::Planet(planet);
    let mut score: f64 = aspects
        .iter()
        .filter(|a| a.touches(point))
        .map(|a| aspect_weight(&a.aspect) * orb_factor(a.orb))
        .sum();

    if let Some(position) = chart.planets.get(&planet) {
        if position.house.is_angular() {
            score += ANGULAR_HOUSE_BONUS;
        }
    }
    if planet == chart.chart_ruler() {
        score += CHART_RULER_BONUS;
    }
    if planet.is_luminary() {
        score += LUMINARY_BONUS;
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AnglePosition, Angles, BirthData, Element, GeoLocation, House, PlanetPosition,
    };
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    fn chart_with(planets: &[(Planet, ZodiacSign, House)], aspects: Vec<Aspect>) -> BirthChart {
        let mut map = BTreeMap::new();
        for &(planet, sign, house) in planets {
            map.insert(
                planet,
                PlanetPosition {
                    sign,
                    element: sign.element(),
                    house,
                    degree: 5.0,
                    is_retrograde: false,
                },
            );
        }
        BirthChart {
            birth_data: BirthData {
                date: "1990-01-01".to_string(),
                time: "12:00".to_string(),
                location: GeoLocation {
                    latitude: 40.7,
                    longitude: -74.0,
                    timezone: -5.0,
                },
            },
            angles: Angles {
                ascendant: AnglePosition {
                    sign: ZodiacSign::Aries,
                    element: Element::Fire,
                    degree: 20.0,
                },
                midheaven: AnglePosition {
                    sign: ZodiacSign::Capricorn,
                    element: Element::Earth,
                    degree: 281.0,
                },
            },
            planets: map,
            houses: Vec::new(),
            aspects,
        }
    }

    fn trine(a: Planet, b: Planet, orb: f64) -> Aspect {
        Aspect {
            planet1: a.into(),
            planet2: b.into(),
            aspect: AspectKind::Trine,
            orb,
        }
    }

    #[test]
    fn lookups_are_total_and_nonempty() {
        for planet in Planet::iter() {
            for polarity in [Polarity::Positive, Polarity::Negative] {
                let m = planet_meaning(planet, polarity);
                assert!(!m.core.is_empty());
                assert_eq!(m.themes.len(), 3);
                assert_eq!(m.keywords.len(), 3);
            }
        }
        for sign in ZodiacSign::iter() {
            assert!(!sign_meaning(sign, Polarity::Positive).core.is_empty());
            assert!(!sign_meaning(sign, Polarity::Negative).core.is_empty());
        }
        for house in House::all() {
            assert!(!house_meaning(house, Polarity::Positive).core.is_empty());
            assert!(!house_meaning(house, Polarity::Negative).core.is_empty());
        }
    }

    #[test]
    fn keyword_fallback() {
        let empty = Meaning::default();
        assert_eq!(empty.keyword_or("one quality"), "one quality");
        let full = sign_meaning(ZodiacSign::Aries, Polarity::Positive);
        assert_eq!(full.keyword_or("x"), "pioneering");
    }

    #[test]
    fn tone_classification() {
        assert_eq!(aspect_tone(&AspectKind::Trine), AspectTone::Harmonious);
        assert_eq!(aspect_tone(&AspectKind::Conjunction), AspectTone::Harmonious);
        assert_eq!(aspect_tone(&AspectKind::Square), AspectTone::Challenging);
        assert_eq!(aspect_tone(&AspectKind::Quincunx), AspectTone::Neutral);
        assert_eq!(
            aspect_tone(&AspectKind::Other("semisextile".to_string())),
            AspectTone::Neutral
        );
    }

    #[test]
    fn unknown_kind_gets_cooperative_style() {
        let style = aspect_style(&AspectKind::Other("novile".to_string()));
        assert_eq!(style.polarity, TemplateKey::Cooperative);
        let quincunx = aspect_style(&AspectKind::Quincunx);
        assert_eq!(quincunx.polarity, TemplateKey::Cooperative);
    }

    #[test]
    fn significance_monotone_in_aspect_count() {
        let base = chart_with(&[(Planet::Mercury, ZodiacSign::Gemini, House::Third)], vec![]);
        let one = vec![trine(Planet::Mercury, Planet::Venus, 3.0)];
        let two = vec![
            trine(Planet::Mercury, Planet::Venus, 3.0),
            trine(Planet::Mercury, Planet::Mars, 3.0),
        ];
        let s0 = planet_significance(Planet::Mercury, &[], &base);
        let s1 = planet_significance(Planet::Mercury, &one, &base);
        let s2 = planet_significance(Planet::Mercury, &two, &base);
        assert!(s1 >= s0);
        assert!(s2 >= s1);
    }

    #[test]
    fn tighter_orb_scores_higher() {
        let chart = chart_with(&[(Planet::Venus, ZodiacSign::Libra, House::Fifth)], vec![]);
        let tight = vec![trine(Planet::Venus, Planet::Moon, 0.5)];
        let wide = vec![trine(Planet::Venus, Planet::Moon, 8.0)];
        let st = planet_significance(Planet::Venus, &tight, &chart);
        let sw = planet_significance(Planet::Venus, &wide, &chart);
        assert!(st >= sw);
    }

    #[test]
    fn bonuses_stack_for_angular_ruler_luminary() {
        // Aries ascendant: ruler is Mars.
        let chart = chart_with(
            &[
                (Planet::Mars, ZodiacSign::Aries, House::First),
                (Planet::Sun, ZodiacSign::Capricorn, House::Ninth),
            ],
            vec![],
        );
        let mars = planet_significance(Planet::Mars, &[], &chart);
        assert_relative_eq!(mars, ANGULAR_HOUSE_BONUS + CHART_RULER_BONUS);
        let sun = planet_significance(Planet::Sun, &[], &chart);
        assert_relative_eq!(sun, LUMINARY_BONUS);
    }

    #[test]
    fn score_is_clamped_to_unit_interval() {
        let chart = chart_with(&[(Planet::Sun, ZodiacSign::Leo, House::First)], vec![]);
        let pile: Vec<Aspect> = (0..20)
            .map(|_| Aspect {
                planet1: Planet::Sun.into(),
                planet2: Planet::Pluto.into(),
                aspect: AspectKind::Conjunction,
                orb: 0.0,
            })
            .collect();
        let score = planet_significance(Planet::Sun, &pile, &chart);
        assert!(score <= 1.0);
    }
}
