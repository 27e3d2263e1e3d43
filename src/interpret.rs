//! Interpretation builder: turns a [`BirthChart`] into the structured,
//! significance-scored, theme-grouped interpretation object. Pure and
//! deterministic; the only fatal condition is an empty planet map.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::rules::{
    self, planet_sign_interpretation, AspectTone, Polarity,
};
use crate::synthesis::{generate_core_synthesis, CoreSynthesis};
use crate::themes::{group_aspects_by_theme, AspectGroups};
use crate::{
    Aspect, BirthChart, ChartError, ChartPoint, Element, GeoLocation, House, Modality, Planet,
    Result, ZodiacSign,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartInfo {
    pub date: String,
    pub time: String,
    pub location: GeoLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AngleInterpretation {
    pub sign: ZodiacSign,
    pub element: Element,
    pub degree: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ruler: Option<Planet>,
    pub positive: String,
    pub negative: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnglesInterpretation {
    pub ascendant: AngleInterpretation,
    pub midheaven: AngleInterpretation,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectPolarity {
    Positive,
    Negative,
    Mixed,
}

impl fmt::Display for AspectPolarity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            AspectPolarity::Positive => "positive",
            AspectPolarity::Negative => "negative",
            AspectPolarity::Mixed => "mixed",
        };
        write!(f, "{}", s)
    }
}

/// One polarity's worth of rule-table text for a placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolaritySide {
    pub planet_core: String,
    pub planet_themes: Vec<String>,
    pub planet_keywords: Vec<String>,
    pub sign_core: String,
    pub sign_themes: Vec<String>,
    pub sign_keywords: Vec<String>,
    pub house_core: String,
    pub house_themes: Vec<String>,
    pub house_keywords: Vec<String>,
    pub interpretation: String,
}

/// An input aspect annotated with its broad tone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedAspect {
    #[serde(flatten)]
    pub aspect: Aspect,
    pub polarity: AspectTone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetInterpretation {
    pub name: &'static str,
    pub sign: ZodiacSign,
    pub element: Element,
    pub house: House,
    pub degree: f64,
    pub is_retrograde: bool,
    pub positive: PolaritySide,
    pub negative: PolaritySide,
    pub aspect_polarity: AspectPolarity,
    pub aspects: Vec<AnnotatedAspect>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementCount {
    pub element: Element,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalityCount {
    pub modality: Modality,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementalBalance {
    pub distribution: BTreeMap<Element, usize>,
    pub dominant: Element,
    pub lacking: Element,
    pub balance: Vec<ElementCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalBalance {
    pub distribution: BTreeMap<Modality, usize>,
    pub dominant: Modality,
    pub balance: Vec<ModalityCount>,
}

/// The complete derived interpretation. Built once per chart; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    pub chart_info: ChartInfo,
    pub angles: AnglesInterpretation,
    pub planets: BTreeMap<Planet, PlanetInterpretation>,
    pub planet_significance: BTreeMap<Planet, f64>,
    pub aspect_groups: AspectGroups,
    pub core_synthesis: Option<CoreSynthesis>,
    pub elemental_balance: ElementalBalance,
    pub modal_balance: ModalBalance,
    pub key_themes: Vec<String>,
}

/// Tally planets and houses per element (22 counts for a full chart).
/// Ties break by element enumeration order: Fire, Earth, Air, Water.
pub fn calculate_elemental_balance(chart: &BirthChart) -> ElementalBalance {
    let mut distribution: BTreeMap<Element, usize> =
        Element::iter().map(|e| (e, 0)).collect();

    for position in chart.planets.values() {
        if let Some(count) = distribution.get_mut(&position.element) {
            *count += 1;
        }
    }
    for house in &chart.houses {
        if let Some(count) = distribution.get_mut(&house.element) {
            *count += 1;
        }
    }

    let mut balance: Vec<ElementCount> = Element::iter()
        .map(|element| ElementCount {
            element,
            count: distribution[&element],
        })
        .collect();
    balance.sort_by(|a, b| b.count.cmp(&a.count));

    let dominant = balance[0].element;
    let lacking = balance[balance.len() - 1].element;

    ElementalBalance {
        distribution,
        dominant,
        lacking,
        balance,
    }
}

/// Same tally shape, bucketed by sign modality. No `lacking` category.
pub fn calculate_modal_balance(chart: &BirthChart) -> ModalBalance {
    let mut distribution: BTreeMap<Modality, usize> =
        Modality::iter().map(|m| (m, 0)).collect();

    for position in chart.planets.values() {
        *distribution.entry(position.sign.modality()).or_insert(0) += 1;
    }
    for house in &chart.houses {
        *distribution.entry(house.sign.modality()).or_insert(0) += 1;
    }

    let mut balance: Vec<ModalityCount> = Modality::iter()
        .map(|modality| ModalityCount {
            modality,
            count: distribution[&modality],
        })
        .collect();
    balance.sort_by(|a, b| b.count.cmp(&a.count));

    let dominant = balance[0].modality;

    ModalBalance {
        distribution,
        dominant,
        balance,
    }
}

/// Overall lean of the aspects touching a planet. Only challenging aspects
/// lean negative, only harmonious lean positive, both present is mixed.
/// A planet with no aspects at all reads positive by convention.
pub fn planet_aspect_polarity(planet: Planet, aspects: &[Aspect]) -> AspectPolarity {
    let point = ChartPoint::Planet(planet);
    let touching: Vec<&Aspect> = aspects.iter().filter(|a| a.touches(point)).collect();

    let has_challenging = touching.iter().any(|a| a.aspect.is_challenging());
    let has_harmonious = touching.iter().any(|a| a.aspect.is_harmonious());

    match (has_challenging, has_harmonious) {
        (true, false) => AspectPolarity::Negative,
        (false, true) => AspectPolarity::Positive,
        (true, true) => AspectPolarity::Mixed,
        (false, false) => AspectPolarity::Positive,
    }
}

fn polarity_side(
    planet: Planet,
    sign: ZodiacSign,
    house: House,
    polarity: Polarity,
) -> PolaritySide {
    let planet_m = rules::planet_meaning(planet, polarity);
    let sign_m = rules::sign_meaning(sign, polarity);
    let house_m = rules::house_meaning(house, polarity);
    PolaritySide {
        planet_core: planet_m.core,
        planet_themes: planet_m.themes,
        planet_keywords: planet_m.keywords,
        sign_core: sign_m.core,
        sign_themes: sign_m.themes,
        sign_keywords: sign_m.keywords,
        house_core: house_m.core,
        house_themes: house_m.themes,
        house_keywords: house_m.keywords,
        interpretation: planet_sign_interpretation(planet, sign, polarity),
    }
}

fn angle_interpretation(
    sign: ZodiacSign,
    element: Element,
    degree: f64,
    ruler: Option<Planet>,
) -> AngleInterpretation {
    AngleInterpretation {
        sign,
        element,
        degree,
        ruler,
        positive: rules::sign_meaning(sign, Polarity::Positive).core,
        negative: rules::sign_meaning(sign, Polarity::Negative).core,
    }
}

fn extract_key_themes(
    elemental: &ElementalBalance,
    modal: &ModalBalance,
    planets: &BTreeMap<Planet, PlanetInterpretation>,
) -> Vec<String> {
    let mut themes = Vec::new();
    themes.push(format!("Strong {} element influence", elemental.dominant));
    themes.push(format!("Dominant {} modality", modal.dominant));

    for (_, planet) in planets
        .iter()
        .filter(|(_, p)| !p.positive.planet_themes.is_empty())
        .take(3)
    {
        themes.push(format!(
            "{} themes: {}",
            planet.name,
            planet.positive.planet_themes.join(", ")
        ));
    }

    themes
}

/// Build the full interpretation for a chart. Errors only when the chart
/// carries no planets at all.
pub fn generate_chart_interpretation(chart: &BirthChart) -> Result<Interpretation> {
    if chart.planets.is_empty() {
        return Err(ChartError::EmptyPlanets);
    }

    let ruler = chart.chart_ruler();

    let angles = AnglesInterpretation {
        ascendant: angle_interpretation(
            chart.angles.ascendant.sign,
            chart.angles.ascendant.element,
            chart.angles.ascendant.degree,
            Some(ruler),
        ),
        midheaven: angle_interpretation(
            chart.angles.midheaven.sign,
            chart.angles.midheaven.element,
            chart.angles.midheaven.degree,
            None,
        ),
    };

    let planet_significance: BTreeMap<Planet, f64> = chart
        .planets
        .keys()
        .map(|&planet| {
            (
                planet,
                rules::planet_significance(planet, &chart.aspects, chart),
            )
        })
        .collect();

    let aspect_groups = group_aspects_by_theme(&chart.aspects, ruler);
    let core_synthesis = generate_core_synthesis(chart);
    let elemental_balance = calculate_elemental_balance(chart);
    let modal_balance = calculate_modal_balance(chart);

    let mut planets = BTreeMap::new();
    for (&planet, position) in &chart.planets {
        let point = ChartPoint::Planet(planet);
        let aspects: Vec<AnnotatedAspect> = chart
            .aspects
            .iter()
            .filter(|a| a.touches(point))
            .map(|a| AnnotatedAspect {
                aspect: a.clone(),
                polarity: rules::aspect_tone(&a.aspect),
            })
            .collect();

        planets.insert(
            planet,
            PlanetInterpretation {
                name: planet.display_name(),
                sign: position.sign,
                element: position.element,
                house: position.house,
                degree: position.degree,
                is_retrograde: position.is_retrograde,
                positive: polarity_side(planet, position.sign, position.house, Polarity::Positive),
                negative: polarity_side(planet, position.sign, position.house, Polarity::Negative),
                aspect_polarity: planet_aspect_polarity(planet, &chart.aspects),
                aspects,
            },
        );
    }

    let key_themes = extract_key_themes(&elemental_balance, &modal_balance, &planets);

    Ok(Interpretation {
        chart_info: ChartInfo {
            date: chart.birth_data.date.clone(),
            time: chart.birth_data.time.clone(),
            location: chart.birth_data.location.clone(),
        },
        angles,
        planets,
        planet_significance,
        aspect_groups,
        core_synthesis,
        elemental_balance,
        modal_balance,
        key_themes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AnglePosition, Angles, AspectKind, BirthData, HousePosition, PlanetPosition,
    };

    fn position(sign: ZodiacSign, house: House) -> PlanetPosition {
        PlanetPosition {
            sign,
            element: sign.element(),
            house,
            degree: 10.0,
            is_retrograde: false,
        }
    }

    fn sample_chart() -> BirthChart {
        let mut planets = BTreeMap::new();
        planets.insert(Planet::Sun, position(ZodiacSign::Capricorn, House::Ninth));
        planets.insert(Planet::Moon, position(ZodiacSign::Pisces, House::Twelfth));
        planets.insert(
            Planet::Mercury,
            position(ZodiacSign::Capricorn, House::Tenth),
        );
        planets.insert(Planet::Mars, position(ZodiacSign::Aries, House::First));

        let houses = ZodiacSign::iter()
            .enumerate()
            .filter_map(|(i, sign)| {
                House::from_index(i + 1).map(|number| HousePosition {
                    number,
                    sign,
                    element: sign.element(),
                    degree: 20.0,
                })
            })
            .collect();

        BirthChart {
            birth_data: BirthData {
                date: "1990-01-01".to_string(),
                time: "12:00".to_string(),
                location: GeoLocation {
                    latitude: 40.7128,
                    longitude: -74.006,
                    timezone: -5.0,
                },
            },
            angles: Angles {
                ascendant: AnglePosition {
                    sign: ZodiacSign::Aries,
                    element: Element::Fire,
                    degree: 20.66,
                },
                midheaven: AnglePosition {
                    sign: ZodiacSign::Capricorn,
                    element: Element::Earth,
                    degree: 281.1,
                },
            },
            planets,
            houses,
            aspects: vec![
                Aspect {
                    planet1: Planet::Sun.into(),
                    planet2: Planet::Moon.into(),
                    aspect: AspectKind::Square,
                    orb: 2.5,
                },
                Aspect {
                    planet1: Planet::Sun.into(),
                    planet2: Planet::Mars.into(),
                    aspect: AspectKind::Trine,
                    orb: 1.0,
                },
            ],
        }
    }

    #[test]
    fn empty_planets_is_fatal() {
        let mut chart = sample_chart();
        chart.planets.clear();
        assert!(matches!(
            generate_chart_interpretation(&chart),
            Err(ChartError::EmptyPlanets)
        ));
    }

    #[test]
    fn elemental_distribution_sums_planets_plus_houses() {
        let chart = sample_chart();
        let balance = calculate_elemental_balance(&chart);
        let total: usize = balance.distribution.values().sum();
        assert_eq!(total, chart.planets.len() + chart.houses.len());
    }

    #[test]
    fn dominant_and_lacking_differ_unless_uniform() {
        let chart = sample_chart();
        let balance = calculate_elemental_balance(&chart);
        let counts: Vec<usize> = balance.distribution.values().copied().collect();
        let uniform = counts.windows(2).all(|w| w[0] == w[1]);
        if !uniform {
            assert_ne!(balance.dominant, balance.lacking);
        }
    }

    #[test]
    fn uniform_distribution_ties_break_by_element_order() {
        let mut chart = sample_chart();
        chart.planets.clear();
        // Twelve houses spread evenly, three per element, zero planets.
        let balance = calculate_elemental_balance(&chart);
        assert_eq!(balance.dominant, Element::Fire);
        assert_eq!(balance.lacking, Element::Water);
    }

    #[test]
    fn modal_balance_counts_signs() {
        let chart = sample_chart();
        let balance = calculate_modal_balance(&chart);
        let total: usize = balance.distribution.values().sum();
        assert_eq!(total, chart.planets.len() + chart.houses.len());
        // Capricorn Sun + Capricorn Mercury + Aries Mars + 4 cardinal houses.
        assert_eq!(balance.distribution[&Modality::Cardinal], 7);
    }

    #[test]
    fn mixed_polarity_from_square_and_trine() {
        let chart = sample_chart();
        assert_eq!(
            planet_aspect_polarity(Planet::Sun, &chart.aspects),
            AspectPolarity::Mixed
        );
    }

    #[test]
    fn zero_aspects_defaults_positive() {
        assert_eq!(
            planet_aspect_polarity(Planet::Venus, &[]),
            AspectPolarity::Positive
        );
    }

    #[test]
    fn only_challenging_is_negative() {
        let chart = sample_chart();
        assert_eq!(
            planet_aspect_polarity(Planet::Moon, &chart.aspects),
            AspectPolarity::Negative
        );
    }

    #[test]
    fn interpretation_enriches_each_planet() {
        let chart = sample_chart();
        let interp = generate_chart_interpretation(&chart).unwrap();

        assert_eq!(interp.planets.len(), 4);
        let sun = &interp.planets[&Planet::Sun];
        assert_eq!(sun.name, "Sun");
        assert!(!sun.positive.planet_core.is_empty());
        assert!(!sun.negative.sign_core.is_empty());
        assert!(!sun.positive.interpretation.is_empty());
        assert_eq!(sun.aspects.len(), 2);
        assert_eq!(sun.aspect_polarity, AspectPolarity::Mixed);

        // Aries rising: Mars rules the chart.
        assert_eq!(interp.angles.ascendant.ruler, Some(Planet::Mars));
        assert_eq!(interp.angles.midheaven.ruler, None);
        assert!(interp.core_synthesis.is_some());
    }

    #[test]
    fn significance_scores_cover_every_planet() {
        let chart = sample_chart();
        let interp = generate_chart_interpretation(&chart).unwrap();
        assert_eq!(interp.planet_significance.len(), chart.planets.len());
        for score in interp.planet_significance.values() {
            assert!((0.0..=1.0).contains(score));
        }
    }

    #[test]
    fn key_themes_lead_with_balances() {
        let chart = sample_chart();
        let interp = generate_chart_interpretation(&chart).unwrap();
        assert!(interp.key_themes[0].starts_with("Strong"));
        assert!(interp.key_themes[1].starts_with("Dominant"));
        assert!(interp.key_themes.len() <= 5);
    }

    #[test]
    fn interpretation_is_deterministic() {
        let chart = sample_chart();
        let a = generate_chart_interpretation(&chart).unwrap();
        let b = generate_chart_interpretation(&chart).unwrap();
        assert_eq!(a, b);
    }
}
