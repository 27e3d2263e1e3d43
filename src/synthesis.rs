//! Core personality synthesis: the Sun / Moon / chart-ruler triad and the
//! aspects linking them. Sun and Moon are required; everything else degrades.

use serde::Serialize;
use tracing::warn;

use crate::{Aspect, BirthChart, ChartPoint, Element, House, Planet, ZodiacSign};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LuminaryPlacement {
    pub sign: ZodiacSign,
    pub house: House,
    pub element: Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AscendantSummary {
    pub sign: ZodiacSign,
    pub element: Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RulerPlacement {
    pub planet: Planet,
    pub sign: ZodiacSign,
    pub house: House,
    pub element: Element,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreSynthesis {
    pub sun: LuminaryPlacement,
    pub moon: LuminaryPlacement,
    pub ascendant: AscendantSummary,
    pub chart_ruler: Option<RulerPlacement>,
    pub key_aspects: Vec<Aspect>,
    pub sun_moon_aspect: Option<Aspect>,
    pub sun_ruler_aspect: Option<Aspect>,
    pub moon_ruler_aspect: Option<Aspect>,
}

/// Build the synthesis seed, or `None` when Sun or Moon is missing from the
/// chart. A chart ruler absent from the planet map is a warning, not an
/// error; its aspect slots stay empty.
pub fn generate_core_synthesis(chart: &BirthChart) -> Option<CoreSynthesis> {
    let sun = chart.planets.get(&Planet::Sun)?;
    let moon = chart.planets.get(&Planet::Moon)?;

    let ruler = chart.chart_ruler();
    let ruler_position = chart.planets.get(&ruler);
    if ruler_position.is_none() {
        warn!(ruler = %ruler, "chart ruler not found in planets");
    }

    let sun_point = ChartPoint::Planet(Planet::Sun);
    let moon_point = ChartPoint::Planet(Planet::Moon);
    let ruler_point = ChartPoint::Planet(ruler);

    let key_aspects: Vec<Aspect> = chart
        .aspects
        .iter()
        .filter(|a| a.touches(sun_point) || a.touches(moon_point) || a.touches(ruler_point))
        .cloned()
        .collect();

    let find_link = |a: ChartPoint, b: ChartPoint| {
        chart.aspects.iter().find(|asp| asp.links(a, b)).cloned()
    };

    let sun_moon_aspect = find_link(sun_point, moon_point);
    let (sun_ruler_aspect, moon_ruler_aspect) = if ruler_position.is_some() {
        (
            find_link(sun_point, ruler_point),
            find_link(moon_point, ruler_point),
        )
    } else {
        (None, None)
    };

    Some(CoreSynthesis {
        sun: LuminaryPlacement {
            sign: sun.sign,
            house: sun.house,
            element: sun.element,
        },
        moon: LuminaryPlacement {
            sign: moon.sign,
            house: moon.house,
            element: moon.element,
        },
        ascendant: AscendantSummary {
            sign: chart.angles.ascendant.sign,
            element: chart.angles.ascendant.element,
        },
        chart_ruler: ruler_position.map(|pos| RulerPlacement {
            planet: ruler,
            sign: pos.sign,
            house: pos.house,
            element: pos.element,
        }),
        key_aspects,
        sun_moon_aspect,
        sun_ruler_aspect,
        moon_ruler_aspect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AnglePosition, Angles, AspectKind, BirthData, GeoLocation, PlanetPosition,
    };
    use std::collections::BTreeMap;

    fn position(sign: ZodiacSign, house: House) -> PlanetPosition {
        PlanetPosition {
            sign,
            element: sign.element(),
            house,
            degree: 10.0,
            is_retrograde: false,
        }
    }

    fn chart(
        ascendant: ZodiacSign,
        planets: &[(Planet, ZodiacSign, House)],
        aspects: Vec<Aspect>,
    ) -> BirthChart {
        let mut map = BTreeMap::new();
        for &(planet, sign, house) in planets {
            map.insert(planet, position(sign, house));
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
                    sign: ascendant,
                    element: ascendant.element(),
                    degree: 15.0,
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

    fn link(a: Planet, b: Planet, kind: AspectKind) -> Aspect {
        Aspect {
            planet1: a.into(),
            planet2: b.into(),
            aspect: kind,
            orb: 3.0,
        }
    }

    #[test]
    fn missing_sun_or_moon_yields_none() {
        let no_moon = chart(
            ZodiacSign::Aries,
            &[(Planet::Sun, ZodiacSign::Leo, House::Fifth)],
            vec![],
        );
        assert!(generate_core_synthesis(&no_moon).is_none());

        let no_sun = chart(
            ZodiacSign::Aries,
            &[(Planet::Moon, ZodiacSign::Cancer, House::Fourth)],
            vec![],
        );
        assert!(generate_core_synthesis(&no_sun).is_none());
    }

    #[test]
    fn missing_ruler_degrades_to_none_with_skipped_aspects() {
        // Scorpio rising: ruler is Mars, which this chart does not track.
        let c = chart(
            ZodiacSign::Scorpio,
            &[
                (Planet::Sun, ZodiacSign::Leo, House::Tenth),
                (Planet::Moon, ZodiacSign::Cancer, House::Ninth),
            ],
            vec![link(Planet::Sun, Planet::Mars, AspectKind::Trine)],
        );
        let synth = generate_core_synthesis(&c).unwrap();
        assert!(synth.chart_ruler.is_none());
        assert!(synth.sun_ruler_aspect.is_none());
        assert!(synth.moon_ruler_aspect.is_none());
        // The Sun aspect still counts among key aspects.
        assert_eq!(synth.key_aspects.len(), 1);
    }

    #[test]
    fn finds_triad_aspects_bidirectionally() {
        // Aries rising: ruler is Mars.
        let c = chart(
            ZodiacSign::Aries,
            &[
                (Planet::Sun, ZodiacSign::Capricorn, House::Ninth),
                (Planet::Moon, ZodiacSign::Pisces, House::Twelfth),
                (Planet::Mars, ZodiacSign::Aries, House::First),
            ],
            vec![
                link(Planet::Moon, Planet::Sun, AspectKind::Square),
                link(Planet::Mars, Planet::Sun, AspectKind::Conjunction),
                link(Planet::Moon, Planet::Mars, AspectKind::Sextile),
            ],
        );
        let synth = generate_core_synthesis(&c).unwrap();
        let ruler = synth.chart_ruler.unwrap();
        assert_eq!(ruler.planet, Planet::Mars);
        assert_eq!(ruler.house, House::First);
        assert_eq!(
            synth.sun_moon_aspect.unwrap().aspect,
            AspectKind::Square
        );
        assert_eq!(
            synth.sun_ruler_aspect.unwrap().aspect,
            AspectKind::Conjunction
        );
        assert_eq!(
            synth.moon_ruler_aspect.unwrap().aspect,
            AspectKind::Sextile
        );
        assert_eq!(synth.key_aspects.len(), 3);
    }

    #[test]
    fn zero_aspects_leaves_slots_empty() {
        let c = chart(
            ZodiacSign::Taurus,
            &[
                (Planet::Sun, ZodiacSign::Taurus, House::First),
                (Planet::Moon, ZodiacSign::Virgo, House::Fifth),
                (Planet::Venus, ZodiacSign::Aries, House::Twelfth),
            ],
            vec![],
        );
        let synth = generate_core_synthesis(&c).unwrap();
        assert!(synth.sun_moon_aspect.is_none());
        assert!(synth.key_aspects.is_empty());
        assert!(synth.chart_ruler.is_some());
    }
}
