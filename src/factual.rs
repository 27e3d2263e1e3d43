//! Deterministic factual question answering over the raw chart. A thin
//! pattern-matching layer: simple field lookups, no interpretation object
//! involved. Anything unrecognized returns `None` so the caller can fall
//! through to the narrative path.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::{BirthChart, ChartPoint, House, Planet, ZodiacSign};

const PLANET_ALTERNATION: &str = "sun|moon|mercury|venus|mars|jupiter|saturn|uranus|neptune|pluto";

static FACTUAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)how many (planets|planets are|planets are in)",
        r"(?i)what (sign|house|element|modality) (is|are|does)",
        r"(?i)which (sign|house|planet|planets)",
        r"(?i)(sun|moon|mercury|venus|mars|jupiter|saturn|uranus|neptune|pluto) (is|in|sign|house)",
        r"(?i)(ascendant|midheaven|asc|mc) (is|in|sign)",
        r"(?i)what (planets|planet) (are|is) (in|in the)",
        r"(?i)(house \d+|1st|2nd|3rd|4th|5th|6th|7th|8th|9th|10th|11th|12th) (has|contains|planets)",
        r"(?i)how many (planets|planets are) (in|in the) (house|sign)",
        r"(?i)what (aspects|aspect) (does|do|has|have)",
        r"(?i)(conjunction|square|trine|opposition|sextile) (with|to|between)",
        r"(?i)is (retrograde|direct)",
        r"(?i)what (degree|degrees) (is|are)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("factual pattern"))
    .collect()
});

static HOW_MANY_IN_HOUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)how many (planets|planets are) (in|in the) (house|the) (\d+)")
        .expect("pattern")
});
static WHAT_PLANETS_IN_HOUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)what (planets|planet) (are|is) (in|in the) (house|the) (\d+)")
        .expect("pattern")
});
static HOUSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)house (\d+)").expect("pattern"));
static PLANET_SIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i)({}) (is|in|sign)", PLANET_ALTERNATION)).expect("pattern")
});
static PLANET_HOUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "(?i)({}) (house|in which house)",
        PLANET_ALTERNATION
    ))
    .expect("pattern")
});
static PLANET_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i)({})", PLANET_ALTERNATION)).expect("pattern"));
static ASCENDANT_SIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(ascendant|asc) (is|in|sign)").expect("pattern"));
static MIDHEAVEN_SIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(midheaven|mc) (is|in|sign)").expect("pattern"));
static WHAT_PLANETS_IN_SIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)what (planets|planet) (are|is) (in|in the) (sign|sign of) (\w+)")
        .expect("pattern")
});
static SIGN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(aries|taurus|gemini|cancer|leo|virgo|libra|scorpio|sagittarius|capricorn|aquarius|pisces)",
    )
    .expect("pattern")
});
static HOUSE_MOST_LEAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)which (house|houses) (has|have) (the )?(most|least|fewest) (planets|planet)")
        .expect("pattern")
});
static SIGN_MOST_LEAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)which (sign|signs) (has|have) (the )?(most|least|fewest) (planets|planet)")
        .expect("pattern")
});
static PLANET_ASPECTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "(?i)what (aspects|aspect) (does|do|has|have) (the )?({})",
        PLANET_ALTERNATION
    ))
    .expect("pattern")
});
static PLANET_RETROGRADE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "(?i)is (the )?({}) (retrograde|direct)",
        PLANET_ALTERNATION
    ))
    .expect("pattern")
});
static MOST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)most").expect("pattern"));

/// Whether the question has a direct, factual answer from chart data.
pub fn is_factual_question(message: &str) -> bool {
    let trimmed = message.trim();
    FACTUAL_PATTERNS.iter().any(|p| p.is_match(trimmed))
}

fn captured_planet(message: &str) -> Option<Planet> {
    PLANET_NAME
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn captured_house(message: &str) -> Option<u32> {
    HOUSE_NUMBER
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// "A", "A, and B" style listing that matches the answer phrasing.
fn list_with_and(mut items: Vec<String>) -> String {
    match items.len() {
        0 => String::new(),
        1 => items.remove(0),
        _ => {
            let last = items.pop().unwrap_or_default();
            format!("{}, and {}", items.join(", "), last)
        }
    }
}

fn planets_in_house(chart: &BirthChart, house: House) -> Vec<Planet> {
    chart
        .planets
        .iter()
        .filter(|(_, pos)| pos.house == house)
        .map(|(&planet, _)| planet)
        .collect()
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn tally_extreme<K: Copy>(counts: &BTreeMap<K, usize>, most: bool) -> (usize, Vec<K>) {
    let target = if most {
        counts.values().copied().max()
    } else {
        counts.values().copied().min()
    };
    let target = target.unwrap_or(0);
    let keys = counts
        .iter()
        .filter(|(_, &count)| count == target)
        .map(|(&key, _)| key)
        .collect();
    (target, keys)
}

fn extreme_answer(kind: &str, names: Vec<String>, count: usize, most: bool) -> String {
    let direction = if most { "most" } else { "fewest" };
    if names.len() == 1 {
        format!(
            "{} has the {} {} with {} {}{}.",
            names[0],
            direction,
            kind,
            count,
            "planet",
            plural(count)
        )
    } else {
        let all = if names.len() > 2 { "all " } else { "" };
        format!(
            "{} {}have the {} {} with {} planet{} each.",
            names.join(" and "),
            all,
            direction,
            kind,
            count,
            plural(count)
        )
    }
}

/// Answer a factual question from chart fields, or `None` when no pattern
/// matches. Handlers run in a fixed order; the first match wins.
pub fn answer_factual_question(message: &str, chart: &BirthChart) -> Option<String> {
    let message = message.trim();

    // How many planets are in house N.
    if HOW_MANY_IN_HOUSE.is_match(message) {
        if let Some(number) = captured_house(message) {
            let house = match House::from_index(number as usize) {
                Some(house) => house,
                None => {
                    return Some(format!(
                        "House numbers must be between 1 and 12. You asked about House {}.",
                        number
                    ))
                }
            };
            let mut names: Vec<String> = planets_in_house(chart, house)
                .iter()
                .map(|p| p.display_name().to_string())
                .collect();
            let count = names.len();
            return Some(match count {
                0 => format!("There are no planets in House {}.", house),
                1 => format!("There is 1 planet in House {}: {}.", house, names.remove(0)),
                _ => format!(
                    "There are {} planets in House {}: {}.",
                    count,
                    house,
                    list_with_and(names)
                ),
            });
        }
    }

    // Which planets are in house N.
    if WHAT_PLANETS_IN_HOUSE.is_match(message) {
        if let Some(number) = captured_house(message) {
            let house = match House::from_index(number as usize) {
                Some(house) => house,
                None => {
                    return Some(format!(
                        "House numbers must be between 1 and 12. You asked about House {}.",
                        number
                    ))
                }
            };
            let placements: Vec<String> = chart
                .planets
                .iter()
                .filter(|(_, pos)| pos.house == house)
                .map(|(planet, pos)| format!("{} in {}", planet.display_name(), pos.sign))
                .collect();
            return Some(if placements.is_empty() {
                format!("There are no planets in House {}.", house)
            } else {
                format!(
                    "The planets in House {} are: {}.",
                    house,
                    placements.join(", ")
                )
            });
        }
    }

    // What sign a planet is in.
    if PLANET_SIGN.is_match(message) {
        if let Some(planet) = captured_planet(message) {
            if let Some(position) = chart.planets.get(&planet) {
                return Some(format!(
                    "Your {} is in {}.",
                    planet.display_name(),
                    position.sign
                ));
            }
        }
    }

    // Which house a planet is in.
    if PLANET_HOUSE.is_match(message) {
        if let Some(planet) = captured_planet(message) {
            if let Some(position) = chart.planets.get(&planet) {
                return Some(format!(
                    "Your {} is in House {}.",
                    planet.display_name(),
                    position.house
                ));
            }
        }
    }

    // Angle signs.
    if ASCENDANT_SIGN.is_match(message) {
        let asc = chart.angles.ascendant;
        return Some(format!(
            "Your Ascendant is in {} at {:.2}°.",
            asc.sign, asc.degree
        ));
    }
    if MIDHEAVEN_SIGN.is_match(message) {
        let mc = chart.angles.midheaven;
        return Some(format!(
            "Your Midheaven is in {} at {:.2}°.",
            mc.sign, mc.degree
        ));
    }

    // Which planets are in a sign.
    if WHAT_PLANETS_IN_SIGN.is_match(message) {
        if let Some(sign) = SIGN_NAME
            .captures(message)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<ZodiacSign>().ok())
        {
            let names: Vec<String> = chart
                .planets
                .iter()
                .filter(|(_, pos)| pos.sign == sign)
                .map(|(planet, _)| planet.display_name().to_string())
                .collect();
            return Some(if names.is_empty() {
                format!("There are no planets in {} in your chart.", sign)
            } else {
                format!("The planets in {} are: {}.", sign, names.join(", "))
            });
        }
    }

    // House with the most or fewest planets.
    if HOUSE_MOST_LEAST.is_match(message) {
        if chart.planets.is_empty() {
            return Some("I couldn't find any planets in your chart.".to_string());
        }
        let mut counts: BTreeMap<House, usize> = BTreeMap::new();
        for position in chart.planets.values() {
            *counts.entry(position.house).or_insert(0) += 1;
        }
        let most = MOST.is_match(message);
        let (count, houses) = tally_extreme(&counts, most);
        let names = houses.iter().map(|h| format!("House {}", h)).collect();
        return Some(extreme_answer("planets", names, count, most));
    }

    // Sign with the most or fewest planets.
    if SIGN_MOST_LEAST.is_match(message) {
        if chart.planets.is_empty() {
            return Some("I couldn't find any planets in your chart.".to_string());
        }
        let mut counts: BTreeMap<ZodiacSign, usize> = BTreeMap::new();
        for position in chart.planets.values() {
            *counts.entry(position.sign).or_insert(0) += 1;
        }
        let most = MOST.is_match(message);
        let (count, signs) = tally_extreme(&counts, most);
        let names = signs.iter().map(|s| s.to_string()).collect();
        return Some(extreme_answer("planets", names, count, most));
    }

    // Aspect list for a planet.
    if PLANET_ASPECTS.is_match(message) {
        if let Some(planet) = captured_planet(message) {
            let point = ChartPoint::Planet(planet);
            let touching: Vec<String> = chart
                .aspects
                .iter()
                .filter(|a| a.touches(point))
                .map(|a| {
                    let other = a
                        .other(point)
                        .map(|p| p.display_name())
                        .unwrap_or("unknown");
                    format!("{} {} ({:.1}° orb)", other, a.aspect, a.orb)
                })
                .collect();
            return Some(if touching.is_empty() {
                format!("Your {} has no major aspects.", planet.display_name())
            } else {
                format!(
                    "Your {} has {} aspect{}: {}.",
                    planet.display_name(),
                    touching.len(),
                    plural(touching.len()),
                    touching.join(", ")
                )
            });
        }
    }

    // Retrograde status.
    if PLANET_RETROGRADE.is_match(message) {
        if let Some(planet) = captured_planet(message) {
            if let Some(position) = chart.planets.get(&planet) {
                return Some(if position.is_retrograde {
                    format!("Yes, your {} is retrograde.", planet.display_name())
                } else {
                    format!(
                        "No, your {} is direct (not retrograde).",
                        planet.display_name()
                    )
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AnglePosition, Angles, Aspect, AspectKind, BirthData, Element, GeoLocation,
        PlanetPosition,
    };
    use std::collections::BTreeMap;

    fn position(sign: ZodiacSign, house: House, retrograde: bool) -> PlanetPosition {
        PlanetPosition {
            sign,
            element: sign.element(),
            house,
            degree: 15.5,
            is_retrograde: retrograde,
        }
    }

    fn sample_chart() -> BirthChart {
        let mut planets = BTreeMap::new();
        planets.insert(
            Planet::Sun,
            position(ZodiacSign::Capricorn, House::Ninth, false),
        );
        planets.insert(
            Planet::Moon,
            position(ZodiacSign::Pisces, House::Twelfth, false),
        );
        planets.insert(
            Planet::Mercury,
            position(ZodiacSign::Capricorn, House::Ninth, true),
        );
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
                    degree: 20.66,
                },
                midheaven: AnglePosition {
                    sign: ZodiacSign::Capricorn,
                    element: Element::Earth,
                    degree: 281.1,
                },
            },
            planets,
            houses: Vec::new(),
            aspects: vec![Aspect {
                planet1: Planet::Sun.into(),
                planet2: Planet::Moon.into(),
                aspect: AspectKind::Square,
                orb: 2.53,
            }],
        }
    }

    #[test]
    fn recognizes_factual_questions() {
        assert!(is_factual_question("What sign is my sun in?"));
        assert!(is_factual_question("how many planets are in the house 9"));
        assert!(is_factual_question("mercury is retrograde, right?"));
        assert!(is_factual_question("Which sign has the most planets?"));
        assert!(!is_factual_question("Tell me about my personality"));
    }

    #[test]
    fn counts_planets_in_house() {
        let chart = sample_chart();
        let answer =
            answer_factual_question("How many planets are in the house 9?", &chart).unwrap();
        assert_eq!(
            answer,
            "There are 2 planets in House 9: Sun, and Mercury."
        );
    }

    #[test]
    fn rejects_out_of_range_house() {
        let chart = sample_chart();
        let answer =
            answer_factual_question("How many planets are in the house 13?", &chart).unwrap();
        assert!(answer.starts_with("House numbers must be between 1 and 12."));
    }

    #[test]
    fn lists_planets_in_house_with_signs() {
        let chart = sample_chart();
        let answer =
            answer_factual_question("What planets are in the house 12?", &chart).unwrap();
        assert_eq!(answer, "The planets in House 12 are: Moon in Pisces.");
    }

    #[test]
    fn answers_planet_sign() {
        let chart = sample_chart();
        let answer = answer_factual_question("What sign is my sun in?", &chart).unwrap();
        assert_eq!(answer, "Your Sun is in Capricorn.");
    }

    #[test]
    fn answers_ascendant() {
        let chart = sample_chart();
        let answer = answer_factual_question("What sign is the ascendant in?", &chart).unwrap();
        assert_eq!(answer, "Your Ascendant is in Aries at 20.66°.");
    }

    #[test]
    fn answers_planets_in_sign() {
        let chart = sample_chart();
        let answer =
            answer_factual_question("What planets are in the sign of capricorn?", &chart)
                .unwrap();
        assert_eq!(answer, "The planets in Capricorn are: Sun, Mercury.");
    }

    #[test]
    fn answers_house_extremes_with_ties() {
        let chart = sample_chart();
        let answer =
            answer_factual_question("Which house has the most planets?", &chart).unwrap();
        assert_eq!(answer, "House 9 has the most planets with 2 planets.");

        let fewest =
            answer_factual_question("Which house has the fewest planets?", &chart).unwrap();
        assert_eq!(
            fewest,
            "House 12 has the fewest planets with 1 planet."
        );
    }

    #[test]
    fn answers_aspect_list() {
        let chart = sample_chart();
        let answer = answer_factual_question("What aspects does the sun have?", &chart).unwrap();
        assert_eq!(answer, "Your Sun has 1 aspect: Moon square (2.5° orb).");
    }

    #[test]
    fn answers_retrograde() {
        let chart = sample_chart();
        let yes = answer_factual_question("Is mercury retrograde?", &chart).unwrap();
        assert_eq!(yes, "Yes, your Mercury is retrograde.");
    }

    #[test]
    fn unmatched_question_returns_none() {
        let chart = sample_chart();
        assert_eq!(
            answer_factual_question("Will I be rich someday?", &chart),
            None
        );
    }
}
