//! Assembles the advisor prompt text around a formatted chart summary. The
//! summary is plain text with fixed section order so repeated runs produce
//! identical prompts.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::render::endpoint_sign;
use crate::{AspectKind, BirthChart, Element, House, Modality, ZodiacSign};

/// Three or more planets sharing a sign or house.
const STELLIUM_THRESHOLD: usize = 3;

/// Persona and ground rules for the conversational advisor.
pub const ADVISOR_PERSONA: &str = r#"You are AstroGuide, a warm and insightful astrological counselor with deep knowledge of Western astrology. Your communication style is:
- Conversational and personal, as if speaking directly to the individual
- Empathetic and supportive, acknowledging the person's unique journey
- Clear and accessible, avoiding overly technical language
- Balanced, focusing on both strengths and growth opportunities
- Encouraging and empowering, emphasizing free will and personal agency

When interpreting birth charts:
1. Start with a warm greeting and acknowledgment of the person's unique cosmic blueprint
2. Share insights in a flowing, narrative style rather than listing facts
3. Connect different aspects of the chart to show how they work together
4. Use metaphors and relatable examples to explain complex concepts
5. End with encouraging words about their potential and growth

Remember to:
- Address the person directly using "you" and "your"
- Share insights as if having a personal conversation
- Balance technical accuracy with emotional resonance, but do not be too verbose
- Maintain a supportive and empowering tone throughout
- Do not mince words, be direct and to the point
- Prioritize using succinct language
- Acknowledge the complexity of human nature while offering clear guidance"#;

fn elemental_placements(chart: &BirthChart) -> BTreeMap<Element, usize> {
    let mut counts: BTreeMap<Element, usize> = Element::iter().map(|e| (e, 0)).collect();
    for position in chart.planets.values() {
        *counts.entry(position.element).or_insert(0) += 1;
    }
    for house in &chart.houses {
        *counts.entry(house.element).or_insert(0) += 1;
    }
    counts
}

fn modal_placements(chart: &BirthChart) -> BTreeMap<Modality, usize> {
    let mut counts: BTreeMap<Modality, usize> = Modality::iter().map(|m| (m, 0)).collect();
    for position in chart.planets.values() {
        *counts.entry(position.sign.modality()).or_insert(0) += 1;
    }
    for house in &chart.houses {
        *counts.entry(house.sign.modality()).or_insert(0) += 1;
    }
    counts
}

fn stelliums(chart: &BirthChart) -> String {
    let mut by_sign: BTreeMap<ZodiacSign, usize> = BTreeMap::new();
    let mut by_house: BTreeMap<House, usize> = BTreeMap::new();
    for position in chart.planets.values() {
        *by_sign.entry(position.sign).or_insert(0) += 1;
        *by_house.entry(position.house).or_insert(0) += 1;
    }

    let mut lines: Vec<String> = by_sign
        .iter()
        .filter(|(_, &count)| count >= STELLIUM_THRESHOLD)
        .map(|(sign, count)| format!("{}: {} planets", sign, count))
        .collect();
    lines.extend(
        by_house
            .iter()
            .filter(|(_, &count)| count >= STELLIUM_THRESHOLD)
            .map(|(house, count)| format!("House {}: {} planets", house, count)),
    );

    if lines.is_empty() {
        "No stelliums found".to_string()
    } else {
        lines.join("\n")
    }
}

/// T-squares (an opposition with at least one square to either end) and Yods
/// (a sextile with at least one quincunx to either end). Duplicate planets
/// across patterns are reported as-is.
fn aspect_patterns(chart: &BirthChart) -> String {
    let mut patterns = Vec::new();

    for opposition in chart
        .aspects
        .iter()
        .filter(|a| a.aspect == AspectKind::Opposition)
    {
        let has_square = chart.aspects.iter().any(|a| {
            a.aspect == AspectKind::Square
                && (a.touches(opposition.planet1) || a.touches(opposition.planet2))
        });
        if has_square {
            patterns.push(format!(
                "T-square involving {}-{} opposition",
                opposition.planet1, opposition.planet2
            ));
        }
    }

    for sextile in chart
        .aspects
        .iter()
        .filter(|a| a.aspect == AspectKind::Sextile)
    {
        let has_quincunx = chart.aspects.iter().any(|a| {
            a.aspect == AspectKind::Quincunx
                && (a.touches(sextile.planet1) || a.touches(sextile.planet2))
        });
        if has_quincunx {
            patterns.push(format!(
                "Yod pattern involving {}-{} sextile",
                sextile.planet1, sextile.planet2
            ));
        }
    }

    if patterns.is_empty() {
        "No major aspect patterns found".to_string()
    } else {
        patterns.join("\n")
    }
}

/// Render the chart as the plain-text summary embedded in the advisor prompt.
pub fn format_birth_chart(chart: &BirthChart) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Birth Chart Analysis Request");
    let _ = writeln!(out);
    let _ = writeln!(out, "Birth Data:");
    let _ = writeln!(out, "Date: {}", chart.birth_data.date);
    let _ = writeln!(out, "Time: {}", chart.birth_data.time);
    let _ = writeln!(
        out,
        "Location: {}°N, {}°E",
        chart.birth_data.location.latitude, chart.birth_data.location.longitude
    );
    let _ = writeln!(out, "Timezone: UTC{}", chart.birth_data.location.timezone);
    let _ = writeln!(out);

    let _ = writeln!(out, "Angular Points:");
    let asc = chart.angles.ascendant;
    let mc = chart.angles.midheaven;
    let _ = writeln!(
        out,
        "Ascendant: {:.2}° {} ({})",
        asc.degree, asc.sign, asc.element
    );
    let _ = writeln!(
        out,
        "Midheaven: {:.2}° {} ({})",
        mc.degree, mc.sign, mc.element
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Planetary Positions:");
    for (planet, position) in &chart.planets {
        let retrograde = if position.is_retrograde { " (R)" } else { "" };
        let _ = writeln!(
            out,
            "{}: {:.2}° {} ({}) - House {}{}",
            planet.display_name(),
            position.degree,
            position.sign,
            position.element,
            position.house,
            retrograde
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Houses:");
    for house in &chart.houses {
        let _ = writeln!(
            out,
            "House {}: {:.2}° {} ({})",
            house.number, house.degree, house.sign, house.element
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Aspects:");
    for aspect in &chart.aspects {
        let sign1 = endpoint_sign(aspect.planet1, chart)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let sign2 = endpoint_sign(aspect.planet2, chart)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let _ = writeln!(
            out,
            "{} ({}) {} {} ({}) - {:.1}° orb",
            aspect.planet1.display_name(),
            sign1,
            aspect.aspect,
            aspect.planet2.display_name(),
            sign2,
            aspect.orb
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Additional Analysis Points:");
    let _ = writeln!(out, "1. Elemental Balance:");
    for (element, count) in elemental_placements(chart) {
        let _ = writeln!(out, "{}: {} placements", element, count);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "2. Modal Balance:");
    for (modality, count) in modal_placements(chart) {
        let _ = writeln!(out, "{}: {} placements", modality, count);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "3. Stelliums:");
    let _ = writeln!(out, "{}", stelliums(chart));
    let _ = writeln!(out);
    let _ = writeln!(out, "4. Aspect Patterns:");
    let _ = writeln!(out, "{}", aspect_patterns(chart));

    out
}

/// Build the holistic-analyst system prompt with the chart data appended.
pub fn system_prompt(formatted_chart: &str) -> String {
    format!(
        r#"You are AstroGuide, a holistic astrological analyst with deep expertise in Western astrology. Your communication style is:
- Comprehensive and integrative in your analysis
- Natural and conversational in your delivery
- Professional and polite
- Clear and accessible
- Detail-oriented when technical specifics are requested

When analyzing birth charts:
1. Consider the entire chart as an integrated whole
2. Look for patterns and themes that emerge from the combination of all elements
3. Pay attention to how planets, houses, signs, and aspects work together
4. Note the overall chart structure and its implications
5. Consider the balance of elements, modalities, and polarities
6. Be ready to provide specific details when asked
7. Be able to explain the chart in a way that is easy to understand
8. Be able to answer specific questions that the native might ask, in natural language and in a way that is easy to understand
9. Note the native's chart ruler, elements, modalities, and polarity, and be sure to account for any imbalances which may play into their life
10. Do not make any assumptions about the native's personality, behavior, or actions based solely on the birth chart. The birth chart is a snapshot of a moment in time and is not a prediction of future events. It is a tool for self-understanding and growth.

When responding:
1. Start with the overall chart pattern and its main themes
2. Explain how different elements work together to create the whole picture
3. Focus on the synthesis of placements rather than individual components
4. Be prepared to break down specific elements when requested
5. Maintain a professional yet approachable tone
6. If asked for specifics, provide detailed measurements and orbs

Remember: The whole is greater than the sum of its parts. Your analysis should reflect how all chart elements interact and influence each other to create a complete picture.

Here is the birth chart data for reference:
{formatted_chart}"#
    )
}
