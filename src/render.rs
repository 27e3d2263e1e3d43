//! Template renderer: flattens an [`Interpretation`] into the text report
//! handed to the downstream language model. Pure string assembly; every
//! lookup miss degrades to an empty string or a stock phrase.

use std::cmp::Ordering;

use crate::config::{
    self, replace_placeholders, theme_groups, ThemeGroup,
};
use crate::interpret::Interpretation;
use crate::rules::{self, Polarity};
use crate::{Aspect, BirthChart, ChartPoint, Planet, ZodiacSign};

fn heavy_rule() -> String {
    "═".repeat(59)
}

fn light_rule() -> String {
    "─".repeat(69)
}

/// Sign occupied by an aspect endpoint, if the chart tracks it. The
/// ascendant resolves to its angle sign; an untracked planet resolves to
/// nothing and the caller renders an empty interpretation.
pub(crate) fn endpoint_sign(point: ChartPoint, chart: &BirthChart) -> Option<ZodiacSign> {
    match point {
        ChartPoint::Planet(planet) => chart.planets.get(&planet).map(|p| p.sign),
        ChartPoint::Ascendant => Some(chart.angles.ascendant.sign),
        ChartPoint::Midheaven => Some(chart.angles.midheaven.sign),
    }
}

/// Render one aspect through its polarity template. Unknown aspect kinds use
/// the cooperative template; missing endpoints yield an empty string.
pub fn combined_aspect_interpretation(aspect: &Aspect, chart: &BirthChart) -> String {
    let sign1 = match endpoint_sign(aspect.planet1, chart) {
        Some(sign) => sign,
        None => return String::new(),
    };
    let sign2 = match endpoint_sign(aspect.planet2, chart) {
        Some(sign) => sign,
        None => return String::new(),
    };

    let style = rules::aspect_style(&aspect.aspect);
    let template = config::aspect_template(style.polarity);

    let planet1_core = aspect
        .planet1
        .planet()
        .map(|p| rules::planet_meaning(p, Polarity::Positive).core)
        .unwrap_or_else(|| "the planet's energy".to_string());
    let planet2_core = aspect
        .planet2
        .planet()
        .map(|p| rules::planet_meaning(p, Polarity::Positive).core)
        .unwrap_or_else(|| "the other planet's energy".to_string());

    let sign1_meaning = rules::sign_meaning(sign1, Polarity::Positive);
    let sign2_meaning = rules::sign_meaning(sign2, Polarity::Positive);

    let sign1_name = sign1.to_string();
    let sign2_name = sign2.to_string();
    let keyword1 = sign1_meaning.keyword_or("one quality");
    let keyword2 = sign2_meaning.keyword_or("another quality");

    replace_placeholders(
        template,
        &[
            ("planet1Name", aspect.planet1.display_name()),
            ("planet2Name", aspect.planet2.display_name()),
            ("planet1Sign", &sign1_name),
            ("planet2Sign", &sign2_name),
            ("planet1Core", &planet1_core),
            ("planet2Core", &planet2_core),
            ("planet1SignCore", &sign1_meaning.core),
            ("planet2SignCore", &sign2_meaning.core),
            ("planet1Keyword", &keyword1),
            ("planet2Keyword", &keyword2),
        ],
    )
}

fn render_header(out: &mut String, interpretation: &Interpretation) {
    out.push_str("BIRTH CHART INTERPRETATION TEMPLATE\n");
    out.push_str("=====================================\n\n");
    out.push_str("CRITICAL INSTRUCTIONS FOR HOLISTIC INTERPRETATION:\n\n");
    out.push_str("NEVER DO THIS (PLANET-BY-PLANET BREAKDOWN):\n");
    out.push_str("- \"Your Sun in Gemini... [paragraph about Sun]\"\n");
    out.push_str("- \"Your Moon in Virgo... [paragraph about Moon]\"\n");
    out.push_str("- \"Your Mercury... [paragraph about Mercury]\"\n");
    out.push_str(
        "This creates a fragmented, checklist-style response. DO NOT structure your response this way.\n\n",
    );
    out.push_str("INSTEAD DO THIS (UNIFIED SYNTHESIS):\n");
    out.push_str("- Weave multiple placements together in each paragraph\n");
    out.push_str("- Show how Sun, Moon, Mercury, Venus, etc. all interconnect\n");
    out.push_str("- Create a unified narrative, not separate paragraphs for each planet\n");
    out.push_str("- Each paragraph should integrate 2-3+ chart elements\n\n");
    for (index, instruction) in config::HOLISTIC_INSTRUCTIONS.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, instruction));
    }
    out.push('\n');

    out.push_str("CHART INFORMATION:\n");
    out.push_str(&format!("Date: {}\n", interpretation.chart_info.date));
    out.push_str(&format!("Time: {}\n", interpretation.chart_info.time));
    out.push_str(&format!(
        "Location: {}°N, {}°E\n\n",
        interpretation.chart_info.location.latitude, interpretation.chart_info.location.longitude
    ));
}

fn render_core_synthesis(out: &mut String, interpretation: &Interpretation, chart: &BirthChart) {
    let synth = match &interpretation.core_synthesis {
        Some(synth) => synth,
        None => return,
    };

    out.push_str(&format!("{}\n", heavy_rule()));
    out.push_str(&format!("{}\n", config::SYNTHESIS_SECTION_TITLE));
    out.push_str(&format!("{}\n\n", heavy_rule()));

    out.push_str(&format!("{}\n", config::FOUNDATION_LABEL));
    out.push_str(&format!(
        "- Sun in {} (House {}): Core identity expression\n",
        synth.sun.sign, synth.sun.house
    ));
    out.push_str(&format!(
        "- Moon in {} (House {}): Emotional nature\n",
        synth.moon.sign, synth.moon.house
    ));
    out.push_str(&format!(
        "- Ascendant in {}: Outer personality and first impressions\n",
        synth.ascendant.sign
    ));
    match &synth.chart_ruler {
        Some(ruler) => out.push_str(&format!(
            "- Chart Ruler: {} in {} (House {}): How identity is expressed\n\n",
            ruler.planet.key().to_uppercase(),
            ruler.sign,
            ruler.house
        )),
        None => out.push_str("- Chart Ruler: Not available\n\n"),
    }

    match &synth.sun_moon_aspect {
        Some(aspect) => {
            let style = rules::aspect_style(&aspect.aspect);
            let label = replace_placeholders(
                config::IDENTITY_EMOTIONS_LABEL,
                &[("aspect", &aspect.aspect.name().to_uppercase())],
            );
            out.push_str(&format!("{}\n", label));
            out.push_str(&format!(
                "Aspect Style: {}, Tension: {}, Strength: {}\n",
                style.polarity, style.tension, style.strength
            ));
            out.push_str(&format!(
                "{}\n\n",
                combined_aspect_interpretation(aspect, chart)
            ));
        }
        None => {
            out.push_str(&format!("{}\n", config::IDENTITY_EMOTIONS_NO_ASPECT_LABEL));
            let sun_positive = rules::sign_meaning(synth.sun.sign, Polarity::Positive).core;
            let moon_positive = rules::sign_meaning(synth.moon.sign, Polarity::Positive).core;
            let text = replace_placeholders(
                config::NO_ASPECT_SUN_MOON_TEMPLATE,
                &[
                    ("sunSign", &synth.sun.sign.to_string()),
                    ("sunPositive", &sun_positive),
                    ("moonSign", &synth.moon.sign.to_string()),
                    ("moonPositive", &moon_positive),
                ],
            );
            out.push_str(&format!("{}\n\n", text));
        }
    }

    if let (Some(aspect), Some(ruler)) = (&synth.sun_ruler_aspect, &synth.chart_ruler) {
        let label = replace_placeholders(
            config::IDENTITY_EXPRESSION_LABEL,
            &[
                ("ruler", &ruler.planet.key().to_uppercase()),
                ("aspect", &aspect.aspect.name().to_uppercase()),
            ],
        );
        out.push_str(&format!("{}\n", label));
        out.push_str(&format!(
            "{}\n\n",
            combined_aspect_interpretation(aspect, chart)
        ));
    }

    if let (Some(aspect), Some(ruler)) = (&synth.moon_ruler_aspect, &synth.chart_ruler) {
        let label = replace_placeholders(
            config::EMOTIONS_EXPRESSION_LABEL,
            &[
                ("ruler", &ruler.planet.key().to_uppercase()),
                ("aspect", &aspect.aspect.name().to_uppercase()),
            ],
        );
        out.push_str(&format!("{}\n", label));
        out.push_str(&format!(
            "{}\n\n",
            combined_aspect_interpretation(aspect, chart)
        ));
    }

    out.push_str(&format!("{}\n", config::STRESS_RESPONSE_LABEL));
    let ascendant_negative = {
        let core = rules::sign_meaning(synth.ascendant.sign, Polarity::Negative).core;
        if core.is_empty() {
            "defensive patterns".to_string()
        } else {
            core
        }
    };
    let moon_negative = {
        let core = rules::sign_meaning(synth.moon.sign, Polarity::Negative).core;
        if core.is_empty() {
            "emotional patterns".to_string()
        } else {
            core
        }
    };
    let ruler_influence = match &synth.chart_ruler {
        Some(ruler) => {
            let negative = {
                let core = rules::planet_meaning(ruler.planet, Polarity::Negative).core;
                if core.is_empty() {
                    "respond to challenges".to_string()
                } else {
                    core
                }
            };
            replace_placeholders(
                config::RULER_INFLUENCE_TEMPLATE,
                &[
                    ("rulerPlanet", &ruler.planet.key().to_uppercase()),
                    ("rulerSign", &ruler.sign.to_string()),
                    ("rulerNegative", &negative),
                ],
            )
        }
        None => String::new(),
    };
    let stress = replace_placeholders(
        config::STRESS_RESPONSE_TEMPLATE,
        &[
            ("ascendantSign", &synth.ascendant.sign.to_string()),
            ("ascendantNegative", &ascendant_negative),
            ("moonSign", &synth.moon.sign.to_string()),
            ("moonNegative", &moon_negative),
            ("rulerInfluence", &ruler_influence),
        ],
    );
    out.push_str(&format!("{}\n\n", stress));
}

fn render_theme_section(
    out: &mut String,
    group: &ThemeGroup,
    aspects: &[Aspect],
    chart: &BirthChart,
) {
    if aspects.is_empty() {
        return;
    }
    out.push_str(&format!("{} ({}):\n", group.label, group.description));
    out.push_str(&format!("{}\n", light_rule()));
    for aspect in aspects {
        out.push_str(&format!(
            "\n{} {} {}:\n",
            aspect.planet1.key().to_uppercase(),
            aspect.aspect.name().to_uppercase(),
            aspect.planet2.key().to_uppercase()
        ));
        out.push_str(&format!(
            "{}\n",
            combined_aspect_interpretation(aspect, chart)
        ));
    }
    out.push('\n');
}

/// Planets ranked by descending significance; ties keep planet order.
fn ranked_by_significance(interpretation: &Interpretation) -> Vec<(Planet, f64)> {
    let mut ranked: Vec<(Planet, f64)> = interpretation
        .planet_significance
        .iter()
        .map(|(&planet, &score)| (planet, score))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked
}

/// Assemble the complete report for the language-model collaborator.
pub fn format_interpretation(interpretation: &Interpretation, chart: &BirthChart) -> String {
    let mut out = String::new();

    render_header(&mut out, interpretation);
    render_core_synthesis(&mut out, interpretation, chart);

    out.push_str(&format!("{}\n", heavy_rule()));
    out.push_str(&format!("{}\n", config::SECTION_ASPECT_DRIVEN));
    out.push_str(&format!("{}\n\n", heavy_rule()));

    let ruler = interpretation
        .angles
        .ascendant
        .ruler
        .unwrap_or_else(|| chart.chart_ruler());
    let groups = theme_groups(ruler);
    render_theme_section(
        &mut out,
        &groups.identity_emotions,
        &interpretation.aspect_groups.identity_emotions,
        chart,
    );
    render_theme_section(
        &mut out,
        &groups.mind_communication,
        &interpretation.aspect_groups.mind_communication,
        chart,
    );
    render_theme_section(
        &mut out,
        &groups.love_sex,
        &interpretation.aspect_groups.love_sex,
        chart,
    );
    render_theme_section(
        &mut out,
        &groups.growth_challenges,
        &interpretation.aspect_groups.growth_challenges,
        chart,
    );

    out.push_str(&format!("{}\n", heavy_rule()));
    out.push_str(&format!("{}\n", config::SECTION_PLANET_SIGNIFICANCE));
    out.push_str(&format!("{}\n", heavy_rule()));
    for (planet, score) in ranked_by_significance(interpretation).into_iter().take(5) {
        out.push_str(&format!(
            "{}: {:.2} ({} significance)\n",
            planet.key().to_uppercase(),
            score,
            config::significance_label(score)
        ));
    }
    out.push('\n');

    out.push_str(&format!("{}\n", heavy_rule()));
    out.push_str(&format!("{}\n", config::SECTION_PLACEMENT_DETAILS));
    out.push_str(&format!("{}\n\n", heavy_rule()));

    for (planet, score) in ranked_by_significance(interpretation) {
        let detail = match interpretation.planets.get(&planet) {
            Some(detail) => detail,
            None => continue,
        };
        out.push_str(&format!(
            "{} in {} (House {})",
            detail.name, detail.sign, detail.house
        ));
        if detail.is_retrograde {
            out.push_str(" [Retrograde]");
        }
        out.push_str(&format!(" [Significance: {:.2}]\n", score));
        out.push_str(&format!("  Planet Energy: {}\n", detail.positive.planet_core));
        out.push_str(&format!("  Sign Expression: {}\n", detail.positive.sign_core));
        out.push_str(&format!("  House Context: {}\n", detail.positive.house_core));

        if !detail.aspects.is_empty() {
            let point = ChartPoint::Planet(planet);
            let listed: Vec<String> = detail
                .aspects
                .iter()
                .map(|annotated| {
                    let other = annotated
                        .aspect
                        .other(point)
                        .map(|p| p.key())
                        .unwrap_or("unknown");
                    format!(
                        "{} {} ({})",
                        other,
                        annotated.aspect.aspect.name(),
                        annotated.polarity
                    )
                })
                .collect();
            out.push_str(&format!("  Aspects: {}\n", listed.join(", ")));
        }
        out.push('\n');
    }

    out.push_str("ELEMENTAL BALANCE:\n");
    out.push_str(&format!(
        "Dominant Element: {}\n",
        interpretation.elemental_balance.dominant
    ));
    out.push_str(&format!(
        "Lacking Element: {}\n\n",
        interpretation.elemental_balance.lacking
    ));

    out.push_str("MODAL BALANCE:\n");
    out.push_str(&format!(
        "Dominant Modality: {}\n\n",
        interpretation.modal_balance.dominant
    ));

    out
}
