//! Thematic aspect grouping: each aspect lands in every life-theme bucket
//! whose membership test one of its endpoints satisfies. The partition is
//! deliberately non-exclusive and preserves input order.

use serde::Serialize;

use crate::config::{theme_groups, ThemeGroup};
use crate::{Aspect, Planet};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectGroups {
    pub identity_emotions: Vec<Aspect>,
    pub mind_communication: Vec<Aspect>,
    pub love_sex: Vec<Aspect>,
    pub growth_challenges: Vec<Aspect>,
}

fn matches_group(aspect: &Aspect, group: &ThemeGroup) -> bool {
    group.contains(aspect.planet1) || group.contains(aspect.planet2)
}

pub fn group_aspects_by_theme(aspects: &[Aspect], chart_ruler: Planet) -> AspectGroups {
    let groups = theme_groups(chart_ruler);
    let mut out = AspectGroups::default();

    for aspect in aspects {
        if matches_group(aspect, &groups.identity_emotions) {
            out.identity_emotions.push(aspect.clone());
        }
        if matches_group(aspect, &groups.mind_communication) {
            out.mind_communication.push(aspect.clone());
        }
        if matches_group(aspect, &groups.love_sex) {
            out.love_sex.push(aspect.clone());
        }
        if matches_group(aspect, &groups.growth_challenges) {
            out.growth_challenges.push(aspect.clone());
        }
    }

    out
}
