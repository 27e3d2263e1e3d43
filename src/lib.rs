// natal_core: deterministic natal chart interpretation.
//
// The engine is a pure function of (BirthChart, static rules) -> Interpretation.
// Chart construction (ephemeris math, house computation, aspect detection) is
// an upstream concern; this crate only consumes the finished chart.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod config;
pub mod factual;
pub mod interpret;
pub mod prompt;
pub mod render;
pub mod rules;
pub mod synthesis;
pub mod themes;

pub use interpret::{generate_chart_interpretation, Interpretation};
pub use render::format_interpretation;

// ---------------------------
// ## Enumerations
// ---------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Planet {
    Sun = 0,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    pub fn iter() -> impl Iterator<Item = Planet> {
        [
            Planet::Sun,
            Planet::Moon,
            Planet::Mercury,
            Planet::Venus,
            Planet::Mars,
            Planet::Jupiter,
            Planet::Saturn,
            Planet::Uranus,
            Planet::Neptune,
            Planet::Pluto,
        ]
        .iter()
        .copied()
    }

    /// Canonical lower-case key, as used in chart JSON.
    pub fn key(&self) -> &'static str {
        match self {
            Planet::Sun => "sun",
            Planet::Moon => "moon",
            Planet::Mercury => "mercury",
            Planet::Venus => "venus",
            Planet::Mars => "mars",
            Planet::Jupiter => "jupiter",
            Planet::Saturn => "saturn",
            Planet::Uranus => "uranus",
            Planet::Neptune => "neptune",
            Planet::Pluto => "pluto",
        }
    }

    /// Capitalized display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }

    pub fn is_luminary(&self) -> bool {
        matches!(self, Planet::Sun | Planet::Moon)
    }
}

impl FromStr for Planet {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.to_ascii_lowercase().as_str() {
            "sun" => Ok(Planet::Sun),
            "moon" => Ok(Planet::Moon),
            "mercury" => Ok(Planet::Mercury),
            "venus" => Ok(Planet::Venus),
            "mars" => Ok(Planet::Mars),
            "jupiter" => Ok(Planet::Jupiter),
            "saturn" => Ok(Planet::Saturn),
            "uranus" => Ok(Planet::Uranus),
            "neptune" => Ok(Planet::Neptune),
            "pluto" => Ok(Planet::Pluto),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Serialize for Planet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Planet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Planet::from_str(&s).map_err(|_| de::Error::custom(format!("unknown planet: {}", s)))
    }
}

/// A chart point an aspect can reference: one of the ten planets or an angle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ChartPoint {
    Planet(Planet),
    Ascendant,
    Midheaven,
}

impl ChartPoint {
    pub fn key(&self) -> &'static str {
        match self {
            ChartPoint::Planet(p) => p.key(),
            ChartPoint::Ascendant => "ascendant",
            ChartPoint::Midheaven => "midheaven",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ChartPoint::Planet(p) => p.display_name(),
            ChartPoint::Ascendant => "Ascendant",
            ChartPoint::Midheaven => "Midheaven",
        }
    }

    pub fn planet(&self) -> Option<Planet> {
        match self {
            ChartPoint::Planet(p) => Some(*p),
            _ => None,
        }
    }
}

impl From<Planet> for ChartPoint {
    fn from(p: Planet) -> Self {
        ChartPoint::Planet(p)
    }
}

impl FromStr for ChartPoint {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        if let Ok(planet) = Planet::from_str(s) {
            return Ok(ChartPoint::Planet(planet));
        }
        match s.to_ascii_lowercase().as_str() {
            "ascendant" | "asc" => Ok(ChartPoint::Ascendant),
            "midheaven" | "mc" => Ok(ChartPoint::Midheaven),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ChartPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Serialize for ChartPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for ChartPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ChartPoint::from_str(&s)
            .map_err(|_| de::Error::custom(format!("unknown chart point: {}", s)))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ZodiacSign {
    Aries = 0,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub fn iter() -> impl Iterator<Item = ZodiacSign> {
        [
            ZodiacSign::Aries,
            ZodiacSign::Taurus,
            ZodiacSign::Gemini,
            ZodiacSign::Cancer,
            ZodiacSign::Leo,
            ZodiacSign::Virgo,
            ZodiacSign::Libra,
            ZodiacSign::Scorpio,
            ZodiacSign::Sagittarius,
            ZodiacSign::Capricorn,
            ZodiacSign::Aquarius,
            ZodiacSign::Pisces,
        ]
        .iter()
        .copied()
    }

    pub fn element(&self) -> Element {
        match self {
            ZodiacSign::Aries | ZodiacSign::Leo | ZodiacSign::Sagittarius => Element::Fire,
            ZodiacSign::Taurus | ZodiacSign::Virgo | ZodiacSign::Capricorn => Element::Earth,
            ZodiacSign::Gemini | ZodiacSign::Libra | ZodiacSign::Aquarius => Element::Air,
            ZodiacSign::Cancer | ZodiacSign::Scorpio | ZodiacSign::Pisces => Element::Water,
        }
    }

    pub fn modality(&self) -> Modality {
        match self {
            ZodiacSign::Aries | ZodiacSign::Cancer | ZodiacSign::Libra | ZodiacSign::Capricorn => {
                Modality::Cardinal
            }
            ZodiacSign::Taurus | ZodiacSign::Leo | ZodiacSign::Scorpio | ZodiacSign::Aquarius => {
                Modality::Fixed
            }
            ZodiacSign::Gemini
            | ZodiacSign::Virgo
            | ZodiacSign::Sagittarius
            | ZodiacSign::Pisces => Modality::Mutable,
        }
    }

    /// Traditional rulership. Scorpio keeps Mars, Aquarius keeps Saturn and
    /// Pisces keeps Jupiter rather than the modern outer-planet rulers, so
    /// the chart ruler is always a body most charts actually track.
    pub fn traditional_ruler(&self) -> Planet {
        match self {
            ZodiacSign::Aries => Planet::Mars,
            ZodiacSign::Taurus => Planet::Venus,
            ZodiacSign::Gemini => Planet::Mercury,
            ZodiacSign::Cancer => Planet::Moon,
            ZodiacSign::Leo => Planet::Sun,
            ZodiacSign::Virgo => Planet::Mercury,
            ZodiacSign::Libra => Planet::Venus,
            ZodiacSign::Scorpio => Planet::Mars,
            ZodiacSign::Sagittarius => Planet::Jupiter,
            ZodiacSign::Capricorn => Planet::Saturn,
            ZodiacSign::Aquarius => Planet::Saturn,
            ZodiacSign::Pisces => Planet::Jupiter,
        }
    }
}

impl FromStr for ZodiacSign {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.to_ascii_lowercase().as_str() {
            "aries" => Ok(ZodiacSign::Aries),
            "taurus" => Ok(ZodiacSign::Taurus),
            "gemini" => Ok(ZodiacSign::Gemini),
            "cancer" => Ok(ZodiacSign::Cancer),
            "leo" => Ok(ZodiacSign::Leo),
            "virgo" => Ok(ZodiacSign::Virgo),
            "libra" => Ok(ZodiacSign::Libra),
            "scorpio" => Ok(ZodiacSign::Scorpio),
            "sagittarius" => Ok(ZodiacSign::Sagittarius),
            "capricorn" => Ok(ZodiacSign::Capricorn),
            "aquarius" => Ok(ZodiacSign::Aquarius),
            "pisces" => Ok(ZodiacSign::Pisces),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign_str = match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        };
        write!(f, "{}", sign_str)
    }
}

impl<'de> Deserialize<'de> for ZodiacSign {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ZodiacSign::from_str(&s).map_err(|_| de::Error::custom(format!("unknown sign: {}", s)))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire = 0,
    Earth,
    Air,
    Water,
}

impl Element {
    pub fn iter() -> impl Iterator<Item = Element> {
        [Element::Fire, Element::Earth, Element::Air, Element::Water]
            .iter()
            .copied()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Modality {
    Cardinal = 0,
    Fixed,
    Mutable,
}

impl Modality {
    pub fn iter() -> impl Iterator<Item = Modality> {
        [Modality::Cardinal, Modality::Fixed, Modality::Mutable]
            .iter()
            .copied()
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Modality::Cardinal => "Cardinal",
            Modality::Fixed => "Fixed",
            Modality::Mutable => "Mutable",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum House {
    First = 1,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
    Ninth,
    Tenth,
    Eleventh,
    Twelfth,
}

impl House {
    pub fn from_index(index: usize) -> Option<House> {
        match index {
            1 => Some(House::First),
            2 => Some(House::Second),
            3 => Some(House::Third),
            4 => Some(House::Fourth),
            5 => Some(House::Fifth),
            6 => Some(House::Sixth),
            7 => Some(House::Seventh),
            8 => Some(House::Eighth),
            9 => Some(House::Ninth),
            10 => Some(House::Tenth),
            11 => Some(House::Eleventh),
            12 => Some(House::Twelfth),
            _ => None,
        }
    }

    pub fn all() -> impl Iterator<Item = House> {
        (1..=12).filter_map(House::from_index)
    }

    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Houses 1, 4, 7 and 10 sit on the chart angles.
    pub fn is_angular(&self) -> bool {
        matches!(
            self,
            House::First | House::Fourth | House::Seventh | House::Tenth
        )
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Serialize for House {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for House {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let n = u8::deserialize(deserializer)?;
        House::from_index(n as usize)
            .ok_or_else(|| de::Error::custom(format!("house number out of range: {}", n)))
    }
}

/// A named angular relationship between two chart points. Unknown kinds are
/// carried through as `Other` so a malformed chart still renders
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
    Quincunx,
    Other(String),
}

impl AspectKind {
    pub fn name(&self) -> &str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
            AspectKind::Quincunx => "quincunx",
            AspectKind::Other(s) => s,
        }
    }

    pub fn is_challenging(&self) -> bool {
        matches!(self, AspectKind::Square | AspectKind::Opposition)
    }

    pub fn is_harmonious(&self) -> bool {
        matches!(self, AspectKind::Trine | AspectKind::Sextile)
    }
}

impl FromStr for AspectKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "conjunction" => AspectKind::Conjunction,
            "sextile" => AspectKind::Sextile,
            "square" => AspectKind::Square,
            "trine" => AspectKind::Trine,
            "opposition" => AspectKind::Opposition,
            "quincunx" => AspectKind::Quincunx,
            other => AspectKind::Other(other.to_string()),
        })
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for AspectKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for AspectKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let lowered = s.to_ascii_lowercase();
        Ok(AspectKind::from_str(&lowered).unwrap_or(AspectKind::Other(lowered)))
    }
}

// ---------------------------
// ## Chart data model
// ---------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: f64,
}

/// Birth data is provenance only; scoring never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub date: String,
    pub time: String,
    pub location: GeoLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnglePosition {
    pub sign: ZodiacSign,
    pub element: Element,
    pub degree: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angles {
    pub ascendant: AnglePosition,
    pub midheaven: AnglePosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    pub sign: ZodiacSign,
    pub element: Element,
    pub house: House,
    pub degree: f64,
    #[serde(default)]
    pub is_retrograde: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HousePosition {
    pub number: House,
    pub sign: ZodiacSign,
    pub element: Element,
    pub degree: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub planet1: ChartPoint,
    pub planet2: ChartPoint,
    pub aspect: AspectKind,
    pub orb: f64,
}

impl Aspect {
    /// True when either endpoint is the given point.
    pub fn touches(&self, point: ChartPoint) -> bool {
        self.planet1 == point || self.planet2 == point
    }

    /// True when the aspect joins the two points, in either order.
    pub fn links(&self, a: ChartPoint, b: ChartPoint) -> bool {
        (self.planet1 == a && self.planet2 == b) || (self.planet1 == b && self.planet2 == a)
    }

    /// The endpoint opposite `point`, when `point` participates.
    pub fn other(&self, point: ChartPoint) -> Option<ChartPoint> {
        if self.planet1 == point {
            Some(self.planet2)
        } else if self.planet2 == point {
            Some(self.planet1)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthChart {
    pub birth_data: BirthData,
    pub angles: Angles,
    pub planets: BTreeMap<Planet, PlanetPosition>,
    #[serde(default)]
    pub houses: Vec<HousePosition>,
    #[serde(default)]
    pub aspects: Vec<Aspect>,
}

impl BirthChart {
    /// All aspects touching the given point, in input order.
    pub fn aspects_touching(&self, point: ChartPoint) -> Vec<&Aspect> {
        self.aspects.iter().filter(|a| a.touches(point)).collect()
    }

    /// The chart ruler: traditional ruler of the ascendant sign.
    pub fn chart_ruler(&self) -> Planet {
        self.angles.ascendant.sign.traditional_ruler()
    }
}

// ---------------------------
// ## Errors
// ---------------------------

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("birth chart contains no planets")]
    EmptyPlanets,

    #[error("chart parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
