//! Wheel outcome resolution.
//!
//! The server picks the stop angle once and resolves it here; clients only
//! animate towards the result. Resolution is a pure function of the pattern
//! and the angle.
//!
//! Angles are in degrees, measured clockwise from the start of segment 0.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::text::normalize;

/// Separator of the two halves of a split segment label.
pub const SPLIT_SEPARATOR: char = '/';

/// What a wheel label does when the wheel stops on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Outcome {
    Points { value: u32 },
    Pass,
    Bankrupt,
    Double,
    Custom { label: String },
}

impl Outcome {
    /// Classify a single label token.
    pub fn parse_label(label: &str) -> Self {
        let token = normalize(label.trim());
        if let Ok(value) = token.parse::<u32>() {
            return Self::Points { value };
        }
        match token.as_str() {
            "PASSA" | "PASS" => Self::Pass,
            "BANCAROTTA" | "BANKRUPT" => Self::Bankrupt,
            "X2" | "2X" | "DOPPIO" | "DOUBLE" => Self::Double,
            _ => Self::Custom {
                label: label.trim().to_string(),
            },
        }
    }

    /// Label as written on the wheel.
    pub fn label(&self) -> String {
        match self {
            Self::Points { value } => value.to_string(),
            Self::Pass => "PASSA".to_string(),
            Self::Bankrupt => "BANCAROTTA".to_string(),
            Self::Double => "X2".to_string(),
            Self::Custom { label } => label.clone(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Points { .. } => "points",
            Self::Pass => "pass",
            Self::Bankrupt => "bankrupt",
            Self::Double => "double",
            Self::Custom { .. } => "custom",
        }
    }
}

/// One equal-width slice of the wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Single(Outcome),
    /// Two half-width outcomes, first half then second half.
    Split(Outcome, Outcome),
}

impl Segment {
    pub fn parse(label: &str) -> Result<Self, WheelError> {
        let parts: Vec<&str> = label.split(SPLIT_SEPARATOR).map(str::trim).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(WheelError::EmptyLabel(label.to_string()));
        }
        match parts.as_slice() {
            [single] => Ok(Self::Single(Outcome::parse_label(single))),
            [first, second] => Ok(Self::Split(
                Outcome::parse_label(first),
                Outcome::parse_label(second),
            )),
            _ => Err(WheelError::TooManyHalves(label.to_string())),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Single(o) => o.label(),
            Self::Split(a, b) => format!("{}{}{}", a.label(), SPLIT_SEPARATOR, b.label()),
        }
    }
}

/// Where the wheel stopped and what it means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResult {
    pub angle: f64,
    pub segment_index: usize,
    pub outcome: Outcome,
}

/// Ordered wheel segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct WheelPattern {
    segments: Vec<Segment>,
}

impl WheelPattern {
    /// Build a pattern from its labels, splitting `"A/B"` into halves.
    pub fn parse<S: AsRef<str>>(labels: &[S]) -> Result<Self, WheelError> {
        if labels.is_empty() {
            return Err(WheelError::Empty);
        }
        let segments = labels
            .iter()
            .map(|l| Segment::parse(l.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Width of one segment in degrees.
    pub fn segment_width(&self) -> f64 {
        360.0 / self.segments.len() as f64
    }

    pub fn labels(&self) -> Vec<String> {
        self.segments.iter().map(Segment::label).collect()
    }

    /// Resolve a stop angle to an outcome.
    pub fn resolve(&self, angle: f64) -> Result<SpinResult, WheelError> {
        if !angle.is_finite() {
            return Err(WheelError::InvalidAngle(angle));
        }
        let n = self.segments.len();
        let width = self.segment_width();
        let normalized = angle.rem_euclid(360.0);
        let segment_index = ((normalized / width).floor() as usize) % n;

        let outcome = match &self.segments[segment_index] {
            Segment::Single(o) => o.clone(),
            Segment::Split(first, second) => {
                let local = normalized - segment_index as f64 * width;
                if local < width / 2.0 {
                    first.clone()
                } else {
                    second.clone()
                }
            }
        };

        Ok(SpinResult {
            angle: normalized,
            segment_index,
            outcome,
        })
    }
}

impl TryFrom<Vec<String>> for WheelPattern {
    type Error = WheelError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(&labels)
    }
}

impl From<WheelPattern> for Vec<String> {
    fn from(pattern: WheelPattern) -> Self {
        pattern.labels()
    }
}

/// Pick a stop angle in `[0, 360)`.
pub fn random_stop_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..360.0)
}

/// Default wheel used when the configuration lists none.
pub fn default_patterns() -> Vec<WheelPattern> {
    const WHEELS: [&[&str]; 2] = [
        &[
            "300", "500", "PASSA", "400", "600", "BANCAROTTA", "300", "700", "X2", "450",
            "350", "800", "PASSA/BANCAROTTA", "500", "250", "1000",
        ],
        &[
            "200", "900", "BANCAROTTA", "400", "X2", "550", "300", "PASSA", "650", "500",
            "1000/BANCAROTTA", "350", "600", "PASSA", "250", "750",
        ],
    ];
    WHEELS
        .iter()
        .filter_map(|labels| WheelPattern::parse(labels).ok())
        .collect()
}

/// Wheel errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WheelError {
    #[error("Wheel pattern has no segments")]
    Empty,
    #[error("Wheel label {0:?} has an empty part")]
    EmptyLabel(String),
    #[error("Wheel label {0:?} has more than two halves")]
    TooManyHalves(String),
    #[error("Stop angle {0} is not a finite number")]
    InvalidAngle(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pattern(labels: &[&str]) -> WheelPattern {
        WheelPattern::parse(labels).unwrap()
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(Outcome::parse_label("500"), Outcome::Points { value: 500 });
        assert_eq!(Outcome::parse_label("passa"), Outcome::Pass);
        assert_eq!(Outcome::parse_label("Bancarotta"), Outcome::Bankrupt);
        assert_eq!(Outcome::parse_label("x2"), Outcome::Double);
        assert_eq!(
            Outcome::parse_label("JOLLY"),
            Outcome::Custom {
                label: "JOLLY".to_string()
            }
        );
    }

    #[test]
    fn test_parse_split_segment() {
        let seg = Segment::parse("PASSA/BANCAROTTA").unwrap();
        assert_eq!(seg, Segment::Split(Outcome::Pass, Outcome::Bankrupt));
        assert_eq!(seg.label(), "PASSA/BANCAROTTA");

        assert!(matches!(
            Segment::parse("A/B/C"),
            Err(WheelError::TooManyHalves(_))
        ));
        assert!(matches!(Segment::parse("PASSA/"), Err(WheelError::EmptyLabel(_))));
        assert!(matches!(
            WheelPattern::parse::<&str>(&[]),
            Err(WheelError::Empty)
        ));
    }

    #[test]
    fn test_resolve_segment_index() {
        let wheel = pattern(&["100", "200", "PASSA", "BANCAROTTA"]);
        assert_eq!(wheel.segment_width(), 90.0);

        assert_eq!(wheel.resolve(0.0).unwrap().outcome, Outcome::Points { value: 100 });
        assert_eq!(wheel.resolve(89.9).unwrap().outcome, Outcome::Points { value: 100 });
        assert_eq!(wheel.resolve(90.0).unwrap().outcome, Outcome::Points { value: 200 });

        let pass = wheel.resolve(225.0).unwrap();
        assert_eq!(pass.segment_index, 2);
        assert_eq!(pass.outcome, Outcome::Pass);
        assert_eq!(serde_json::to_value(&pass.outcome).unwrap(), serde_json::json!({"type": "pass"}));

        assert_eq!(wheel.resolve(359.0).unwrap().outcome, Outcome::Bankrupt);
    }

    #[test]
    fn test_resolve_wraps_angles() {
        let wheel = pattern(&["100", "200", "300", "400"]);
        assert_eq!(wheel.resolve(720.0 + 95.0).unwrap().segment_index, 1);
        assert_eq!(wheel.resolve(-10.0).unwrap().segment_index, 3);
        assert!(matches!(
            wheel.resolve(f64::NAN),
            Err(WheelError::InvalidAngle(_))
        ));
        assert!(wheel.resolve(f64::INFINITY).is_err());
    }

    #[test]
    fn test_resolve_split_halves() {
        let wheel = pattern(&["100", "PASSA/BANCAROTTA"]);
        assert_eq!(wheel.resolve(180.0).unwrap().outcome, Outcome::Pass);
        assert_eq!(wheel.resolve(269.0).unwrap().outcome, Outcome::Pass);
        assert_eq!(wheel.resolve(270.0).unwrap().outcome, Outcome::Bankrupt);
        assert_eq!(wheel.resolve(359.9).unwrap().outcome, Outcome::Bankrupt);
    }

    #[test]
    fn test_resolve_deterministic() {
        let wheel = &default_patterns()[0];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let angle = random_stop_angle(&mut rng);
            assert!((0.0..360.0).contains(&angle));
            assert_eq!(wheel.resolve(angle).unwrap(), wheel.resolve(angle).unwrap());
        }
    }

    #[test]
    fn test_serde_labels() {
        let wheel: WheelPattern =
            serde_json::from_str(r#"["500", "PASSA/BANCAROTTA", "X2"]"#).unwrap();
        assert_eq!(wheel.len(), 3);
        assert_eq!(
            serde_json::to_value(&wheel).unwrap(),
            serde_json::json!(["500", "PASSA/BANCAROTTA", "X2"])
        );
        assert!(serde_json::from_str::<WheelPattern>("[]").is_err());
    }

    #[test]
    fn test_default_patterns_valid() {
        let wheels = default_patterns();
        assert_eq!(wheels.len(), 2);
        assert!(wheels.iter().all(|w| w.len() == 16));
    }
}
