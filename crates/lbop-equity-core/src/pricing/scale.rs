use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LbopError;
use crate::types::*;
use crate::LbopResult;

/// Upper bound on rows produced by a single sweep.
const MAX_SWEEP_POINTS: usize = 10_000;

// ---------------------------------------------------------------------------
// Policy types
// ---------------------------------------------------------------------------

/// Independent variable the sliding scale is keyed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleVariable {
    #[default]
    AcquisitionPrice,
    NetEquity,
}

/// Intermediate (x, percentage) point of a piecewise scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleAnchor {
    pub x: Money,
    pub pct: Rate,
}

/// Interpolation between the two breakpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ScaleShape {
    /// Single segment from (lower, max) to (upper, min)
    #[default]
    Linear,
    /// Segments through the anchors, which lie strictly between the breakpoints
    Piecewise { anchors: Vec<ScaleAnchor> },
}

/// Post-interpolation transform of the resolved percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PercentTruncation {
    /// Full precision
    #[default]
    None,
    /// Floor to one decimal of a percentage point (57.8125% → 57.8%)
    OneDecimal,
}

impl PercentTruncation {
    pub fn apply(self, pct: Rate) -> Rate {
        match self {
            PercentTruncation::None => pct,
            PercentTruncation::OneDecimal => (pct * dec!(1000)).floor() / dec!(1000),
        }
    }
}

/// Unvalidated policy as it appears in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawParticipationPolicy {
    /// Variable value at or below which `max_pct` applies
    pub lower_breakpoint: Money,
    /// Variable value at or above which `min_pct` applies
    pub upper_breakpoint: Money,
    pub max_pct: Rate,
    pub min_pct: Rate,
    #[serde(default)]
    pub shape: ScaleShape,
    #[serde(default)]
    pub variable: ScaleVariable,
    #[serde(default)]
    pub truncation: PercentTruncation,
}

/// Validated sliding-scale configuration.
///
/// Only obtainable through [`ParticipationPolicy::new`] (or deserialization,
/// which runs the same checks), so every instance has strictly increasing
/// breakpoints and anchors and a well-formed percentage band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParticipationPolicy", into = "RawParticipationPolicy")]
pub struct ParticipationPolicy {
    lower_breakpoint: Money,
    upper_breakpoint: Money,
    max_pct: Rate,
    min_pct: Rate,
    shape: ScaleShape,
    variable: ScaleVariable,
    truncation: PercentTruncation,
}

impl TryFrom<RawParticipationPolicy> for ParticipationPolicy {
    type Error = LbopError;

    fn try_from(raw: RawParticipationPolicy) -> Result<Self, Self::Error> {
        ParticipationPolicy::new(raw)
    }
}

impl From<ParticipationPolicy> for RawParticipationPolicy {
    fn from(p: ParticipationPolicy) -> Self {
        RawParticipationPolicy {
            lower_breakpoint: p.lower_breakpoint,
            upper_breakpoint: p.upper_breakpoint,
            max_pct: p.max_pct,
            min_pct: p.min_pct,
            shape: p.shape,
            variable: p.variable,
            truncation: p.truncation,
        }
    }
}

fn policy_error(field: &str, reason: String) -> LbopError {
    LbopError::InvalidPolicy {
        field: field.into(),
        reason,
    }
}

impl ParticipationPolicy {
    pub fn new(raw: RawParticipationPolicy) -> LbopResult<Self> {
        if raw.upper_breakpoint <= raw.lower_breakpoint {
            return Err(policy_error(
                "upper_breakpoint",
                format!(
                    "Upper breakpoint {} must exceed lower breakpoint {}",
                    raw.upper_breakpoint, raw.lower_breakpoint
                ),
            ));
        }
        if raw.min_pct < Decimal::ZERO || raw.max_pct > Decimal::ONE {
            return Err(policy_error(
                "max_pct",
                "Participation percentages must lie between 0 and 1".into(),
            ));
        }
        if raw.max_pct < raw.min_pct {
            return Err(policy_error(
                "min_pct",
                format!(
                    "Minimum percentage {} exceeds maximum percentage {}",
                    raw.min_pct, raw.max_pct
                ),
            ));
        }

        if let ScaleShape::Piecewise { anchors } = &raw.shape {
            let mut prev = ScaleAnchor {
                x: raw.lower_breakpoint,
                pct: raw.max_pct,
            };
            for (i, anchor) in anchors.iter().enumerate() {
                if anchor.x <= prev.x {
                    return Err(policy_error(
                        &format!("anchors[{i}].x"),
                        format!(
                            "Anchor {} must be strictly greater than {}",
                            anchor.x, prev.x
                        ),
                    ));
                }
                if anchor.x >= raw.upper_breakpoint {
                    return Err(policy_error(
                        &format!("anchors[{i}].x"),
                        format!(
                            "Anchor {} must lie below the upper breakpoint {}",
                            anchor.x, raw.upper_breakpoint
                        ),
                    ));
                }
                if anchor.pct > prev.pct || anchor.pct < raw.min_pct {
                    return Err(policy_error(
                        &format!("anchors[{i}].pct"),
                        format!(
                            "Anchor percentage {} must lie between {} and the preceding {}",
                            anchor.pct, raw.min_pct, prev.pct
                        ),
                    ));
                }
                prev = *anchor;
            }
        }

        Ok(Self {
            lower_breakpoint: raw.lower_breakpoint,
            upper_breakpoint: raw.upper_breakpoint,
            max_pct: raw.max_pct,
            min_pct: raw.min_pct,
            shape: raw.shape,
            variable: raw.variable,
            truncation: raw.truncation,
        })
    }

    /// Single-segment scale keyed on the acquisition price.
    pub fn linear(lower: Money, upper: Money, max_pct: Rate, min_pct: Rate) -> LbopResult<Self> {
        Self::new(RawParticipationPolicy {
            lower_breakpoint: lower,
            upper_breakpoint: upper,
            max_pct,
            min_pct,
            shape: ScaleShape::Linear,
            variable: ScaleVariable::AcquisitionPrice,
            truncation: PercentTruncation::None,
        })
    }

    /// Program standard: 60% at a 3,000 buy-now price sliding to 42.5% at 19,000.
    pub fn standard() -> Self {
        Self {
            lower_breakpoint: dec!(3000),
            upper_breakpoint: dec!(19000),
            max_pct: dec!(0.60),
            min_pct: dec!(0.425),
            shape: ScaleShape::Linear,
            variable: ScaleVariable::AcquisitionPrice,
            truncation: PercentTruncation::None,
        }
    }

    pub fn with_variable(mut self, variable: ScaleVariable) -> Self {
        self.variable = variable;
        self
    }

    pub fn with_truncation(mut self, truncation: PercentTruncation) -> Self {
        self.truncation = truncation;
        self
    }

    pub fn lower_breakpoint(&self) -> Money {
        self.lower_breakpoint
    }

    pub fn upper_breakpoint(&self) -> Money {
        self.upper_breakpoint
    }

    pub fn max_pct(&self) -> Rate {
        self.max_pct
    }

    pub fn min_pct(&self) -> Rate {
        self.min_pct
    }

    pub fn shape(&self) -> &ScaleShape {
        &self.shape
    }

    pub fn variable(&self) -> ScaleVariable {
        self.variable
    }

    pub fn truncation(&self) -> PercentTruncation {
        self.truncation
    }

    /// Breakpoints and anchors as one ordered node list.
    fn nodes(&self) -> Vec<ScaleAnchor> {
        let mut nodes = vec![ScaleAnchor {
            x: self.lower_breakpoint,
            pct: self.max_pct,
        }];
        if let ScaleShape::Piecewise { anchors } = &self.shape {
            nodes.extend(anchors.iter().copied());
        }
        nodes.push(ScaleAnchor {
            x: self.upper_breakpoint,
            pct: self.min_pct,
        });
        nodes
    }

    /// Bracketing node pair for an x strictly inside the breakpoints.
    fn segment(&self, x: Money) -> (ScaleAnchor, ScaleAnchor) {
        let nodes = self.nodes();
        nodes
            .windows(2)
            .find(|w| x >= w[0].x && x < w[1].x)
            .map(|w| (w[0], w[1]))
            .unwrap_or((nodes[0], nodes[nodes.len() - 1]))
    }

    /// Map the independent variable to a participation percentage.
    ///
    /// At or below the lower breakpoint this is exactly `max_pct`, at or above
    /// the upper breakpoint exactly `min_pct`; between them the interpolated
    /// value is truncated (if configured) and clamped into the band.
    pub fn resolve(&self, x: Money) -> Rate {
        if x <= self.lower_breakpoint {
            return self.max_pct;
        }
        if x >= self.upper_breakpoint {
            return self.min_pct;
        }

        let (a, b) = self.segment(x);
        let raw = a.pct - (x - a.x) / (b.x - a.x) * (a.pct - b.pct);
        let pct = self.truncation.apply(raw);
        pct.max(self.min_pct).min(self.max_pct)
    }

    pub fn region(&self, x: Money) -> ScaleRegion {
        if x <= self.lower_breakpoint {
            ScaleRegion::AtMaximum
        } else if x >= self.upper_breakpoint {
            ScaleRegion::AtMinimum
        } else {
            ScaleRegion::Interpolated
        }
    }
}

impl Default for ParticipationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Where on the scale a value fell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleRegion {
    AtMaximum,
    Interpolated,
    AtMinimum,
}

// ---------------------------------------------------------------------------
// Enveloped operations
// ---------------------------------------------------------------------------

/// Input for a single percentage resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipationInput {
    #[serde(default)]
    pub policy: ParticipationPolicy,
    /// Value of the policy's independent variable
    pub x: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipationOutput {
    pub variable: ScaleVariable,
    pub x: Money,
    pub participation_pct: Rate,
    pub region: ScaleRegion,
    /// Bracketing (x0, x1) when interpolated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<(Money, Money)>,
}

/// Resolve one participation percentage with metadata.
pub fn resolve_participation(
    input: &ParticipationInput,
) -> LbopResult<ComputationOutput<ParticipationOutput>> {
    let start = Instant::now();
    let policy = &input.policy;

    let participation_pct = policy.resolve(input.x);
    let region = policy.region(input.x);
    let segment = match region {
        ScaleRegion::Interpolated => {
            let (a, b) = policy.segment(input.x);
            Some((a.x, b.x))
        }
        _ => None,
    };

    tracing::debug!(x = %input.x, pct = %participation_pct, ?region, "participation resolved");

    let output = ParticipationOutput {
        variable: policy.variable,
        x: input.x,
        participation_pct,
        region,
        segment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Sliding-Scale Participation Percentage",
        &serde_json::json!({
            "lower_breakpoint": policy.lower_breakpoint.to_string(),
            "upper_breakpoint": policy.upper_breakpoint.to_string(),
            "max_pct": policy.max_pct.to_string(),
            "min_pct": policy.min_pct.to_string(),
            "truncation": policy.truncation,
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Input for a rate-card sweep across a range of the independent variable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleSweepInput {
    #[serde(default)]
    pub policy: ParticipationPolicy,
    pub from: Money,
    pub to: Money,
    pub step: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalePoint {
    pub x: Money,
    pub participation_pct: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleSweepOutput {
    pub points: Vec<ScalePoint>,
}

/// Tabulate the scale from `from` to `to` (inclusive) in `step` increments.
pub fn sweep_scale(input: &ScaleSweepInput) -> LbopResult<ComputationOutput<ScaleSweepOutput>> {
    let start = Instant::now();

    if input.step <= Decimal::ZERO {
        return Err(LbopError::InvalidInput {
            field: "step".into(),
            reason: "Sweep step must be positive".into(),
        });
    }
    if input.to < input.from {
        return Err(LbopError::InvalidInput {
            field: "to".into(),
            reason: "Sweep end must not precede its start".into(),
        });
    }
    let count = ((input.to - input.from) / input.step).floor();
    if count >= Decimal::from(MAX_SWEEP_POINTS as u64) {
        return Err(LbopError::InvalidInput {
            field: "step".into(),
            reason: format!("Sweep would produce more than {MAX_SWEEP_POINTS} points"),
        });
    }

    let mut points = Vec::new();
    let mut x = input.from;
    while x <= input.to {
        points.push(ScalePoint {
            x,
            participation_pct: input.policy.resolve(x),
        });
        x += input.step;
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Sliding-Scale Rate Card",
        &serde_json::json!({
            "from": input.from.to_string(),
            "to": input.to.to_string(),
            "step": input.step.to_string(),
        }),
        Vec::new(),
        elapsed,
        ScaleSweepOutput { points },
    ))
}
