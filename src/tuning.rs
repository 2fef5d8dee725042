//! Data-driven game balance
//!
//! The tier table and rule switches can be loaded from JSON; anything loaded
//! is validated before a run starts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One difficulty tier, active once the score reaches `required_score`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    #[serde(default)]
    pub name: String,
    pub required_score: u32,
    /// Multiplier on the pipe scroll speed
    pub speed: f32,
    /// Minimum gap between top and bottom pipe (gap is drawn from spacing..2*spacing)
    pub pipe_spacing: f32,
    /// Frames between pipe spawns
    pub pipe_interval: u64,
    #[serde(default)]
    pub moving_pipes: bool,
    #[serde(default)]
    pub lasers: bool,
    /// Lasers per volley
    #[serde(default)]
    pub laser_count: u32,
    /// Frames between volleys
    #[serde(default = "default_laser_interval")]
    pub laser_interval: u64,
}

fn default_laser_interval() -> u64 {
    200
}

impl DifficultyTier {
    /// Does this tier fire lasers at `frame`?
    pub fn fires_lasers_at(&self, frame: u64) -> bool {
        self.lasers
            && self.laser_count > 0
            && self.laser_interval > 0
            && frame % self.laser_interval == 0
    }

    pub fn spawns_pipe_at(&self, frame: u64) -> bool {
        frame % self.pipe_interval == 0
    }
}

/// The stock tier table
pub fn default_tiers() -> Vec<DifficultyTier> {
    vec![
        DifficultyTier {
            name: "Normal pipes".to_string(),
            required_score: 0,
            speed: 1.0,
            pipe_spacing: 200.0,
            pipe_interval: 100,
            moving_pipes: false,
            lasers: false,
            laser_count: 5,
            laser_interval: 200,
        },
        DifficultyTier {
            name: "More pipes".to_string(),
            required_score: 10,
            speed: 1.5,
            pipe_spacing: 150.0,
            pipe_interval: 70,
            moving_pipes: false,
            lasers: false,
            laser_count: 0,
            laser_interval: 200,
        },
        DifficultyTier {
            name: "Moving pipes".to_string(),
            required_score: 20,
            speed: 2.0,
            pipe_spacing: 100.0,
            pipe_interval: 50,
            moving_pipes: true,
            lasers: false,
            laser_count: 0,
            laser_interval: 200,
        },
        DifficultyTier {
            name: "Lasers".to_string(),
            required_score: 30,
            speed: 2.0,
            pipe_spacing: 200.0,
            pipe_interval: 50,
            moving_pipes: true,
            lasers: true,
            laser_count: 2,
            laser_interval: 200,
        },
        DifficultyTier {
            name: "Portal".to_string(),
            required_score: 40,
            speed: 2.0,
            pipe_spacing: 200.0,
            pipe_interval: 50,
            moving_pipes: true,
            lasers: false,
            laser_count: 0,
            laser_interval: 200,
        },
    ]
}

/// Rule switches for behavior that is not settled yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rules {
    /// Flying off the top of the screen ends the run
    #[serde(default)]
    pub ceiling_is_fatal: bool,
    /// Lasers scroll left with the pipes instead of hanging in place
    #[serde(default)]
    pub lasers_drift: bool,
    /// Lasers only hit when the beam itself crosses the bird, not just its
    /// bounding box
    #[serde(default)]
    pub precise_lasers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub tiers: Vec<DifficultyTier>,
    #[serde(default)]
    pub rules: Rules,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            rules: Rules::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    NoTiers,
    FirstTierNotAtZero { required_score: u32 },
    ThresholdNotIncreasing { tier: usize, required_score: u32, previous: u32 },
    NonPositiveSpeed { tier: usize },
    NonPositiveSpacing { tier: usize },
    ZeroPipeInterval { tier: usize },
    LasersWithoutVolley { tier: usize },
    Parse(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTiers => write!(f, "tier table is empty"),
            Self::FirstTierNotAtZero { required_score } => write!(
                f,
                "first tier must start at score 0, found {required_score}"
            ),
            Self::ThresholdNotIncreasing {
                tier,
                required_score,
                previous,
            } => write!(
                f,
                "tier {tier} requires score {required_score}, not above previous {previous}"
            ),
            Self::NonPositiveSpeed { tier } => write!(f, "tier {tier} speed must be positive"),
            Self::NonPositiveSpacing { tier } => {
                write!(f, "tier {tier} pipe spacing must be positive")
            }
            Self::ZeroPipeInterval { tier } => write!(f, "tier {tier} pipe interval is zero"),
            Self::LasersWithoutVolley { tier } => write!(
                f,
                "tier {tier} enables lasers with a zero laser count or interval"
            ),
            Self::Parse(msg) => write!(f, "invalid tuning JSON: {msg}"),
        }
    }
}

impl std::error::Error for TuningError {}

impl Tuning {
    /// Parse and validate a tuning file
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let first = self.tiers.first().ok_or(TuningError::NoTiers)?;
        if first.required_score != 0 {
            return Err(TuningError::FirstTierNotAtZero {
                required_score: first.required_score,
            });
        }

        for (i, tier) in self.tiers.iter().enumerate() {
            if i > 0 {
                let previous = self.tiers[i - 1].required_score;
                if tier.required_score <= previous {
                    return Err(TuningError::ThresholdNotIncreasing {
                        tier: i,
                        required_score: tier.required_score,
                        previous,
                    });
                }
            }
            if !(tier.speed > 0.0) {
                return Err(TuningError::NonPositiveSpeed { tier: i });
            }
            if !(tier.pipe_spacing > 0.0) {
                return Err(TuningError::NonPositiveSpacing { tier: i });
            }
            if tier.pipe_interval == 0 {
                return Err(TuningError::ZeroPipeInterval { tier: i });
            }
            if tier.lasers && (tier.laser_count == 0 || tier.laser_interval == 0) {
                return Err(TuningError::LasersWithoutVolley { tier: i });
            }
        }

        Ok(())
    }

    /// Tier at `index`, clamped to the last one; `None` for an empty table
    pub fn tier(&self, index: usize) -> Option<&DifficultyTier> {
        self.tiers.get(index).or_else(|| self.tiers.last())
    }
}
