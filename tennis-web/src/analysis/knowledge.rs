//! Reference technique table
//!
//! Ideal joint ranges and canned mistake/tip text per shot. Read-only,
//! process-lifetime data.

use crate::classifier::ShotType;

/// Inclusive angle range in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleRange {
    pub min: f32,
    pub max: f32,
}

impl AngleRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, angle: f32) -> bool {
        angle >= self.min && angle <= self.max
    }
}

/// Tracked joint whose range check can fail; indexes `mistakes`/`tips`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    Elbow = 0,
    Back = 1,
    Knee = 2,
}

/// Reference metrics for one shot
#[derive(Debug)]
pub struct IdealMetrics {
    pub shot: ShotType,
    pub elbow: AngleRange,
    pub back: AngleRange,
    pub knee: AngleRange,
    /// Parallel to `tips`: same index, same fault
    pub mistakes: [&'static str; 3],
    pub tips: [&'static str; 3],
}

impl IdealMetrics {
    pub fn mistake(&self, fault: Fault) -> &'static str {
        self.mistakes[fault as usize]
    }

    pub fn tip(&self, fault: Fault) -> &'static str {
        self.tips[fault as usize]
    }
}

static FOREHAND: IdealMetrics = IdealMetrics {
    shot: ShotType::Forehand,
    elbow: AngleRange::new(150.0, 180.0),
    back: AngleRange::new(0.0, 15.0),
    knee: AngleRange::new(130.0, 160.0),
    mistakes: [
        "Elbow over-bent at contact",
        "Torso leaning back too far",
        "Legs too straight, losing power",
    ],
    tips: [
        "Extend your hitting arm fully through contact",
        "Keep your weight moving slightly forward",
        "Lower your center of gravity for a steadier base",
    ],
};

static BACKHAND: IdealMetrics = IdealMetrics {
    shot: ShotType::Backhand,
    elbow: AngleRange::new(140.0, 175.0),
    back: AngleRange::new(0.0, 10.0),
    knee: AngleRange::new(120.0, 150.0),
    mistakes: [
        "Elbow collapses before the follow-through is complete",
        "Leaning off balance during the sideways move",
        "Center of gravity too high, knees too straight",
    ],
    tips: [
        "Rotate your shoulders fully and extend through the ball",
        "Step toward the ball as you swing",
        "Keep your knees bent throughout the stroke",
    ],
};

static SERVE: IdealMetrics = IdealMetrics {
    shot: ShotType::Serve,
    elbow: AngleRange::new(160.0, 180.0),
    back: AngleRange::new(5.0, 20.0),
    knee: AngleRange::new(110.0, 140.0),
    mistakes: [
        "Hitting elbow drops too early",
        "Back arching away from the toss",
        "Not enough drive from the legs",
    ],
    tips: [
        "Reach up to full extension at contact",
        "Keep the tossing arm up longer and stay tall",
        "Explode upward by pushing hard with your legs",
    ],
};

static READY_POSITION: IdealMetrics = IdealMetrics {
    shot: ShotType::ReadyPosition,
    elbow: AngleRange::new(100.0, 130.0),
    back: AngleRange::new(10.0, 25.0),
    knee: AngleRange::new(120.0, 150.0),
    mistakes: [
        "Elbows tucked too close to the body",
        "Leaning the back too far forward",
        "Knees too straight, flat-footed stance",
    ],
    tips: [
        "Keep the racket out in front of your body",
        "Stay balanced on the balls of your feet",
        "Bend your knees and split-step",
    ],
};

static VOLLEY: IdealMetrics = IdealMetrics {
    shot: ShotType::Volley,
    elbow: AngleRange::new(110.0, 140.0),
    back: AngleRange::new(0.0, 10.0),
    knee: AngleRange::new(110.0, 140.0),
    mistakes: [
        "Elbow folded into a big backswing",
        "Leaning back and letting the racket head drop",
        "Standing too tall, knees not bent",
    ],
    tips: [
        "Use a short, firm punching motion",
        "Keep your wrist firm and stay over the ball",
        "Get down low to the ball",
    ],
};

/// Reference metrics for a shot
pub fn lookup(shot: ShotType) -> &'static IdealMetrics {
    match shot {
        ShotType::Forehand => &FOREHAND,
        ShotType::Backhand => &BACKHAND,
        ShotType::Serve => &SERVE,
        ShotType::Volley => &VOLLEY,
        ShotType::ReadyPosition => &READY_POSITION,
    }
}

/// Reference metrics by wire name, falling back to the ready position
pub fn lookup_name(name: &str) -> &'static IdealMetrics {
    match name.parse::<ShotType>() {
        Ok(shot) => lookup(shot),
        Err(_) => {
            log::debug!("no reference entry for '{}', using ready_position", name);
            &READY_POSITION
        }
    }
}
