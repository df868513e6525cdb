//! The quality governor state machine: smooth tier transitions plus
//! sustained-performance tier stepping.

use crate::profile::DeviceProfile;
use crate::settings::QualitySettings;
use crate::tier::QualityTier;
use stillwater_core::Result;

/// Fraction of the transition completed per tick
const TRANSITION_SPEED: f32 = 0.05;
/// Consecutive out-of-bounds readings required before a tier step
const CONSECUTIVE_SAMPLES: u8 = 2;
/// Heap usage fraction above which a reading counts as poor regardless
/// of frame rate
const MEMORY_PRESSURE_LIMIT: f32 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdatePhase {
    /// Mid-transition: numeric settings are interpolated
    Intermediate,
    /// Transition finished: settings are exactly the target tier's
    Complete,
}

/// One settings push to subscribers, drained once per frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityUpdate {
    pub tier: QualityTier,
    pub settings: QualitySettings,
    pub phase: UpdatePhase,
}

pub struct QualityGovernor {
    current: QualityTier,
    target: Option<QualityTier>,
    progress: f32,
    settings: QualitySettings,
    updates: Vec<QualityUpdate>,
    target_fps: f32,
    consecutive_poor: u8,
    consecutive_good: u8,
}

impl QualityGovernor {
    pub fn new(initial: QualityTier, target_fps: f32) -> Self {
        println!("[quality] starting at tier {initial}");
        Self {
            current: initial,
            target: None,
            progress: 0.0,
            settings: QualitySettings::for_tier(initial),
            updates: Vec::new(),
            target_fps,
            consecutive_poor: 0,
            consecutive_good: 0,
        }
    }

    /// Pick the starting tier from a hardware profile
    pub fn from_profile(profile: &DeviceProfile, target_fps: f32) -> Self {
        Self::new(profile.initial_tier(), target_fps)
    }

    pub fn current(&self) -> QualityTier {
        self.current
    }

    pub fn target(&self) -> Option<QualityTier> {
        self.target
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Settings as of the last tick (interpolated mid-transition)
    pub fn settings(&self) -> QualitySettings {
        self.settings
    }

    /// Begin a transition. A no-op when the target equals the current tier
    /// and nothing is in flight.
    pub fn set_quality_level(&mut self, tier: QualityTier) {
        if tier == self.current && self.target.is_none() {
            return;
        }
        if self.target == Some(tier) {
            return;
        }
        println!("[quality] transition {} -> {tier}", self.current);
        self.target = Some(tier);
        self.progress = 0.0;
    }

    /// Parse-and-set. Unknown names log and leave state untouched.
    pub fn set_quality_by_name(&mut self, name: &str) -> Result<()> {
        match QualityTier::from_name(name) {
            Ok(tier) => {
                self.set_quality_level(tier);
                Ok(())
            }
            Err(err) => {
                eprintln!("[quality] ignoring unknown tier {name:?}");
                Err(err)
            }
        }
    }

    /// Advance a pending transition by one tick, queueing a settings push.
    /// Runs before dependent systems read settings in the frame order.
    pub fn tick(&mut self) {
        let Some(target) = self.target else {
            return;
        };
        self.progress += TRANSITION_SPEED;
        let from = QualitySettings::for_tier(self.current);
        let to = QualitySettings::for_tier(target);

        if self.progress >= 1.0 {
            self.settings = to;
            self.current = target;
            self.target = None;
            self.progress = 0.0;
            self.updates.push(QualityUpdate {
                tier: self.current,
                settings: self.settings,
                phase: UpdatePhase::Complete,
            });
            println!("[quality] now at tier {}", self.current);
        } else {
            self.settings = QualitySettings::interpolate(&from, &to, self.progress);
            self.updates.push(QualityUpdate {
                tier: target,
                settings: self.settings,
                phase: UpdatePhase::Intermediate,
            });
        }
    }

    /// Feed a multi-second performance reading: smoothed FPS plus the
    /// host-reported heap usage fraction in [0, 1]. Two consecutive poor
    /// readings step the tier down one rung, two consecutive good readings
    /// step it up; a single outlier resets the streak. Memory pressure
    /// above the limit makes a reading poor even at full frame rate.
    pub fn sample_performance(&mut self, fps: f32, memory_fraction: f32) {
        let pressured = memory_fraction > MEMORY_PRESSURE_LIMIT;
        let poor = fps < self.target_fps * 0.75 || pressured;
        let good = fps > self.target_fps * 0.95 && !pressured;

        if poor {
            self.consecutive_poor += 1;
            self.consecutive_good = 0;
        } else if good {
            self.consecutive_good += 1;
            self.consecutive_poor = 0;
        } else {
            self.consecutive_poor = 0;
            self.consecutive_good = 0;
        }

        if self.consecutive_poor >= CONSECUTIVE_SAMPLES {
            self.consecutive_poor = 0;
            let down = self.current.step_down();
            if down != self.current {
                println!(
                    "[quality] sustained poor readings ({fps:.1} fps, mem {memory_fraction:.2}); stepping down to {down}"
                );
                self.set_quality_level(down);
            }
        } else if self.consecutive_good >= CONSECUTIVE_SAMPLES {
            self.consecutive_good = 0;
            let up = self.current.step_up();
            if up != self.current {
                self.set_quality_level(up);
            }
        }
    }

    /// Drain queued settings pushes (consumed once per frame)
    pub fn drain_updates(&mut self) -> Vec<QualityUpdate> {
        std::mem::take(&mut self.updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn governor(tier: QualityTier) -> QualityGovernor {
        QualityGovernor::new(tier, 60.0)
    }

    #[test]
    fn transition_converges_exactly() {
        let mut g = governor(QualityTier::Low);
        g.set_quality_level(QualityTier::High);
        let mut ticks = 0;
        while g.target().is_some() {
            g.tick();
            ticks += 1;
            assert!(ticks < 100, "transition must terminate");
        }
        assert_eq!(g.current(), QualityTier::High);
        assert_eq!(g.target(), None);
        assert_eq!(g.settings(), QualitySettings::for_tier(QualityTier::High));

        let updates = g.drain_updates();
        let last = updates.last().unwrap();
        assert_eq!(last.phase, UpdatePhase::Complete);
        assert_eq!(last.settings, QualitySettings::for_tier(QualityTier::High));
        assert!(updates.len() >= 19, "0.05/tick yields ~20 pushes");
    }

    #[test]
    fn same_tier_is_a_no_op() {
        let mut g = governor(QualityTier::Medium);
        g.set_quality_level(QualityTier::Medium);
        assert_eq!(g.target(), None);
        g.tick();
        assert!(g.drain_updates().is_empty());
    }

    #[test]
    fn unknown_tier_name_preserves_state() {
        let mut g = governor(QualityTier::Medium);
        assert!(g.set_quality_by_name("extreme").is_err());
        assert_eq!(g.current(), QualityTier::Medium);
        assert_eq!(g.target(), None);
    }

    #[test]
    fn intermediate_updates_interpolate() {
        let mut g = governor(QualityTier::Minimal);
        g.set_quality_level(QualityTier::Ultra);
        g.tick();
        let updates = g.drain_updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].phase, UpdatePhase::Intermediate);
        let min = QualitySettings::for_tier(QualityTier::Minimal);
        let ultra = QualitySettings::for_tier(QualityTier::Ultra);
        let s = updates[0].settings;
        assert!(s.particle_multiplier > min.particle_multiplier);
        assert!(s.particle_multiplier < ultra.particle_multiplier);
    }

    #[test]
    fn two_consecutive_poor_readings_step_down_once() {
        let mut g = governor(QualityTier::High);
        g.sample_performance(20.0, 0.0);
        assert_eq!(g.target(), None, "one poor reading is not enough");
        g.sample_performance(20.0, 0.0);
        assert_eq!(g.target(), Some(QualityTier::Medium), "exactly one rung");
    }

    #[test]
    fn outlier_resets_the_streak() {
        let mut g = governor(QualityTier::High);
        g.sample_performance(20.0, 0.0);
        g.sample_performance(50.0, 0.0); // neither poor nor good
        g.sample_performance(20.0, 0.0);
        assert_eq!(g.target(), None);
    }

    #[test]
    fn sustained_good_performance_steps_up() {
        let mut g = governor(QualityTier::Low);
        g.sample_performance(60.0, 0.0);
        g.sample_performance(60.0, 0.0);
        assert_eq!(g.target(), Some(QualityTier::Medium));
    }

    #[test]
    fn memory_pressure_steps_down_despite_good_fps() {
        let mut g = governor(QualityTier::High);
        g.sample_performance(60.0, 0.95);
        assert_eq!(g.target(), None, "one pressured reading is not enough");
        g.sample_performance(60.0, 0.95);
        assert_eq!(g.target(), Some(QualityTier::Medium));
    }

    #[test]
    fn memory_pressure_resets_a_good_streak() {
        let mut g = governor(QualityTier::Low);
        g.sample_performance(60.0, 0.0);
        g.sample_performance(60.0, 0.95); // pressured: not a good reading
        g.sample_performance(60.0, 0.0);
        assert_eq!(g.target(), None, "streak restarted after the pressured sample");
        g.sample_performance(60.0, 0.0);
        assert_eq!(g.target(), Some(QualityTier::Medium));
    }

    #[test]
    fn stepping_saturates_at_the_ladder_ends() {
        let mut g = governor(QualityTier::Minimal);
        g.sample_performance(10.0, 0.0);
        g.sample_performance(10.0, 0.0);
        assert_eq!(g.target(), None, "already at the bottom");

        let mut g = governor(QualityTier::Ultra);
        g.sample_performance(120.0, 0.0);
        g.sample_performance(120.0, 0.0);
        assert_eq!(g.target(), None, "already at the top");
    }
}
