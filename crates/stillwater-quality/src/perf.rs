//! Rolling frame-rate sampler feeding the governor's adaptation loop

use std::collections::VecDeque;

pub struct FpsSampler {
    window: VecDeque<f32>,
    capacity: usize,
}

impl FpsSampler {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record one frame's duration in seconds. Non-positive durations
    /// (first frame, clock hiccups) are ignored.
    pub fn record_frame(&mut self, frame_seconds: f32) {
        if frame_seconds <= 0.0 {
            return;
        }
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(frame_seconds);
    }

    /// Average FPS over the window; None until at least one frame recorded
    pub fn fps(&self) -> Option<f32> {
        if self.window.is_empty() {
            return None;
        }
        let total: f32 = self.window.iter().sum();
        Some(self.window.len() as f32 / total)
    }

    pub fn sample_count(&self) -> usize {
        self.window.len()
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sampler_reports_none() {
        let sampler = FpsSampler::new(10);
        assert_eq!(sampler.fps(), None);
    }

    #[test]
    fn steady_frames_report_their_rate() {
        let mut sampler = FpsSampler::new(60);
        for _ in 0..60 {
            sampler.record_frame(1.0 / 60.0);
        }
        let fps = sampler.fps().unwrap();
        assert!((fps - 60.0).abs() < 0.5);
    }

    #[test]
    fn window_slides_past_old_frames() {
        let mut sampler = FpsSampler::new(10);
        for _ in 0..10 {
            sampler.record_frame(1.0 / 10.0); // slow frames
        }
        for _ in 0..10 {
            sampler.record_frame(1.0 / 60.0); // fully displace them
        }
        let fps = sampler.fps().unwrap();
        assert!((fps - 60.0).abs() < 0.5, "old slow frames must age out");
    }

    #[test]
    fn bad_durations_are_ignored() {
        let mut sampler = FpsSampler::new(10);
        sampler.record_frame(0.0);
        sampler.record_frame(-1.0);
        assert_eq!(sampler.sample_count(), 0);
    }
}
