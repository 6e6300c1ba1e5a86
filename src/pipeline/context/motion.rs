use chrono::{DateTime, Utc};
use std::collections::VecDeque;

use crate::pipeline::domain::landmarks::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub captured_at: DateTime<Utc>,
}

/// Bounded FIFO of recent nose-tip positions, oldest first.
///
/// Shaking is judged purely on the horizontal spread of the window. A single
/// quick turn of the head spreads the samples just as well as a back and
/// forth shake does, so both are reported as shaking.
#[derive(Debug, Clone)]
pub struct MotionHistory {
    samples: VecDeque<MotionSample>,
    capacity: usize,
}

impl MotionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, point: Point, captured_at: DateTime<Utc>) {
        self.samples.push_back(MotionSample {
            x: point.x,
            y: point.y,
            captured_at,
        });
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// `max(x) - min(x)` over the window, `None` when empty.
    pub fn horizontal_range(&self) -> Option<f64> {
        let mut xs = self.samples.iter().map(|s| s.x);
        let first = xs.next()?;
        let (min, max) = xs.fold((first, first), |(min, max), x| (min.min(x), max.max(x)));
        Some(max - min)
    }

    pub fn is_shaking(&self, min_samples: usize, range_threshold: f64) -> bool {
        if self.samples.len() < min_samples {
            return false;
        }
        self.horizontal_range()
            .map(|range| range > range_threshold)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn samples(&self) -> impl Iterator<Item = &MotionSample> {
        self.samples.iter()
    }
}
