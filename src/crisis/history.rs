// src/crisis/history.rs
//! Bounded in-memory record of recent assessments

use std::collections::VecDeque;

use super::CrisisAssessment;
use crate::consts::{
    DEFAULT_HISTORY_CAPACITY, DETERIORATION_CRITICAL_THRESHOLD, DETERIORATION_HIGH_THRESHOLD,
    DETERIORATION_WINDOW,
};
use crate::enums::CrisisLevel;

#[derive(Debug, Clone)]
pub struct DetectionHistory {
    entries: VecDeque<CrisisAssessment>,
    capacity: usize,
}

impl DetectionHistory {
    /// Capacity never drops below the deterioration window.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(DETERIORATION_WINDOW);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, assessment: CrisisAssessment) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(assessment);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &CrisisAssessment> {
        self.entries.iter()
    }

    fn recent_count(&self, level: CrisisLevel) -> usize {
        self.entries
            .iter()
            .rev()
            .take(DETERIORATION_WINDOW)
            .filter(|a| a.level == level)
            .count()
    }

    /// ≥2 CRITICAL or ≥3 HIGH among the last five assessments
    pub fn shows_deterioration(&self) -> bool {
        self.recent_count(CrisisLevel::Critical) >= DETERIORATION_CRITICAL_THRESHOLD
            || self.recent_count(CrisisLevel::High) >= DETERIORATION_HIGH_THRESHOLD
    }
}

impl Default for DetectionHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}
