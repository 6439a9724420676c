//! Impulse delivery spread over time
//!
//! An acceleration applied over a time period is not integrated continuously.
//! It is cut into `num_samples` equal velocity increments, and one increment
//! comes due every `time_period / num_samples` milliseconds. The k-th
//! increment is due `k * interval` after scheduling, so the last one lands at
//! the end of the period and the schedule then ends on its own.
//!
//! Schedules are plain values advanced by an [`ImpulseScheduler`]. Several
//! schedules may be live at once; they do not coordinate and all feed the same
//! body velocity.

use crate::body::Body;
use crate::error::{require_positive, PhysicsError};
use bounce_math::Vec2;
use slotmap::{new_key_type, SlotMap};

/// Number of samples used when the caller does not pick one
pub const DEFAULT_NUM_SAMPLES: u32 = 100;

/// Fraction of an interval tolerated as clock rounding error
const DUE_TOLERANCE: f32 = 1e-3;

new_key_type! {
    /// Handle to a running impulse schedule
    ///
    /// Keys are generational: once a schedule finishes or is cancelled its key
    /// stays dead even if the slot is reused by a later schedule.
    pub struct ImpulseKey;
}

/// A finite run of equal velocity increments delivered at a fixed cadence
#[derive(Clone, Debug, PartialEq)]
pub struct ImpulseSchedule {
    increment: Vec2,
    interval_ms: f32,
    total: u32,
    delivered: u32,
    elapsed_ms: f32,
}

impl ImpulseSchedule {
    /// Split `acceleration` into `num_samples` increments over `time_period_ms`
    pub fn new(acceleration: Vec2, time_period_ms: f32, num_samples: u32) -> Result<Self, PhysicsError> {
        let time_period_ms = require_positive("time_period_ms", time_period_ms)?;
        if num_samples == 0 {
            return Err(PhysicsError::invalid("num_samples", "at least 1", num_samples));
        }

        Ok(Self {
            increment: acceleration / num_samples as f32,
            interval_ms: time_period_ms / num_samples as f32,
            total: num_samples,
            delivered: 0,
            elapsed_ms: 0.0,
        })
    }

    /// Velocity change carried by each sample
    pub fn increment(&self) -> Vec2 {
        self.increment
    }

    /// Milliseconds between two samples
    pub fn interval_ms(&self) -> f32 {
        self.interval_ms
    }

    /// Samples not yet delivered
    pub fn remaining(&self) -> u32 {
        self.total - self.delivered
    }

    pub fn is_finished(&self) -> bool {
        self.delivered >= self.total
    }

    /// Move the schedule clock forward and return how many samples came due
    ///
    /// The caller is responsible for applying [`increment`](Self::increment)
    /// once per returned sample. Never returns more than
    /// [`remaining`](Self::remaining).
    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        if self.is_finished() {
            return 0;
        }
        if elapsed_ms > 0.0 {
            self.elapsed_ms += elapsed_ms;
        }

        let due_total = (self.elapsed_ms / self.interval_ms + DUE_TOLERANCE).floor();
        // `as` saturates, so absurd clock jumps still cap at the total
        let due_total = (due_total as u32).min(self.total);
        let due = due_total.saturating_sub(self.delivered);
        self.delivered += due;
        due
    }
}

/// Remaining increments, ignoring the clock
///
/// Draining the iterator delivers the rest of the schedule immediately.
impl Iterator for ImpulseSchedule {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.is_finished() {
            None
        } else {
            self.delivered += 1;
            Some(self.increment)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ImpulseSchedule {}

/// Owns the live impulse schedules and delivers their samples
#[derive(Debug, Default)]
pub struct ImpulseScheduler {
    schedules: SlotMap<ImpulseKey, ImpulseSchedule>,
}

impl ImpulseScheduler {
    pub fn new() -> Self {
        Self {
            schedules: SlotMap::with_key(),
        }
    }

    /// Start running a schedule and return its key
    pub fn schedule(&mut self, schedule: ImpulseSchedule) -> ImpulseKey {
        let key = self.schedules.insert(schedule);
        log::debug!("Scheduled impulse {:?} ({} active)", key, self.schedules.len());
        key
    }

    /// Stop a schedule before it finishes
    ///
    /// Returns `false` if the key already finished or was cancelled.
    pub fn cancel(&mut self, key: ImpulseKey) -> bool {
        let cancelled = self.schedules.remove(key);
        if let Some(schedule) = &cancelled {
            log::debug!(
                "Cancelled impulse {:?} with {} samples left",
                key,
                schedule.remaining()
            );
        }
        cancelled.is_some()
    }

    /// Stop every schedule
    pub fn cancel_all(&mut self) {
        self.schedules.clear();
    }

    pub fn is_active(&self, key: ImpulseKey) -> bool {
        self.schedules.contains_key(key)
    }

    pub fn get(&self, key: ImpulseKey) -> Option<&ImpulseSchedule> {
        self.schedules.get(key)
    }

    /// Number of schedules still delivering
    pub fn active_count(&self) -> usize {
        self.schedules.len()
    }

    /// Advance every schedule by `elapsed_ms`, feeding due samples into `body`
    ///
    /// Finished schedules are dropped. Returns the number of samples delivered.
    pub fn advance(&mut self, body: &mut Body, elapsed_ms: f32) -> u32 {
        let mut delivered = 0;
        for (key, schedule) in &mut self.schedules {
            let due = schedule.advance(elapsed_ms);
            for _ in 0..due {
                body.add_velocity(schedule.increment());
            }
            if due > 0 {
                log::trace!("Impulse {:?} delivered {} samples", key, due);
            }
            delivered += due;
        }
        self.schedules.retain(|_, schedule| !schedule.is_finished());
        delivered
    }
}

/// Apply an acceleration to `body`, either at once or spread over time
///
/// With `time_period_ms == 0.0` the whole acceleration is added to the
/// velocity immediately, `num_samples` is ignored and `None` is returned.
/// Otherwise a schedule is handed to `scheduler` and its key returned.
pub fn apply_acceleration(
    body: &mut Body,
    scheduler: &mut ImpulseScheduler,
    acceleration: Vec2,
    time_period_ms: f32,
    num_samples: u32,
) -> Result<Option<ImpulseKey>, PhysicsError> {
    if time_period_ms == 0.0 {
        body.add_velocity(acceleration);
        return Ok(None);
    }

    let schedule = ImpulseSchedule::new(acceleration, time_period_ms, num_samples)?;
    Ok(Some(scheduler.schedule(schedule)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_instant_acceleration() {
        let mut body = Body::default().with_velocity(Vec2::new(1.0, 1.0));
        let mut scheduler = ImpulseScheduler::new();

        let key = apply_acceleration(&mut body, &mut scheduler, Vec2::new(2.0, -3.0), 0.0, 7).unwrap();

        assert!(key.is_none());
        assert_eq!(body.velocity(), Vec2::new(3.0, -2.0));
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_instant_ignores_zero_samples() {
        let mut body = Body::default();
        let mut scheduler = ImpulseScheduler::new();

        apply_acceleration(&mut body, &mut scheduler, Vec2::new(0.0, 9.81), 0.0, 0).unwrap();

        assert_eq!(body.velocity(), Vec2::new(0.0, 9.81));
    }

    #[test]
    fn test_spread_acceleration_rejects_bad_parameters() {
        let mut body = Body::default();
        let mut scheduler = ImpulseScheduler::new();

        assert!(matches!(
            apply_acceleration(&mut body, &mut scheduler, Vec2::Y, 100.0, 0),
            Err(PhysicsError::InvalidParameter { name: "num_samples", .. })
        ));
        assert!(matches!(
            apply_acceleration(&mut body, &mut scheduler, Vec2::Y, -5.0, 10),
            Err(PhysicsError::InvalidParameter { name: "time_period_ms", .. })
        ));
        assert!(apply_acceleration(&mut body, &mut scheduler, Vec2::Y, f32::NAN, 10).is_err());
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_schedule_partition() {
        let schedule = ImpulseSchedule::new(Vec2::new(10.0, 20.0), 1000.0, 4).unwrap();
        assert_eq!(schedule.increment(), Vec2::new(2.5, 5.0));
        assert_eq!(schedule.interval_ms(), 250.0);
        assert_eq!(schedule.remaining(), 4);
    }

    #[test]
    fn test_schedule_fires_at_fixed_cadence() {
        let mut schedule = ImpulseSchedule::new(Vec2::Y, 1000.0, 4).unwrap();

        assert_eq!(schedule.advance(100.0), 0);
        assert_eq!(schedule.advance(150.0), 1); // t = 250
        assert_eq!(schedule.advance(500.0), 2); // t = 750
        assert_eq!(schedule.advance(1000.0), 1); // capped at the total
        assert!(schedule.is_finished());
        assert_eq!(schedule.advance(1000.0), 0);
    }

    #[test]
    fn test_schedule_ignores_negative_time() {
        let mut schedule = ImpulseSchedule::new(Vec2::Y, 100.0, 2).unwrap();
        assert_eq!(schedule.advance(-500.0), 0);
        assert_eq!(schedule.remaining(), 2);
    }

    #[test]
    fn test_schedule_as_iterator_yields_exactly_n() {
        let schedule = ImpulseSchedule::new(Vec2::new(3.0, 6.0), 300.0, 3).unwrap();
        assert_eq!(schedule.len(), 3);

        let increments: Vec<Vec2> = schedule.collect();
        assert_eq!(increments, vec![Vec2::new(1.0, 2.0); 3]);
    }

    #[test]
    fn test_spread_acceleration_sums_to_total() {
        let mut body = Body::default();
        let mut scheduler = ImpulseScheduler::new();
        let accel = Vec2::new(1.5, 9.81);

        let key = apply_acceleration(&mut body, &mut scheduler, accel, 1000.0, 60)
            .unwrap()
            .expect("spread acceleration should be scheduled");

        // Nothing is delivered up front
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert!(scheduler.is_active(key));

        // 60 fps frames for a little over one second
        let mut delivered = 0;
        for _ in 0..62 {
            delivered += scheduler.advance(&mut body, 1000.0 / 60.0);
        }

        assert_eq!(delivered, 60);
        assert!(approx_eq(body.velocity(), accel));
        assert!(!scheduler.is_active(key));
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_default_sample_count_reconstructs_vector() {
        let mut body = Body::default();
        let mut scheduler = ImpulseScheduler::new();
        let accel = Vec2::new(-4.0, 2.0);

        apply_acceleration(&mut body, &mut scheduler, accel, 500.0, DEFAULT_NUM_SAMPLES).unwrap();
        let delivered = scheduler.advance(&mut body, 500.0);

        assert_eq!(delivered, DEFAULT_NUM_SAMPLES);
        assert!(approx_eq(body.velocity(), accel));
    }

    #[test]
    fn test_overlapping_schedules_both_apply() {
        let mut body = Body::default();
        let mut scheduler = ImpulseScheduler::new();

        let a = apply_acceleration(&mut body, &mut scheduler, Vec2::new(0.0, 10.0), 100.0, 10).unwrap();
        let b = apply_acceleration(&mut body, &mut scheduler, Vec2::new(5.0, 0.0), 200.0, 4).unwrap();
        assert_ne!(a, b);
        assert_eq!(scheduler.active_count(), 2);

        scheduler.advance(&mut body, 100.0);
        // First finished, second halfway
        assert!(approx_eq(body.velocity(), Vec2::new(2.5, 10.0)));
        assert_eq!(scheduler.active_count(), 1);

        scheduler.advance(&mut body, 100.0);
        assert!(approx_eq(body.velocity(), Vec2::new(5.0, 10.0)));
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_cancel_stops_delivery() {
        let mut body = Body::default();
        let mut scheduler = ImpulseScheduler::new();

        let key = apply_acceleration(&mut body, &mut scheduler, Vec2::new(0.0, 8.0), 100.0, 4)
            .unwrap()
            .unwrap();
        scheduler.advance(&mut body, 50.0);
        assert!(approx_eq(body.velocity(), Vec2::new(0.0, 4.0)));

        assert!(scheduler.cancel(key));
        scheduler.advance(&mut body, 100.0);
        assert!(approx_eq(body.velocity(), Vec2::new(0.0, 4.0)));

        // Second cancel is a no-op
        assert!(!scheduler.cancel(key));
    }

    #[test]
    fn test_finished_key_stays_dead() {
        let mut body = Body::default();
        let mut scheduler = ImpulseScheduler::new();

        let old = apply_acceleration(&mut body, &mut scheduler, Vec2::X, 10.0, 1).unwrap().unwrap();
        scheduler.advance(&mut body, 10.0);
        assert!(!scheduler.is_active(old));

        let new = apply_acceleration(&mut body, &mut scheduler, Vec2::X, 10.0, 1).unwrap().unwrap();
        assert!(scheduler.get(old).is_none());
        assert!(scheduler.get(new).is_some());
        assert!(!scheduler.cancel(old));
    }

    #[test]
    fn test_cancel_all() {
        let mut body = Body::default();
        let mut scheduler = ImpulseScheduler::new();
        apply_acceleration(&mut body, &mut scheduler, Vec2::X, 10.0, 1).unwrap();
        apply_acceleration(&mut body, &mut scheduler, Vec2::Y, 10.0, 1).unwrap();

        scheduler.cancel_all();

        assert_eq!(scheduler.active_count(), 0);
        assert_eq!(scheduler.advance(&mut body, 100.0), 0);
        assert_eq!(body.velocity(), Vec2::ZERO);
    }
}
