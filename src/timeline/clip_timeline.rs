use crate::foundation::error::{KinetypeError, KinetypeResult};

/// One scheduled clip interval.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Global slot index; `-1` is the pre-roll.
    pub index: i64,
    /// Absolute start time in seconds.
    pub start_time: f64,
    /// Length in seconds.
    pub duration: f64,
}

impl Slot {
    /// Absolute end time.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}

/// Construction parameters for [`ClipTimeline`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipTimelineParams {
    /// Pre-roll before slot 0.
    pub initial_delay: f64,
    /// Number of fixed-length warm-up slots.
    pub initial_clips: u32,
    /// Length of each warm-up slot.
    pub initial_clip_duration: f64,
    /// One duration per text line, repeated forever after the warm-up.
    pub loop_durations: Vec<f64>,
}

/// Maps animation time to clip slots across a warm-up phase and an endlessly repeating loop.
///
/// Slot indices never wrap; only the duration lookup does. Slot `-1` covers `[0, initial_delay)`
/// and is never reported by [`ClipTimeline::sample`].
#[derive(Clone, Debug, PartialEq)]
pub struct ClipTimeline {
    initial_delay: f64,
    initial_clips: i64,
    initial_clip_duration: f64,
    loop_durations: Vec<f64>,
    loop_delays: Vec<f64>,
    total_loop_duration: f64,
}

impl ClipTimeline {
    /// Validate `params` and precompute loop prefix sums.
    #[tracing::instrument(skip(params), fields(loop_len = params.loop_durations.len()))]
    pub fn new(params: ClipTimelineParams) -> KinetypeResult<Self> {
        let ClipTimelineParams {
            initial_delay,
            initial_clips,
            initial_clip_duration,
            loop_durations,
        } = params;

        if !initial_delay.is_finite() || initial_delay < 0.0 {
            return Err(KinetypeError::timeline(
                "initial_delay must be finite and >= 0",
            ));
        }
        if initial_clips > 0 && (!initial_clip_duration.is_finite() || initial_clip_duration <= 0.0)
        {
            return Err(KinetypeError::timeline(
                "initial_clip_duration must be finite and > 0 when initial_clips > 0",
            ));
        }
        if loop_durations.is_empty() {
            return Err(KinetypeError::timeline("loop_durations must be non-empty"));
        }
        if let Some(i) = loop_durations
            .iter()
            .position(|d| !d.is_finite() || *d < 0.0)
        {
            return Err(KinetypeError::timeline(format!(
                "loop_durations[{i}] must be finite and >= 0"
            )));
        }

        let mut loop_delays = Vec::with_capacity(loop_durations.len());
        let mut acc = 0.0;
        for d in &loop_durations {
            loop_delays.push(acc);
            acc += d;
        }
        if acc <= 0.0 {
            return Err(KinetypeError::timeline(
                "total loop duration must be > 0",
            ));
        }

        let timeline = Self {
            initial_delay,
            initial_clips: i64::from(initial_clips),
            initial_clip_duration,
            loop_durations,
            loop_delays,
            total_loop_duration: acc,
        };
        tracing::debug!(
            initial_delay,
            initial_clips,
            initial_clip_duration,
            total_loop_duration = acc,
            "clip timeline built"
        );
        Ok(timeline)
    }

    /// Pre-roll length.
    pub fn initial_delay(&self) -> f64 {
        self.initial_delay
    }

    /// Number of warm-up slots.
    pub fn initial_clips(&self) -> i64 {
        self.initial_clips
    }

    /// Length of each warm-up slot.
    pub fn initial_clip_duration(&self) -> f64 {
        self.initial_clip_duration
    }

    /// Repeating slot durations.
    pub fn loop_durations(&self) -> &[f64] {
        &self.loop_durations
    }

    /// Length of one loop iteration.
    pub fn total_loop_duration(&self) -> f64 {
        self.total_loop_duration
    }

    fn loop_len(&self) -> i64 {
        self.loop_durations.len() as i64
    }

    fn loop_origin(&self) -> f64 {
        self.initial_delay + self.initial_clips as f64 * self.initial_clip_duration
    }

    /// Position of `index` within the loop, or `None` for pre-roll and warm-up slots.
    pub fn loop_position(&self, index: i64) -> Option<usize> {
        (index >= self.initial_clips)
            .then(|| (index - self.initial_clips).rem_euclid(self.loop_len()) as usize)
    }

    /// Length of slot `index`. Indices below `-1` are treated as the pre-roll.
    pub fn duration_of(&self, index: i64) -> f64 {
        if index < 0 {
            return self.initial_delay;
        }
        match self.loop_position(index) {
            Some(pos) => self.loop_durations[pos],
            None => self.initial_clip_duration,
        }
    }

    /// Absolute start time of slot `index`, in constant time.
    pub fn start_time_of(&self, index: i64) -> f64 {
        if index < 0 {
            return 0.0;
        }
        if index < self.initial_clips {
            return self.initial_delay + index as f64 * self.initial_clip_duration;
        }
        let k = index - self.initial_clips;
        let loops = k.div_euclid(self.loop_len());
        let pos = k.rem_euclid(self.loop_len()) as usize;
        self.loop_origin() + loops as f64 * self.total_loop_duration + self.loop_delays[pos]
    }

    /// Slot `index` with its timing.
    pub fn slot(&self, index: i64) -> Slot {
        Slot {
            index,
            start_time: self.start_time_of(index),
            duration: self.duration_of(index),
        }
    }

    /// Slot playing at `time`: the latest slot whose start is at or before `time`.
    ///
    /// Zero-length slots resolve to the slot after them. Times before the first slot (and NaN)
    /// map to `-1`; `+inf` maps to `i64::MAX`.
    pub fn index_at_time(&self, time: f64) -> i64 {
        if !(time >= self.initial_delay) {
            return -1;
        }
        if time == f64::INFINITY {
            return i64::MAX;
        }

        let origin = self.loop_origin();
        let mut idx = if time < origin {
            (((time - self.initial_delay) / self.initial_clip_duration).floor() as i64)
                .clamp(0, self.initial_clips - 1)
        } else {
            let in_loops = time - origin;
            let loops = (in_loops / self.total_loop_duration).floor();
            let in_loop = in_loops - loops * self.total_loop_duration;
            let pos = self
                .loop_delays
                .partition_point(|d| *d <= in_loop)
                .saturating_sub(1) as i64;
            (loops as i64)
                .saturating_mul(self.loop_len())
                .saturating_add(self.initial_clips)
                .saturating_add(pos)
        };

        // Absorb rounding in the closed form.
        while let Some(next) = idx.checked_add(1)
            && self.start_time_of(next) <= time
        {
            idx = next;
        }
        while idx >= 0 && self.start_time_of(idx) > time {
            idx -= 1;
        }
        idx
    }

    /// Every slot (never the pre-roll) starting within `[from, to)`, in index order.
    ///
    /// Windows may span any number of loop iterations. An empty or non-finite window yields
    /// nothing.
    pub fn sample(&self, from: f64, to: f64) -> Vec<Slot> {
        if from.is_nan() || !to.is_finite() || to <= from {
            return Vec::new();
        }

        let mut first = self.index_at_time(from).max(0);
        if self.start_time_of(first) < from {
            first = first.saturating_add(1);
        }
        while first > 0 && self.start_time_of(first - 1) >= from {
            first -= 1;
        }

        (first..)
            .map(|i| self.slot(i))
            .take_while(|s| s.start_time < to)
            .collect()
    }

    /// The slot in progress at `from` (unless it is the pre-roll) followed by
    /// [`ClipTimeline::sample`]`(from, to)`.
    pub fn overlapping(&self, from: f64, to: f64) -> Vec<Slot> {
        let current = self.index_at_time(from);
        let mut slots = Vec::new();
        if current >= 0 && current != i64::MAX && self.start_time_of(current) < from {
            slots.push(self.slot(current));
        }
        slots.extend(self.sample(from, to));
        slots
    }

    /// Absolute time at which loop iteration `iteration` begins.
    pub fn loop_start_time(&self, iteration: i64) -> f64 {
        self.loop_origin() + iteration as f64 * self.total_loop_duration
    }

    /// Loop iteration in progress at `time`, or `None` before the loop phase.
    pub fn loop_iteration_at(&self, time: f64) -> Option<i64> {
        let origin = self.loop_origin();
        (time >= origin).then(|| ((time - origin) / self.total_loop_duration).floor() as i64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clip_timeline.rs"]
mod tests;
