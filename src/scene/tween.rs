/// Fire-and-forget interpolation toward the latest target value.
///
/// Retargeting always supersedes the in-flight run (last-writer-wins, no
/// queued backlog); the `generation` stamp records which write issued the
/// current target so tests can observe that stale animation work was
/// abandoned. A zero duration applies the target immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    start: f64,
    target: f64,
    duration_ms: f64,
    elapsed_ms: f64,
    generation: u64,
}

impl Tween {
    #[must_use]
    pub fn settled(value: f64) -> Self {
        Self {
            start: value,
            target: value,
            duration_ms: 0.0,
            elapsed_ms: 0.0,
            generation: 0,
        }
    }

    /// Points the tween at a new target, starting from the current sampled
    /// value. Supersedes any run still in flight.
    pub fn retarget(&mut self, target: f64, duration_ms: f64, generation: u64) {
        let current = self.value();
        self.generation = generation;
        if duration_ms <= 0.0 {
            self.start = target;
            self.target = target;
            self.duration_ms = 0.0;
            self.elapsed_ms = 0.0;
        } else {
            self.start = current;
            self.target = target;
            self.duration_ms = duration_ms;
            self.elapsed_ms = 0.0;
        }
    }

    pub fn advance(&mut self, delta_ms: f64) {
        if !self.is_settled() {
            self.elapsed_ms = (self.elapsed_ms + delta_ms.max(0.0)).min(self.duration_ms);
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_settled() {
            return self.target;
        }
        let progress = (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        self.start + (self.target - self.start) * progress
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.duration_ms <= 0.0 || self.elapsed_ms >= self.duration_ms
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Pointwise polyline interpolation with the same superseding rules as
/// [`Tween`].
///
/// Paths with differing vertex counts snap to the new target immediately;
/// interpolating between unequal vertex lists has no meaningful
/// correspondence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathTween {
    start: Vec<(f64, f64)>,
    target: Vec<(f64, f64)>,
    duration_ms: f64,
    elapsed_ms: f64,
    generation: u64,
}

impl PathTween {
    #[must_use]
    pub fn settled(points: Vec<(f64, f64)>) -> Self {
        Self {
            start: points.clone(),
            target: points,
            duration_ms: 0.0,
            elapsed_ms: 0.0,
            generation: 0,
        }
    }

    pub fn retarget(&mut self, target: Vec<(f64, f64)>, duration_ms: f64, generation: u64) {
        let current = self.points();
        self.generation = generation;
        if duration_ms <= 0.0 || current.len() != target.len() {
            self.start = target.clone();
            self.target = target;
            self.duration_ms = 0.0;
            self.elapsed_ms = 0.0;
        } else {
            self.start = current;
            self.target = target;
            self.duration_ms = duration_ms;
            self.elapsed_ms = 0.0;
        }
    }

    pub fn advance(&mut self, delta_ms: f64) {
        if !self.is_settled() {
            self.elapsed_ms = (self.elapsed_ms + delta_ms.max(0.0)).min(self.duration_ms);
        }
    }

    /// The path at the current animation progress.
    #[must_use]
    pub fn points(&self) -> Vec<(f64, f64)> {
        if self.is_settled() {
            return self.target.clone();
        }
        let progress = (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        self.start
            .iter()
            .zip(&self.target)
            .map(|(from, to)| {
                (
                    from.0 + (to.0 - from.0) * progress,
                    from.1 + (to.1 - from.1) * progress,
                )
            })
            .collect()
    }

    #[must_use]
    pub fn target(&self) -> &[(f64, f64)] {
        &self.target
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.duration_ms <= 0.0 || self.elapsed_ms >= self.duration_ms
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
