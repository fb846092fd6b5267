use std::{any::Any, borrow::Cow, fmt, time::Duration};

use bevy_app::{App, Plugin};
use bevy_ecs::{component::Mutable, prelude::*};
use bevy_time::Time;

/// Easing function used by [`Tween`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EaseFunction {
    Linear,
    QuadraticInOut,
}

impl EaseFunction {
    #[must_use]
    pub fn sample(self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        match self {
            Self::Linear => x,
            Self::QuadraticInOut => {
                if x < 0.5 {
                    2.0 * x * x
                } else {
                    1.0 - ((-2.0 * x + 2.0).powi(2) / 2.0)
                }
            }
        }
    }
}

impl Default for EaseFunction {
    fn default() -> Self {
        Self::Linear
    }
}

/// Interpolation lens for tweening a component.
pub trait Lens<T>: Send + Sync + 'static {
    fn lerp(&mut self, target: &mut T, ratio: f32);
}

trait DynLens<T>: Send + Sync {
    fn lerp_dyn(&mut self, target: &mut T, ratio: f32);

    fn as_any(&self) -> &dyn Any;
}

impl<T, L> DynLens<T> for L
where
    L: Lens<T>,
{
    fn lerp_dyn(&mut self, target: &mut T, ratio: f32) {
        self.lerp(target, ratio);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Tween description for one component type.
///
/// A tween is placed on its parent [`TweenGroup`] timeline at `begin` and runs
/// for `duration`. Outside that window it leaves the target untouched.
pub struct Tween<T: Component> {
    pub ease: EaseFunction,
    pub begin: Duration,
    pub duration: Duration,
    lens: Box<dyn DynLens<T>>,
}

impl<T: Component> Tween<T> {
    #[must_use]
    pub fn new<L>(ease: EaseFunction, duration: Duration, lens: L) -> Self
    where
        L: Lens<T>,
    {
        Self {
            ease,
            begin: Duration::ZERO,
            duration,
            lens: Box::new(lens),
        }
    }

    /// Offset the tween's start on the group timeline.
    #[must_use]
    pub fn with_begin(mut self, begin: Duration) -> Self {
        self.begin = begin;
        self
    }

    /// Borrow the lens as its concrete type, if it is an `L`.
    #[must_use]
    pub fn lens<L: Lens<T>>(&self) -> Option<&L> {
        self.lens.as_any().downcast_ref::<L>()
    }

    /// Whether group-local time `time` falls inside `[begin, begin + duration)`.
    #[must_use]
    pub fn is_active_at(&self, time: Duration) -> bool {
        time >= self.begin && time < self.begin.saturating_add(self.duration)
    }

    fn apply_at(&mut self, target: &mut T, time: Duration) {
        if !self.is_active_at(time) {
            return;
        }

        let local = time - self.begin;
        let ratio = (local.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.lens.lerp_dyn(target, self.ease.sample(ratio));
    }
}

impl<T: Component> fmt::Debug for Tween<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("ease", &self.ease)
            .field("begin", &self.begin)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

/// How many times a [`TweenGroup`] cycle runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatCount {
    Finite(u32),
    Infinite,
}

impl Default for RepeatCount {
    fn default() -> Self {
        Self::Finite(1)
    }
}

/// Several tweens running concurrently on one shared timeline.
pub struct TweenGroup<T: Component> {
    tweens: Vec<Tween<T>>,
    duration: Duration,
    repeat: RepeatCount,
    remove_on_completion: bool,
}

impl<T: Component> TweenGroup<T> {
    /// Create an empty group whose cycle lasts `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            tweens: Vec::new(),
            duration,
            repeat: RepeatCount::default(),
            remove_on_completion: true,
        }
    }

    #[must_use]
    pub fn with_tween(mut self, tween: Tween<T>) -> Self {
        self.tweens.push(tween);
        self
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat: RepeatCount) -> Self {
        self.repeat = repeat;
        self
    }

    /// Keep the group attached (with no effect) once all cycles finished.
    #[must_use]
    pub fn with_remove_on_completion(mut self, remove: bool) -> Self {
        self.remove_on_completion = remove;
        self
    }

    #[must_use]
    pub fn tweens(&self) -> &[Tween<T>] {
        &self.tweens
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn repeat(&self) -> RepeatCount {
        self.repeat
    }

    #[must_use]
    pub fn remove_on_completion(&self) -> bool {
        self.remove_on_completion
    }

    /// Whether every cycle has played out after `elapsed`.
    #[must_use]
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        match self.repeat {
            RepeatCount::Infinite => false,
            RepeatCount::Finite(count) => {
                elapsed >= self.duration.saturating_mul(count)
            }
        }
    }

    /// Map total elapsed time onto the group's own cycle.
    ///
    /// Returns `None` for an empty cycle or once a finite group completed.
    #[must_use]
    pub fn local_time(&self, elapsed: Duration) -> Option<Duration> {
        if self.duration.is_zero() || self.is_complete(elapsed) {
            return None;
        }

        let cycle = self.duration.as_nanos();
        let local = elapsed.as_nanos() % cycle;
        Some(Duration::from_nanos(u64::try_from(local).unwrap_or(u64::MAX)))
    }

    fn apply(&mut self, target: &mut T, elapsed: Duration) {
        let Some(time) = self.local_time(elapsed) else {
            return;
        };

        for tween in &mut self.tweens {
            tween.apply_at(target, time);
        }
    }
}

impl<T: Component> fmt::Debug for TweenGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenGroup")
            .field("tweens", &self.tweens)
            .field("duration", &self.duration)
            .field("repeat", &self.repeat)
            .field("remove_on_completion", &self.remove_on_completion)
            .finish()
    }
}

struct KeyedGroup<T: Component> {
    key: Cow<'static, str>,
    group: TweenGroup<T>,
    elapsed: Duration,
}

/// Runtime animator component that drives keyed [`TweenGroup`]s for a component type.
///
/// Groups are attached under a string key; adding under a key already in use
/// replaces the previous group.
#[derive(Component)]
pub struct Animator<T: Component> {
    groups: Vec<KeyedGroup<T>>,
    paused: bool,
}

impl<T: Component> Default for Animator<T> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            paused: false,
        }
    }
}

impl<T: Component> Animator<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<Cow<'static, str>>, group: TweenGroup<T>) {
        let key = key.into();
        self.groups.retain(|entry| entry.key != key);
        self.groups.push(KeyedGroup {
            key,
            group,
            elapsed: Duration::ZERO,
        });
    }

    /// Detach the group under `key`. Returns `false` when nothing was attached.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|entry| entry.key != key);
        self.groups.len() != before
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TweenGroup<T>> {
        self.entry(key).map(|entry| &entry.group)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    /// Time the group under `key` has been running, across all its cycles.
    #[must_use]
    pub fn elapsed(&self, key: &str) -> Option<Duration> {
        self.entry(key).map(|entry| entry.elapsed)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|entry| entry.key.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn entry(&self, key: &str) -> Option<&KeyedGroup<T>> {
        self.groups.iter().find(|entry| entry.key == key)
    }

    /// Advance every attached group by `delta` and apply it to `target`.
    ///
    /// While paused, groups keep their position and are still applied.
    pub fn tick(&mut self, target: &mut T, delta: Duration) {
        if !self.paused {
            for entry in &mut self.groups {
                entry.elapsed = entry.elapsed.saturating_add(delta);
            }
        }

        self.groups.retain(|entry| {
            !(entry.group.remove_on_completion() && entry.group.is_complete(entry.elapsed))
        });

        for entry in &mut self.groups {
            entry.group.apply(target, entry.elapsed);
        }
    }
}

impl<T: Component> fmt::Debug for Animator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .field("paused", &self.paused)
            .finish()
    }
}

/// Lightweight plugin marker for tweening support.
///
/// The crate keeps stepping explicit via [`step_animators`] so integrators can
/// place animation updates exactly where they need in schedule ordering.
#[derive(Default)]
pub struct TweeningPlugin;

impl Plugin for TweeningPlugin {
    fn build(&self, _app: &mut App) {}
}

/// Advance all [`Animator<T>`] components for one frame using Bevy `Time`.
pub fn step_animators<T: Component<Mutability = Mutable>>(world: &mut World) {
    let delta = world.resource::<Time>().delta();

    let mut query = world.query::<(&mut Animator<T>, &mut T)>();
    for (mut animator, mut target) in query.iter_mut(world) {
        animator.tick(&mut *target, delta);
    }
}
