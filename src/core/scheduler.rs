//! Cooperative, frame-stepped task scheduler.
//!
//! Holds wait timers, tweens and repeating interval tasks. Nothing here calls
//! back into game code: continuations are plain values (`E`) handed back from
//! [`Scheduler::update`] in the order they fired, and tweens write through a
//! [`Tweenable`] target keyed by `K`. The caller dispatches the returned values
//! after the pass, so anything scheduled by a continuation starts counting on
//! the next update.

/// Slack for accumulated float error when comparing an interval phase.
const PHASE_EPSILON: f64 = 1e-9;

/// Identifies a scheduled task so its owner can cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Anything whose numeric properties can be interpolated.
///
/// `K` names one property on one object (e.g. "x of the opponent's sprite").
pub trait Tweenable<K> {
    fn get(&self, key: K) -> f64;
    fn set(&mut self, key: K, value: f64);
}

/// A continuation or interval action that fired during an update.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<E> {
    pub handle: TaskHandle,
    pub event: E,
}

#[derive(Debug, Clone)]
struct TweenProp<K> {
    key: K,
    start: f64,
    end: f64,
}

#[derive(Debug, Clone)]
enum TaskKind<E, K> {
    Wait,
    Tween(Vec<TweenProp<K>>),
    Interval {
        action: E,
        interval: f64,
        /// Time accumulated since the last action fired.
        phase: f64,
    },
}

#[derive(Debug, Clone)]
struct Task<E, K> {
    handle: TaskHandle,
    elapsed: f64,
    duration: f64,
    kind: TaskKind<E, K>,
    on_complete: Option<E>,
}

#[derive(Debug, Clone)]
pub struct Scheduler<E, K> {
    tasks: Vec<Task<E, K>>,
    next_handle: u64,
    /// Tasks cleared since the last update started
    cancelled: Vec<TaskHandle>,
}

impl<E, K> Default for Scheduler<E, K> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_handle: 1,
            cancelled: Vec::new(),
        }
    }
}

impl<E: Clone, K: Copy> Scheduler<E, K> {
    pub fn new() -> Self {
        Self::default()
    }

    fn schedule(&mut self, duration: f64, kind: TaskKind<E, K>, on_complete: Option<E>) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.tasks.push(Task {
            handle,
            elapsed: 0.0,
            duration,
            kind,
            on_complete,
        });
        handle
    }

    /// Fires `on_complete` once after `duration` seconds.
    pub fn wait(&mut self, duration: f64, on_complete: E) -> TaskHandle {
        self.schedule(duration, TaskKind::Wait, Some(on_complete))
    }

    /// Interpolates each `(key, end)` pair from its current value to `end`.
    ///
    /// Start values are captured now. On completion every property is set to
    /// exactly its end value before the continuation fires.
    pub fn tween<T>(
        &mut self,
        target: &T,
        props: &[(K, f64)],
        duration: f64,
        on_complete: Option<E>,
    ) -> TaskHandle
    where
        T: Tweenable<K> + ?Sized,
    {
        let props = props
            .iter()
            .map(|&(key, end)| TweenProp {
                key,
                start: target.get(key),
                end,
            })
            .collect();
        self.schedule(duration, TaskKind::Tween(props), on_complete)
    }

    /// Fires `action` once per `interval` of elapsed time until `duration`
    /// has passed, then fires `on_complete`.
    ///
    /// Firing is fixed-step: a long frame fires the action as many times as
    /// intervals it covered. A non-positive interval never fires the action.
    pub fn add_task(
        &mut self,
        action: E,
        interval: f64,
        duration: f64,
        on_complete: Option<E>,
    ) -> TaskHandle {
        self.schedule(
            duration,
            TaskKind::Interval {
                action,
                interval,
                phase: 0.0,
            },
            on_complete,
        )
    }

    /// Cancels a task without firing its continuation.
    /// Returns false if the task already finished or was never scheduled.
    pub fn clear(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.handle != handle);
        let removed = self.tasks.len() != before;
        if removed {
            tracing::debug!(?handle, "cleared scheduled task");
        }
        self.cancelled.push(handle);
        removed
    }

    /// True if `handle` was cleared after the latest update began. Lets the
    /// caller drop values from that update whose owner has since cancelled.
    pub fn was_cancelled(&self, handle: TaskHandle) -> bool {
        self.cancelled.contains(&handle)
    }

    /// Cancels every pending task.
    pub fn clear_all(&mut self) {
        self.cancelled.extend(self.tasks.iter().map(|task| task.handle));
        self.tasks.clear();
    }

    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|task| task.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advances every task by `dt` seconds.
    ///
    /// Returns fired interval actions and continuations in firing order. A task
    /// with a non-positive duration completes on the first update after it
    /// was scheduled.
    pub fn update<T>(&mut self, dt: f64, target: &mut T) -> Vec<Fired<E>>
    where
        T: Tweenable<K> + ?Sized,
    {
        let dt = dt.max(0.0);
        self.cancelled.clear();
        let mut fired = Vec::new();
        let mut index = 0;

        while index < self.tasks.len() {
            let task = &mut self.tasks[index];
            let handle = task.handle;
            let duration = task.duration;
            let before = task.elapsed;
            task.elapsed += dt;
            let elapsed = task.elapsed;
            let done = elapsed >= duration;

            match &mut task.kind {
                TaskKind::Wait => {}
                TaskKind::Tween(props) => {
                    let progress = if duration > 0.0 {
                        (elapsed / duration).min(1.0)
                    } else {
                        1.0
                    };
                    for prop in props.iter() {
                        let value = if done {
                            prop.end
                        } else {
                            prop.start + (prop.end - prop.start) * progress
                        };
                        target.set(prop.key, value);
                    }
                }
                TaskKind::Interval {
                    action,
                    interval,
                    phase,
                } => {
                    if *interval > 0.0 {
                        // Only time inside the task's lifetime counts towards firing.
                        let span = elapsed.min(duration) - before.min(duration);
                        *phase += span.max(0.0);
                        while *phase + PHASE_EPSILON >= *interval {
                            *phase -= *interval;
                            fired.push(Fired {
                                handle,
                                event: action.clone(),
                            });
                        }
                    }
                }
            }

            if done {
                let task = self.tasks.remove(index);
                if let Some(event) = task.on_complete {
                    fired.push(Fired { handle, event });
                }
            } else {
                index += 1;
            }
        }

        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Sprite {
        x: f64,
        y: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Axis {
        X,
        Y,
    }

    impl Tweenable<Axis> for Sprite {
        fn get(&self, key: Axis) -> f64 {
            match key {
                Axis::X => self.x,
                Axis::Y => self.y,
            }
        }

        fn set(&mut self, key: Axis, value: f64) {
            match key {
                Axis::X => self.x = value,
                Axis::Y => self.y = value,
            }
        }
    }

    fn events(fired: &[Fired<&'static str>]) -> Vec<&'static str> {
        fired.iter().map(|f| f.event).collect()
    }

    #[test]
    fn test_wait_fires_once_after_duration() {
        let mut scheduler: Scheduler<&str, Axis> = Scheduler::new();
        let mut sprite = Sprite::default();
        scheduler.wait(0.5, "done");

        assert!(scheduler.update(0.25, &mut sprite).is_empty());
        assert_eq!(events(&scheduler.update(0.25, &mut sprite)), vec!["done"]);
        assert!(scheduler.update(1.0, &mut sprite).is_empty());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_tween_single_step_lands_exactly() {
        let mut scheduler: Scheduler<&str, Axis> = Scheduler::new();
        let mut sprite = Sprite::default();
        scheduler.tween(&sprite, &[(Axis::X, 100.0)], 1.0, Some("arrived"));

        let fired = scheduler.update(1.0, &mut sprite);
        assert_eq!(sprite.x, 100.0);
        assert_eq!(events(&fired), vec!["arrived"]);
        assert!(scheduler.update(1.0, &mut sprite).is_empty());
    }

    #[test]
    fn test_tween_interpolates_linearly() {
        let mut scheduler: Scheduler<&str, Axis> = Scheduler::new();
        let mut sprite = Sprite { x: 10.0, y: 50.0 };
        scheduler.tween(&sprite, &[(Axis::X, 30.0), (Axis::Y, 0.0)], 2.0, None);

        scheduler.update(0.5, &mut sprite);
        assert!((sprite.x - 15.0).abs() < 1e-9);
        assert!((sprite.y - 37.5).abs() < 1e-9);

        scheduler.update(1.0, &mut sprite);
        assert!((sprite.x - 25.0).abs() < 1e-9);

        // Overshooting the duration clamps to the end value.
        let fired = scheduler.update(5.0, &mut sprite);
        assert!(fired.is_empty());
        assert_eq!(sprite.x, 30.0);
        assert_eq!(sprite.y, 0.0);
    }

    #[test]
    fn test_tween_many_small_steps_has_no_drift() {
        let mut scheduler: Scheduler<&str, Axis> = Scheduler::new();
        let mut sprite = Sprite::default();
        scheduler.tween(&sprite, &[(Axis::X, 0.3)], 0.1, Some("done"));

        let mut fired = Vec::new();
        for _ in 0..10 {
            fired.extend(scheduler.update(1.0 / 60.0, &mut sprite));
        }
        assert_eq!(sprite.x, 0.3);
        assert_eq!(events(&fired), vec!["done"]);
    }

    #[test]
    fn test_tween_captures_start_at_schedule_time() {
        let mut scheduler: Scheduler<&str, Axis> = Scheduler::new();
        let mut sprite = Sprite { x: 40.0, y: 0.0 };
        scheduler.tween(&sprite, &[(Axis::X, 80.0)], 1.0, None);
        sprite.x = 0.0;

        scheduler.update(0.5, &mut sprite);
        assert!((sprite.x - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_interval_fires_per_interval_under_variable_dt() {
        let mut scheduler: Scheduler<&str, Axis> = Scheduler::new();
        let mut sprite = Sprite::default();
        scheduler.add_task("tick", 0.1, 1.0, Some("finished"));

        let mut fired = Vec::new();
        for dt in [0.03, 0.25, 0.02, 0.4, 0.1, 0.3] {
            fired.extend(scheduler.update(dt, &mut sprite));
        }

        let names = events(&fired);
        assert_eq!(names.iter().filter(|&&e| e == "tick").count(), 10);
        assert_eq!(names.last(), Some(&"finished"));
        assert_eq!(names.iter().filter(|&&e| e == "finished").count(), 1);
    }

    #[test]
    fn test_interval_with_large_step_fires_all_then_completes() {
        let mut scheduler: Scheduler<&str, Axis> = Scheduler::new();
        let mut sprite = Sprite::default();
        scheduler.add_task("blink", 0.05, 0.5, Some("flashed"));

        let names = events(&scheduler.update(10.0, &mut sprite));
        assert_eq!(names.len(), 11);
        assert_eq!(names[..10], ["blink"; 10]);
        assert_eq!(names[10], "flashed");
    }

    #[test]
    fn test_clear_prevents_continuation() {
        let mut scheduler: Scheduler<&str, Axis> = Scheduler::new();
        let mut sprite = Sprite::default();
        let handle = scheduler.wait(0.5, "never");
        let other = scheduler.wait(0.5, "kept");

        assert!(scheduler.clear(handle));
        assert!(!scheduler.clear(handle));
        assert!(!scheduler.is_active(handle));
        assert!(scheduler.is_active(other));

        let fired = scheduler.update(1.0, &mut sprite);
        assert_eq!(events(&fired), vec!["kept"]);
    }

    #[test]
    fn test_cleared_tween_stops_writing() {
        let mut scheduler: Scheduler<&str, Axis> = Scheduler::new();
        let mut sprite = Sprite::default();
        let handle = scheduler.tween(&sprite, &[(Axis::Y, 10.0)], 1.0, Some("never"));

        scheduler.update(0.5, &mut sprite);
        scheduler.clear(handle);
        assert!(scheduler.update(1.0, &mut sprite).is_empty());
        assert!((sprite.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_duration_completes_on_next_update_not_at_schedule() {
        let mut scheduler: Scheduler<&str, Axis> = Scheduler::new();
        let mut sprite = Sprite::default();
        scheduler.wait(0.0, "now");
        scheduler.tween(&sprite, &[(Axis::X, 7.0)], -1.0, Some("snapped"));

        assert_eq!(scheduler.len(), 2);
        assert_eq!(sprite.x, 0.0);

        let fired = scheduler.update(0.0, &mut sprite);
        assert_eq!(events(&fired), vec!["now", "snapped"]);
        assert_eq!(sprite.x, 7.0);
    }

    #[test]
    fn test_fired_carries_source_handle() {
        let mut scheduler: Scheduler<&str, Axis> = Scheduler::new();
        let mut sprite = Sprite::default();
        let first = scheduler.wait(0.1, "a");
        let second = scheduler.wait(0.2, "b");

        let fired = scheduler.update(0.3, &mut sprite);
        assert_eq!(fired[0].handle, first);
        assert_eq!(fired[1].handle, second);
    }

    #[test]
    fn test_clear_after_update_is_reported() {
        let mut scheduler: Scheduler<&str, Axis> = Scheduler::new();
        let mut sprite = Sprite::default();
        let first = scheduler.wait(0.1, "first");
        let second = scheduler.wait(0.1, "second");

        let fired = scheduler.update(0.1, &mut sprite);
        assert_eq!(fired.len(), 2);
        // An owner torn down by "first" cancels "second" after it already fired.
        scheduler.clear(second);
        assert!(scheduler.was_cancelled(second));
        assert!(!scheduler.was_cancelled(first));

        scheduler.update(0.1, &mut sprite);
        assert!(!scheduler.was_cancelled(second));
    }

    #[test]
    fn test_handles_are_unique() {
        let mut scheduler: Scheduler<&str, Axis> = Scheduler::new();
        let a = scheduler.wait(1.0, "a");
        let b = scheduler.add_task("b", 0.1, 1.0, None);
        assert_ne!(a, b);
    }
}
