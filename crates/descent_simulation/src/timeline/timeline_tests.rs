//! Tests for Timeline scheduling and cancellation.

#[cfg(test)]
mod tests {
    use super::super::{ScheduledAction, Timeline};
    use bevy::prelude::*;
    use std::time::Duration;

    fn two_owners() -> (Entity, Entity) {
        let mut world = World::new();
        (world.spawn_empty().id(), world.spawn_empty().id())
    }

    fn descent_to(x: f32) -> ScheduledAction {
        ScheduledAction::FinishDescent { target: Vec3::new(x, 0.0, 0.0) }
    }

    #[test]
    fn test_task_fires_after_delay_only_once() {
        let (owner, _) = two_owners();
        let mut timeline = Timeline::default();
        timeline.schedule(owner, Duration::from_secs(1), descent_to(3.0));

        assert!(timeline.tick(Duration::from_millis(600)).is_empty());
        assert!(timeline.has_pending(owner));

        let due = timeline.tick(Duration::from_millis(400));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].owner, owner);
        assert_eq!(due[0].action, descent_to(3.0));

        assert!(timeline.is_empty());
        assert!(timeline.tick(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_due_tasks_keep_schedule_order() {
        let (a, b) = two_owners();
        let mut timeline = Timeline::default();
        let first = timeline.schedule(b, Duration::from_millis(500), descent_to(1.0));
        let second = timeline.schedule(a, Duration::from_millis(200), descent_to(2.0));

        let due = timeline.tick(Duration::from_secs(1));
        let ids: Vec<_> = due.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_cancel_by_id_and_owner() {
        let (a, b) = two_owners();
        let mut timeline = Timeline::default();
        let id = timeline.schedule(a, Duration::from_secs(1), descent_to(0.0));
        timeline.schedule(b, Duration::from_secs(1), descent_to(0.0));
        timeline.schedule(b, Duration::from_secs(2), descent_to(0.0));

        assert!(timeline.cancel(id));
        assert!(!timeline.cancel(id));
        assert!(!timeline.has_pending(a));

        assert_eq!(timeline.cancel_owner(b), 2);
        assert!(timeline.tick(Duration::from_secs(3)).is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let (a, b) = two_owners();
        let mut timeline = Timeline::default();
        timeline.schedule(a, Duration::from_secs(1), descent_to(0.0));
        timeline.schedule(b, Duration::from_secs(1), descent_to(0.0));

        assert_eq!(timeline.cancel_all(), 2);
        assert_eq!(timeline.len(), 0);
    }

    #[test]
    fn test_take_owner_returns_tasks_for_rollback() {
        let (a, b) = two_owners();
        let mut timeline = Timeline::default();
        timeline.schedule(a, Duration::from_secs(1), descent_to(5.0));
        timeline.schedule(b, Duration::from_secs(1), descent_to(9.0));

        let taken = timeline.take_owner(a);
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].action, descent_to(5.0));
        assert!(!timeline.has_pending(a));
        assert!(timeline.has_pending(b));

        // Забранная задача больше не срабатывает
        let due = timeline.tick(Duration::from_secs(2));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].owner, b);

        assert!(timeline.take_owner(a).is_empty());
        assert!(timeline.take_all().is_empty());
    }
}
