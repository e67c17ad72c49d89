//!
//! Decides who must be told about a task event
//!

use crate::dto::input::TaskEvent;
use std::collections::BTreeSet;
use uuid::Uuid;

///
/// Computes deduplicated set of users that should be notified about the event.
/// Acting user is never notified about own actions.
/// Missing or nil identifiers are skipped.
///
pub fn resolve_recipients(event: &TaskEvent, actor_id: Uuid) -> BTreeSet<Uuid> {
    let mut recipients = BTreeSet::new();

    match event {
        TaskEvent::TaskAssigned { assignee, .. } => {
            recipients.extend(present(*assignee));
        }
        TaskEvent::TaskReassigned {
            new_assignee,
            previous_assignee,
            ..
        } => {
            if *new_assignee != *previous_assignee {
                recipients.extend(present(*new_assignee));
            }
        }
        TaskEvent::TaskStatusChanged { creator, .. } => {
            recipients.extend(present(*creator));
        }
        TaskEvent::CommentAdded {
            author,
            assigned_to,
            created_by,
            prior_commenters,
            ..
        } => {
            recipients.extend(present(*assigned_to));
            recipients.extend(present(*created_by));
            recipients.extend(prior_commenters.iter().copied().filter(|id| !id.is_nil()));
            recipients.remove(author);
        }
    }

    recipients.remove(&actor_id);

    recipients
}

fn present(id: Option<Uuid>) -> Option<Uuid> {
    id.filter(|id| !id.is_nil())
}

#[cfg(test)]
mod test {
    use super::*;

    const ACTOR: Uuid = Uuid::from_u128(1);
    const USER_A: Uuid = Uuid::from_u128(10);
    const USER_B: Uuid = Uuid::from_u128(11);
    const USER_C: Uuid = Uuid::from_u128(12);
    const USER_D: Uuid = Uuid::from_u128(13);
    const TASK: Uuid = Uuid::from_u128(100);

    fn comment(
        author: Uuid,
        assigned_to: Option<Uuid>,
        created_by: Option<Uuid>,
        prior_commenters: Vec<Uuid>,
    ) -> TaskEvent {
        TaskEvent::CommentAdded {
            task_id: TASK,
            title: "Ship release".to_string(),
            comment_id: Uuid::from_u128(200),
            author,
            assigned_to,
            created_by,
            prior_commenters,
            comment: None,
        }
    }

    #[test]
    fn task_assigned_assignee() {
        let event = TaskEvent::TaskAssigned {
            task_id: TASK,
            title: "Ship release".to_string(),
            assignee: Some(USER_B),
        };

        assert_eq!(resolve_recipients(&event, ACTOR), BTreeSet::from([USER_B]));
    }

    #[test]
    fn task_assigned_no_assignee() {
        let event = TaskEvent::TaskAssigned {
            task_id: TASK,
            title: "Ship release".to_string(),
            assignee: None,
        };

        assert!(resolve_recipients(&event, ACTOR).is_empty());
    }

    #[test]
    fn task_assigned_nil_assignee() {
        let event = TaskEvent::TaskAssigned {
            task_id: TASK,
            title: "Ship release".to_string(),
            assignee: Some(Uuid::nil()),
        };

        assert!(resolve_recipients(&event, ACTOR).is_empty());
    }

    #[test]
    fn task_assigned_to_self() {
        let event = TaskEvent::TaskAssigned {
            task_id: TASK,
            title: "Ship release".to_string(),
            assignee: Some(ACTOR),
        };

        assert!(resolve_recipients(&event, ACTOR).is_empty());
    }

    #[test]
    fn task_reassigned_new_assignee() {
        let event = TaskEvent::TaskReassigned {
            task_id: TASK,
            title: "Ship release".to_string(),
            new_assignee: Some(USER_B),
            previous_assignee: Some(USER_A),
        };

        assert_eq!(resolve_recipients(&event, ACTOR), BTreeSet::from([USER_B]));
    }

    #[test]
    fn task_reassigned_same_assignee() {
        for assignee in [None, Some(USER_A), Some(USER_B), Some(ACTOR)] {
            let event = TaskEvent::TaskReassigned {
                task_id: TASK,
                title: "Ship release".to_string(),
                new_assignee: assignee,
                previous_assignee: assignee,
            };

            assert!(resolve_recipients(&event, ACTOR).is_empty());
        }
    }

    #[test]
    fn task_reassigned_to_actor() {
        let event = TaskEvent::TaskReassigned {
            task_id: TASK,
            title: "Ship release".to_string(),
            new_assignee: Some(ACTOR),
            previous_assignee: Some(USER_A),
        };

        assert!(resolve_recipients(&event, ACTOR).is_empty());
    }

    #[test]
    fn task_status_changed_creator() {
        let event = TaskEvent::TaskStatusChanged {
            task_id: TASK,
            title: "Ship release".to_string(),
            new_status: "completed".to_string(),
            creator: Some(USER_A),
        };

        assert_eq!(resolve_recipients(&event, ACTOR), BTreeSet::from([USER_A]));
    }

    #[test]
    fn task_status_changed_by_creator() {
        let event = TaskEvent::TaskStatusChanged {
            task_id: TASK,
            title: "Ship release".to_string(),
            new_status: "completed".to_string(),
            creator: Some(ACTOR),
        };

        assert!(resolve_recipients(&event, ACTOR).is_empty());
    }

    #[test]
    fn comment_added_prior_commenters() {
        let event = comment(USER_D, None, None, vec![USER_A, USER_B, USER_C, USER_D]);

        let recipients = resolve_recipients(&event, USER_D);

        assert_eq!(recipients, BTreeSet::from([USER_A, USER_B, USER_C]));
    }

    #[test]
    fn comment_added_deduplicated() {
        let event = comment(
            USER_D,
            Some(USER_A),
            Some(USER_A),
            vec![USER_A, USER_A, USER_B],
        );

        let recipients = resolve_recipients(&event, USER_D);

        assert_eq!(recipients, BTreeSet::from([USER_A, USER_B]));
    }

    #[test]
    fn comment_added_never_author() {
        let authors = [USER_A, USER_B, USER_C, USER_D];
        for author in authors {
            for assigned_to in [None, Some(USER_A), Some(USER_B)] {
                for created_by in [None, Some(USER_A), Some(USER_C)] {
                    let event = comment(author, assigned_to, created_by, authors.to_vec());

                    let recipients = resolve_recipients(&event, author);

                    assert!(!recipients.contains(&author));
                }
            }
        }
    }

    #[test]
    fn comment_added_by_assignee_notifies_creator() {
        let event = comment(USER_A, Some(USER_A), Some(USER_B), vec![]);

        let recipients = resolve_recipients(&event, USER_A);

        assert_eq!(recipients, BTreeSet::from([USER_B]));
    }
}
