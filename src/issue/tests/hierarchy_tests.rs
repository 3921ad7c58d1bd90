//! Tests for parent/child derivation and the done-transition guard.

use super::fixtures::{clock, context, issue};
use crate::issue::domain::{
    CompletionSummary, Issue, IssueHierarchy, IssueId, IssueStatus, IssueType,
    allowed_child_types, can_transition_to_done, completed_count,
};
use crate::workspace::domain::SessionContext;
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

/// An epic with two stories, the first of which has two subtasks.
struct Tree {
    epic: Issue,
    design: Issue,
    build: Issue,
    wireframes: Issue,
    copy: Issue,
}

impl Tree {
    fn issues(&self) -> Vec<Issue> {
        vec![
            self.epic.clone(),
            self.design.clone(),
            self.build.clone(),
            self.wireframes.clone(),
            self.copy.clone(),
        ]
    }
}

#[fixture]
fn tree(context: SessionContext) -> Tree {
    let epic = issue(&context, 1, "Launch", IssueType::Epic, None).expect("epic");
    let design = issue(&context, 2, "Design", IssueType::Story, Some(&epic)).expect("design");
    let build = issue(&context, 3, "Build", IssueType::Task, Some(&epic)).expect("build");
    let wireframes =
        issue(&context, 4, "Wireframes", IssueType::Subtask, Some(&design)).expect("wireframes");
    let copy = issue(&context, 5, "Copy", IssueType::Subtask, Some(&design)).expect("copy");
    Tree {
        epic,
        design,
        build,
        wireframes,
        copy,
    }
}

fn ids(issues: &[&Issue]) -> Vec<IssueId> {
    issues.iter().map(|issue| issue.id()).collect()
}

#[rstest]
#[case(None, &[IssueType::Story, IssueType::Task, IssueType::Bug])]
#[case(Some(IssueType::Epic), &[IssueType::Story, IssueType::Task, IssueType::Bug])]
#[case(Some(IssueType::Story), &[IssueType::Subtask])]
#[case(Some(IssueType::Task), &[IssueType::Subtask])]
#[case(Some(IssueType::Bug), &[IssueType::Subtask])]
#[case(Some(IssueType::Subtask), &[IssueType::Subtask])]
fn allowed_child_types_by_parent(
    #[case] parent_type: Option<IssueType>,
    #[case] expected: &[IssueType],
) {
    assert_eq!(allowed_child_types(parent_type), expected);
}

#[rstest]
fn children_are_derived_in_source_order(tree: Tree) {
    let issues = tree.issues();
    let hierarchy = IssueHierarchy::new(&issues);

    assert_eq!(
        ids(&hierarchy.children_of(tree.epic.id())),
        vec![tree.design.id(), tree.build.id()]
    );
    assert_eq!(
        ids(&hierarchy.children_of(tree.design.id())),
        vec![tree.wireframes.id(), tree.copy.id()]
    );
    assert!(hierarchy.children_of(tree.build.id()).is_empty());
}

#[rstest]
fn descendants_list_parents_before_children(tree: Tree) {
    let issues = tree.issues();
    let descendants = ids(&IssueHierarchy::new(&issues).descendants_of(tree.epic.id()));

    assert_eq!(descendants.len(), 4);
    let position = |id: IssueId| descendants.iter().position(|candidate| *candidate == id);
    assert!(position(tree.design.id()) < position(tree.wireframes.id()));
    assert!(position(tree.design.id()) < position(tree.copy.id()));
    assert!(!descendants.contains(&tree.epic.id()));
}

#[rstest]
fn leaves_can_always_transition_to_done(tree: Tree, clock: DefaultClock) -> eyre::Result<()> {
    let mut build = tree.build.clone();
    for status in [IssueStatus::Todo, IssueStatus::InProgress, IssueStatus::Done] {
        build.transition_to(status, &[], &clock)?;
        let issues = vec![tree.epic.clone(), build.clone()];
        ensure!(can_transition_to_done(&build, &issues));
    }
    Ok(())
}

#[rstest]
fn one_open_child_blocks_done(tree: Tree, clock: DefaultClock) -> eyre::Result<()> {
    let mut wireframes = tree.wireframes.clone();
    wireframes.transition_to(IssueStatus::Done, &[], &clock)?;
    let issues = vec![tree.design.clone(), wireframes, tree.copy.clone()];

    ensure!(!can_transition_to_done(&tree.design, &issues));
    ensure!(
        IssueHierarchy::new(&issues).completion_summary(tree.design.id())
            == CompletionSummary {
                completed: 1,
                total: 2,
            }
    );
    Ok(())
}

#[rstest]
fn all_children_done_allows_done(tree: Tree, clock: DefaultClock) -> eyre::Result<()> {
    let mut wireframes = tree.wireframes.clone();
    let mut copy = tree.copy.clone();
    wireframes.transition_to(IssueStatus::Done, &[], &clock)?;
    copy.transition_to(IssueStatus::Done, &[], &clock)?;
    let issues = vec![tree.design.clone(), wireframes, copy];

    ensure!(can_transition_to_done(&tree.design, &issues));
    ensure!(IssueHierarchy::new(&issues).can_transition_to_done(tree.design.id()));
    Ok(())
}

#[rstest]
fn completed_count_is_stable_across_calls(tree: Tree) -> eyre::Result<()> {
    let mut done = tree.copy.clone();
    done.transition_to(IssueStatus::Done, &[], &DefaultClock)?;
    let children = vec![tree.wireframes.clone(), done];

    let first = completed_count(&children);
    let second = completed_count(&children);
    ensure!(first == 1);
    ensure!(first == second);
    Ok(())
}

#[rstest]
fn completion_summary_of_leaf_is_complete(tree: Tree) {
    let issues = tree.issues();
    let summary = IssueHierarchy::new(&issues).completion_summary(tree.build.id());

    assert_eq!(summary, CompletionSummary::default());
    assert!(summary.is_complete());
    assert_eq!(summary.remaining(), 0);
}
