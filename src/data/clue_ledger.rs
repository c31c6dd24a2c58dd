//! Clue ledger: the detective's collected clues
//!
//! A binary search tree keyed by clue text. Inserting a clue that is already
//! present is a silent no-op, so the ledger holds each clue once and always
//! enumerates them in alphabetical order.

use super::SuspectIndex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};

#[derive(Debug)]
struct ClueNode {
    content: String,
    left: Option<Box<ClueNode>>,
    right: Option<Box<ClueNode>>,
}

impl ClueNode {
    fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            left: None,
            right: None,
        }
    }
}

/// Sorted set of collected clues
#[derive(Debug, Default)]
pub struct ClueLedger {
    root: Option<Box<ClueNode>>,
    len: usize,
}

/// How many ledger clues point at an accused suspect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub accused: String,
    pub count: usize,
    /// Corroborating clues, alphabetical
    pub corroborating: Vec<String>,
}

impl ClueLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clue. Returns `false` (and changes nothing) if it is already in
    /// the ledger.
    pub fn insert(&mut self, content: &str) -> bool {
        let inserted = insert_node(&mut self.root, content);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    pub fn contains(&self, content: &str) -> bool {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match content.cmp(node.content.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Iterate the clues in ascending order. Read-only; can be called any
    /// number of times.
    pub fn in_order(&self) -> InOrder<'_> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Count the clues that resolve to `accused` through the suspect index.
    ///
    /// Walks the tree in order so corroborating clues are reported
    /// alphabetically; each one is logged as it is found. Clues the index
    /// does not know are skipped.
    pub fn tally_for_suspect(&self, accused: &str, index: &SuspectIndex) -> Tally {
        let mut corroborating = Vec::new();
        tally_node(self.root.as_deref(), accused, index, &mut corroborating);
        Tally {
            accused: accused.to_string(),
            count: corroborating.len(),
            corroborating,
        }
    }

    /// Release every clue, children before parents. Returns how many were
    /// released.
    pub fn teardown(&mut self) -> usize {
        let released = release_post_order(self.root.take());
        self.len = 0;
        debug!(released = released.len(), "clue ledger released");
        released.len()
    }
}

fn insert_node(slot: &mut Option<Box<ClueNode>>, content: &str) -> bool {
    match slot {
        None => {
            *slot = Some(Box::new(ClueNode::new(content)));
            true
        }
        Some(node) => match content.cmp(node.content.as_str()) {
            Ordering::Less => insert_node(&mut node.left, content),
            Ordering::Greater => insert_node(&mut node.right, content),
            Ordering::Equal => false,
        },
    }
}

fn tally_node(
    node: Option<&ClueNode>,
    accused: &str,
    index: &SuspectIndex,
    corroborating: &mut Vec<String>,
) {
    let Some(node) = node else {
        return;
    };

    tally_node(node.left.as_deref(), accused, index, corroborating);

    if index.lookup(&node.content) == Some(accused) {
        info!(clue = %node.content, suspect = accused, "clue points to the accused");
        corroborating.push(node.content.clone());
    }

    tally_node(node.right.as_deref(), accused, index, corroborating);
}

/// Tear a subtree down, returning the contents in the order they were freed.
fn release_post_order(root: Option<Box<ClueNode>>) -> Vec<String> {
    fn release(mut node: Box<ClueNode>, freed: &mut Vec<String>) {
        if let Some(left) = node.left.take() {
            release(left, freed);
        }
        if let Some(right) = node.right.take() {
            release(right, freed);
        }
        freed.push(std::mem::take(&mut node.content));
    }

    let mut freed = Vec::new();
    if let Some(root) = root {
        release(root, &mut freed);
    }
    freed
}

/// In-order iterator over a [`ClueLedger`]
pub struct InOrder<'a> {
    stack: Vec<&'a ClueNode>,
}

impl<'a> InOrder<'a> {
    fn push_left(&mut self, mut node: Option<&'a ClueNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(&node.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ledger_of(clues: &[&str]) -> ClueLedger {
        let mut ledger = ClueLedger::new();
        for clue in clues {
            ledger.insert(clue);
        }
        ledger
    }

    #[test]
    fn enumerates_alphabetically() {
        let ledger = ledger_of(&["pear", "apple", "zucchini", "mango", "banana"]);
        let clues: Vec<_> = ledger.in_order().collect();
        assert_eq!(clues, vec!["apple", "banana", "mango", "pear", "zucchini"]);
    }

    #[test]
    fn ordering_is_byte_wise() {
        // Uppercase sorts before lowercase, like strcmp
        let ledger = ledger_of(&["apple", "Banana", "apple pie"]);
        let clues: Vec<_> = ledger.in_order().collect();
        assert_eq!(clues, vec!["Banana", "apple", "apple pie"]);
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut ledger = ledger_of(&["glove", "ticket"]);
        let before: Vec<String> = ledger.in_order().map(str::to_string).collect();

        assert!(!ledger.insert("glove"));
        assert_eq!(ledger.len(), 2);
        let after: Vec<String> = ledger.in_order().map(str::to_string).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn in_order_is_repeatable() {
        let ledger = ledger_of(&["b", "a", "c"]);
        let first: Vec<_> = ledger.in_order().collect();
        let second: Vec<_> = ledger.in_order().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_ledger() {
        let ledger = ClueLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.in_order().count(), 0);
        assert!(!ledger.contains("anything"));
    }

    #[test]
    fn tally_counts_only_matching_clues() {
        let mut index = SuspectIndex::new();
        index.insert("ticket", "Empregado");
        index.insert("safe", "Empregado");
        index.insert("knife", "Chef");

        let ledger = ledger_of(&["ticket", "knife", "safe", "unregistered"]);

        let tally = ledger.tally_for_suspect("Empregado", &index);
        assert_eq!(tally.count, 2);
        assert_eq!(tally.corroborating, vec!["safe", "ticket"]);

        assert_eq!(ledger.tally_for_suspect("Chef", &index).count, 1);
        assert_eq!(ledger.tally_for_suspect("empregado", &index).count, 0);
        assert_eq!(ledger.tally_for_suspect("Mordomo", &index).count, 0);
    }

    #[test]
    fn teardown_frees_children_before_parents() {
        //        m
        //      /   \
        //     c     t
        //    / \
        //   a   e
        let ledger = ledger_of(&["m", "c", "t", "a", "e"]);
        let freed = release_post_order(ledger.root);
        assert_eq!(freed, vec!["a", "e", "c", "t", "m"]);
    }

    #[test]
    fn teardown_empties_the_ledger() {
        let mut ledger = ledger_of(&["m", "c", "t"]);
        assert_eq!(ledger.teardown(), 3);
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert_eq!(ledger.teardown(), 0);
    }

    proptest! {
        #[test]
        fn enumeration_is_sorted_and_distinct(clues in prop::collection::vec("[a-zA-Z ]{0,8}", 0..40)) {
            let mut ledger = ClueLedger::new();
            for clue in &clues {
                ledger.insert(clue);
            }

            let listed: Vec<&str> = ledger.in_order().collect();
            prop_assert!(listed.windows(2).all(|pair| pair[0] < pair[1]));

            let mut expected: Vec<&str> = clues.iter().map(String::as_str).collect();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(listed, expected);
            prop_assert_eq!(ledger.len(), ledger.in_order().count());
        }

        #[test]
        fn reinserting_changes_nothing(clues in prop::collection::vec("[a-z]{1,6}", 1..20), pick in any::<prop::sample::Index>()) {
            let mut ledger = ClueLedger::new();
            for clue in &clues {
                ledger.insert(clue);
            }
            let before: Vec<String> = ledger.in_order().map(str::to_string).collect();
            let size = ledger.len();

            let again = pick.get(&clues);
            prop_assert!(!ledger.insert(again));
            prop_assert_eq!(ledger.len(), size);
            let after: Vec<String> = ledger.in_order().map(str::to_string).collect();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn tally_does_not_depend_on_traversal_order(
            pairs in prop::collection::vec(("[a-z]{1,5}", 0usize..3), 0..25),
        ) {
            const SUSPECTS: [&str; 3] = ["Chef", "Senhora", "Mordomo"];
            let mut index = SuspectIndex::new();
            let mut ledger = ClueLedger::new();
            for (clue, suspect) in &pairs {
                if ledger.insert(clue) {
                    index.insert(clue, SUSPECTS[*suspect]);
                }
            }

            for accused in SUSPECTS {
                let in_order = ledger.tally_for_suspect(accused, &index).count;
                // Walk the clues back to front instead
                let reversed = ledger
                    .in_order()
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .filter(|clue| index.lookup(clue) == Some(accused))
                    .count();
                prop_assert_eq!(in_order, reversed);
            }
        }
    }
}
