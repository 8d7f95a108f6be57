pub use rank_trees::*;

use itertools::Itertools;

use rand::{self, Rng};
use std::collections::BTreeMap;

/// Something to perform in one round of tests
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Insert(i64),
    Delete(i64),
    Contains(i64),
    Rank(i64),
    Kth(u32),
    Prev(i64),
    Next(i64),
}

/// The result after one round
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RoundResult {
    Empty,
    Contains(bool),
    Rank(u32),
    Key(Result<i64, TreeError>),
}

pub fn run_round<T: OrderStatisticTree<i64>>(action: RoundAction, tree: &mut T) -> RoundResult {
    use RoundAction::*;
    match action {
        Insert(key) => {
            tree.insert(key);
            RoundResult::Empty
        }
        Delete(key) => {
            tree.delete(key);
            RoundResult::Empty
        }
        Contains(key) => RoundResult::Contains(tree.contains(key)),
        Rank(key) => RoundResult::Rank(tree.rank(key)),
        Kth(k) => RoundResult::Key(tree.kth(k)),
        Prev(key) => RoundResult::Key(tree.prev(key)),
        Next(key) => RoundResult::Key(tree.next(key)),
    }
}

/// A plain multiset to compare the trees against.
#[derive(Default, Debug)]
pub struct Model {
    counts: BTreeMap<i64, u32>,
}

impl Model {
    pub fn size(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn to_vec(&self) -> Vec<(i64, u32)> {
        self.counts.iter().map(|(key, count)| (*key, *count)).collect()
    }

    pub fn run_round(&mut self, action: RoundAction) -> RoundResult {
        use RoundAction::*;
        match action {
            Insert(key) => {
                *self.counts.entry(key).or_insert(0) += 1;
                RoundResult::Empty
            }
            Delete(key) => {
                if let Some(count) = self.counts.get_mut(&key) {
                    *count -= 1;
                    if *count == 0 {
                        self.counts.remove(&key);
                    }
                }
                RoundResult::Empty
            }
            Contains(key) => RoundResult::Contains(self.counts.contains_key(&key)),
            Rank(key) => RoundResult::Rank(1 + self.counts.range(..key).map(|(_, c)| *c).sum::<u32>()),
            Kth(k) => {
                let mut seen = 0;
                for (key, count) in self.counts.iter() {
                    seen += count;
                    if k >= 1 && k <= seen {
                        return RoundResult::Key(Ok(*key));
                    }
                }
                RoundResult::Key(Err(TreeError::OutOfRange))
            }
            Prev(key) => RoundResult::Key(
                self.counts
                    .range(..key)
                    .next_back()
                    .map(|(key, _)| *key)
                    .ok_or(TreeError::NoPrevValue),
            ),
            Next(key) => RoundResult::Key(
                self.counts
                    .range(key + 1..)
                    .next()
                    .map(|(key, _)| *key)
                    .ok_or(TreeError::NoNextValue),
            ),
        }
    }
}

const MAX_KEY: i64 = 100;

pub fn random_round_action(rng: &mut rand::prelude::ThreadRng, len: u32) -> RoundAction {
    use RoundAction::*;
    let key = rng.gen_range(-MAX_KEY..=MAX_KEY);
    match rng.gen_range(0..8) {
        // inserting is twice as likely, so that the trees grow
        0 | 1 => Insert(key),
        2 => Delete(key),
        3 => Contains(key),
        4 => Rank(key),
        // sometimes out of range
        5 => Kth(rng.gen_range(0..=len + 1)),
        6 => Prev(key),
        7 => Next(key),
        _ => panic!(),
    }
}

/// Runs the same random rounds on two trees and on the model,
/// and checks that they always agree.
pub fn check_consistency<T1, T2>(num_rounds: u32)
where
    T1: OrderStatisticTree<i64>,
    T2: OrderStatisticTree<i64>,
{
    let mut rng = rand::thread_rng();
    let mut tree1 = T1::new();
    let mut tree2 = T2::new();
    let mut model = Model::default();

    for _ in 0..num_rounds {
        let action = random_round_action(&mut rng, model.size());
        let expected = model.run_round(action);
        assert_eq!(run_round(action, &mut tree1), expected, "{:?}", action);
        assert_eq!(run_round(action, &mut tree2), expected, "{:?}", action);

        assert_eq!(tree1.size(), model.size());
        assert_eq!(tree2.size(), model.size());
        assert_eq!(tree1.is_empty(), model.size() == 0);
        // This check takes `O(n)` time. However, since the trees aren't so big in this test
        // (about a hundred distinct keys) the check doesn't take too long.
        tree1.assert_correctness();
        tree2.assert_correctness();
    }
    assert_eq!(tree1.to_vec(), model.to_vec());
    assert_eq!(tree2.to_vec(), model.to_vec());
}

/// Checks the relations between `rank`, `kth`, `prev` and `next` on the whole tree.
pub fn check_order_statistics<T: OrderStatisticTree<i64>>(tree: &mut T) {
    let contents = tree.to_vec();
    let size = tree.size();
    assert_eq!(size, contents.iter().map(|(_, count)| count).sum::<u32>());

    for k in 1..=size {
        let key = tree.kth(k).unwrap();
        let rank = tree.rank(key);
        let count = contents.iter().find(|(x, _)| *x == key).unwrap().1;
        assert!(rank <= k && k <= rank + count - 1, "k = {}, rank = {}", k, rank);
    }
    assert_eq!(tree.kth(0), Err(TreeError::OutOfRange));
    assert_eq!(tree.kth(size + 1), Err(TreeError::OutOfRange));

    if let (Some((first, _)), Some((last, _))) = (contents.first(), contents.last()) {
        assert_eq!(tree.prev(*first), Err(TreeError::NoPrevValue));
        assert_eq!(tree.next(*last), Err(TreeError::NoNextValue));
    }
    for ((small, _), (big, _)) in contents.iter().tuple_windows() {
        assert_eq!(tree.next(*small), Ok(*big));
        assert_eq!(tree.prev(*big), Ok(*small));
    }
    tree.assert_correctness();
    // queries may restructure the tree, but never change its contents
    assert_eq!(tree.to_vec(), contents);
}

pub fn check_scenarios<T: OrderStatisticTree<i64>>() {
    let mut tree = T::new();
    for key in [5, 3, 8, 3].iter() {
        tree.insert(*key);
    }
    assert_eq!(tree.size(), 4);
    assert_eq!(tree.rank(3), 1);
    assert_eq!(tree.rank(5), 3);
    assert_eq!(tree.kth(2), Ok(3));
    assert_eq!(tree.kth(3), Ok(5));
    assert_eq!(tree.prev(5), Ok(3));
    assert_eq!(tree.next(5), Ok(8));
    tree.assert_correctness();

    let mut tree = T::new();
    assert!(tree.is_empty());
    assert_eq!(tree.kth(1), Err(TreeError::OutOfRange));
    assert_eq!(tree.prev(0), Err(TreeError::NoPrevValue));
    assert_eq!(tree.next(0), Err(TreeError::NoNextValue));
    assert_eq!(tree.rank(0), 1);
    tree.assert_correctness();

    let mut tree = T::new();
    tree.insert(10);
    tree.delete(10);
    assert_eq!(tree.size(), 0);
    assert!(!tree.contains(10));
    tree.assert_correctness();

    let mut tree = T::new();
    for key in [1, 2, 2, 2, 3].iter() {
        tree.insert(*key);
    }
    tree.delete(2);
    assert_eq!(tree.rank(2), 2);
    assert_eq!(tree.size(), 4);
    assert_eq!(tree.kth(2), Ok(2));
    assert_eq!(tree.kth(3), Ok(2));
    assert_eq!(tree.to_vec(), vec![(1, 1), (2, 2), (3, 1)]);
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.to_vec(), vec![]);
    tree.assert_correctness();
}

/// Inserts `len` distinct keys in a shuffled order, then deletes all of them.
pub fn check_insert_delete_all<T: OrderStatisticTree<i64>>(len: i64) {
    use rand::seq::SliceRandom;
    let mut rng = rand::thread_rng();
    let mut keys: Vec<i64> = (0..len).collect();
    keys.shuffle(&mut rng);

    let mut tree = T::new();
    for key in keys.iter() {
        tree.insert(*key);
    }
    tree.assert_correctness();
    assert_eq!(tree.size() as i64, len);
    check_order_statistics(&mut tree);

    keys.shuffle(&mut rng);
    for (i, key) in keys.iter().enumerate() {
        tree.delete(*key);
        assert!(!tree.contains(*key));
        assert_eq!(tree.size() as i64, len - 1 - i as i64);
    }
    assert!(tree.is_empty());
    tree.assert_correctness();
}
