use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Done,
}

/// Lazily enumerates every `size`-element selection of the positions
/// `0..len`, as strictly ascending vectors in lexicographic order.
///
/// Only the current selection is held, so memory is `O(size)` no matter how
/// many selections there are. Create a new iterator to start over.
#[derive(Debug, Clone)]
pub struct PositionCombinations {
    len: usize,
    size: usize,
    indices: Vec<usize>,
    state: State,
}

impl PositionCombinations {
    pub fn new(len: usize, size: usize) -> Self {
        let state = if size > len { State::Done } else { State::Fresh };
        Self {
            len,
            size,
            indices: (0..size.min(len)).collect(),
            state,
        }
    }

    /// Move to the next selection; false once the last one has been seen.
    fn advance(&mut self) -> bool {
        // Rightmost index that can still move right
        let Some(i) = (0..self.size)
            .rev()
            .find(|&i| self.indices[i] < self.len - self.size + i)
        else {
            return false;
        };

        self.indices[i] += 1;
        for j in i + 1..self.size {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl Iterator for PositionCombinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => None,
            State::Fresh => {
                self.state = State::Running;
                Some(self.indices.clone())
            }
            State::Running => {
                if self.advance() {
                    Some(self.indices.clone())
                } else {
                    self.state = State::Done;
                    None
                }
            }
        }
    }
}

impl FusedIterator for PositionCombinations {}

/// Every `size`-element selection of `items`, in positional order
pub fn combinations<T>(items: &[T], size: usize) -> impl Iterator<Item = Vec<&T>> + '_ {
    PositionCombinations::new(items.len(), size)
        .map(move |positions| positions.into_iter().map(|p| &items[p]).collect())
}

/// Binomial coefficient C(len, size), or `None` if it overflows `u128`
#[must_use]
pub fn combination_count(len: usize, size: usize) -> Option<u128> {
    if size > len {
        return Some(0);
    }

    let k = size.min(len - size) as u128;
    let n = len as u128;
    let mut count: u128 = 1;
    for i in 0..k {
        // Exact at every step: the running product is C(n, i + 1) * (i + 1)
        count = count.checked_mul(n - i)? / (i + 1);
    }
    Some(count)
}
