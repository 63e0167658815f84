mod types;
pub use types::DiffOptions;

use crate::equalizer::{DefaultEqualizer, Equalizer};
use crate::error::DiffError;
use crate::patch::{Chunk, Delta, Patch};
use std::iter::once;
use types::{Budget, Snake, Unbounded};

/// Furthest reaching x per diagonal k, for k in `-max - 1..=max + 1`.
struct V {
    data: Vec<usize>,
    offset: isize,
}

impl V {
    fn new(max: usize) -> Self {
        V {
            data: vec![0; 2 * max + 3],
            offset: max as isize + 1,
        }
    }

    fn get(&self, k: isize) -> usize {
        self.data[(k + self.offset) as usize]
    }

    fn set(&mut self, k: isize, val: usize) {
        self.data[(k + self.offset) as usize] = val;
    }

    /// The entries written in step `d`: diagonals `-d, -d + 2, ..., d`.
    fn frontier(&self, d: isize) -> Vec<usize> {
        (0..=d).map(|i| self.get(-d + 2 * i)).collect()
    }
}

// Whether diagonal k in step d is reached by an insertion from k + 1 rather
// than a deletion from k - 1. A deletion wins unless the insertion gets
// strictly further.
fn from_insertion(k: isize, d: isize, above: impl Fn() -> usize, left: impl Fn() -> usize) -> bool {
    k == -d || (k != d && above() > left() + 1)
}

/// Computes the patch turning `original` into `revised`.
///
/// # Examples
///
/// ```
/// use seqpatch::myers::diff;
/// use seqpatch::patch::DeltaType;
///
/// let patch = diff(&["aaa", "bbb", "ccc"], &["aaa", "zzz", "ccc"]);
/// assert_eq!(patch.len(), 1);
/// assert_eq!(patch.deltas()[0].kind(), DeltaType::Change);
/// assert_eq!(patch.deltas()[0].original().position(), 1);
/// ```
pub fn diff<T: PartialEq + Clone>(original: &[T], revised: &[T]) -> Patch<T> {
    diff_with(original, revised, &DefaultEqualizer)
}

/// Like [`diff`], matching elements with `equalizer`.
pub fn diff_with<T, E>(original: &[T], revised: &[T], equalizer: &E) -> Patch<T>
where
    T: Clone,
    E: Equalizer<T> + ?Sized,
{
    match compute(original, revised, equalizer, &mut Unbounded) {
        Ok(patch) => patch,
        Err(never) => match never {},
    }
}

/// Like [`diff_with`], but gives up with an error instead of exceeding
/// `options.memory_limit` or ignoring `options.interrupt`.
/// No partial patch is ever returned.
pub fn try_diff_with<T, E>(
    original: &[T],
    revised: &[T],
    equalizer: &E,
    options: &DiffOptions,
) -> Result<Patch<T>, DiffError>
where
    T: Clone,
    E: Equalizer<T> + ?Sized,
{
    options.validate()?;
    let mut budget = options;
    compute(original, revised, equalizer, &mut budget)
}

/// Computes the diff between two strings after breaking them into newlines
/// and running `diff`.
pub fn diff_lines(old: &str, new: &str) -> Patch<String> {
    let old_lines: Vec<String> = old.split('\n').map(ToString::to_string).collect();
    let new_lines: Vec<String> = new.split('\n').map(ToString::to_string).collect();
    diff(&old_lines, &new_lines)
}

fn compute<T, E, B>(
    original: &[T],
    revised: &[T],
    equalizer: &E,
    budget: &mut B,
) -> Result<Patch<T>, B::Error>
where
    T: Clone,
    E: Equalizer<T> + ?Sized,
    B: Budget,
{
    let snakes = snakes(original, revised, equalizer, budget)?;
    let patch = build_patch(original, revised, &snakes);
    tracing::debug!(
        original_len = original.len(),
        revised_len = revised.len(),
        deltas = patch.len(),
        "computed diff"
    );
    Ok(patch)
}

// Matches the common prefix and suffix up front, then searches the middle.
fn snakes<T, E, B>(old: &[T], new: &[T], eq: &E, budget: &mut B) -> Result<Vec<Snake>, B::Error>
where
    E: Equalizer<T> + ?Sized,
    B: Budget,
{
    let prefix = old
        .iter()
        .zip(new)
        .take_while(|(a, b)| eq.equals(a, b))
        .count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| eq.equals(a, b))
        .count();
    let old_end = old.len() - suffix;
    let new_end = new.len() - suffix;

    let mut snakes = Vec::new();
    if prefix > 0 {
        snakes.push(Snake {
            old_start: 0,
            new_start: 0,
            len: prefix,
        });
    }
    for s in search(&old[prefix..old_end], &new[prefix..new_end], eq, budget)? {
        snakes.push(Snake {
            old_start: s.old_start + prefix,
            new_start: s.new_start + prefix,
            len: s.len,
        });
    }
    if suffix > 0 {
        snakes.push(Snake {
            old_start: old_end,
            new_start: new_end,
            len: suffix,
        });
    }
    Ok(snakes)
}

// Greedy forward search of the edit graph. One frontier snapshot is kept per
// step, so memory grows with the square of the edit distance rather than
// with the product of the lengths.
fn search<T, E, B>(old: &[T], new: &[T], eq: &E, budget: &mut B) -> Result<Vec<Snake>, B::Error>
where
    E: Equalizer<T> + ?Sized,
    B: Budget,
{
    let n = old.len();
    let m = new.len();
    if n == 0 || m == 0 {
        return Ok(Vec::new());
    }

    let maxi = n + m;
    let mut v = V::new(maxi);
    let mut trace: Vec<Vec<usize>> = Vec::new();
    let mut cells = 0;
    for d in 0..=maxi as isize {
        cells += d as usize + 1;
        budget.step(cells)?;
        for k in (-d..=d).step_by(2) {
            let mut x = if from_insertion(k, d, || v.get(k + 1), || v.get(k - 1)) {
                v.get(k + 1)
            } else {
                v.get(k - 1) + 1
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && eq.equals(&old[x], &new[y]) {
                x += 1;
                y += 1;
            }
            v.set(k, x);
            if x >= n && y >= m {
                trace.push(v.frontier(d));
                tracing::trace!(
                    edit_distance = d,
                    frontier_cells = cells,
                    "myers search finished"
                );
                return Ok(traceback(&trace, n, m));
            }
        }
        trace.push(v.frontier(d));
    }
    unreachable!("an edit script of length n + m always exists")
}

fn traceback(trace: &[Vec<usize>], n: usize, m: usize) -> Vec<Snake> {
    let mut snakes = Vec::new();
    let mut x = n as isize;
    let mut y = m as isize;
    for d in (1..trace.len() as isize).rev() {
        let k = x - y;
        let prev = &trace[(d - 1) as usize];
        let at = |kk: isize| prev[((kk + d - 1) / 2) as usize] as isize;
        let insertion = from_insertion(k, d, || at(k + 1) as usize, || at(k - 1) as usize);
        let (prev_k, mid_x, mid_y) = if insertion {
            let px = at(k + 1);
            (k + 1, px, px - k)
        } else {
            let px = at(k - 1);
            (k - 1, px + 1, px - k + 1)
        };
        if x > mid_x {
            snakes.push(Snake {
                old_start: mid_x as usize,
                new_start: mid_y as usize,
                len: (x - mid_x) as usize,
            });
        }
        x = at(prev_k);
        y = x - prev_k;
    }
    if x > 0 {
        snakes.push(Snake {
            old_start: 0,
            new_start: 0,
            len: x as usize,
        });
    }
    snakes.reverse();
    snakes
}

// Every gap between two consecutive snakes becomes one delta.
fn build_patch<T: Clone>(old: &[T], new: &[T], snakes: &[Snake]) -> Patch<T> {
    let sentinel = Snake {
        old_start: old.len(),
        new_start: new.len(),
        len: 0,
    };
    let mut deltas = Vec::new();
    let mut x = 0;
    let mut y = 0;
    for s in snakes.iter().chain(once(&sentinel)) {
        if s.old_start > x || s.new_start > y {
            deltas.push(Delta::new(
                Chunk::new(x, old[x..s.old_start].to_vec()),
                Chunk::new(y, new[y..s.new_start].to_vec()),
            ));
        }
        x = s.old_start + s.len;
        y = s.new_start + s.len;
    }
    deltas.into_iter().collect()
}
