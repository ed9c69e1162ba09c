use std::cmp::Reverse;
use std::ops::Range;

use image::Rgb;
use itertools::Itertools;
use priority_queue::PriorityQueue;

use crate::palette::Palette;
use crate::{Color, Quantizer};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
struct Channels<T> {
    r: T,
    g: T,
    b: T,
}

impl<T> Channels<T> {
    fn map<O>(self, mut f: impl FnMut(T) -> O) -> Channels<O> {
        Channels {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }

    fn as_mut(&mut self) -> Channels<&mut T> {
        Channels {
            r: &mut self.r,
            g: &mut self.g,
            b: &mut self.b,
        }
    }

    fn zip<O>(self, other: Channels<O>) -> Channels<(T, O)> {
        Channels {
            r: (self.r, other.r),
            g: (self.g, other.g),
            b: (self.b, other.b),
        }
    }
}

impl From<Rgb<u8>> for Channels<u8> {
    fn from(Rgb([r, g, b]): Rgb<u8>) -> Self {
        Channels { r, g, b }
    }
}

#[derive(Debug, Copy, Clone)]
struct MinMax<T> {
    min: T,
    max: T,
}

impl<T: Ord + Copy> MinMax<T> {
    fn from_value(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    fn extend(&mut self, value: T) {
        if value < self.min {
            self.min = value;
        }
        if self.max < value {
            self.max = value;
        }
    }
}

impl MinMax<u8> {
    fn range(&self) -> u64 {
        u64::from(self.max - self.min)
    }
}

#[derive(Debug, Copy, Clone)]
struct Bounds(Channels<MinMax<u8>>);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Dimension {
    R,
    G,
    B,
}

impl Bounds {
    fn new(color: Channels<u8>) -> Self {
        Self(color.map(MinMax::from_value))
    }

    fn extend(&mut self, color: Channels<u8>) {
        self.0.as_mut().zip(color).map(|(mm, c)| mm.extend(c));
    }

    /// Number of distinct color values the box could hold
    fn volume(&self) -> u64 {
        (self.0.r.range() + 1) * (self.0.g.range() + 1) * (self.0.b.range() + 1)
    }

    fn longest_dimension(&self) -> Dimension {
        let r = self.0.r.range();
        let g = self.0.g.range();
        let b = self.0.b.range();
        if r >= g && r >= b {
            Dimension::R
        } else if g >= b {
            Dimension::G
        } else {
            Dimension::B
        }
    }
}

/// One distinct sampled color and how often it was sampled
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Entry {
    color: Rgb<u8>,
    count: usize,
}

impl Entry {
    fn channels(&self) -> Channels<u8> {
        self.color.into()
    }

    fn channel(&self, dimension: Dimension) -> u8 {
        let Rgb([r, g, b]) = self.color;
        match dimension {
            Dimension::R => r,
            Dimension::G => g,
            Dimension::B => b,
        }
    }
}

/// Collapse samples into their distinct colors, ordered by `[r, g, b]`
fn histogram(samples: &[Rgb<u8>]) -> Vec<Entry> {
    let mut entries: Vec<Entry> = samples
        .iter()
        .copied()
        .counts()
        .into_iter()
        .map(|(color, count)| Entry { color, count })
        .collect();
    entries.sort_unstable_by_key(|entry| entry.color.0);
    entries
}

/// A run of histogram entries sharing one region of the color cube
///
/// Boxes live in an arena and address their entries by index range, so the
/// partitions stay contiguous inside one entry vector.
#[derive(Debug, Clone)]
struct ColorBox {
    entries: Range<usize>,
    population: usize,
    bounds: Bounds,
}

impl ColorBox {
    fn from_entries(entries: &[Entry], range: Range<usize>) -> Self {
        debug_assert!(!range.is_empty());
        let run = &entries[range.clone()];
        let mut bounds = match run.first() {
            Some(first) => Bounds::new(first.channels()),
            None => Bounds::new(Channels::default()),
        };
        for entry in run.iter().skip(1) {
            bounds.extend(entry.channels());
        }
        Self {
            population: run.iter().map(|entry| entry.count).sum(),
            entries: range,
            bounds,
        }
    }

    fn population(&self) -> usize {
        self.population
    }

    fn is_splittable(&self) -> bool {
        self.entries.len() >= 2
    }

    /// Mean of the box's colors, weighted by how often each was sampled
    fn average(&self, entries: &[Entry]) -> Color {
        let population = self.population.max(1) as u64;
        let sum = entries[self.entries.clone()].iter().fold(
            Channels::<u64>::default(),
            |acc, entry| {
                let count = entry.count as u64;
                acc.zip(entry.channels())
                    .map(|(a, v)| a + count * u64::from(v))
            },
        );
        let Channels { r, g, b } =
            sum.map(|s| ((s + population / 2) / population).min(255) as u8);
        Color {
            color: Rgb([r, g, b]),
            population: self.population,
        }
    }

    /// Cut the box at the population median of its longest channel
    ///
    /// The cut only ever falls between two different values of that channel,
    /// so one color never ends up on both sides. Among the possible cuts the
    /// one closest to half the population wins, the lower one on a tie.
    /// `None` when the box spans a single value on that channel.
    fn split(&self, entries: &mut [Entry]) -> Option<(ColorBox, ColorBox)> {
        let Range { start, end } = self.entries.clone();
        let dimension = self.bounds.longest_dimension();
        let run = &mut entries[start..end];
        match dimension {
            Dimension::R => run.sort_unstable_by_key(|e| {
                let [r, g, b] = e.color.0;
                [r, g, b]
            }),
            Dimension::G => run.sort_unstable_by_key(|e| {
                let [r, g, b] = e.color.0;
                [g, r, b]
            }),
            Dimension::B => run.sort_unstable_by_key(|e| {
                let [r, g, b] = e.color.0;
                [b, r, g]
            }),
        }

        let cut = run
            .iter()
            .scan(0usize, |below, entry| {
                *below += entry.count;
                Some(*below)
            })
            .zip(run.iter().tuple_windows())
            .enumerate()
            .filter(|(_, (_, (a, b)))| a.channel(dimension) != b.channel(dimension))
            .min_by_key(|&(i, (below, _))| ((2 * below).abs_diff(self.population), i))
            .map(|(i, _)| start + i + 1)?;

        Some((
            ColorBox::from_entries(entries, start..cut),
            ColorBox::from_entries(entries, cut..end),
        ))
    }
}

/// Which box gets split next
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SplitPriority {
    /// The box holding the most samples
    #[default]
    Population,
    /// The box with the largest product of sample count and color volume
    PopulationVolume,
}

impl SplitPriority {
    fn of(self, vbox: &ColorBox) -> u64 {
        let population = vbox.population() as u64;
        match self {
            SplitPriority::Population => population,
            SplitPriority::PopulationVolume => population.saturating_mul(vbox.bounds.volume()),
        }
    }
}

/// Median cut quantizer
///
/// Repeatedly splits the highest priority box at the median of its widest
/// channel until `max_colors` boxes exist or nothing is left to split.
/// Equal priorities are resolved in favor of the older box, which keeps the
/// output deterministic.
#[derive(Debug, Default, Clone, Copy)]
pub struct MedianCut {
    priority: SplitPriority,
}

impl MedianCut {
    /// Median cut with the given split priority
    pub fn new(priority: SplitPriority) -> Self {
        Self { priority }
    }

    /// The split priority in use
    pub fn priority(&self) -> SplitPriority {
        self.priority
    }
}

impl Quantizer for MedianCut {
    fn quantize(&self, samples: &[Rgb<u8>], max_colors: usize) -> Palette {
        if samples.is_empty() {
            return Palette::default();
        }
        let max_colors = max_colors.max(1);
        let mut entries = histogram(samples);

        let mut arena = Vec::with_capacity(2 * max_colors);
        arena.push(ColorBox::from_entries(&entries, 0..entries.len()));
        let mut queue = PriorityQueue::new();
        queue.push(0, (self.priority.of(&arena[0]), Reverse(0)));
        // boxes that were popped but cannot be split any further
        let mut settled: Vec<usize> = Vec::new();

        while queue.len() + settled.len() < max_colors {
            let Some((handle, _)) = queue.pop() else {
                break;
            };
            let vbox = &arena[handle];
            let halves = if vbox.is_splittable() {
                vbox.split(&mut entries)
            } else {
                None
            };
            let Some((left, right)) = halves else {
                settled.push(handle);
                continue;
            };

            tracing::trace!(
                handle,
                left = left.population(),
                right = right.population(),
                "Split color box"
            );
            for vbox in [left, right] {
                let handle = arena.len();
                queue.push(handle, (self.priority.of(&vbox), Reverse(handle)));
                arena.push(vbox);
            }
        }

        let mut handles: Vec<usize> = settled
            .into_iter()
            .chain(queue.into_iter().map(|(handle, _)| handle))
            .collect();
        handles.sort_unstable_by_key(|&handle| (Reverse(arena[handle].population()), handle));

        tracing::debug!(
            samples = samples.len(),
            distinct = entries.len(),
            boxes = handles.len(),
            max_colors,
            "Median cut finished"
        );
        Palette::new(
            handles
                .into_iter()
                .map(|handle| arena[handle].average(&entries))
                .collect(),
        )
    }
}
