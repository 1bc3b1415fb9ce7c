//! The pattern algebra.
//!
//! A [`Pattern`] maps a half-open time window `[start, end)`, measured in
//! cycles, to the events that start inside it. Patterns hold no state, so the
//! same window can be queried any number of times, from any thread. A
//! [`Transformer`] maps one pattern to another; programs evaluate to
//! transformers.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event<A> {
    pub start: f64,
    pub end: f64,
    pub value: A,
}

impl<A> Event<A> {
    fn map_time(self, f: impl Fn(f64) -> f64) -> Self {
        Event {
            start: f(self.start),
            end: f(self.end),
            value: self.value,
        }
    }
}

type QueryFn<A> = dyn Fn(f64, f64) -> Vec<Event<A>> + Send + Sync;
type TransformFn<A> = dyn Fn(Pattern<A>) -> Pattern<A> + Send + Sync;

pub struct Pattern<A>(Arc<QueryFn<A>>);

impl<A> Clone for Pattern<A> {
    fn clone(&self) -> Self {
        Pattern(Arc::clone(&self.0))
    }
}

impl<A> fmt::Debug for Pattern<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pattern")
    }
}

impl<A> Pattern<A> {
    pub fn new(query: impl Fn(f64, f64) -> Vec<Event<A>> + Send + Sync + 'static) -> Self {
        Pattern(Arc::new(query))
    }

    pub fn query(&self, start: f64, end: f64) -> Vec<Event<A>> {
        (self.0)(start, end)
    }
}

pub struct Transformer<A>(Arc<TransformFn<A>>);

impl<A> Clone for Transformer<A> {
    fn clone(&self) -> Self {
        Transformer(Arc::clone(&self.0))
    }
}

impl<A> fmt::Debug for Transformer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transformer")
    }
}

impl<A: 'static> Transformer<A> {
    pub fn new(transform: impl Fn(Pattern<A>) -> Pattern<A> + Send + Sync + 'static) -> Self {
        Transformer(Arc::new(transform))
    }

    pub fn identity() -> Self {
        Transformer::new(|pattern| pattern)
    }

    pub fn apply(&self, pattern: Pattern<A>) -> Pattern<A> {
        (self.0)(pattern)
    }
}

pub fn query<A>(start: f64, end: f64, pattern: &Pattern<A>) -> Vec<Event<A>> {
    pattern.query(start, end)
}

/// One event every `period` cycles, offset by `phase`, each lasting
/// `duration`. A non-positive period yields nothing.
pub fn periodic<A>(period: f64, duration: f64, phase: f64, value: A) -> Pattern<A>
where
    A: Clone + Send + Sync + 'static,
{
    Pattern::new(move |start, end| {
        let mut events = Vec::new();
        if period <= 0.0 || period.is_nan() {
            return events;
        }
        // One slot early, in case the division rounds up past the first hit.
        let mut k = ((start - phase) / period).ceil() - 1.0;
        let mut last = f64::NEG_INFINITY;
        loop {
            let time = k * period + phase;
            // Far from zero a step of one slot can round to no step at all.
            if time >= end || time <= last || time.is_nan() {
                break;
            }
            last = time;
            if time >= start {
                events.push(Event {
                    start: time,
                    end: time + duration,
                    value: value.clone(),
                });
            }
            k += 1.0;
        }
        events
    })
}

/// One unit-length event per cycle.
pub fn beat() -> Pattern<()> {
    periodic(1.0, 1.0, 0.0, ())
}

pub fn silence<A: 'static>() -> Pattern<A> {
    Pattern::new(|_, _| Vec::new())
}

/// The union of the children's events, ordered by start time. Events with
/// equal starts keep the order of the children.
pub fn stack_patterns<A: 'static>(children: Vec<Pattern<A>>) -> Pattern<A> {
    Pattern::new(move |start, end| {
        let mut events: Vec<Event<A>> = children
            .iter()
            .flat_map(|child| child.query(start, end))
            .collect();
        events.sort_by(|a, b| a.start.total_cmp(&b.start));
        events
    })
}

pub fn stack<A: 'static>(children: Vec<Transformer<A>>) -> Transformer<A> {
    Transformer::new(move |pattern: Pattern<A>| {
        stack_patterns(
            children
                .iter()
                .map(|transform| transform.apply(pattern.clone()))
                .collect(),
        )
    })
}

/// The input stacked with its own transformation.
pub fn and<A: 'static>(transform: Transformer<A>) -> Transformer<A> {
    Transformer::new(move |pattern: Pattern<A>| {
        stack_patterns(vec![pattern.clone(), transform.apply(pattern)])
    })
}

/// Applies the children in order: `compose([f, g])(p) == g(f(p))`.
pub fn compose<A: 'static>(children: Vec<Transformer<A>>) -> Transformer<A> {
    Transformer::new(move |pattern: Pattern<A>| {
        children
            .iter()
            .fold(pattern, |pattern, transform| transform.apply(pattern))
    })
}

pub fn shift<A: 'static>(offset: f64) -> Transformer<A> {
    Transformer::new(move |pattern: Pattern<A>| {
        Pattern::new(move |start, end| {
            pattern
                .query(start - offset, end - offset)
                .into_iter()
                .map(|event| event.map_time(|t| t + offset))
                .collect()
        })
    })
}

/// Stretches time by `factor`.
pub fn slow<A: 'static>(factor: f64) -> Transformer<A> {
    Transformer::new(move |pattern: Pattern<A>| {
        Pattern::new(move |start, end| {
            pattern
                .query(start / factor, end / factor)
                .into_iter()
                .map(|event| event.map_time(|t| t * factor))
                .collect()
        })
    })
}

pub fn fast<A: 'static>(factor: f64) -> Transformer<A> {
    slow(1.0 / factor)
}

/// Splits `[start, end)` at integer cycle boundaries.
fn cycles(start: f64, end: f64) -> Vec<(f64, f64)> {
    let mut spans = Vec::new();
    let mut from = start;
    while from < end {
        let to = (from.floor() + 1.0).min(end);
        if to <= from {
            // No cycle boundary is representable this far out.
            spans.push((from, end));
            break;
        }
        spans.push((from, to));
        from = to;
    }
    spans
}

/// Round-robin over the children, one per cycle. Cycle `c` uses child
/// `c mod n`, also for negative cycles.
pub fn alt<A: 'static>(children: Vec<Transformer<A>>) -> Transformer<A> {
    let children = Arc::new(children);
    Transformer::new(move |pattern: Pattern<A>| {
        let children = Arc::clone(&children);
        Pattern::new(move |start, end| {
            let n = children.len() as i64;
            if n == 0 {
                return Vec::new();
            }
            cycles(start, end)
                .into_iter()
                .flat_map(|(from, to)| {
                    let index = (from.floor() as i64).rem_euclid(n) as usize;
                    children[index].apply(pattern.clone()).query(from, to)
                })
                .collect()
        })
    })
}

/// Keeps only the parts of the input that fall inside the events of `mask`.
/// Only mask events starting in the query window open the input, each from
/// its start to its end clipped to the window. A mask event that started
/// before the window contributes nothing, even if it is still open.
pub fn gate_with<A: 'static, M: 'static>(mask: Pattern<M>) -> Transformer<A> {
    Transformer::new(move |pattern: Pattern<A>| {
        let mask = mask.clone();
        Pattern::new(move |start, end| {
            mask.query(start, end)
                .into_iter()
                .flat_map(|open| pattern.query(open.start.max(start), open.end.min(end)))
                .collect()
        })
    })
}

/// Opens the input for one cycle every `period` cycles, starting at
/// `phase`. The open window never exceeds the period. This is
/// [`gate_with`] over a periodic mask, so a window that opened before the
/// query window is ignored the same way.
pub fn gate<A: 'static>(phase: f64, period: f64) -> Transformer<A> {
    gate_with(periodic(period, period.min(1.0), phase, ()))
}

/// Maps every event's value.
pub fn fmap<A: 'static>(f: impl Fn(A) -> A + Send + Sync + 'static) -> Transformer<A> {
    let f = Arc::new(f);
    Transformer::new(move |pattern: Pattern<A>| {
        let f = Arc::clone(&f);
        Pattern::new(move |start, end| {
            pattern
                .query(start, end)
                .into_iter()
                .map(|event| Event {
                    start: event.start,
                    end: event.end,
                    value: f(event.value),
                })
                .collect()
        })
    })
}

#[cfg(test)]
mod tests;
