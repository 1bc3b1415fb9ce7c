use super::*;

fn starts<A>(pattern: &Pattern<A>, start: f64, end: f64) -> Vec<f64> {
    query(start, end, pattern).iter().map(|e| e.start).collect()
}

fn values(pattern: &Pattern<&'static str>, start: f64, end: f64) -> Vec<&'static str> {
    query(start, end, pattern).iter().map(|e| e.value).collect()
}

fn bd() -> Pattern<&'static str> {
    periodic(1.0, 1.0, 0.0, "bd")
}

fn sn() -> Pattern<&'static str> {
    periodic(1.0, 1.0, 0.0, "sn")
}

fn constant(pattern: Pattern<&'static str>) -> Transformer<&'static str> {
    Transformer::new(move |_| pattern.clone())
}

#[test]
fn beat_emits_one_event_per_cycle() {
    let pattern = beat();
    assert_eq!(starts(&pattern, 0.0, 1.0), vec![0.0]);
    assert_eq!(starts(&pattern, 0.0, 2.0), vec![0.0, 1.0]);
    assert_eq!(starts(&pattern, 0.0, 0.5), vec![0.0]);
    assert_eq!(starts(&pattern, 0.5, 1.0), Vec::<f64>::new());
    assert_eq!(starts(&pattern, 1.0, 2.0), vec![1.0]);
    assert_eq!(starts(&pattern, 0.5, 1.5), vec![1.0]);
    assert_eq!(starts(&pattern, 0.5, 2.5), vec![1.0, 2.0]);
}

#[test]
fn periodic_honours_phase_and_duration() {
    let pattern = periodic(2.0, 0.5, 0.25, ());
    let events = query(0.0, 5.0, &pattern);
    let spans: Vec<(f64, f64)> = events.iter().map(|e| (e.start, e.end)).collect();
    assert_eq!(spans, vec![(0.25, 0.75), (2.25, 2.75), (4.25, 4.75)]);
}

#[test]
fn periodic_handles_negative_windows() {
    assert_eq!(starts(&beat(), -2.0, 0.0), vec![-2.0, -1.0]);
}

#[test]
fn shifted_beat() {
    let pattern = shift(0.5).apply(beat());
    assert_eq!(starts(&pattern, 0.0, 1.0), vec![0.5]);
    assert_eq!(starts(&pattern, 0.0, 2.0), vec![0.5, 1.5]);
    assert_eq!(starts(&pattern, 0.0, 0.5), Vec::<f64>::new());
    assert_eq!(starts(&pattern, 0.5, 1.0), vec![0.5]);
    assert_eq!(starts(&pattern, 1.0, 2.0), vec![1.5]);
    assert_eq!(starts(&pattern, 0.5, 1.5), vec![0.5]);
    assert_eq!(starts(&pattern, 0.5, 2.5), vec![0.5, 1.5]);
}

#[test]
fn shift_is_undone_by_its_negation() {
    let pattern = periodic(0.75, 0.25, 0.125, ());
    let round_trip = shift(-0.5).apply(shift(0.5).apply(pattern.clone()));
    assert_eq!(query(0.0, 4.0, &round_trip), query(0.0, 4.0, &pattern));
}

#[test]
fn slowed_beat() {
    let pattern = slow(2.0).apply(beat());
    assert_eq!(starts(&pattern, 0.0, 1.0), vec![0.0]);
    assert_eq!(starts(&pattern, 0.0, 2.0), vec![0.0]);
    assert_eq!(starts(&pattern, 0.0, 4.0), vec![0.0, 2.0]);
    assert_eq!(starts(&pattern, 0.0, 0.5), vec![0.0]);
    assert_eq!(starts(&pattern, 0.5, 1.0), Vec::<f64>::new());
    assert_eq!(starts(&pattern, 1.0, 2.0), Vec::<f64>::new());
    assert_eq!(starts(&pattern, 0.5, 2.5), vec![2.0]);
    assert_eq!(query(0.0, 1.0, &pattern)[0].end, 2.0);
}

#[test]
fn fast_beat() {
    let pattern = fast(2.0).apply(beat());
    assert_eq!(starts(&pattern, 0.0, 1.0), vec![0.0, 0.5]);
    assert_eq!(starts(&pattern, 0.0, 2.0), vec![0.0, 0.5, 1.0, 1.5]);
    assert_eq!(starts(&pattern, 0.0, 0.5), vec![0.0]);
    assert_eq!(starts(&pattern, 0.5, 1.0), vec![0.5]);
    assert_eq!(starts(&pattern, 1.0, 2.0), vec![1.0, 1.5]);
    assert_eq!(starts(&pattern, 0.5, 1.5), vec![0.5, 1.0]);
    assert_eq!(starts(&pattern, 0.5, 2.5), vec![0.5, 1.0, 1.5, 2.0]);
}

#[test]
fn fast_is_slow_by_the_reciprocal() {
    let pattern = periodic(0.3, 0.1, 0.05, ());
    let a = fast(3.0).apply(pattern.clone());
    let b = slow(1.0 / 3.0).apply(pattern);
    assert_eq!(query(0.0, 2.0, &a), query(0.0, 2.0, &b));
}

#[test]
fn stack_keeps_child_order_for_ties() {
    let pattern = stack_patterns(vec![bd(), sn()]);
    assert_eq!(values(&pattern, 0.0, 1.0), vec!["bd", "sn"]);
    assert_eq!(values(&pattern, 0.0, 2.0), vec!["bd", "sn", "bd", "sn"]);
    assert_eq!(starts(&pattern, 0.0, 2.0), vec![0.0, 0.0, 1.0, 1.0]);
}

#[test]
fn slow_and_shift_apply_to_stacks() {
    let slowed = slow(2.0).apply(stack_patterns(vec![bd(), sn()]));
    assert_eq!(values(&slowed, 0.0, 2.0), vec!["bd", "sn"]);
    let shifted = shift(0.5).apply(stack_patterns(vec![bd(), sn()]));
    assert_eq!(starts(&shifted, 0.0, 2.0), vec![0.5, 0.5, 1.5, 1.5]);
}

#[test]
fn stack_of_transformers_sorts_by_start() {
    let transform = stack(vec![shift(0.5), Transformer::identity()]);
    let pattern = transform.apply(bd());
    assert_eq!(starts(&pattern, 0.0, 2.0), vec![0.0, 0.5, 1.0, 1.5]);
}

#[test]
fn alt_selects_one_child_per_cycle() {
    let pattern = alt(vec![constant(bd()), constant(sn())]).apply(silence());
    assert_eq!(values(&pattern, 0.0, 1.0), vec!["bd"]);
    assert_eq!(values(&pattern, 0.0, 2.0), vec!["bd", "sn"]);
    assert_eq!(values(&pattern, 0.0, 4.0), vec!["bd", "sn", "bd", "sn"]);
    assert_eq!(starts(&pattern, 0.0, 4.0), vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(values(&pattern, 1.0, 3.0), vec!["sn", "bd"]);
}

#[test]
fn nested_alt() {
    let inner = alt(vec![constant(bd()), constant(sn())]);
    let pattern = alt(vec![inner, constant(sn())]).apply(silence());
    assert_eq!(values(&pattern, 0.0, 4.0), vec!["bd", "sn", "bd", "sn"]);
    assert_eq!(values(&pattern, 1.0, 3.0), vec!["sn", "bd"]);
}

#[test]
fn alt_of_a_faster_alt() {
    let inner = compose(vec![alt(vec![constant(bd()), constant(sn())]), fast(2.0)]);
    let pattern = alt(vec![inner, constant(sn())]).apply(silence());
    assert_eq!(starts(&pattern, 0.0, 1.0), vec![0.0, 0.5]);
    assert_eq!(values(&pattern, 0.0, 1.0), vec!["bd", "sn"]);
    assert_eq!(starts(&pattern, 0.0, 4.0), vec![0.0, 0.5, 1.0, 2.0, 2.5, 3.0]);
    assert_eq!(
        values(&pattern, 0.0, 4.0),
        vec!["bd", "sn", "sn", "bd", "sn", "sn"]
    );
    assert_eq!(starts(&pattern, 1.0, 3.0), vec![1.0, 2.0, 2.5]);
}

#[test]
fn alt_splits_windows_at_cycle_boundaries() {
    let pattern = alt(vec![constant(bd()), constant(sn())]).apply(silence());
    assert_eq!(values(&pattern, 0.5, 2.5), vec!["sn", "bd"]);
}

#[test]
fn events_are_evenly_distributed() {
    let plain = compose(vec![fast(2.0), slow(2.0)]).apply(bd());
    assert_eq!(query(0.0, 1.0, &plain).len(), 1);
    assert_eq!(query(1.0, 2.0, &plain).len(), 1);

    let with_alt = compose(vec![alt(vec![fast(2.0)]), slow(2.0)]).apply(bd());
    for cycle in 0..4 {
        let cycle = cycle as f64;
        assert_eq!(query(cycle, cycle + 1.0, &with_alt).len(), 1);
    }
}

#[test]
fn alt_takes_negative_queries() {
    let pattern = alt(vec![constant(bd()), constant(sn())]).apply(silence());
    let events = query(-1.0, 0.0, &pattern);
    assert_eq!(
        events,
        vec![Event {
            start: -1.0,
            end: 0.0,
            value: "sn"
        }]
    );
}

#[test]
fn alt_without_children_is_silent() {
    let pattern = alt::<&'static str>(vec![]).apply(bd());
    assert!(query(0.0, 4.0, &pattern).is_empty());
}

#[test]
fn compose_applies_left_to_right() {
    let pattern = compose(vec![shift(0.5), slow(2.0)]).apply(beat());
    // The shift is stretched along with the beat.
    assert_eq!(starts(&pattern, 0.0, 4.0), vec![1.0, 3.0]);
}

#[test]
fn and_stacks_the_input_with_its_transformation() {
    let pattern = and(constant(sn())).apply(bd());
    assert_eq!(values(&pattern, 0.0, 2.0), vec!["bd", "sn", "bd", "sn"]);
}

#[test]
fn silence_is_empty() {
    assert!(query(-10.0, 10.0, &silence::<()>()).is_empty());
}

#[test]
fn gate_opens_every_period() {
    let pattern = gate(1.0, 2.0).apply(fast(4.0).apply(beat()));
    assert_eq!(starts(&pattern, 0.0, 4.0), vec![1.0, 1.25, 1.5, 1.75, 3.0, 3.25, 3.5, 3.75]);
}

#[test]
fn gate_clips_to_the_query_window() {
    let pattern = gate(0.0, 4.0).apply(fast(2.0).apply(beat()));
    assert_eq!(starts(&pattern, 0.0, 4.5), vec![0.0, 0.5, 4.0]);
}

#[test]
fn gate_ignores_windows_opened_before_the_query() {
    let pattern = gate(0.0, 4.0).apply(fast(2.0).apply(beat()));
    assert_eq!(starts(&pattern, 0.5, 8.0), vec![4.0, 4.5]);
}

#[test]
fn gate_agrees_with_a_periodic_mask() {
    let input = || fast(4.0).apply(beat());
    for (phase, period) in [(0.0, 1.0), (1.0, 2.0), (0.5, 3.0), (2.0, 4.0)] {
        let gated = gate(phase, period).apply(input());
        let masked = gate_with(periodic(period, 1.0, phase, ())).apply(input());
        for (start, end) in [(0.0, 4.0), (0.5, 1.5), (1.25, 6.0), (-3.0, 0.75)] {
            assert_eq!(
                query(start, end, &gated),
                query(start, end, &masked),
                "gate({}, {}) over [{}, {})",
                phase,
                period,
                start,
                end
            );
        }
    }
}

#[test]
fn gate_with_mask() {
    let mask = periodic(2.0, 0.5, 0.0, ());
    let pattern = gate_with(mask).apply(fast(4.0).apply(beat()));
    assert_eq!(starts(&pattern, 0.0, 4.0), vec![0.0, 0.25, 2.0, 2.25]);
}

#[test]
fn fmap_changes_values_only() {
    let pattern = fmap(|value: &'static str| if value == "bd" { "kick" } else { value }).apply(bd());
    assert_eq!(
        query(0.0, 1.0, &pattern),
        vec![Event {
            start: 0.0,
            end: 1.0,
            value: "kick"
        }]
    );
}

#[test]
fn huge_times_do_not_stall_periodic() {
    let (start, end) = (1e20, 1e20 + 65536.0);
    let events = query(start, end, &beat());
    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e.start >= start && e.start < end));
}

#[test]
fn huge_shifts_terminate() {
    let pattern = shift::<()>(-1e20).apply(beat());
    assert!(query(0.0, 1e5, &pattern).len() <= 1e5 as usize);
    let pattern = shift::<()>(1e20).apply(beat());
    for b in [0.0, 1.0, 2.0] {
        assert!(query(b, b + 1.0, &pattern).len() <= 1);
    }
}

#[test]
fn huge_times_do_not_stall_alt_or_gate() {
    let (start, end) = (1e20, 1e20 + 65536.0);
    let alternating = alt(vec![fast(2.0), slow(2.0)]).apply(beat());
    assert!(query(start, end, &alternating).len() <= 4);
    let gated = gate::<()>(0.0, 2.0).apply(beat());
    assert!(query(start, end, &gated).len() <= 4);
}

#[test]
fn patterns_are_requeryable() {
    let pattern = alt(vec![fast(2.0), slow(2.0)]).apply(beat());
    assert_eq!(query(0.0, 3.0, &pattern), query(0.0, 3.0, &pattern));
}
