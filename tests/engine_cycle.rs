use emergraph::{EdgeSpec, GraphRevealEngine, GraphSpec, NodeSpec, RevealConfig, TimeMs};

fn node(id: &str, x: f64, y: f64) -> NodeSpec {
    NodeSpec {
        id: id.to_string(),
        label: id.to_ascii_uppercase(),
        x,
        y,
    }
}

fn edge(from: &str, to: &str) -> EdgeSpec {
    EdgeSpec {
        from: from.to_string(),
        to: to.to_string(),
    }
}

fn abc_engine(edges: Vec<EdgeSpec>) -> GraphRevealEngine {
    let graph = GraphSpec {
        nodes: vec![
            node("a", 10.0, 10.0),
            node("b", 50.0, 50.0),
            node("c", 90.0, 90.0),
        ],
        edges,
    };
    GraphRevealEngine::new(graph, RevealConfig::default()).unwrap()
}

/// Tick in 10 ms steps up to and including `until`.
fn run_to(engine: &mut GraphRevealEngine, from: u64, until: u64) {
    let mut t = from;
    while t <= until {
        engine.tick(TimeMs(t));
        t += 10;
    }
}

#[test]
fn default_cycle_timeline() {
    let mut e = abc_engine(vec![edge("a", "b"), edge("b", "c")]);

    run_to(&mut e, 0, 390);
    assert!(e.state().revealed_nodes.is_empty());
    assert!(!e.is_complete());

    // Nodes land one per interval, entrance flips 50 ms later.
    run_to(&mut e, 400, 400);
    assert_eq!(e.state().revealed_nodes.len(), 1);
    assert_eq!(e.state().revealed_nodes[0].spec.id, "a");
    assert_eq!(e.state().revealed_nodes[0].entrance_progress, 0.0);
    run_to(&mut e, 410, 450);
    assert_eq!(e.state().revealed_nodes[0].entrance_progress, 1.0);

    run_to(&mut e, 460, 890);
    assert_eq!(e.state().revealed_nodes.len(), 2);
    assert!(e.state().revealed_edges.is_empty());

    // First edge attempt after both endpoints exist reveals (a, b).
    run_to(&mut e, 900, 900);
    assert_eq!(e.state().revealed_edges.len(), 1);
    assert_eq!(e.state().revealed_edges[0].spec.from, "a");

    run_to(&mut e, 910, 1200);
    assert_eq!(e.state().revealed_nodes.len(), 3);
    assert_eq!(e.state().revealed_edges.len(), 2);
    assert!(e.is_complete());

    // Quiescence holds the completed state, then the cycle restarts from
    // empty and the first node lands one interval later.
    run_to(&mut e, 1210, 4190);
    assert!(e.is_complete());
    assert_eq!(e.cycles_completed(), 0);

    run_to(&mut e, 4200, 4200);
    assert_eq!(e.cycles_completed(), 1);
    assert!(e.state().revealed_nodes.is_empty());
    assert!(e.state().revealed_edges.is_empty());
    assert!(!e.is_complete());

    run_to(&mut e, 4210, 4590);
    assert!(e.state().revealed_nodes.is_empty());
    run_to(&mut e, 4600, 4600);
    assert_eq!(e.state().revealed_nodes.len(), 1);
    assert_eq!(e.state().revealed_nodes[0].spec.id, "a");
}

#[test]
fn nodes_never_skip_or_repeat_across_a_cycle() {
    let mut e = abc_engine(vec![]);
    run_to(&mut e, 0, 1200);
    let ids: Vec<&str> = e
        .state()
        .revealed_nodes
        .iter()
        .map(|n| n.spec.id.as_str())
        .collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(e.state().next_node_cursor, 3);
}

#[test]
fn deferred_edge_keeps_spec_order() {
    // (c, a) is unsatisfiable until the last node appears; (a, b) must wait
    // behind it even though its endpoints are ready first.
    let mut e = abc_engine(vec![edge("c", "a"), edge("a", "b")]);

    run_to(&mut e, 0, 1190);
    assert!(e.state().revealed_edges.is_empty());
    assert_eq!(e.state().next_edge_cursor, 0);

    run_to(&mut e, 1200, 1200);
    assert_eq!(e.state().revealed_edges.len(), 1);
    assert_eq!(e.state().revealed_edges[0].spec.from, "c");

    run_to(&mut e, 1210, 1500);
    assert_eq!(e.state().revealed_edges.len(), 2);
    assert_eq!(e.state().revealed_edges[1].spec.from, "a");
    assert!(e.is_complete());
}

#[test]
fn manual_reset_matches_fresh_construction() {
    let mut e = abc_engine(vec![edge("a", "b")]);
    run_to(&mut e, 0, 1000);
    e.reset();

    assert!(e.state().revealed_nodes.is_empty());
    assert!(e.state().revealed_edges.is_empty());
    assert_eq!(e.state().next_node_cursor, 0);
    assert_eq!(e.state().next_edge_cursor, 0);
    assert!(!e.is_complete());
    assert_eq!(e.cycles_completed(), 0);
}

#[test]
fn empty_graph_completes_without_revealing() {
    let graph = GraphSpec {
        nodes: vec![],
        edges: vec![],
    };
    let mut e = GraphRevealEngine::new(graph, RevealConfig::default()).unwrap();

    e.tick(TimeMs(0));
    assert!(e.is_complete());

    run_to(&mut e, 10, 2990);
    assert_eq!(e.cycles_completed(), 0);
    run_to(&mut e, 3000, 3000);
    assert_eq!(e.cycles_completed(), 1);
    assert!(e.state().revealed_nodes.is_empty());
}

#[test]
fn sparse_ticks_still_advance_without_bursting() {
    // A host that ticks rarely advances at most one reveal per timeline per
    // tick; elapsed time alone never bursts through the sequence.
    let mut e = abc_engine(vec![]);
    e.tick(TimeMs(0));
    e.tick(TimeMs(5000));
    assert_eq!(e.state().revealed_nodes.len(), 1);
    e.tick(TimeMs(10_000));
    assert_eq!(e.state().revealed_nodes.len(), 2);
}

#[test]
fn custom_intervals_are_honored() {
    let graph = GraphSpec {
        nodes: vec![node("a", 10.0, 10.0), node("b", 20.0, 20.0)],
        edges: vec![edge("a", "b")],
    };
    let config = RevealConfig {
        node_interval_ms: 100,
        edge_interval_ms: 70,
        entrance_delay_ms: 10,
        quiescence_ms: 500,
    };
    let mut e = GraphRevealEngine::new(graph, config).unwrap();

    run_to(&mut e, 0, 90);
    assert!(e.state().revealed_nodes.is_empty());
    run_to(&mut e, 100, 200);
    assert_eq!(e.state().revealed_nodes.len(), 2);

    // Edge attempts at 70, 140 defer; 210 succeeds.
    run_to(&mut e, 210, 210);
    assert_eq!(e.state().revealed_edges.len(), 1);
    assert!(e.is_complete());

    // Restart 500 ms after completion.
    run_to(&mut e, 220, 700);
    assert_eq!(e.cycles_completed(), 0);
    run_to(&mut e, 710, 710);
    assert_eq!(e.cycles_completed(), 1);
}
