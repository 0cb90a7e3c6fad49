use antsomg_core::{AntsError, EdgeId, FractionMode, Graph, RngSource};
use antsomg_test_utils::{scenario_graph, ScriptedSource, Threshold};

fn fan_out(costs: &[f64]) -> Graph {
    let targets = ["B", "C", "D", "E", "F", "G"];
    let mut graph = Graph::new(1.0, 1.0);
    graph
        .add_edges(costs.iter().zip(targets).map(|(c, t)| ("A", t, *c)))
        .unwrap();
    graph.set_start("A").unwrap();
    graph
}

fn trails(graph: &Graph) -> Vec<f64> {
    graph.edges().iter().map(|e| e.pheromone_trail()).collect()
}

#[test]
fn test_scenario_threshold_selects_first_edge() {
    let mut graph = scenario_graph();
    let a = graph.start().unwrap();
    let mut rng = ScriptedSource::exploit_at(0.2);

    let mv = graph.make_move(a, 0.5, 0.0, &mut rng).unwrap();

    assert!(!mv.was_exploratory());
    assert_eq!(mv.candidates(), &[EdgeId(0), EdgeId(1)]);
    assert_eq!(mv.selected(), EdgeId(0));
    assert_eq!(rng.threshold_draws, 1);
    assert_eq!(rng.pick_draws, 0);
}

#[test]
fn test_threshold_past_first_boundary_selects_second() {
    let mut graph = scenario_graph();
    let a = graph.start().unwrap();
    let mv = graph
        .make_move(a, 0.5, 0.0, &mut ScriptedSource::exploit_at(1.2))
        .unwrap();
    assert_eq!(mv.selected(), EdgeId(1));
}

#[test]
fn test_threshold_at_total_falls_back_to_last() {
    let mut graph = scenario_graph();
    let a = graph.start().unwrap();
    let mut rng = ScriptedSource::new().then_exploit(Threshold::OfTotal(1.0));
    let mv = graph.make_move(a, 0.5, 0.0, &mut rng).unwrap();
    assert_eq!(mv.selected(), EdgeId(1));
    assert!((graph.edges()[1].pheromone_trail() - 0.5).abs() < 1e-12);
}

#[test]
fn test_floating_point_residue_falls_back_to_last() {
    // 0.1 + 0.2 rounds above 0.3, leaving a residue after the walk
    let mut graph = fan_out(&[10.0, 5.0]);
    assert!((graph.fraction(EdgeId(0)).unwrap() - 0.1).abs() < 1e-15);
    assert!((graph.fraction(EdgeId(1)).unwrap() - 0.2).abs() < 1e-15);

    let a = graph.start().unwrap();
    let mut rng = ScriptedSource::new().then_exploit(Threshold::OfTotal(1.0));
    let mv = graph.make_move(a, 1.0, 0.0, &mut rng).unwrap();
    assert_eq!(mv.selected(), EdgeId(1));
}

#[test]
fn test_threshold_just_below_total_falls_back_to_last() {
    // 1/6 + 1/7 + 1/7 accumulates upward, so the largest float below the
    // total still walks past the last boundary.
    let mut graph = fan_out(&[6.0, 7.0, 7.0]);
    let a = graph.start().unwrap();
    let total: f64 = (0..3).map(|i| graph.fraction(EdgeId(i)).unwrap()).sum();
    let threshold = f64::from_bits(total.to_bits() - 1);
    assert!(threshold < total);

    let mut rng = ScriptedSource::exploit_at(threshold);
    let mv = graph.make_move(a, 1.0, 0.0, &mut rng).unwrap();
    assert_eq!(mv.selected(), EdgeId(2));
    assert_eq!(trails(&graph), vec![0.0, 0.0, 1.0]);
}

#[test]
fn test_exploratory_move_uses_pick() {
    let mut graph = fan_out(&[1.0, 1.0, 1.0]);
    let a = graph.start().unwrap();
    let mut rng = ScriptedSource::explore_pick(2);
    let mv = graph.make_move(a, 0.5, 0.3, &mut rng).unwrap();
    assert!(mv.was_exploratory());
    assert_eq!(mv.selected(), EdgeId(2));
    assert_eq!(rng.pick_draws, 1);
    assert_eq!(rng.threshold_draws, 0);
}

#[test]
fn test_deposit_applies_to_selected_regardless_of_exploration() {
    let mut graph = scenario_graph();
    let a = graph.start().unwrap();
    let mut rng = ScriptedSource::new()
        .then_explore(1)
        .then_exploit(Threshold::Absolute(0.2));

    let first = graph.make_move(a, 0.25, 0.5, &mut rng).unwrap();
    assert!(first.was_exploratory());
    assert_eq!(trails(&graph), vec![0.0, 0.25]);

    let second = graph.make_move(a, 0.25, 0.5, &mut rng).unwrap();
    assert!(!second.was_exploratory());
    assert_eq!(trails(&graph), vec![0.25, 0.25]);
}

#[test]
fn test_selected_is_always_a_candidate() {
    let mut graph = fan_out(&[1.0, 2.0, 3.0, 4.0]);
    let a = graph.start().unwrap();
    let mut rng = RngSource::seeded(99);
    for _ in 0..500 {
        let mv = graph.make_move(a, 0.1, 0.3, &mut rng).unwrap();
        assert!(mv.candidates().contains(&mv.selected()));
        assert_eq!(mv.candidates().len(), 4);
    }
}

#[test]
fn test_full_exploration_is_uniform() {
    let mut graph = fan_out(&[1.0, 2.0, 50.0, 500.0]);
    let a = graph.start().unwrap();
    let mut rng = RngSource::seeded(42);
    let draws = 40_000;
    let mut counts = [0usize; 4];

    for _ in 0..draws {
        let mv = graph.make_move(a, 0.1, 1.0, &mut rng).unwrap();
        assert!(mv.was_exploratory());
        counts[mv.selected().0] += 1;
    }

    for count in counts {
        let freq = count as f64 / draws as f64;
        assert!((freq - 0.25).abs() < 0.02, "frequency {freq} not near 0.25");
    }
}

#[test]
fn test_exploitation_is_proportional_to_fraction() {
    // Zero deposit keeps the weights fixed at [1.0, 0.5].
    let mut graph = scenario_graph();
    let a = graph.start().unwrap();
    let mut rng = RngSource::seeded(7);
    let draws = 30_000;
    let mut first = 0usize;

    for _ in 0..draws {
        let mv = graph.make_move(a, 0.0, 0.0, &mut rng).unwrap();
        assert!(!mv.was_exploratory());
        if mv.selected() == EdgeId(0) {
            first += 1;
        }
    }

    let freq = first as f64 / draws as f64;
    assert!((freq - 2.0 / 3.0).abs() < 0.02, "frequency {freq} not near 2/3");
}

#[test]
fn test_reinforcement_biases_power_mode() {
    let mut graph = fan_out(&[1.0, 1.0]);
    graph.set_fraction_mode(FractionMode::Power);
    let a = graph.start().unwrap();

    // Reinforce the first edge by hand through scripted exploration.
    let mut rng = ScriptedSource::new();
    for _ in 0..10 {
        rng = rng.then_explore(0);
    }
    for _ in 0..10 {
        graph.make_move(a, 1.0, 1.0, &mut rng).unwrap();
    }
    assert!(graph.fraction(EdgeId(0)).unwrap() > graph.fraction(EdgeId(1)).unwrap());

    let mut rng = RngSource::seeded(3);
    let mut first = 0usize;
    for _ in 0..1000 {
        if graph.make_move(a, 0.0, 0.0, &mut rng).unwrap().selected() == EdgeId(0) {
            first += 1;
        }
    }
    // Weights are 10 + 1 against 0 + 1.
    assert!(first > 850, "reinforced edge chosen only {first} times");
}

#[test]
fn test_dead_end_leaves_state_unchanged() {
    let mut graph = scenario_graph();
    let a = graph.start().unwrap();
    graph
        .make_move(a, 0.5, 0.0, &mut ScriptedSource::exploit_at(0.2))
        .unwrap();
    let before = trails(&graph);

    let b = graph.find_vertex("B").unwrap();
    let mut rng = ScriptedSource::exploit_at(0.0);
    let err = graph.make_move(b, 0.5, 0.0, &mut rng).unwrap_err();

    assert!(matches!(err, AntsError::DeadEnd { .. }));
    assert_eq!(trails(&graph), before);
    assert_eq!(rng.threshold_draws, 0);
}

#[test]
fn test_evaporation_after_moves() {
    let mut graph = scenario_graph();
    let a = graph.start().unwrap();
    graph
        .make_move(a, 1.0, 0.0, &mut ScriptedSource::exploit_at(0.2))
        .unwrap();
    graph.evaporate_all(0.05).unwrap();
    assert!((graph.edges()[0].pheromone_trail() - 0.95).abs() < 1e-12);
    assert_eq!(graph.edges()[1].pheromone_trail(), 0.0);

    // Repeated calls compound.
    graph.evaporate_all(0.05).unwrap();
    assert!((graph.edges()[0].pheromone_trail() - 0.9025).abs() < 1e-12);
}

#[test]
fn test_scenario_export_snapshot() {
    let graph = scenario_graph();
    let topology = graph.export_topology();
    let lines: Vec<&str> = topology.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"A -> B [ label="p=0.000,c=1.00"];"#,
            r#"A -> A [ label="p=0.000,c=2.00"];"#,
        ]
    );
}

#[test]
fn test_export_tracks_trail_changes() {
    let mut graph = scenario_graph();
    let a = graph.start().unwrap();
    graph
        .make_move(a, 0.5, 0.0, &mut ScriptedSource::exploit_at(0.2))
        .unwrap();
    let export = graph.export_topology();
    assert!(export.starts_with(r#"A -> B [ label="p=0.500,c=1.00"];"#));
    assert_eq!(export, graph.export_topology());
}
