//! End-to-end tests for the procurement optimizer

use procure_evo::prelude::*;

fn worked_example() -> ItemDataset {
    ItemDataset::new(vec![
        Item::new("A", 10.0, 1.0, 2.0),
        Item::new("B", 5.0, 1.0, 5.0),
    ])
    .unwrap()
}

fn estimate() -> ItemDataset {
    ItemDataset::from_json(
        r#"[
            {"item": "Ready-mix concrete", "price": "1,850", "qty": 12, "gwp": 310, "eta": 4},
            {"item": "Rebar", "price": 2400, "qty": 3, "gwp": 1900, "eta": 6},
            {"item": "Glulam beam", "price": 3100, "qty": 4, "gwp": 120, "eta": 9},
            {"item": "Brick", "price": 6, "qty": 5000, "gwp": 0.25, "eta": 2},
            {"item": "Gypsum board", "price": 210, "qty": 80, "gwp": 3.1, "eta": 1},
            {"item": "Mineral wool", "price": 95, "qty": 120, "gwp": 1.4, "eta": 3},
            {"item": "Aluminium frame", "price": 4200, "qty": 6, "gwp": 820, "eta": 12},
            {"item": "Low-e glazing", "price": 3600, "qty": 10, "gwp": 35, "eta": 8},
            {"item": "Bitumen membrane", "price": 140, "qty": 60, "gwp": 6.5, "eta": 2},
            {"item": "Ceramic tile", "price": 55, "qty": 300, "gwp": 1.2, "eta": 5}
        ]"#,
    )
    .unwrap()
}

fn config(pop_size: usize, n_gen: usize, seed: u64) -> OptimizerConfig {
    OptimizerConfig::default()
        .with_population_size(pop_size)
        .with_generations(n_gen)
        .with_seed(seed)
}

#[test]
fn test_worked_example_reports_empty_selection() {
    for seed in 0..10 {
        let outcome = optimize_materials(&worked_example(), &config(20, 10, seed), None).unwrap();

        assert_eq!(outcome.solutions.len(), 1, "seed {seed}");
        let only = &outcome.solutions[0];
        assert_eq!(only.id, 0);
        assert!(only.items.is_empty());
        assert_eq!(
            (only.total_cost, only.total_carbon, only.total_eta),
            (0.0, 0.0, 0.0)
        );
        assert!(outcome.front_size >= 1);
    }
}

#[test]
fn test_worked_example_at_smallest_population() {
    for seed in 0..1000 {
        let outcome = optimize_materials(&worked_example(), &config(4, 1, seed), None).unwrap();

        assert_eq!(outcome.solutions.len(), 1, "seed {seed}");
        assert!(outcome.solutions[0].items.is_empty(), "seed {seed}");
        assert_eq!(outcome.solutions[0].total_cost, 0.0);
    }
}

#[test]
fn test_single_item_population_holds_both_selections() {
    let priced = ItemDataset::new(vec![Item::new("Only", 3.0, 2.0, 1.5)]).unwrap();
    for seed in 0..200 {
        let outcome = optimize_materials(&priced, &config(2, 1, seed), None).unwrap();
        assert_eq!(outcome.solutions.len(), 1);
        assert!(outcome.solutions[0].items.is_empty());
    }
}

#[test]
fn test_worked_example_totals_without_distinct() {
    let cfg = OptimizerConfig {
        distinct_solutions: false,
        ..config(20, 30, 3)
    };
    let outcome = optimize_materials(&worked_example(), &cfg, None).unwrap();
    assert!(!outcome.solutions.is_empty());
    assert!(outcome.solutions.len() <= 3);
    assert!(outcome.solutions.iter().all(|s| s.items.is_empty()));
    for (i, solution) in outcome.solutions.iter().enumerate() {
        assert_eq!(solution.id, i);
    }
}

#[test]
fn test_single_item_dataset() {
    let priced = ItemDataset::new(vec![Item::new("Only", 3.0, 2.0, 1.5)]).unwrap();
    let outcome = optimize_materials(&priced, &config(6, 4, 11), None).unwrap();
    for solution in &outcome.solutions {
        assert!(solution.items.is_empty() || solution.items == vec!["Only"]);
    }
    assert!(outcome.solutions[0].items.is_empty());

    let free = ItemDataset::new(vec![Item::new("Free", 0.0, 1.0, 0.0)]).unwrap();
    let outcome = optimize_materials(&free, &config(6, 4, 11), None).unwrap();
    assert!(outcome.solutions.len() <= 2);
    for solution in &outcome.solutions {
        assert!(solution.items.is_empty() || solution.items == vec!["Free"]);
    }
}

#[test]
fn test_fixed_seed_is_deterministic() {
    let dataset = estimate();
    let a = optimize_materials(&dataset, &config(40, 30, 2024), None).unwrap();
    let b = optimize_materials(&dataset, &config(40, 30, 2024), None).unwrap();

    assert_eq!(a.solutions, b.solutions);
    assert_eq!(a.front_size, b.front_size);
    assert_eq!(a.evaluations, b.evaluations);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let dataset = estimate();
    let parallel = optimize_materials(&dataset, &config(30, 20, 7), None).unwrap();
    let sequential = optimize_materials(
        &dataset,
        &OptimizerConfig {
            parallel_evaluation: false,
            ..config(30, 20, 7)
        },
        None,
    )
    .unwrap();

    assert_eq!(parallel.solutions, sequential.solutions);
}

#[test]
fn test_solutions_are_mutually_non_dominating() {
    let dataset = estimate();
    let cfg = OptimizerConfig {
        max_solutions: 50,
        ..config(50, 60, 5)
    };
    let outcome = optimize_materials(&dataset, &cfg, None).unwrap();

    assert_eq!(outcome.generations, 60);
    assert_eq!(outcome.termination, TerminationReason::GenerationsCompleted);
    assert!(!outcome.solutions.is_empty());
    assert!(outcome.solutions.len() <= outcome.front_size);

    let vectors: Vec<ObjectiveVector> = outcome
        .solutions
        .iter()
        .map(|s| ObjectiveVector::new(s.total_cost, s.total_carbon, s.total_eta))
        .collect();
    for a in &vectors {
        for b in &vectors {
            assert!(!a.dominates(b));
        }
    }
}

#[test]
fn test_solution_totals_match_dataset() {
    let dataset = estimate();
    let outcome = optimize_materials(&dataset, &config(30, 20, 9), None).unwrap();

    for solution in &outcome.solutions {
        let selected: Vec<&Item> = dataset
            .iter()
            .filter(|item| solution.items.contains(&item.name))
            .collect();
        let cost: f64 = selected.iter().map(|i| i.unit_price).sum();
        let carbon: f64 = selected.iter().map(|i| i.carbon()).sum();
        let eta: f64 = selected.iter().map(|i| i.eta).sum();
        approx::assert_relative_eq!(solution.total_cost, cost, max_relative = 1e-12);
        approx::assert_relative_eq!(solution.total_carbon, carbon, max_relative = 1e-12);
        approx::assert_relative_eq!(solution.total_eta, eta, max_relative = 1e-12);
    }
}

#[test]
fn test_cost_order_is_ascending() {
    let cfg = OptimizerConfig {
        solution_order: SolutionOrder::Cost,
        max_solutions: 10,
        ..config(40, 25, 13)
    };
    let outcome = optimize_materials(&estimate(), &cfg, None).unwrap();
    for pair in outcome.solutions.windows(2) {
        assert!(pair[0].total_cost <= pair[1].total_cost);
    }
}

#[test]
fn test_invalid_input_is_rejected() {
    assert!(matches!(
        ItemDataset::new(Vec::new()),
        Err(DatasetError::Empty)
    ));
    assert!(matches!(
        ItemDataset::from_json("[]"),
        Err(DatasetError::Empty)
    ));

    let dataset = worked_example();
    for cfg in [config(1, 10, 0), config(0, 10, 0), config(10, 0, 0)] {
        assert!(matches!(
            optimize_materials(&dataset, &cfg, None),
            Err(EvolutionError::Configuration(_))
        ));
    }
}

#[test]
fn test_cancelled_before_start_returns_initial_front() {
    let token = CancellationToken::new();
    token.cancel();

    let outcome = optimize_materials(&estimate(), &config(20, 500, 1), Some(token)).unwrap();
    assert_eq!(outcome.termination, TerminationReason::Cancelled);
    assert_eq!(outcome.generations, 0);
    assert!(!outcome.solutions.is_empty());
}

#[test]
fn test_cancel_from_another_thread() {
    let token = CancellationToken::new();
    let remote = token.clone();
    let dataset = estimate();

    let handle = std::thread::spawn(move || {
        optimize_materials(&dataset, &config(20, usize::MAX, 1), Some(token))
    });
    std::thread::sleep(std::time::Duration::from_millis(50));
    remote.cancel();

    let outcome = handle.join().unwrap().unwrap();
    assert_eq!(outcome.termination, TerminationReason::Cancelled);
    assert!(outcome.generations > 0);
    assert!(!outcome.solutions.is_empty());
}

#[test]
fn test_time_limit_stops_long_run() {
    let cfg = OptimizerConfig {
        time_limit_ms: Some(30),
        ..config(20, usize::MAX, 4)
    };
    let outcome = optimize_materials(&estimate(), &cfg, None).unwrap();
    assert_eq!(outcome.termination, TerminationReason::TimeLimit);
    assert!(!outcome.solutions.is_empty());
}

#[test]
fn test_config_from_json_drives_run() {
    let cfg = OptimizerConfig::from_json(r#"{"pop_size": 16, "n_gen": 8, "seed": 3}"#).unwrap();
    let outcome = optimize_materials(&estimate(), &cfg, None).unwrap();
    assert_eq!(outcome.generations, 8);
    assert_eq!(outcome.evaluations, 16 * 9);
    assert_eq!(outcome.stats.generations.len(), 9);
    assert!(outcome.solutions.len() <= 3);
}

#[test]
fn test_outcome_envelope() {
    let outcome = optimize_materials(&worked_example(), &config(8, 4, 0), None).unwrap();
    let json: serde_json::Value = serde_json::from_str(&outcome.to_json().unwrap()).unwrap();

    let first = &json["solutions"][0];
    assert_eq!(first["id"], 0);
    assert_eq!(first["items"], serde_json::json!([]));
    assert_eq!(first["total_cost"], 0.0);
    assert_eq!(json["termination"], "generations_completed");
}
