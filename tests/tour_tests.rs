//! Tests for tour problems: distances, 2-opt moves, HCP and TSP instances.

use ils_solver::error::{Error, InvalidInstance};
use ils_solver::problem::{Move, Problem};
use ils_solver::solve;
use ils_solver::tour::hcp::{HcpInstance, HcpLoader};
use ils_solver::tour::tsp::{TspInstance, TspLoader};
use ils_solver::tour::{Construction, DistanceMatrix, Point, TourProblem};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const RING_HCP: &str = "\
NAME : ring6
COMMENT : six nodes in a ring
TYPE : HCP
DIMENSION : 6
EDGE_DATA_FORMAT : EDGE_LIST
EDGE_DATA_SECTION
1 2
2 3
3 4
4 5
5 6
6 1
-1
EOF
";

const SQUARE_TSP: &str = "\
NAME : square
TYPE : TSP
DIMENSION : 4
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0 0
2 0 10
3 10 0
4 10.4 10.6
EOF
";

/// Creates a complete graph on `n` nodes.
fn create_complete_graph(n: usize) -> HcpInstance {
    let adjacency: Vec<Vec<usize>> = (0..n)
        .map(|u| (0..n).filter(|&v| v != u).collect())
        .collect();
    HcpInstance::from_adjacency("complete", &adjacency).unwrap()
}

/// Creates a TSP problem with random points.
fn create_test_problem(n: usize, seed: u64) -> TourProblem {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points = (0..n)
        .map(|_| Point::new(rng.gen_range(0..1000), rng.gen_range(0..1000)))
        .collect();
    TspInstance::new("random", points).to_problem()
}

#[test]
fn test_point_distance_rounds() {
    assert_eq!(Point::new(0, 0).distance(&Point::new(3, 4)), 5);
    assert_eq!(Point::new(0, 0).distance(&Point::new(1, 1)), 1);
    assert_eq!(Point::new(0, 0).distance(&Point::new(10, 10)), 14);
}

#[test]
fn test_distance_matrix_is_symmetric() {
    let matrix = DistanceMatrix::from_fn(5, |i, j| (i * 10 + j) as i64);

    for i in 0..5 {
        assert_eq!(matrix.get(i, i), 0);
        for j in 0..5 {
            assert_eq!(matrix.get(i, j), matrix.get(j, i));
        }
    }
    assert_eq!(matrix.tour_length(&[0, 1, 2]), 1 + 12 + 2);
}

#[test]
fn test_candidate_moves_order() {
    let problem = create_test_problem(5, 0);
    let moves: Vec<Move> = problem.candidate_moves().collect();

    let expected: Vec<Move> = [(0, 2), (0, 3), (0, 4), (1, 3), (1, 4), (2, 4)]
        .iter()
        .map(|&(i, j)| Move::new(i, j))
        .collect();
    assert_eq!(moves, expected);
}

#[test]
fn test_apply_move_reverses_segment() {
    let problem = create_test_problem(6, 0);
    let mut tour = vec![0, 1, 2, 3, 4, 5];

    problem.apply_move(&mut tour, Move::new(1, 4));

    assert_eq!(tour, vec![0, 1, 4, 3, 2, 5]);
    assert!(!problem.is_legal(&tour, Move::new(2, 3)));
    assert!(!problem.is_legal(&tour, Move::new(0, 6)));
}

#[test]
fn test_delta_cost_matches_full_evaluation() {
    let problem = create_test_problem(12, 9);
    let tour = problem.construct(3);
    let cost = problem.cost(&tour);

    for mv in problem.candidate_moves() {
        let mut moved = tour.clone();
        problem.apply_move(&mut moved, mv);
        assert_eq!(
            problem.delta_cost(&tour, mv),
            problem.cost(&moved) - cost,
            "delta mismatch for {:?}",
            mv
        );
    }
}

#[test]
fn test_nearest_neighbor_construction() {
    let points = vec![
        Point::new(0, 0),
        Point::new(100, 0),
        Point::new(10, 0),
        Point::new(50, 0),
    ];
    let problem = TspInstance::new("line", points).to_problem();

    assert_eq!(problem.construction, Construction::NearestNeighbor);
    assert_eq!(problem.construct(0), vec![0, 2, 3, 1]);
    assert_eq!(problem.construct(5), vec![1, 3, 2, 0]);
}

#[test]
fn test_prefer_adjacent_construction() {
    let instance = HcpLoader::new().parse(RING_HCP, "fallback").unwrap();
    let problem = instance.to_problem();

    let tour = problem.construct(0);
    assert_eq!(tour, vec![0, 1, 2, 3, 4, 5]);
    assert!(instance.is_hamiltonian_cycle(&tour));
    assert!(problem.is_optimal(problem.cost(&tour)));
}

#[test]
fn test_seeds_are_start_nodes() {
    let problem = create_test_problem(6, 0);
    assert_eq!(problem.seeds(3), vec![0, 1, 2]);
    assert_eq!(problem.seeds(100), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_hcp_loader_reads_ring() {
    let instance = HcpLoader::new().parse(RING_HCP, "fallback").unwrap();

    assert_eq!(instance.name, "ring6");
    assert_eq!(instance.node_count(), 6);
    assert_eq!(instance.edge_count(), 6);
    assert!(instance.is_adjacent(0, 5));
    assert!(!instance.is_adjacent(0, 3));

    let distances = instance.proxy_distances();
    assert_eq!(distances.get(0, 1), 1);
    assert_eq!(distances.get(0, 3), 2);
    assert_eq!(distances.get(2, 2), 0);
}

#[test]
fn test_hcp_loader_uses_fallback_name() {
    let text = "DIMENSION : 3\nEDGE_DATA_SECTION\n1 2\n2 3\n3 1\n-1\n";
    let instance = HcpLoader::new().parse(text, "triangle").unwrap();
    assert_eq!(instance.name, "triangle");
}

#[test]
fn test_hcp_loader_errors() {
    let loader = HcpLoader::new();

    let out_of_range = "DIMENSION : 3\nEDGE_DATA_SECTION\n1 2\n2 4\n-1\n";
    assert!(matches!(
        loader.parse(out_of_range, "x"),
        Err(Error::IndexOutOfBounds { index: 4, max: 3 })
    ));

    let isolated = "DIMENSION : 4\nEDGE_DATA_SECTION\n1 2\n2 3\n3 1\n-1\n";
    assert!(matches!(
        loader.parse(isolated, "x"),
        Err(Error::InvalidInstance(InvalidInstance::IsolatedNode(3)))
    ));

    let self_loop = "DIMENSION : 2\nEDGE_DATA_SECTION\n1 1\n1 2\n-1\n";
    assert!(matches!(
        loader.parse(self_loop, "x"),
        Err(Error::InvalidInstance(InvalidInstance::SelfLoop(0)))
    ));

    let missing = "NAME : nothing\nDIMENSION : 3\n";
    assert!(matches!(loader.parse(missing, "x"), Err(Error::Parse { .. })));

    let garbage = "DIMENSION : 3\nEDGE_DATA_SECTION\n1 two\n";
    assert!(matches!(
        loader.parse(garbage, "x"),
        Err(Error::Parse { line: 3, .. })
    ));

    let too_big = "DIMENSION : 20\nEDGE_DATA_SECTION\n1 2\n-1\n";
    assert!(matches!(
        loader.with_max_nodes(10).parse(too_big, "x"),
        Err(Error::IndexOutOfBounds { index: 20, max: 10 })
    ));
}

#[test]
fn test_adjacency_must_be_bidirectional() {
    let adjacency = vec![vec![1, 2], vec![2], vec![0, 1]];
    let result = HcpInstance::from_adjacency("one-way", &adjacency);

    assert!(matches!(
        result,
        Err(Error::InvalidInstance(InvalidInstance::NotBidirectional { from: 0, to: 1 }))
    ));
    assert!(matches!(
        HcpInstance::from_adjacency("empty", &[]),
        Err(Error::InvalidInstance(InvalidInstance::EmptyInstance))
    ));
}

#[test]
fn test_complete_graph_reaches_optimum() {
    let instance = create_complete_graph(4);
    let result = solve(instance.to_problem(), 4);

    assert_eq!(result.cost, 4);
    assert!(result.optimal);
    assert_eq!(result.seeds_run, 1);
    assert!(instance.is_hamiltonian_cycle(&result.configuration));
}

#[test]
fn test_hcp_cost_floor() {
    let (instance, _) = HcpInstance::generate(30, 0.05, 7).unwrap();
    let result = solve(instance.to_problem(), 5);

    assert!(result.cost >= 30);
    assert_eq!(result.optimal, result.cost == 30);
    assert_eq!(
        instance.is_hamiltonian_cycle(&result.configuration),
        result.cost == 30
    );
}

#[test]
fn test_generator_hides_a_cycle() {
    let (instance, cycle) = HcpInstance::generate(20, 0.1, 42).unwrap();

    assert_eq!(instance.node_count(), 20);
    assert!(instance.edge_count() >= 20);
    assert!(instance.is_hamiltonian_cycle(&cycle));

    let (again, same_cycle) = HcpInstance::generate(20, 0.1, 42).unwrap();
    assert_eq!(cycle, same_cycle);
    assert_eq!(instance.edge_count(), again.edge_count());

    assert!(matches!(
        HcpInstance::generate(2, 0.5, 0),
        Err(Error::InvalidInstance(InvalidInstance::BadDimension(_)))
    ));
}

#[test]
fn test_hamiltonian_check_rejects_bad_tours() {
    let instance = HcpLoader::new().parse(RING_HCP, "x").unwrap();

    assert!(instance.is_hamiltonian_cycle(&[3, 4, 5, 0, 1, 2]));
    assert!(!instance.is_hamiltonian_cycle(&[0, 1, 2, 3, 4]));
    assert!(!instance.is_hamiltonian_cycle(&[0, 1, 2, 3, 4, 4]));
    assert!(!instance.is_hamiltonian_cycle(&[0, 2, 1, 3, 4, 5]));
}

#[test]
fn test_tsp_loader_reads_coordinates() {
    let instance = TspLoader::new().parse(SQUARE_TSP, "fallback").unwrap();

    assert_eq!(instance.name, "square");
    assert_eq!(instance.node_count(), 4);
    assert_eq!(instance.points[3], Point::new(10, 11));

    let problem = instance.to_problem();
    assert_eq!(problem.optimum(), None);
    assert_eq!(problem.distances.get(0, 1), 10);
}

#[test]
fn test_tsp_loader_errors() {
    assert!(matches!(
        TspLoader::new().with_max_points(2).parse(SQUARE_TSP, "x"),
        Err(Error::IndexOutOfBounds { index: 3, max: 2 })
    ));
    assert!(matches!(
        TspLoader::new().parse("NAME : none\nNODE_COORD_SECTION\nEOF\n", "x"),
        Err(Error::InvalidInstance(InvalidInstance::EmptyInstance))
    ));
    assert!(matches!(
        TspLoader::new().parse("NODE_COORD_SECTION\n1 0 zero\n", "x"),
        Err(Error::Parse { line: 2, .. })
    ));
}

#[test]
fn test_tsp_loader_rejects_huge_coordinates() {
    let loader = TspLoader::new();

    assert!(matches!(
        loader.parse("NODE_COORD_SECTION\n1 1e300 0\n2 -1e300 0\n3 0 5\n", "x"),
        Err(Error::Parse { line: 2, .. })
    ));
    assert!(matches!(
        loader.parse("NODE_COORD_SECTION\n1 0 0\n2 0 inf\n", "x"),
        Err(Error::Parse { line: 3, .. })
    ));

    let far = loader
        .parse("NODE_COORD_SECTION\n1 2147483648 0\n2 -2147483648 0\n", "x")
        .unwrap();
    let problem = far.to_problem();
    assert_eq!(problem.distances.get(0, 1), 4294967296);
}

#[test]
fn test_tsp_tour_file() {
    let loader = TspLoader::new();
    let instance = loader.parse(SQUARE_TSP, "x").unwrap();

    let tour = loader
        .parse_tour("NAME : square.opt.tour\nTYPE : TOUR\nTOUR_SECTION\n1\n2\n4\n3\n-1\nEOF\n")
        .unwrap();
    assert_eq!(tour, vec![0, 1, 3, 2]);
    assert_eq!(instance.tour_length(&tour).unwrap(), 10 + 10 + 11 + 10);

    assert!(matches!(
        instance.tour_length(&[0, 1, 7]),
        Err(Error::IndexOutOfBounds { .. })
    ));
    assert!(matches!(
        loader.parse_tour("TOUR_SECTION\n0\n-1\n"),
        Err(Error::IndexOutOfBounds { index: 0, .. })
    ));
}

#[test]
fn test_tsp_solve_is_deterministic() {
    let problem = create_test_problem(25, 17);
    let first = solve(problem.clone(), 5);
    let second = solve(problem, 5);

    assert_eq!(first.configuration, second.configuration);
    assert_eq!(first.cost, second.cost);
    assert_eq!(first.seeds_run, 5);
    assert!(!first.optimal);
}
