use rand::rngs::StdRng;
use rand::SeedableRng;

use u_timetable::events::{RecordingSink, SkipReason};
use u_timetable::generator::{FirstChoice, RandomSource};
use u_timetable::models::{ClassType, Conflict, Constraint};
use u_timetable::{
    analyze, Analyzer, Assignment, ConflictPolicy, GenerationStrategy, Generator, GeneratorConfig,
    ResourceCatalog, Timetable,
};

fn school_catalog() -> ResourceCatalog {
    ResourceCatalog::new()
        .with_teachers(["Dr. Smith", "Prof. Johnson", "Dr. Williams", "Prof. Davis"])
        .with_subjects(["CS101", "MATH101", "PHY101"])
        .with_rooms(["Room A12", "Room B5", "Lab 1"])
}

#[test]
fn crafted_double_booking_is_reported_once() {
    let mut grid = Timetable::empty(&["9-10"], &["Mon", "Tue"]).unwrap();
    let class = Assignment::new(ClassType::Lecture, "S1", "R1", "T1");
    grid.set_cell("9-10", "Mon", Some(class.clone())).unwrap();
    grid.set_cell("9-10", "Tue", Some(class)).unwrap();

    let report = analyze(&grid);
    assert_eq!(report.conflicts.len(), 1);
    match &report.conflicts[0] {
        Conflict::TeacherConflict {
            teacher, day, time, ..
        } => {
            assert_eq!(teacher, "T1");
            assert_eq!(time, "9-10");
            assert_eq!(day, "Tue");
        }
        other => panic!("unexpected conflict {other:?}"),
    }
}

#[test]
fn independent_generation_surfaces_conflicts_in_analysis() {
    // One teacher drawn for every cell: each slot after Monday clashes.
    let catalog = ResourceCatalog::new()
        .with_teachers(["T1"])
        .with_subjects(["S1"])
        .with_rooms(["R1"]);
    let config = GeneratorConfig::default()
        .with_time_labels(["9-10"])
        .with_day_names(["Mon", "Tue"])
        .with_strategy(GenerationStrategy::Independent);

    let grid = Generator::new(config)
        .generate_with(&catalog, &mut FirstChoice)
        .unwrap();
    let report = analyze(&grid);

    assert_eq!(report.conflicts, vec![Conflict::teacher("T1", "Tue", "9-10", "Mon")]);
}

#[test]
fn conflict_free_generation_is_clean_across_seeds() {
    let catalog = school_catalog()
        .with_constraint(Constraint::blocked(None, Some("12:00-1:00")))
        .with_constraint(Constraint::teacher_unavailable("Dr. Smith", Some("Friday"), None));

    for seed in 0..25 {
        let config = GeneratorConfig::default().with_seed(seed);
        let grid = Generator::new(config).generate(&catalog).unwrap();

        assert_eq!(grid.total_cells(), 42);
        assert!(grid
            .slot("12:00-1:00")
            .unwrap()
            .days
            .iter()
            .all(|c| c.assignment.is_none()));
        let friday_smith = grid
            .cells()
            .filter(|c| c.day == "Friday")
            .filter_map(|c| c.assignment)
            .any(|a| a.teacher == "Dr. Smith");
        assert!(!friday_smith);

        let report = Analyzer::new(ConflictPolicy::TimeOfDay)
            .with_room_conflicts(true)
            .analyze(&grid);
        assert!(report.is_clean(), "seed {seed}: {:?}", report.conflicts);
    }
}

#[test]
fn generated_cells_reference_catalog_members() {
    let catalog = school_catalog();
    let mut source = RandomSource::new(StdRng::seed_from_u64(2024));
    let config = GeneratorConfig::default().with_strategy(GenerationStrategy::Independent);
    let grid = Generator::new(config)
        .generate_with(&catalog, &mut source)
        .unwrap();

    for a in grid.cells().filter_map(|c| c.assignment) {
        assert!(catalog.teachers.contains(&a.teacher));
        assert!(catalog.subjects.contains(&a.subject));
        assert!(catalog.rooms.contains(&a.room));
    }
}

#[test]
fn analysis_is_idempotent_on_generated_grid() {
    let config = GeneratorConfig::default()
        .with_seed(11)
        .with_strategy(GenerationStrategy::Independent);
    let grid = Generator::new(config).generate(&school_catalog()).unwrap();
    let snapshot = grid.clone();

    let first = analyze(&grid);
    let second = analyze(&grid);
    assert_eq!(first, second);
    assert_eq!(grid, snapshot);

    let workload_total: usize = first.teacher_workload.unwrap().values().sum();
    assert_eq!(workload_total, grid.filled_cells());
}

#[test]
fn empty_time_labels_produce_empty_report() {
    let grid = Timetable::empty::<&str, &str>(&[], &["Monday"]).unwrap();
    assert_eq!(grid.slot_count(), 0);
    assert!(analyze(&grid).is_clean());
}

#[test]
fn teacher_view_round_trips_through_json() {
    let config = GeneratorConfig::default().with_seed(3);
    let grid = Generator::new(config).generate(&school_catalog()).unwrap();
    let view = grid.for_teacher("Prof. Davis");

    assert_eq!(view.total_cells(), grid.total_cells());
    assert!(view
        .cells()
        .filter_map(|c| c.assignment)
        .all(|a| a.teacher == "Prof. Davis"));

    let text = serde_json::to_string(&view).unwrap();
    let back: Timetable = serde_json::from_str(&text).unwrap();
    assert_eq!(back, view);
}

#[test]
fn blocked_cells_are_reported_to_sink() {
    let catalog = school_catalog().with_constraint(Constraint::blocked(Some("Sunday"), None));
    let mut generator = Generator::new(GeneratorConfig::default()).with_sink(RecordingSink::new());
    generator.generate_with(&catalog, &mut FirstChoice).unwrap();
    assert_eq!(generator.sink().skipped(SkipReason::Blocked), 6);
}

#[test]
fn first_choice_single_teacher_depends_on_strategy() {
    let catalog = ResourceCatalog::new()
        .with_teachers(["T1"])
        .with_subjects(["S1"])
        .with_rooms(["R1"]);

    let exclusive = Generator::default()
        .generate_with(&catalog, &mut FirstChoice)
        .unwrap();
    assert_eq!(exclusive.filled_cells(), 6);
    assert!(analyze(&exclusive).is_clean());

    let independent = Generator::new(GeneratorConfig::default().with_strategy(GenerationStrategy::Independent))
        .generate_with(&catalog, &mut FirstChoice)
        .unwrap();
    assert_eq!(independent.filled_cells(), 42);
    let expected = Assignment::new(ClassType::Lecture, "S1", "R1", "T1");
    assert!(independent.cells().all(|c| c.assignment == Some(&expected)));
}
