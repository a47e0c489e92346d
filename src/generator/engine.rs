//! Timetable generation engine.
//!
//! # Algorithm
//!
//! 1. Validate labels, resolve resource sets, validate the catalog.
//!    Under [`GenerationStrategy::ConflictFree`] pins must not
//!    double-book a teacher or room.
//! 2. Build the empty grid.
//! 3. Apply constraints: write pinned assignments and book their
//!    teacher and room; blocked and unavailable cells are consulted
//!    during filling.
//! 4. Fill: for every remaining cell in scan order, draw a fill
//!    decision, then draw subject, room, teacher, and class type from
//!    the candidates that satisfy the constraints. Under
//!    [`GenerationStrategy::ConflictFree`] teachers and rooms already
//!    booked under the active [`ConflictPolicy`] are excluded.
//!
//! # Complexity
//! O(s * d * (t + r + c)) for s slots, d days, t teachers, r rooms,
//! c constraints.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info_span};

use super::source::{ChoiceSource, RandomSource};
use crate::config::{ConflictPolicy, GenerationStrategy, GeneratorConfig};
use crate::error::{Result, TimetableError};
use crate::events::{EngineEvent, EventSink, Phase, SkipReason, TracingSink};
use crate::ledger::BookingLedger;
use crate::models::{
    Assignment, ClassType, Constraint, ResourceCatalog, Timetable, FALLBACK_ROOMS,
    FALLBACK_SUBJECTS, FALLBACK_TEACHERS,
};
use crate::validation::{validate_catalog, validate_labels, validate_pin_bookings};

/// Resource sets generation draws from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCatalog {
    /// Teachers.
    pub teachers: Vec<String>,
    /// Subjects.
    pub subjects: Vec<String>,
    /// Rooms.
    pub rooms: Vec<String>,
    /// Class types.
    pub class_types: Vec<ClassType>,
}

impl ResolvedCatalog {
    /// Resolves each set from the catalog, or from the fallback vocabulary
    /// when the catalog set is empty and `use_fallback` is set.
    ///
    /// # Errors
    /// [`TimetableError::Configuration`] when a set is empty and no
    /// fallback applies.
    pub fn resolve(catalog: &ResourceCatalog, use_fallback: bool) -> Result<Self> {
        Ok(Self {
            teachers: resolve_set("teachers", &catalog.teachers, &FALLBACK_TEACHERS, use_fallback)?,
            subjects: resolve_set("subjects", &catalog.subjects, &FALLBACK_SUBJECTS, use_fallback)?,
            rooms: resolve_set("rooms", &catalog.rooms, &FALLBACK_ROOMS, use_fallback)?,
            class_types: if catalog.class_types.is_empty() {
                ClassType::ALL.to_vec()
            } else {
                catalog.class_types.clone()
            },
        })
    }
}

fn resolve_set(
    what: &str,
    given: &[String],
    fallback: &[&str],
    use_fallback: bool,
) -> Result<Vec<String>> {
    if !given.is_empty() {
        return Ok(given.to_vec());
    }
    if use_fallback {
        return Ok(fallback.iter().map(|s| s.to_string()).collect());
    }
    Err(TimetableError::configuration(format!(
        "catalog has no {what} and the fallback vocabulary is disabled"
    )))
}

/// Timetable generator.
///
/// # Example
///
/// ```
/// use u_timetable::{Generator, GeneratorConfig, ResourceCatalog};
///
/// let catalog = ResourceCatalog::new()
///     .with_teachers(["Dr. Smith", "Prof. Lee"])
///     .with_subjects(["CS101"])
///     .with_rooms(["Room A12", "Room B5"]);
/// let config = GeneratorConfig::default().with_seed(42);
///
/// let timetable = Generator::new(config).generate(&catalog).unwrap();
/// assert_eq!(timetable.total_cells(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct Generator<S = TracingSink> {
    config: GeneratorConfig,
    sink: S,
}

impl Generator<TracingSink> {
    /// Creates a generator that reports through `tracing`.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            sink: TracingSink,
        }
    }
}

impl Default for Generator<TracingSink> {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl<S: EventSink> Generator<S> {
    /// Replaces the event sink.
    pub fn with_sink<T: EventSink>(self, sink: T) -> Generator<T> {
        Generator {
            config: self.config,
            sink,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the generator, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Generates a timetable using the configured seed, or OS entropy.
    pub fn generate(&mut self, catalog: &ResourceCatalog) -> Result<Timetable> {
        match self.config.seed {
            Some(seed) => {
                let mut source = RandomSource::new(StdRng::seed_from_u64(seed));
                self.generate_with(catalog, &mut source)
            }
            None => {
                let mut source = RandomSource::new(rand::rng());
                self.generate_with(catalog, &mut source)
            }
        }
    }

    /// Generates a timetable drawing every decision from `source`.
    ///
    /// Either a complete timetable is returned or an error is raised;
    /// no partial grid escapes.
    pub fn generate_with<C: ChoiceSource>(
        &mut self,
        catalog: &ResourceCatalog,
        source: &mut C,
    ) -> Result<Timetable> {
        let span = info_span!("generate", strategy = ?self.config.strategy, policy = ?self.config.policy);
        let _guard = span.enter();

        let started = Instant::now();
        let config = &self.config;
        config.validate()?;
        validate_labels(&config.time_labels, &config.day_names)?;

        let resolved = ResolvedCatalog::resolve(catalog, config.use_fallback)?;
        validate_catalog(
            catalog,
            &resolved.teachers,
            &resolved.subjects,
            &resolved.rooms,
            &config.time_labels,
            &config.day_names,
        )?;
        if config.strategy == GenerationStrategy::ConflictFree {
            validate_pin_bookings(&catalog.constraints, config.policy)?;
        }
        debug!(
            teachers = resolved.teachers.len(),
            subjects = resolved.subjects.len(),
            rooms = resolved.rooms.len(),
            constraints = catalog.constraints.len(),
            "catalog resolved"
        );

        self.sink.record(EngineEvent::PhaseStarted(Phase::BuildGrid));
        let mut grid = Timetable::empty(&config.time_labels, &config.day_names)?;
        self.sink.record(EngineEvent::PhaseFinished {
            phase: Phase::BuildGrid,
            cells: grid.total_cells(),
        });

        let mut state = FillState::new(config.policy, &catalog.constraints);

        self.sink.record(EngineEvent::PhaseStarted(Phase::ApplyConstraints));
        let pinned = self.apply_constraints(&mut grid, &catalog.constraints, &mut state)?;
        self.sink.record(EngineEvent::PhaseFinished {
            phase: Phase::ApplyConstraints,
            cells: pinned,
        });

        self.sink.record(EngineEvent::PhaseStarted(Phase::Fill));
        let deadline = self.config.deadline_ms;
        let mut filled = 0;
        for si in 0..grid.slots.len() {
            if let Some(ms) = deadline {
                if started.elapsed() >= Duration::from_millis(ms) {
                    return Err(TimetableError::DeadlineExceeded { deadline_ms: ms });
                }
            }
            for di in 0..grid.slots[si].days.len() {
                if grid.slots[si].days[di].assignment.is_some() {
                    continue;
                }
                let time = grid.slots[si].time.clone();
                let day = grid.slots[si].days[di].day.clone();

                match self.fill_cell(&time, &day, &resolved, &catalog.constraints, &mut state, source) {
                    Ok(assignment) => {
                        self.sink.record(EngineEvent::CellFilled {
                            time,
                            day,
                            teacher: assignment.teacher.clone(),
                            room: assignment.room.clone(),
                        });
                        grid.slots[si].days[di].assignment = Some(assignment);
                        filled += 1;
                    }
                    Err(reason) => {
                        self.sink.record(EngineEvent::CellSkipped { time, day, reason });
                    }
                }
            }
        }
        self.sink.record(EngineEvent::PhaseFinished {
            phase: Phase::Fill,
            cells: filled,
        });

        Ok(grid)
    }

    /// Writes pinned assignments and books their resources.
    fn apply_constraints(
        &mut self,
        grid: &mut Timetable,
        constraints: &[Constraint],
        state: &mut FillState,
    ) -> Result<usize> {
        let mut pinned = 0;
        for constraint in constraints {
            if let Constraint::Pinned {
                day,
                time,
                assignment,
            } = constraint
            {
                grid.set_cell(time, day, Some(assignment.clone()))?;
                state.commit(time, day, assignment);
                self.sink.record(EngineEvent::CellPinned {
                    time: time.clone(),
                    day: day.clone(),
                });
                pinned += 1;
            }
        }
        Ok(pinned)
    }

    fn fill_cell<C: ChoiceSource>(
        &self,
        time: &str,
        day: &str,
        resolved: &ResolvedCatalog,
        constraints: &[Constraint],
        state: &mut FillState,
        source: &mut C,
    ) -> std::result::Result<Assignment, SkipReason> {
        if is_blocked(constraints, time, day) {
            return Err(SkipReason::Blocked);
        }
        if !source.should_fill(self.config.fill_threshold) {
            return Err(SkipReason::Density);
        }

        let exclusive = self.config.strategy == GenerationStrategy::ConflictFree;

        let rooms: Vec<&String> = resolved
            .rooms
            .iter()
            .filter(|r| room_available(constraints, r, time, day))
            .filter(|r| !exclusive || state.ledger.room_clash(time, day, r).is_none())
            .collect();
        let teachers: Vec<&String> = resolved
            .teachers
            .iter()
            .filter(|t| teacher_available(constraints, t, time, day))
            .filter(|t| state.under_load(t))
            .filter(|t| !exclusive || state.ledger.teacher_clash(time, day, t).is_none())
            .collect();

        if teachers.is_empty() {
            return Err(SkipReason::NoTeacher);
        }
        if rooms.is_empty() {
            return Err(SkipReason::NoRoom);
        }

        let subject = &resolved.subjects[source.pick(resolved.subjects.len())];
        let room = rooms[source.pick(rooms.len())];
        let teacher = teachers[source.pick(teachers.len())];
        let class_type = resolved.class_types[source.pick(resolved.class_types.len())];

        let assignment = Assignment::new(class_type, subject.as_str(), room.as_str(), teacher.as_str());
        state.commit(time, day, &assignment);
        Ok(assignment)
    }
}

/// Mutable bookkeeping carried across the fill pass.
struct FillState {
    ledger: BookingLedger,
    load: HashMap<String, usize>,
    max_load: HashMap<String, usize>,
}

impl FillState {
    fn new(policy: ConflictPolicy, constraints: &[Constraint]) -> Self {
        let mut max_load: HashMap<String, usize> = HashMap::new();
        for c in constraints {
            if let Constraint::MaxTeacherLoad {
                teacher,
                max_assignments,
            } = c
            {
                // Tightest cap wins when a teacher is capped twice.
                let cap = max_load.entry(teacher.clone()).or_insert(*max_assignments);
                *cap = (*cap).min(*max_assignments);
            }
        }
        Self {
            ledger: BookingLedger::new(policy),
            load: HashMap::new(),
            max_load,
        }
    }

    fn under_load(&self, teacher: &str) -> bool {
        match self.max_load.get(teacher) {
            None => true,
            Some(max) => self.load.get(teacher).copied().unwrap_or(0) < *max,
        }
    }

    fn commit(&mut self, time: &str, day: &str, assignment: &Assignment) {
        self.ledger.book_teacher(time, day, &assignment.teacher);
        self.ledger.book_room(time, day, &assignment.room);
        *self.load.entry(assignment.teacher.clone()).or_insert(0) += 1;
    }
}

fn is_blocked(constraints: &[Constraint], time: &str, day: &str) -> bool {
    constraints.iter().any(|c| match c {
        Constraint::BlockedCell { day: d, time: t } => Constraint::covers(d, t, time, day),
        _ => false,
    })
}

fn teacher_available(constraints: &[Constraint], teacher: &str, time: &str, day: &str) -> bool {
    !constraints.iter().any(|c| match c {
        Constraint::TeacherUnavailable {
            teacher: who,
            day: d,
            time: t,
        } => who == teacher && Constraint::covers(d, t, time, day),
        _ => false,
    })
}

fn room_available(constraints: &[Constraint], room: &str, time: &str, day: &str) -> bool {
    !constraints.iter().any(|c| match c {
        Constraint::RoomUnavailable {
            room: which,
            day: d,
            time: t,
        } => which == room && Constraint::covers(d, t, time, day),
        _ => false,
    })
}
