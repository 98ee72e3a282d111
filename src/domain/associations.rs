//! In-memory association management
//!
//! Entities live in an arena and are addressed by typed keys. Relationships
//! are stored once, as pairs of keys in a [`JoinIndex`]; both directions of
//! a relationship are read from that same index, so Course.tasks and
//! Task.courses (or School.students and Student.school) cannot drift apart.
//!
//! Nothing here touches storage. Materialize an entity with [`EntityGraph::course`]
//! or [`EntityGraph::student`] and hand it to the matching repository.

use std::collections::BTreeSet;

use super::entities::{Course, School, Student, Task};

macro_rules! arena_key {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);
    };
}

arena_key!(SchoolKey);
arena_key!(StudentKey);
arena_key!(CourseKey);
arena_key!(TaskKey);

/// Set of `(left, right)` pairs. Inserting an existing pair is a no-op.
#[derive(Debug, Clone)]
pub struct JoinIndex<L, R> {
    pairs: BTreeSet<(L, R)>,
}

impl<L, R> Default for JoinIndex<L, R> {
    fn default() -> Self {
        Self {
            pairs: BTreeSet::new(),
        }
    }
}

impl<L: Ord + Copy, R: Ord + Copy> JoinIndex<L, R> {
    /// Returns `true` if the pair was not already present.
    pub fn insert(&mut self, left: L, right: R) -> bool {
        self.pairs.insert((left, right))
    }

    /// Returns `true` if the pair was present.
    pub fn remove(&mut self, left: L, right: R) -> bool {
        self.pairs.remove(&(left, right))
    }

    pub fn contains(&self, left: L, right: R) -> bool {
        self.pairs.contains(&(left, right))
    }

    pub fn rights_of(&self, left: L) -> Vec<R> {
        self.pairs
            .iter()
            .filter(|(l, _)| *l == left)
            .map(|(_, r)| *r)
            .collect()
    }

    pub fn lefts_of(&self, right: R) -> Vec<L> {
        self.pairs
            .iter()
            .filter(|(_, r)| *r == right)
            .map(|(l, _)| *l)
            .collect()
    }

    /// Drops every pair whose right side is `right`.
    pub fn remove_right(&mut self, right: R) {
        self.pairs.retain(|(_, r)| *r != right);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Arena of entities plus their relationship indices.
#[derive(Debug, Clone, Default)]
pub struct EntityGraph {
    schools: Vec<School>,
    students: Vec<Student>,
    courses: Vec<Course>,
    tasks: Vec<Task>,
    course_tasks: JoinIndex<CourseKey, TaskKey>,
    school_students: JoinIndex<SchoolKey, StudentKey>,
}

impl EntityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_school(&mut self, school: School) -> SchoolKey {
        self.schools.push(school);
        SchoolKey(self.schools.len() - 1)
    }

    /// Adds a student. Its `school` field is discarded; use
    /// [`EntityGraph::add_student`] to attach it to a school in the graph.
    pub fn add_student_entity(&mut self, mut student: Student) -> StudentKey {
        student.school = None;
        self.students.push(student);
        StudentKey(self.students.len() - 1)
    }

    /// Adds a course. Its embedded `tasks` are discarded; relationships are
    /// only created through [`EntityGraph::link_course_task`].
    pub fn add_course(&mut self, mut course: Course) -> CourseKey {
        course.tasks.clear();
        self.courses.push(course);
        CourseKey(self.courses.len() - 1)
    }

    pub fn add_task(&mut self, task: Task) -> TaskKey {
        self.tasks.push(task);
        TaskKey(self.tasks.len() - 1)
    }

    // Course <-> Task

    pub fn link_course_task(&mut self, course: CourseKey, task: TaskKey) {
        if self.course_tasks.insert(course, task) {
            tracing::trace!(?course, ?task, "linked course and task");
        }
    }

    pub fn unlink_course_task(&mut self, course: CourseKey, task: TaskKey) {
        if self.course_tasks.remove(course, task) {
            tracing::trace!(?course, ?task, "unlinked course and task");
        }
    }

    pub fn tasks_of(&self, course: CourseKey) -> Vec<TaskKey> {
        self.course_tasks.rights_of(course)
    }

    pub fn courses_of(&self, task: TaskKey) -> Vec<CourseKey> {
        self.course_tasks.lefts_of(task)
    }

    // School <-> Student

    /// Attaches `student` to `school`, detaching it from any previous school.
    pub fn add_student(&mut self, school: SchoolKey, student: StudentKey) {
        self.school_students.remove_right(student);
        self.school_students.insert(school, student);
    }

    /// Detaches `student` from `school`. No-op if it belongs elsewhere.
    pub fn remove_student(&mut self, school: SchoolKey, student: StudentKey) {
        self.school_students.remove(school, student);
    }

    pub fn students_of(&self, school: SchoolKey) -> Vec<StudentKey> {
        self.school_students.rights_of(school)
    }

    pub fn school_of(&self, student: StudentKey) -> Option<SchoolKey> {
        self.school_students.lefts_of(student).into_iter().next()
    }

    // Materialization

    /// Course with its task set resolved from the join index.
    pub fn course(&self, key: CourseKey) -> Course {
        let mut course = self.courses[key.0].clone();
        course.tasks = self
            .tasks_of(key)
            .into_iter()
            .map(|t| self.tasks[t.0].clone())
            .collect();
        course
    }

    /// Student with its school resolved from the join index.
    pub fn student(&self, key: StudentKey) -> Student {
        let mut student = self.students[key.0].clone();
        student.school = self.school_of(key).map(|s| self.schools[s.0].clone());
        student
    }

    pub fn school(&self, key: SchoolKey) -> &School {
        &self.schools[key.0]
    }

    pub fn task(&self, key: TaskKey) -> &Task {
        &self.tasks[key.0]
    }

    // Storage-assigned identifiers

    pub fn set_school_id(&mut self, key: SchoolKey, id: Option<i64>) {
        self.schools[key.0].id = id;
    }

    pub fn set_student_id(&mut self, key: StudentKey, id: Option<i64>) {
        self.students[key.0].id = id;
    }

    pub fn set_course_id(&mut self, key: CourseKey, id: Option<i64>) {
        self.courses[key.0].id = id;
    }

    pub fn set_task_id(&mut self, key: TaskKey, id: Option<i64>) {
        self.tasks[key.0].id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str) -> Task {
        Task {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn join_index_is_a_set_of_pairs() {
        let mut index: JoinIndex<u8, char> = JoinIndex::default();
        assert!(index.is_empty());

        assert!(index.insert(1, 'a'));
        assert!(!index.insert(1, 'a'));
        index.insert(2, 'a');
        assert_eq!(index.len(), 2);
        assert!(index.contains(2, 'a'));
        assert_eq!(index.lefts_of('a'), vec![1, 2]);

        index.remove_right('a');
        assert!(index.is_empty());
    }

    #[test]
    fn link_is_visible_from_both_sides() {
        let mut graph = EntityGraph::new();
        let c = graph.add_course(Course::default());
        let t = graph.add_task(task("grading"));

        graph.link_course_task(c, t);

        assert_eq!(graph.tasks_of(c), vec![t]);
        assert_eq!(graph.courses_of(t), vec![c]);
    }

    #[test]
    fn link_then_unlink_restores_both_sides() {
        let mut graph = EntityGraph::new();
        let c = graph.add_course(Course::default());
        let keep = graph.add_task(task("keep"));
        let t = graph.add_task(task("temporary"));
        graph.link_course_task(c, keep);

        let tasks_before = graph.tasks_of(c);
        let courses_before = graph.courses_of(t);

        graph.link_course_task(c, t);
        graph.unlink_course_task(c, t);

        assert_eq!(graph.tasks_of(c), tasks_before);
        assert_eq!(graph.courses_of(t), courses_before);
    }

    #[test]
    fn linking_twice_keeps_a_single_entry() {
        let mut graph = EntityGraph::new();
        let c = graph.add_course(Course::default());
        let t = graph.add_task(task("grading"));

        graph.link_course_task(c, t);
        graph.link_course_task(c, t);

        assert_eq!(graph.tasks_of(c).len(), 1);
        assert_eq!(graph.course(c).tasks.len(), 1);
    }

    #[test]
    fn unsaved_tasks_with_equal_content_stay_distinct() {
        let mut graph = EntityGraph::new();
        let c = graph.add_course(Course::default());
        let a = graph.add_task(task("same"));
        let b = graph.add_task(task("same"));

        graph.link_course_task(c, a);
        graph.link_course_task(c, b);

        assert_eq!(graph.tasks_of(c).len(), 2);
    }

    #[test]
    fn add_course_drops_embedded_tasks() {
        let mut graph = EntityGraph::new();
        let c = graph.add_course(Course {
            tasks: vec![task("stray")],
            ..Default::default()
        });
        assert!(graph.course(c).tasks.is_empty());
    }

    #[test]
    fn assigned_ids_show_up_in_materialized_course() {
        let mut graph = EntityGraph::new();
        let c = graph.add_course(Course::default());
        let t = graph.add_task(task("grading"));
        graph.link_course_task(c, t);

        graph.set_course_id(c, Some(7));
        graph.set_task_id(t, Some(11));

        let course = graph.course(c);
        assert_eq!(course.id, Some(7));
        assert_eq!(course.tasks[0].id, Some(11));
        assert_eq!(graph.task(t).id, Some(11));
    }

    #[test]
    fn school_membership_drives_student_school() {
        let mut graph = EntityGraph::new();
        let lincoln = graph.add_school(School::named("Lincoln High"));
        let s = graph.add_student_entity(Student::default());

        graph.add_student(lincoln, s);
        assert_eq!(graph.school_of(s), Some(lincoln));
        assert_eq!(graph.students_of(lincoln), vec![s]);
        assert_eq!(
            graph.student(s).school.and_then(|school| school.school_name),
            Some("Lincoln High".to_string())
        );

        graph.remove_student(lincoln, s);
        assert_eq!(graph.school_of(s), None);
        assert!(graph.students_of(lincoln).is_empty());
        assert!(graph.student(s).school.is_none());
    }

    #[test]
    fn adding_to_a_second_school_moves_the_student() {
        let mut graph = EntityGraph::new();
        let first = graph.add_school(School::named("First"));
        let second = graph.add_school(School::named("Second"));
        let s = graph.add_student_entity(Student::default());

        graph.add_student(first, s);
        graph.add_student(second, s);

        assert!(graph.students_of(first).is_empty());
        assert_eq!(graph.students_of(second), vec![s]);

        // Removing from the old school must not detach it from the new one.
        graph.remove_student(first, s);
        assert_eq!(graph.school_of(s), Some(second));
    }
}
