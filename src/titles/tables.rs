//! Compiled-in lookup tables for lesson titles.
//!
//! Both tables are read-only for the lifetime of the process. Edits happen
//! here, in source, never at runtime.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Short course labels used as the `<prefix>` of every lesson title.
static COURSE_PREFIXES: &[(u64, &str)] = &[
    (4397, "10Hr Worker"),
    (4425, "8Hr Renewal"),
    (4380, "16Hr Supervisor Renewal"),
    (4378, "22Hr Supervisor Upgrade"),
    (4974, "32Hr Supervisor"),
    (979, "4Hr Scaffold"),
];

/// Hand-curated lesson bodies, keyed by course then lesson.
static TITLE_OVERRIDES: &[(u64, &[(u64, &str)])] = &[
    // 10 Hr Worker SST
    (
        4397,
        &[(4400, "Module 01: Introduction and Construction Statistics")],
    ),
    // 4 hour Supported Scaffold User
    (
        979,
        &[
            (1011, "Module 01: Introduction to Supported Scaffolds"),
            (1023, "Module 02: Types and Components of Supported Scaffolds"),
            (1050, "Module 03: Scaffold Accident Prevention"),
            (1064, "Module 04: OSHA Regulations and Standards"),
            (1081, "Module 05: NYC Building Codes Overview"),
            (1095, "Module 06: DOB Requirements and Permits"),
            (1110, "Module 07: Fall Protection Fundamentals"),
            (1121, "Module 08: PPE and Fall Arrest Systems"),
            (1140, "Module 09: Safe Scaffold Use and Procedures"),
            (1157, "Module 10: Scaffold Inspection Requirements"),
            (1172, "Module 11: Emergency Response and Resources"),
        ],
    ),
];

/// Number of characters kept from a course title when it has no table entry.
pub const FALLBACK_PREFIX_CHARS: usize = 20;

#[derive(Debug)]
pub struct CoursePrefixTable {
    prefixes: HashMap<u64, &'static str>,
}

impl CoursePrefixTable {
    pub fn builtin() -> &'static Self {
        static TABLE: LazyLock<CoursePrefixTable> = LazyLock::new(|| CoursePrefixTable {
            prefixes: COURSE_PREFIXES.iter().copied().collect(),
        });
        &TABLE
    }

    pub fn get(&self, course_id: u64) -> Option<&'static str> {
        self.prefixes.get(&course_id).copied()
    }

    /// Table label for the course, or a raw cut of the first
    /// [`FALLBACK_PREFIX_CHARS`] characters of `course_title`.
    ///
    /// The cut is not trimmed and may split a word.
    pub fn resolve(&self, course_id: u64, course_title: &str) -> String {
        match self.get(course_id) {
            Some(prefix) => prefix.to_owned(),
            None => course_title.chars().take(FALLBACK_PREFIX_CHARS).collect(),
        }
    }
}

#[derive(Debug)]
pub struct TitleOverrideTable {
    overrides: HashMap<u64, HashMap<u64, &'static str>>,
}

impl TitleOverrideTable {
    pub fn builtin() -> &'static Self {
        static TABLE: LazyLock<TitleOverrideTable> = LazyLock::new(|| TitleOverrideTable {
            overrides: TITLE_OVERRIDES
                .iter()
                .map(|(course_id, lessons)| (*course_id, lessons.iter().copied().collect()))
                .collect(),
        });
        &TABLE
    }

    pub fn get(&self, course_id: u64, lesson_id: u64) -> Option<&'static str> {
        self.overrides
            .get(&course_id)
            .and_then(|lessons| lessons.get(&lesson_id))
            .copied()
    }

    /// All `(course_id, lesson_id, title)` triples, unordered.
    pub fn entries(&self) -> impl Iterator<Item = (u64, u64, &'static str)> + '_ {
        self.overrides.iter().flat_map(|(course_id, lessons)| {
            lessons
                .iter()
                .map(move |(lesson_id, title)| (*course_id, *lesson_id, *title))
        })
    }
}
