//! Fitness evaluation for candidate timetables.
//!
//! [`FitnessRules`] holds the scoring rule set as plain data: the
//! building-cluster map used for travel scoring, the facilitators exempt
//! from the low-load penalty, and the linked course sections that receive
//! spacing adjustments. [`FitnessRules::score`] folds every rule group into
//! a single additive value — positive terms reward good placements,
//! negative terms penalize conflicts and rule violations.
//!
//! Scoring is a pure function of the rule set, the schedule, and one
//! candidate; it has no side effects and is evaluated fresh for every
//! candidate in every generation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::ga::{ActivityAssignment, ScheduleAssignment};
use crate::models::{ActivityId, Room, Schedule};

/// Two sections of the same course, scored for spacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPair {
    /// First section id.
    pub a: ActivityId,
    /// Second section id.
    pub b: ActivityId,
}

impl SectionPair {
    /// Creates a pair from two section ids.
    pub fn new(a: impl Into<ActivityId>, b: impl Into<ActivityId>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    fn ids(&self) -> [&ActivityId; 2] {
        [&self.a, &self.b]
    }
}

/// Two courses whose sections are scored jointly: each course's own pair
/// for spreading, and every cross-course combination for back-to-back
/// placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedCourses {
    /// Sections of the first course.
    pub first: SectionPair,
    /// Sections of the second course.
    pub second: SectionPair,
}

impl LinkedCourses {
    /// All four section ids covered by the linked-course rules.
    pub fn section_ids(&self) -> [&ActivityId; 4] {
        [&self.first.a, &self.first.b, &self.second.a, &self.second.b]
    }
}

/// The scoring rule set.
///
/// All schedule-specific knowledge lives here as data, not in code:
/// which buildings cluster together, who may carry a light teaching load,
/// and which sections are linked. [`FitnessRules::default`] is the
/// reference rule set the weights were calibrated against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessRules {
    /// Building name → cluster id. Buildings in the same cluster are
    /// considered adjacent for travel scoring. Every building used by a
    /// schedule's rooms must be mapped.
    pub building_clusters: BTreeMap<String, u8>,
    /// Facilitators exempt from the low-load penalty when assigned fewer
    /// than 2 activities.
    pub low_load_exempt: HashSet<String>,
    /// Linked course sections receiving spacing adjustments. All four ids
    /// must exist in any schedule scored with these rules.
    pub linked: LinkedCourses,
}

impl Default for FitnessRules {
    fn default() -> Self {
        let building_clusters = [
            ("Roman", 2),
            ("Beach", 2),
            ("Slater", 1),
            ("Loft", 1),
            ("Logos", 1),
            ("Frank", 1),
        ]
        .into_iter()
        .map(|(b, c)| (b.to_string(), c))
        .collect();

        Self {
            building_clusters,
            low_load_exempt: ["Tyler".to_string()].into_iter().collect(),
            linked: LinkedCourses {
                first: SectionPair::new("SLA101A", "SLA101B"),
                second: SectionPair::new("SLA191A", "SLA191B"),
            },
        }
    }
}

impl FitnessRules {
    /// Cluster id for a building, if mapped.
    pub fn cluster(&self, building: &str) -> Option<u8> {
        self.building_clusters.get(building).copied()
    }

    /// Scores one candidate against this rule set.
    ///
    /// Pure and deterministic: repeated calls on the same candidate return
    /// the identical value (grouping uses ordered maps, so even the
    /// floating-point accumulation order is fixed).
    ///
    /// # Panics
    ///
    /// Panics if the candidate is missing an assignment for any schedule
    /// activity or a linked section, or if an assigned room's building has
    /// no cluster mapping. Both are caught up front by
    /// [`validate_schedule`](crate::validation::validate_schedule);
    /// hitting them here is a programming-logic error.
    pub fn score(&self, schedule: &Schedule, candidate: &ScheduleAssignment) -> f64 {
        let mut fitness = 0.0;

        let mut room_time_load: BTreeMap<(&Room, i32), i32> = BTreeMap::new();
        let mut facilitator_load: BTreeMap<&str, i32> = BTreeMap::new();
        let mut facilitator_time_load: BTreeMap<(&str, i32), i32> = BTreeMap::new();
        let mut cluster_usage: BTreeMap<(&str, i32), BTreeSet<u8>> = BTreeMap::new();

        // Per-activity terms, in gene order.
        for activity in &schedule.activities {
            let id = activity.id();
            let gene = self.gene(candidate, &id);
            let cluster = self.cluster_or_panic(&gene.room.building);

            *room_time_load.entry((&gene.room, gene.time)).or_insert(0) += 1;
            *facilitator_load.entry(gene.facilitator.as_str()).or_insert(0) += 1;
            *facilitator_time_load
                .entry((gene.facilitator.as_str(), gene.time))
                .or_insert(0) += 1;
            cluster_usage
                .entry((gene.facilitator.as_str(), gene.time))
                .or_default()
                .insert(cluster);

            let ratio = gene.room.capacity as f64 / activity.expected_enrollment as f64;
            if ratio < 1.0 {
                fitness -= 0.5;
            } else if ratio > 3.0 {
                fitness -= 0.2;
            } else if ratio > 6.0 {
                // Shadowed by the > 3.0 arm above. The calibrated rule
                // table is reproduced in its published order, quirks
                // included; reordering changes the score distribution.
                fitness -= 0.4;
            } else {
                fitness += 0.3;
            }

            if activity.preferred_facilitators.contains(&gene.facilitator) {
                fitness += 0.5;
            } else if activity.other_facilitators.contains(&gene.facilitator) {
                fitness += 0.2;
            } else {
                fitness -= 0.1;
            }
        }

        // Room/time conflicts: the penalty scales with the whole group
        // size, not the overflow.
        for &load in room_time_load.values() {
            if load >= 2 {
                fitness -= 0.5 * f64::from(load);
            }
        }

        // Facilitator load: too few or too many activities.
        for (&facilitator, &load) in &facilitator_load {
            if load < 2 && self.low_load_exempt.contains(facilitator) {
                continue;
            }
            if load == 1 || load == 2 {
                fitness -= 0.4;
            } else if load > 4 {
                fitness -= 0.5;
            }
        }

        // Double-booking: flat penalty per overloaded (facilitator, time).
        for &load in facilitator_time_load.values() {
            if load > 1 {
                fitness -= 0.2;
            }
        }

        // Travel between consecutive slots, scored once per distinct
        // cluster the facilitator occupies at time t.
        for (&(facilitator, time), clusters) in &cluster_usage {
            for &cluster in clusters {
                let crosses = match cluster_usage.get(&(facilitator, time - 1)) {
                    Some(prev) => prev.len() > 1 || (prev.len() == 1 && !prev.contains(&cluster)),
                    None => false,
                };
                if crosses {
                    fitness -= 0.4;
                } else {
                    fitness += 0.5;
                }
            }
        }

        // Same-course sections should be spread out across the day.
        for pair in [&self.linked.first, &self.linked.second] {
            let a = self.gene(candidate, &pair.a);
            let b = self.gene(candidate, &pair.b);
            let gap = (a.time - b.time).abs();
            if gap > 4 {
                fitness += 0.5;
            } else if gap == 0 {
                fitness -= 0.5;
            }
        }

        // Cross-course adjacency between the two linked courses.
        for first_id in self.linked.first.ids() {
            for second_id in self.linked.second.ids() {
                let a = self.gene(candidate, first_id);
                let b = self.gene(candidate, second_id);
                let gap = (a.time - b.time).abs();
                if gap == 1 {
                    let same_cluster = self.cluster_or_panic(&a.room.building)
                        == self.cluster_or_panic(&b.room.building);
                    if same_cluster {
                        fitness += 0.5;
                    } else {
                        fitness -= 0.4;
                    }
                } else if gap == 2 {
                    fitness += 0.25;
                } else if gap == 0 {
                    fitness -= 0.25;
                }
            }
        }

        fitness
    }

    fn gene<'c>(
        &self,
        candidate: &'c ScheduleAssignment,
        id: &ActivityId,
    ) -> &'c ActivityAssignment {
        candidate
            .get(id)
            .unwrap_or_else(|| panic!("candidate has no assignment for activity '{id}'"))
    }

    fn cluster_or_panic(&self, building: &str) -> u8 {
        self.cluster(building)
            .unwrap_or_else(|| panic!("building '{building}' has no cluster mapping"))
    }
}
