//! Query planning - which (keyword, location) pairs a run visits.
//!
//! Two strategies coexist:
//! - exhaustive: the full keyword x location cross product in fixed
//!   nested order
//! - priority + sample: a hand-picked priority list first, then a
//!   uniformly shuffled sample of the remaining combinations, capped
//!   so a run's total provider calls stay bounded

use std::collections::HashSet;

use crate::types::QueryCombination;

/// Maximum supplementary combinations per smart run.
pub const DEFAULT_SAMPLE_LIMIT: usize = 6;

/// Produces the bounded combination sequence for a run.
#[derive(Debug, Clone)]
pub struct QueryPlanner {
    keywords: Vec<String>,
    locations: Vec<String>,
    priority: Vec<QueryCombination>,
    sample_limit: usize,
}

impl QueryPlanner {
    /// Create a planner over the given keyword and location lists.
    pub fn new(keywords: Vec<String>, locations: Vec<String>) -> Self {
        Self {
            keywords,
            locations,
            priority: Vec::new(),
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }

    /// Set the priority combinations, visited first and in order.
    pub fn with_priority(mut self, priority: Vec<QueryCombination>) -> Self {
        self.priority = priority;
        self
    }

    /// Cap the sampled supplementary combinations.
    pub fn with_sample_limit(mut self, sample_limit: usize) -> Self {
        self.sample_limit = sample_limit;
        self
    }

    /// The priority combinations.
    pub fn priority(&self) -> &[QueryCombination] {
        &self.priority
    }

    /// The full cross product in fixed nested order: every location for
    /// keyword 1, then every location for keyword 2, and so on.
    pub fn exhaustive(&self) -> Vec<QueryCombination> {
        let mut combinations = Vec::with_capacity(self.keywords.len() * self.locations.len());
        for keyword in &self.keywords {
            for location in &self.locations {
                combinations.push(QueryCombination::new(keyword, location));
            }
        }
        combinations
    }

    /// Priority pairs first, in listed order, then a uniform random
    /// sample of the remaining cross product, truncated to the sample
    /// limit. `fastrand`'s shuffle is Fisher-Yates, so the permutation
    /// is unbiased.
    pub fn priority_with_sample(&self, rng: &mut fastrand::Rng) -> Vec<QueryCombination> {
        let priority_set: HashSet<&QueryCombination> = self.priority.iter().collect();

        let mut remaining: Vec<QueryCombination> = self
            .exhaustive()
            .into_iter()
            .filter(|combination| !priority_set.contains(combination))
            .collect();

        rng.shuffle(&mut remaining);
        remaining.truncate(self.sample_limit);

        let mut plan = self.priority.clone();
        plan.extend(remaining);
        plan
    }
}

/// The planner shipped with the service: intern-focused keywords over
/// west-coast-heavy tech hubs, with the flagship searches pinned as
/// priority pairs.
pub fn default_planner() -> QueryPlanner {
    let keywords = [
        "Software Engineer Intern",
        "Data Science Intern",
        "Machine Learning Intern",
        "Frontend Developer Intern",
        "Backend Developer Intern",
    ]
    .map(String::from)
    .to_vec();

    let locations = [
        "Silicon Valley, CA",
        "San Francisco, CA",
        "Seattle, WA",
        "Austin, TX",
        "New York, NY",
    ]
    .map(String::from)
    .to_vec();

    let priority = vec![
        QueryCombination::new("Software Engineer Intern", "Silicon Valley, CA"),
        QueryCombination::new("Software Engineer Intern", "San Francisco, CA"),
        QueryCombination::new("Data Science Intern", "Silicon Valley, CA"),
    ];

    QueryPlanner::new(keywords, locations).with_priority(priority)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small_planner() -> QueryPlanner {
        QueryPlanner::new(
            vec!["kw-a".to_string(), "kw-b".to_string()],
            vec!["loc-1".to_string(), "loc-2".to_string(), "loc-3".to_string()],
        )
    }

    #[test]
    fn test_exhaustive_nested_order() {
        let plan = small_planner().exhaustive();
        let expected = vec![
            QueryCombination::new("kw-a", "loc-1"),
            QueryCombination::new("kw-a", "loc-2"),
            QueryCombination::new("kw-a", "loc-3"),
            QueryCombination::new("kw-b", "loc-1"),
            QueryCombination::new("kw-b", "loc-2"),
            QueryCombination::new("kw-b", "loc-3"),
        ];
        assert_eq!(plan, expected);
    }

    #[test]
    fn test_priority_visited_first_in_order() {
        let priority = vec![
            QueryCombination::new("kw-b", "loc-3"),
            QueryCombination::new("kw-a", "loc-1"),
        ];
        let planner = small_planner().with_priority(priority.clone());

        let mut rng = fastrand::Rng::with_seed(7);
        let plan = planner.priority_with_sample(&mut rng);

        assert_eq!(&plan[..2], &priority[..]);
    }

    #[test]
    fn test_sample_length_and_disjointness() {
        let priority = vec![QueryCombination::new("kw-a", "loc-1")];
        let planner = small_planner()
            .with_priority(priority.clone())
            .with_sample_limit(3);

        let mut rng = fastrand::Rng::with_seed(42);
        let plan = planner.priority_with_sample(&mut rng);

        // 6 total combinations, 1 priority, limit 3 -> 3 sampled
        assert_eq!(plan.len(), 4);
        let sampled = &plan[1..];
        assert!(sampled.iter().all(|c| !priority.contains(c)));
    }

    #[test]
    fn test_sample_truncates_to_remaining() {
        let priority = vec![QueryCombination::new("kw-a", "loc-1")];
        // 5 remaining combinations, limit far above that
        let planner = small_planner()
            .with_priority(priority)
            .with_sample_limit(50);

        let mut rng = fastrand::Rng::with_seed(1);
        let plan = planner.priority_with_sample(&mut rng);
        assert_eq!(plan.len(), 6);
    }

    #[test]
    fn test_same_seed_same_plan() {
        let planner = small_planner().with_sample_limit(4);

        let mut rng_a = fastrand::Rng::with_seed(99);
        let mut rng_b = fastrand::Rng::with_seed(99);

        assert_eq!(
            planner.priority_with_sample(&mut rng_a),
            planner.priority_with_sample(&mut rng_b)
        );
    }

    #[test]
    fn test_default_planner_shape() {
        let planner = default_planner();
        assert_eq!(planner.priority().len(), 3);
        assert_eq!(planner.exhaustive().len(), 25);
        assert_eq!(planner.sample_limit, DEFAULT_SAMPLE_LIMIT);
    }

    proptest! {
        #[test]
        fn prop_sample_disjoint_and_bounded(
            seed in any::<u64>(),
            keyword_count in 1usize..5,
            location_count in 1usize..5,
            sample_limit in 0usize..10,
        ) {
            let keywords: Vec<String> =
                (0..keyword_count).map(|i| format!("kw-{}", i)).collect();
            let locations: Vec<String> =
                (0..location_count).map(|i| format!("loc-{}", i)).collect();
            let priority = vec![QueryCombination::new("kw-0", "loc-0")];

            let planner = QueryPlanner::new(keywords, locations)
                .with_priority(priority.clone())
                .with_sample_limit(sample_limit);

            let mut rng = fastrand::Rng::with_seed(seed);
            let plan = planner.priority_with_sample(&mut rng);

            let sampled = &plan[priority.len()..];
            let total = keyword_count * location_count;

            prop_assert_eq!(sampled.len(), sample_limit.min(total - 1));
            prop_assert!(sampled.iter().all(|c| !priority.contains(c)));

            // No duplicates within the sample
            let unique: std::collections::HashSet<_> = sampled.iter().collect();
            prop_assert_eq!(unique.len(), sampled.len());
        }
    }
}
