use serde::Serialize;

use crate::dataset::Dataset;

/// Minimum mark that counts as a pass.
pub const PASS_MARK: u8 = 40;

/// Student names split by pass mark, each list in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassFail {
    pub passed: Vec<String>,
    pub failed: Vec<String>,
}

pub fn partition_pass_fail(marks: &Dataset<u8>, pass_mark: u8) -> PassFail {
    let (passed, failed): (Vec<_>, Vec<_>) = marks.iter().partition(|e| e.value >= pass_mark);

    PassFail {
        passed: passed.into_iter().map(|e| e.name.clone()).collect(),
        failed: failed.into_iter().map(|e| e.name.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let marks: Dataset<u8> = [("edge", 40), ("below", 39)].into_iter().collect();
        let result = partition_pass_fail(&marks, PASS_MARK);
        assert_eq!(result.passed, vec!["edge"]);
        assert_eq!(result.failed, vec!["below"]);
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        let marks: Dataset<u8> = (0..=100u8).map(|m| (format!("s{m}"), m)).collect();
        let result = partition_pass_fail(&marks, PASS_MARK);

        assert_eq!(result.passed.len() + result.failed.len(), marks.len());
        for entry in marks.iter() {
            let in_passed = result.passed.contains(&entry.name);
            let in_failed = result.failed.contains(&entry.name);
            assert!(in_passed != in_failed, "{} misplaced", entry.name);
        }
    }

    #[test]
    fn test_empty_dataset() {
        let result = partition_pass_fail(&Dataset::new(), PASS_MARK);
        assert_eq!(result, PassFail::default());
    }
}
