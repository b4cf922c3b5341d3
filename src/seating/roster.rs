use std::collections::HashSet;

use super::types::{BranchRange, StudentCandidate, MAX_ROSTER};
use crate::error::{Result, SeatingError};

/// Checks a set of ranges without expanding them into a roster.
///
/// Rejects empty branch labels, inverted ranges, roll numbers that occur in
/// more than one range and totals above [`MAX_ROSTER`]. Runs before any
/// range is expanded.
pub fn validate_ranges(ranges: &[BranchRange]) -> Result<()> {
    let mut total: u64 = 0;
    for range in ranges {
        if range.branch.trim().is_empty() {
            return Err(SeatingError::EmptyBranch);
        }
        if range.start_roll > range.end_roll {
            return Err(SeatingError::InvertedRange {
                branch: range.branch.clone(),
                start: range.start_roll,
                end: range.end_roll,
            });
        }
        total = total.saturating_add(u64::from(range.end_roll - range.start_roll) + 1);
    }
    if total > MAX_ROSTER {
        return Err(SeatingError::TooManyStudents {
            count: total,
            limit: MAX_ROSTER,
        });
    }

    // Overlap check on sorted bounds, without expanding the ranges
    let mut bounds: Vec<(u32, u32)> = ranges.iter().map(|r| (r.start_roll, r.end_roll)).collect();
    bounds.sort_unstable();
    for pair in bounds.windows(2) {
        let (_, prev_end) = pair[0];
        let (next_start, _) = pair[1];
        if next_start <= prev_end {
            return Err(SeatingError::DuplicateRoll { roll: next_start });
        }
    }

    Ok(())
}

/// Expands branch ranges into a roster sorted by roll number.
///
/// Rolls from all branches are merged and sorted numerically, so branches
/// whose numbers overlap in value interleave.
pub fn build_roster(ranges: &[BranchRange]) -> Result<Vec<StudentCandidate>> {
    validate_ranges(ranges)?;

    let mut students: Vec<StudentCandidate> = ranges
        .iter()
        .flat_map(|range| {
            (range.start_roll..=range.end_roll).map(move |roll| StudentCandidate {
                roll_number: roll,
                branch: range.branch.clone(),
            })
        })
        .collect();

    students.sort_by_key(|s| s.roll_number);
    Ok(students)
}

/// All roll numbers covered by the ranges, in no particular order
pub fn roll_numbers(ranges: &[BranchRange]) -> HashSet<u32> {
    ranges
        .iter()
        .flat_map(|range| range.start_roll..=range.end_roll)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rolls(roster: &[StudentCandidate]) -> Vec<u32> {
        roster.iter().map(|s| s.roll_number).collect()
    }

    #[test]
    fn test_single_range_expands_inclusive() {
        let roster = build_roster(&[BranchRange::new("CSE", 5, 8)]).unwrap();
        assert_eq!(rolls(&roster), vec![5, 6, 7, 8]);
        assert!(roster.iter().all(|s| s.branch == "CSE"));
    }

    #[test]
    fn test_branches_interleave_numerically() {
        let roster = build_roster(&[
            BranchRange::new("IT", 20, 21),
            BranchRange::new("CSE", 10, 11),
            BranchRange::new("ECE", 15, 15),
        ])
        .unwrap();

        assert_eq!(rolls(&roster), vec![10, 11, 15, 20, 21]);
        assert_eq!(roster[0].branch, "CSE");
        assert_eq!(roster[2].branch, "ECE");
        assert_eq!(roster[4].branch, "IT");
    }

    #[test]
    fn test_numeric_not_lexical_order() {
        let roster = build_roster(&[
            BranchRange::new("A", 100, 100),
            BranchRange::new("B", 9, 9),
        ])
        .unwrap();
        assert_eq!(rolls(&roster), vec![9, 100]);
    }

    #[test]
    fn test_empty_input_is_empty_roster() {
        assert!(build_roster(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = build_roster(&[BranchRange::new("MECH", 30, 10)]).unwrap_err();
        assert_eq!(
            err,
            SeatingError::InvertedRange {
                branch: "MECH".into(),
                start: 30,
                end: 10
            }
        );
    }

    #[test]
    fn test_overlapping_ranges_rejected() {
        let err = build_roster(&[
            BranchRange::new("CSE", 1, 10),
            BranchRange::new("IT", 8, 12),
        ])
        .unwrap_err();
        assert_eq!(err, SeatingError::DuplicateRoll { roll: 8 });
    }

    #[test]
    fn test_touching_ranges_are_fine() {
        let roster = build_roster(&[
            BranchRange::new("CSE", 1, 3),
            BranchRange::new("IT", 4, 6),
        ])
        .unwrap();
        assert_eq!(roster.len(), 6);
    }

    #[test]
    fn test_roster_size_limit() {
        let at_limit = BranchRange::new("CSE", 1, MAX_ROSTER as u32);
        assert_eq!(build_roster(&[at_limit]).unwrap().len() as u64, MAX_ROSTER);

        let err = build_roster(&[
            BranchRange::new("CSE", 1, MAX_ROSTER as u32),
            BranchRange::new("IT", MAX_ROSTER as u32 + 1, MAX_ROSTER as u32 + 1),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            SeatingError::TooManyStudents {
                count: MAX_ROSTER + 1,
                limit: MAX_ROSTER
            }
        );
    }

    #[test]
    fn test_full_u32_range_rejected_without_expanding() {
        let err = validate_ranges(&[BranchRange::new("CSE", 0, u32::MAX)]).unwrap_err();
        assert_eq!(
            err,
            SeatingError::TooManyStudents {
                count: u64::from(u32::MAX) + 1,
                limit: MAX_ROSTER
            }
        );
    }

    #[test]
    fn test_blank_branch_rejected() {
        let err = build_roster(&[BranchRange::new("  ", 1, 2)]).unwrap_err();
        assert_eq!(err, SeatingError::EmptyBranch);
    }

    #[test]
    fn test_roll_numbers_collects_every_roll() {
        let set = roll_numbers(&[BranchRange::new("A", 1, 3), BranchRange::new("B", 7, 7)]);
        assert_eq!(set.len(), 4);
        assert!(set.contains(&7));
    }
}
