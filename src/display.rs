use std::fmt::Write;

use crate::seating::{SeatSlot, SeatingPlan, StudentCandidate};

/// Seats per printed row, matching the 5-column classroom layout
pub const SEATS_PER_ROW: usize = 5;

/// Formats a seated student as "roll (branch)"
pub fn format_student(student: &StudentCandidate) -> String {
    format!("{} ({})", student.roll_number, student.branch)
}

fn format_slot(slot: &SeatSlot) -> String {
    slot.as_ref().map(format_student).unwrap_or_else(|| "[EMPTY]".to_string())
}

/// Renders the seating as a grid, one line per row of seats
pub fn render_seating_grid(seating: &[SeatSlot]) -> String {
    let cells: Vec<String> = seating.iter().map(format_slot).collect();
    let width = cells.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    for (row, chunk) in cells.chunks(SEATS_PER_ROW).enumerate() {
        let first_seat = row * SEATS_PER_ROW + 1;
        let _ = write!(out, "  {:>3}: ", first_seat);
        let line: Vec<String> = chunk.iter().map(|c| format!("{:<width$}", c, width = width)).collect();
        let _ = writeln!(out, "{}", line.join(" | ").trim_end());
    }
    out
}

/// Prints a seating plan in a readable format
pub fn print_seating_plan(plan: &SeatingPlan) {
    println!("\n=== Seating for {} ===", plan.room);
    println!(
        "Seats: {}, occupied: {}",
        plan.seating.len(),
        plan.seated_count()
    );

    if !plan.unseated.is_empty() {
        println!("⚠️  Unseated students ({}):", plan.unseated.len());
        for roll in &plan.unseated {
            println!("  - {}", roll);
        }
    }

    println!("\nSeating by row (first seat number on the left):");
    print!("{}", render_seating_grid(&plan.seating));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(roll: u32, branch: &str) -> SeatSlot {
        Some(StudentCandidate {
            roll_number: roll,
            branch: branch.to_string(),
        })
    }

    #[test]
    fn test_grid_rows() {
        let seating = vec![
            student(1, "A"),
            None,
            student(2, "A"),
            None,
            None,
            student(3, "B"),
        ];
        let grid = render_seating_grid(&seating);
        let lines: Vec<&str> = grid.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("    1: 1 (A)"));
        assert!(lines[0].contains("[EMPTY]"));
        assert!(lines[1].starts_with("    6: 3 (B)"));
    }

    #[test]
    fn test_empty_room_renders_nothing() {
        assert!(render_seating_grid(&[]).is_empty());
    }
}
