//! Basic usage example for the workorders crate
//!
//! Creates a board with a couple of work orders, closes one, and prints
//! the result section by section.
//!
//! To run this example:
//! ```sh
//! cd crates/workorders
//! cargo run --example basic
//! ```

use workorders::{Result, WorkOrderBoard, WorkOrderStatus};

fn main() -> Result<()> {
    println!("Work-order board example\n");

    let mut board = WorkOrderBoard::new();
    let seal = board.add("preventive", "Replace pump seal", "Pump C")?;
    board.add("corrective", "Vibration anomaly", "Conveyor D")?;

    board.set_status(&seal, WorkOrderStatus::Done)?;

    for section in board.sections() {
        println!("{}:", section);
        for entry in board.iter().filter(|e| e.section == section) {
            let wo = entry.work_order;
            println!("  {} [{}] {} ({})", wo.id, wo.status, wo.title, wo.equipment);
        }
    }

    println!("\nTotal: {} work orders", board.len());
    Ok(())
}
