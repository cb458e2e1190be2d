//! The `edupulse validate` command.

use std::path::PathBuf;

use anyhow::Result;

use edupulse_core::ingest::load_roster;
use edupulse_core::model::Status;
use edupulse_core::scoring::derive_all;
use edupulse_core::validate::validate_batch;

pub fn execute(input: PathBuf) -> Result<()> {
    let students = load_roster(&input)?;
    println!("Roster: {} ({} students)", input.display(), students.len());

    validate_batch(&students)?;

    let failing = derive_all(&students)
        .iter()
        .filter(|s| s.status == Status::Fail)
        .count();
    println!("All records valid.");
    if failing > 0 {
        println!("{failing} student(s) currently below the pass thresholds.");
    }

    Ok(())
}
