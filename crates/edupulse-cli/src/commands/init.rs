//! The `edupulse init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("edupulse.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("students.csv"), SAMPLE_ROSTER)?;

    println!("\nNext steps:");
    println!("  1. Set EDUPULSE_API_KEY (or edit edupulse.toml) to enable AI insights");
    println!("  2. Run: edupulse validate --input students.csv");
    println!("  3. Run: edupulse analyze --input students.csv");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# edupulse configuration

model = "gemini-3-flash-preview"
insights = true
# request_timeout_secs = 60

[gemini]
api_key = "${EDUPULSE_API_KEY}"
"#;

const SAMPLE_ROSTER: &str = "Name,Marks,Attendance,StudyHours
Aarav Shah,88,95,4.5
Maya Chen,72,81,3
Liam O'Brien,45,90,2
Sofia Rossi,91,70,5
Noah Kim,63,78,2.5
";
