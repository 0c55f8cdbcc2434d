//! The `examgrade init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("examgrade.toml").exists() {
        println!("examgrade.toml already exists, skipping.");
    } else {
        std::fs::write("examgrade.toml", SAMPLE_CONFIG)?;
        println!("Created examgrade.toml");
    }

    std::fs::create_dir_all("submissions")?;
    let example_path = std::path::Path::new("submissions/example.toml");
    if example_path.exists() {
        println!("submissions/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_SUBMISSION)?;
        println!("Created submissions/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Fill in submissions/example.toml with your answer keys and sheets");
    println!("  2. Run: examgrade validate --input submissions/example.toml");
    println!("  3. Run: examgrade grade --input submissions/example.toml --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examgrade configuration

output_dir = "./examgrade-results"
formats = "json,html"
draft_path = ".examgrade/exam-data.json"
save_draft = true
"#;

const EXAMPLE_SUBMISSION: &str = r#"# Shared roster: one name and one sheet variant (A or B) per line.
studentNames = """
Ali
Ayse
Can
"""
examVariant = """
A
B
A
"""

[[courses]]
courseName = "Matematik"
answerKey = """
A
C
B
D
"""
# Position of each question on the B sheet (1-based).
questionReferenceMap = """
3
4
1
2
"""
questionTopics = """
Kesirler
Oranlar
Denklemler
Geometri
"""
# One line per student, one character per answer; X = left blank.
studentAnswers = """
ACBD
BDAC
AXBA
"""

[[courses]]
courseName = "Türkçe"
answerKey = """
B
B
A
"""
questionReferenceMap = """
2
3
1
"""
questionTopics = """
Sözcükte anlam
Cümlede anlam
Paragraf
"""
studentAnswers = """
BBA
ABB
XXA
"""

# Blank courses are skipped when grading.
[[courses]]
courseName = "Fen Bilgisi"

[[courses]]
courseName = "Din Kültürü"

[[courses]]
courseName = "İngilizce"

[[courses]]
courseName = "Sosyal Bilgiler"
"#;
