use crate::report::Diagnosis;

const RULE: &str = "============================================================";

pub fn render_diagnosis_text(diagnosis: &Diagnosis) -> String {
    // Lower score = more youthful, so `percentile` percent of the band
    // scores better than the customer. The top/bottom inversion happens
    // here and nowhere else.
    let top = diagnosis.percentile;
    let bottom = 100.0 - diagnosis.percentile;

    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str("Skin Aging Diagnosis\n");
    out.push_str(RULE);
    out.push_str("\n\n");
    out.push_str(&format!("Skin aging score: {:.2}\n", diagnosis.score));
    out.push_str(&format!(
        "Position within the {} band (age {}): bottom {:.1}% (top {:.1}%)\n",
        diagnosis.band, diagnosis.age, bottom, top
    ));
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    out
}

pub fn render_golden_time_text(golden_ages: &[u32]) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str("Skin Aging Golden Time Analysis\n");
    out.push_str(RULE);
    out.push_str("\n\n");

    if golden_ages.is_empty() {
        out.push_str("No ages with sharply accelerating aging were detected.\n");
    } else {
        for &age in golden_ages {
            out.push_str(&format!(
                "-> age {}: aging accelerates sharply here (focused care recommended)\n",
                age
            ));
        }
    }

    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    out
}
