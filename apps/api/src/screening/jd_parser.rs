//! JD Parser: splits a raw job description into required skills, preferred
//! skills and experience notes using header keywords and bullet detection.

use serde::{Deserialize, Serialize};

const BULLET_MARKERS: &[char] = &['-', '•'];

/// Three-list decomposition of a job description. Entries are raw text as
/// captured under each header, not yet normalized to canonical skills.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredJd {
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    #[serde(rename = "experience")]
    pub experience_notes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Required,
    Preferred,
    Experience,
}

impl Section {
    /// Header detection in fixed priority order: required → preferred → experience.
    fn from_header(line_lower: &str) -> Option<Self> {
        if line_lower.contains("required skills") {
            Some(Section::Required)
        } else if line_lower.contains("preferred skills") {
            Some(Section::Preferred)
        } else if line_lower.contains("experience") {
            Some(Section::Experience)
        } else {
            None
        }
    }
}

impl StructuredJd {
    fn section_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Required => &mut self.required_skills,
            Section::Preferred => &mut self.preferred_skills,
            Section::Experience => &mut self.experience_notes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.required_skills.is_empty()
            && self.preferred_skills.is_empty()
            && self.experience_notes.is_empty()
    }
}

/// Parses free-form JD text. Never fails: text without recognizable headers
/// yields empty lists.
pub fn parse_jd(jd_text: &str) -> StructuredJd {
    let mut jd = StructuredJd::default();
    let mut current: Option<Section> = None;

    for line in jd_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Header lines switch sections and are never captured as content.
        if let Some(section) = Section::from_header(&line.to_lowercase()) {
            current = Some(section);
            continue;
        }

        let Some(section) = current else {
            continue;
        };

        let content = if line.starts_with(BULLET_MARKERS) {
            line.trim_start_matches(|c: char| BULLET_MARKERS.contains(&c) || c == ' ')
                .trim()
        } else {
            line
        };
        jd.section_mut(section).push(content.to_string());
    }

    jd
}
