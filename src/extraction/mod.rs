use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Structured fields mined from one resume's raw text. Produced whole on
/// every analysis call and overwrites any previous extraction; running the
/// extractor twice on identical text yields identical output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedResumeFields {
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub summary: String,
}

/// Returned when no sentence survives the summary filters.
pub const FALLBACK_SUMMARY: &str =
    "Experienced professional with a diverse technical background.";

// Fixed skills dictionary, grouped by category. Extraction order is
// category order, then dictionary order within a category.
const LANGUAGES: &[&str] = &[
    "JavaScript", "TypeScript", "Python", "Java", "C++", "C#", "Go", "Rust", "PHP", "Ruby",
    "Kotlin", "Swift", "Scala", "SQL", "HTML", "CSS",
];
const FRAMEWORKS: &[&str] = &[
    "React", "Angular", "Vue", "Node.js", "Express", "Next.js", "Django", "Flask", "Spring",
    "Laravel", "Rails", "Bootstrap", "Tailwind", "jQuery",
];
const DATABASES: &[&str] = &[
    "MongoDB", "MySQL", "PostgreSQL", "SQLite", "Redis", "Oracle", "Elasticsearch", "Cassandra",
    "DynamoDB",
];
const TOOLS: &[&str] = &[
    "Git", "Docker", "Kubernetes", "Jenkins", "AWS", "Azure", "GCP", "Terraform", "Ansible",
    "Kafka", "GraphQL", "Linux", "Jira",
];

const SKILL_CATEGORIES: &[&[&str]] = &[LANGUAGES, FRAMEWORKS, DATABASES, TOOLS];

const STRENGTH_KEYWORDS: &[&str] = &[
    "passionate",
    "experienced",
    "skilled",
    "specialized",
    "expert",
    "professional",
    "developer",
    "engineer",
];

lazy_static! {
    // Degree keywords or well-known institution names qualify a line as education.
    static ref DEGREE_RE: Regex = Regex::new(
        r"(?i)\b(bachelor'?s?|master'?s?|ph\.?d|doctorate|associate'?s?|diploma|mba|harvard|stanford|mit|berkeley|oxford|cambridge)\b"
    )
    .unwrap();
    static ref INSTITUTION_RE: Regex =
        Regex::new(r"(?i)\b(university|college|institute|school|academy)\b").unwrap();
    static ref YEAR_RE: Regex = Regex::new(r"\b(19|20)\d{2}\b").unwrap();
    // "2018-2022" / "2018 – 2022" study or employment ranges.
    static ref YEAR_RANGE_RE: Regex =
        Regex::new(r"\b((?:19|20)\d{2})\s*[-–—]\s*((?:19|20)\d{2})\b").unwrap();

    static ref JOB_TITLE_RE: Regex = Regex::new(
        r"(?i)\b(developer|engineer|programmer|analyst|manager|consultant|designer|architect|administrator|specialist|scientist|lead|intern)\b"
    )
    .unwrap();
    // Date signal for experience lines: a year from 2000 on, or a month name.
    static ref RECENT_YEAR_RE: Regex = Regex::new(r"\b20\d{2}\b").unwrap();
    static ref MONTH_RE: Regex = Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept?|oct|nov|dec)\b"
    )
    .unwrap();
    static ref COMPANY_RE: Regex = Regex::new(
        r"(?i)\b(inc|ltd|llc|corp|corporation|company|technologies|solutions|systems|labs|group)\b"
    )
    .unwrap();

    static ref EMAIL_RE: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap();
    static ref URL_RE: Regex = Regex::new(r"(?i)(?:https?://|www\.)\S+").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"\+?\d[\d\s().-]{7,}\d").unwrap();
    static ref BULLET_RE: Regex = Regex::new(r"(?m)[•▪◦‣·]|^\s*[-*>]+\s*").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref SENTENCE_SPLIT_RE: Regex = Regex::new(r"[.!?]").unwrap();
}

/// Run every field extractor over the raw text. Pure and idempotent.
pub fn extract_resume_fields(text: &str) -> ExtractedResumeFields {
    ExtractedResumeFields {
        skills: extract_skills(text),
        education: extract_education(text),
        experience: extract_experience(text),
        summary: extract_summary(text),
    }
}

/// Case-insensitive substring containment against the fixed dictionary.
pub fn extract_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    let mut found = Vec::new();

    for category in SKILL_CATEGORIES {
        for skill in *category {
            if haystack.contains(&skill.to_lowercase()) && !found.contains(&skill.to_string()) {
                found.push(skill.to_string());
            }
        }
    }

    found
}

/// Strip bullet markers, URLs and emails from a line, collapse whitespace.
fn clean_line(line: &str) -> String {
    let cleaned = BULLET_RE.replace_all(line, " ");
    let cleaned = URL_RE.replace_all(&cleaned, " ");
    let cleaned = EMAIL_RE.replace_all(&cleaned, " ");
    WHITESPACE_RE.replace_all(&cleaned, " ").trim().to_string()
}

fn push_unique(out: &mut Vec<String>, entry: String) {
    if !entry.is_empty() && !out.contains(&entry) {
        out.push(entry);
    }
}

/// Education lines: length in (5,100), a degree/institution-name keyword,
/// and either a plausible year or an institution word. A detected
/// "YYYY-YYYY" range survives cleaning and is re-appended in parentheses.
pub fn extract_education(text: &str) -> Vec<String> {
    let mut entries = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.len() <= 5 || line.len() >= 100 {
            continue;
        }
        if !DEGREE_RE.is_match(line) {
            continue;
        }
        if !YEAR_RE.is_match(line) && !INSTITUTION_RE.is_match(line) {
            continue;
        }

        let year_range = YEAR_RANGE_RE
            .captures(line)
            .map(|caps| format!("{}-{}", &caps[1], &caps[2]));

        let mut cleaned = clean_line(line);
        if let Some(range) = year_range {
            cleaned = YEAR_RANGE_RE.replace_all(&cleaned, "").trim().to_string();
            cleaned = WHITESPACE_RE.replace_all(&cleaned, " ").trim().to_string();
            cleaned = format!("{cleaned} ({range})");
        }

        push_unique(&mut entries, cleaned);
    }

    entries
}

/// Experience lines: length in (15,120), a whole-word job-title keyword,
/// and a date signal (year >= 2000 or a month name) or a company indicator.
pub fn extract_experience(text: &str) -> Vec<String> {
    let mut entries = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.len() <= 15 || line.len() >= 120 {
            continue;
        }
        if !JOB_TITLE_RE.is_match(line) {
            continue;
        }
        let has_date = RECENT_YEAR_RE.is_match(line) || MONTH_RE.is_match(line);
        if !has_date && !COMPANY_RE.is_match(line) {
            continue;
        }

        push_unique(&mut entries, clean_line(line));
    }

    entries
}

/// A sentence that is mostly digits ("2019 - 2021") carries no summary value.
fn is_mostly_year(sentence: &str) -> bool {
    let digits = sentence.chars().filter(|c| c.is_ascii_digit()).count();
    let non_space = sentence.chars().filter(|c| !c.is_whitespace()).count();
    non_space > 0 && digits * 2 > non_space
}

fn strength_score(sentence: &str) -> usize {
    let lowered = sentence.to_lowercase();
    STRENGTH_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count()
}

/// Pick the three strongest sentences as a short display summary. Contact
/// noise is stripped first; candidate sentences rank by strength-keyword
/// count, descending, stable on ties (original order wins).
pub fn extract_summary(text: &str) -> String {
    let cleaned = EMAIL_RE.replace_all(text, " ");
    let cleaned = URL_RE.replace_all(&cleaned, " ");
    let cleaned = PHONE_RE.replace_all(&cleaned, " ");
    let cleaned = BULLET_RE.replace_all(&cleaned, " ");

    let mut candidates: Vec<String> = Vec::new();
    for raw in SENTENCE_SPLIT_RE.split(&cleaned) {
        let sentence = WHITESPACE_RE.replace_all(raw, " ").trim().to_string();
        if sentence.len() <= 30 || is_mostly_year(&sentence) {
            continue;
        }
        let lowered = sentence.to_lowercase();
        if ["phone", "email", "linkedin", "github"]
            .iter()
            .any(|term| lowered.contains(term))
        {
            continue;
        }
        push_unique(&mut candidates, sentence);
    }

    if candidates.is_empty() {
        return FALLBACK_SUMMARY.to_string();
    }

    candidates.sort_by_key(|s| std::cmp::Reverse(strength_score(s)));
    candidates.truncate(3);
    format!("{}.", candidates.join(". "))
}
