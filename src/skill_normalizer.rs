use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use strsim::damerau_levenshtein;
use unicode_normalization::UnicodeNormalization;

/// Raw skill spelling → canonical token (O(1) lookup).
///
/// Groups are disjoint: a raw string maps to at most one canonical token,
/// so "same canonical" is an equivalence relation over raw spellings.
static ALIAS_TO_CANONICAL: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let groups: &[(&str, &[&str])] = &[
        // Languages
        (
            "javascript",
            &["js", "javascript", "java script", "ecmascript", "es6", "es2015"],
        ),
        ("typescript", &["ts", "typescript", "type script"]),
        ("python", &["py", "python", "python3", "python 3"]),
        ("java", &["java", "java8", "java11", "java17", "openjdk"]),
        ("csharp", &["c#", "c sharp", "csharp", ".net", "dotnet"]),
        ("cplusplus", &["c++", "cpp", "c plus plus"]),
        ("golang", &["go", "golang", "go lang"]),
        ("rust", &["rust", "rust lang", "rust language"]),
        ("php", &["php", "php7", "php8"]),
        ("ruby", &["ruby", "ruby lang", "ruby on rails", "rails"]),
        ("kotlin", &["kotlin", "kotlin jvm"]),
        ("swift", &["swift", "ios swift"]),
        // Frameworks and runtimes
        ("nodejs", &["node", "nodejs", "node.js", "node js"]),
        ("react", &["react", "reactjs", "react.js", "react js"]),
        ("vue", &["vue", "vuejs", "vue.js", "vue js"]),
        ("angular", &["angular", "angularjs", "angular.js"]),
        ("nextjs", &["nextjs", "next.js", "next js"]),
        ("express", &["express", "expressjs", "express.js", "express js"]),
        ("django", &["django", "django rest framework", "drf"]),
        ("flask", &["flask", "python flask"]),
        ("spring", &["spring", "spring boot", "springboot"]),
        ("laravel", &["laravel", "php laravel"]),
        ("fastapi", &["fastapi", "fast api"]),
        // Databases
        ("postgresql", &["postgres", "postgresql", "pg", "postgre sql"]),
        ("mysql", &["mysql", "my sql", "mariadb"]),
        ("mongodb", &["mongo", "mongodb", "mongo db"]),
        ("redis", &["redis", "redis cache"]),
        ("elasticsearch", &["elasticsearch", "elastic search"]),
        ("sqlite", &["sqlite", "sqlite3", "sql lite"]),
        // Cloud and tooling
        ("aws", &["aws", "amazon web services", "amazon aws"]),
        ("gcp", &["gcp", "google cloud", "google cloud platform"]),
        ("azure", &["azure", "microsoft azure", "ms azure"]),
        ("docker", &["docker", "docker container", "containerization"]),
        ("kubernetes", &["kubernetes", "k8s", "kube"]),
        ("git", &["git", "github", "gitlab", "version control"]),
        ("jenkins", &["jenkins", "jenkins ci"]),
        ("terraform", &["terraform", "infrastructure as code", "iac"]),
        ("graphql", &["graphql", "graph ql"]),
        ("ci/cd", &["ci/cd", "cicd", "ci cd", "continuous integration"]),
    ];

    let mut map = HashMap::new();
    for (canonical, spellings) in groups {
        map.insert(*canonical, *canonical);
        for spelling in *spellings {
            map.insert(*spelling, *canonical);
        }
    }
    map
});

/// Same table keyed by separator-stripped form, to absorb spacing and
/// punctuation drift ("node js", "Node.JS", "node-js").
static COMPACT_ALIAS_TO_CANONICAL: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (alias, canonical) in ALIAS_TO_CANONICAL.iter() {
        map.entry(compact_key(alias)).or_insert(*canonical);
    }
    map
});

fn nfkc_lower_trim(input: &str) -> String {
    input.nfkc().collect::<String>().trim().to_lowercase()
}

fn compact_key(input: &str) -> String {
    input
        .nfkc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-' | '_' | '/' | ','))
        .collect()
}

fn match_canonical_token(token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }

    if let Some(canonical) = ALIAS_TO_CANONICAL.get(token) {
        return Some((*canonical).to_string());
    }

    let compact = compact_key(token);
    if let Some(canonical) = COMPACT_ALIAS_TO_CANONICAL.get(&compact) {
        return Some((*canonical).to_string());
    }

    fuzzy_match_canonical(&compact)
}

/// Typo tolerance over the compact alias keys. Short tokens are exempt:
/// fuzzing "java" into "javaa" or "go" into anything produces far more
/// false positives than it fixes, so distances only apply at length >= 5.
fn fuzzy_match_canonical(compact: &str) -> Option<String> {
    if compact.len() < 5 {
        return None;
    }

    let mut best: Option<(&str, usize)> = None;
    for (alias, canonical) in COMPACT_ALIAS_TO_CANONICAL.iter() {
        if alias.len() < 5 || canonical.len() < 5 {
            continue;
        }

        let distance = damerau_levenshtein(compact, alias);
        if distance == 0 {
            return Some((*canonical).to_string());
        }

        let len = compact.len().max(alias.len());
        let acceptable = distance == 1 || (len >= 8 && distance == 2);
        if !acceptable {
            continue;
        }

        match best {
            None => best = Some((*canonical, distance)),
            Some((_, best_dist)) if distance < best_dist => best = Some((*canonical, distance)),
            _ => {}
        }
    }

    best.map(|(canonical, _)| canonical.to_string())
}

fn split_segments(input: &str) -> impl Iterator<Item = String> + '_ {
    input
        .split(|c: char| matches!(c, '/' | ',' | ';' | '|' | '+'))
        .map(nfkc_lower_trim)
        .filter(|s| !s.is_empty())
}

/// Normalize one raw skill string into its comparable token.
///
/// Lowercases and trims, then resolves the alias table; composite inputs
/// like "Python/Django" fall back to per-segment lookup. Unknown skills
/// pass through as their lowercased trimmed form, so they stay comparable
/// by exact equality. Total function, no error cases.
pub fn normalize_skill(skill: &str) -> String {
    let normalized = nfkc_lower_trim(skill);
    if let Some(canonical) = match_canonical_token(&normalized) {
        return canonical;
    }

    for segment in split_segments(skill) {
        if let Some(canonical) = match_canonical_token(&segment) {
            return canonical;
        }
    }

    normalized
}

/// True when two raw spellings denote the same skill: members of one alias
/// group, or character-equal after normalization for unknown skills.
pub fn skills_equivalent(a: &str, b: &str) -> bool {
    normalize_skill(a) == normalize_skill(b)
}

/// Normalize a skill list into a set for intersection-style comparisons.
pub fn normalize_skill_set(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| normalize_skill(s))
        .collect()
}

/// Normalize a skill list into a sorted, deduplicated Vec (storage shape).
pub fn normalize_skills_vec(skills: &[String]) -> Vec<String> {
    let mut result: Vec<String> = skills
        .iter()
        .map(|s| normalize_skill(s))
        .filter(|s| !s.is_empty())
        .collect();
    result.sort();
    result.dedup();
    result
}
