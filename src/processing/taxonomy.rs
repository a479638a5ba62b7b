//! Static lookup tables: role and industry taxonomies, skill vocabulary,
//! JD phrases and the word lists the extractors share.
//!
//! Tables are plain `static` slices so they are built once into the binary and
//! never re-parsed. Bump [`TAXONOMY_VERSION`] whenever an entry changes, since
//! scores are only comparable across runs that used the same tables.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const TAXONOMY_VERSION: u32 = 1;

/// Closed set of role categories, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    Sales,
    Hr,
    Technology,
    Marketing,
    Operations,
    Finance,
    Data,
    RndLead,
    Other,
}

/// Closed set of industry categories, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndustryCategory {
    Chemical,
    Jewelry,
    Technology,
    Manufacturing,
    Retail,
    Finance,
    Healthcare,
    Other,
}

impl RoleCategory {
    /// Every scorable category in declaration order; `Other` is the fallback.
    pub const SCORABLE: [RoleCategory; 8] = [
        RoleCategory::Sales,
        RoleCategory::Hr,
        RoleCategory::Technology,
        RoleCategory::Marketing,
        RoleCategory::Operations,
        RoleCategory::Finance,
        RoleCategory::Data,
        RoleCategory::RndLead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::Sales => "sales",
            RoleCategory::Hr => "hr",
            RoleCategory::Technology => "technology",
            RoleCategory::Marketing => "marketing",
            RoleCategory::Operations => "operations",
            RoleCategory::Finance => "finance",
            RoleCategory::Data => "data",
            RoleCategory::RndLead => "rnd_lead",
            RoleCategory::Other => "other",
        }
    }

    /// Lowercase substrings counted against lowercased text. Empty for `Other`.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            RoleCategory::Sales => &[
                "sales",
                "business development",
                "export",
                "key account",
                "client acquisition",
                "lead generation",
                "revenue target",
                "b2b",
                "channel partner",
                "distributor",
                "territory",
                "cold calling",
            ],
            RoleCategory::Hr => &[
                "human resource",
                "recruit",
                "talent acquisition",
                "payroll",
                "onboarding",
                "employee relations",
                "hr manager",
                "hr executive",
                "hrbp",
                "performance appraisal",
                "compensation and benefits",
                "people management",
            ],
            RoleCategory::Technology => &[
                "software",
                "developer",
                "programming",
                "full stack",
                "backend",
                "frontend",
                "devops",
                "cloud",
                "rest api",
                "microservices",
                "javascript",
                "python",
                "java",
            ],
            RoleCategory::Marketing => &[
                "marketing",
                "brand",
                "campaign",
                "digital marketing",
                "seo",
                "social media",
                "content strategy",
                "market research",
                "advertising",
                "public relations",
            ],
            RoleCategory::Operations => &[
                "operations",
                "logistics",
                "supply chain",
                "warehouse",
                "procurement",
                "inventory",
                "vendor management",
                "dispatch",
                "shipping",
                "fleet",
                "customs",
            ],
            RoleCategory::Finance => &[
                "finance",
                "accounting",
                "accounts payable",
                "accounts receivable",
                "audit",
                "taxation",
                "gst",
                "financial reporting",
                "budgeting",
                "treasury",
                "chartered accountant",
                "tally",
            ],
            RoleCategory::Data => &[
                "data analy",
                "data science",
                "data engineer",
                "machine learning",
                "analytics",
                "sql",
                "power bi",
                "tableau",
                "statistic",
                "big data",
                "etl",
            ],
            RoleCategory::RndLead => &[
                "r&d",
                "research and development",
                "research",
                "formulation",
                "laboratory",
                "new product development",
                "product development",
                "innovation",
                "scientist",
                "technical lead",
                "pilot plant",
                "patent",
            ],
            RoleCategory::Other => &[],
        }
    }
}

impl IndustryCategory {
    pub const SCORABLE: [IndustryCategory; 7] = [
        IndustryCategory::Chemical,
        IndustryCategory::Jewelry,
        IndustryCategory::Technology,
        IndustryCategory::Manufacturing,
        IndustryCategory::Retail,
        IndustryCategory::Finance,
        IndustryCategory::Healthcare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndustryCategory::Chemical => "chemical",
            IndustryCategory::Jewelry => "jewelry",
            IndustryCategory::Technology => "technology",
            IndustryCategory::Manufacturing => "manufacturing",
            IndustryCategory::Retail => "retail",
            IndustryCategory::Finance => "finance",
            IndustryCategory::Healthcare => "healthcare",
            IndustryCategory::Other => "other",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            IndustryCategory::Chemical => &[
                "chemical",
                "polymer",
                "resin",
                "solvent",
                "specialty chem",
                "agrochem",
                "coatings",
                "pigment",
                "surfactant",
            ],
            IndustryCategory::Jewelry => &[
                "jewel",
                "gold",
                "diamond",
                "gemstone",
                "silver",
                "ornament",
                "karat",
            ],
            IndustryCategory::Technology => &[
                "software",
                "saas",
                "information technology",
                "it services",
                "cloud",
                "tech startup",
                "internet",
            ],
            IndustryCategory::Manufacturing => &[
                "manufactur",
                "factory",
                "plant operations",
                "production",
                "assembly line",
                "shop floor",
                "industrial",
            ],
            IndustryCategory::Retail => &[
                "retail",
                "e-commerce",
                "ecommerce",
                "fmcg",
                "consumer goods",
                "store operations",
                "merchandis",
            ],
            IndustryCategory::Finance => &[
                "bank",
                "nbfc",
                "insurance",
                "investment",
                "financial services",
                "fintech",
                "lending",
            ],
            IndustryCategory::Healthcare => &[
                "hospital",
                "healthcare",
                "clinical",
                "patient",
                "medical",
                "pharma",
                "diagnostic",
            ],
            IndustryCategory::Other => &[],
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for IndustryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Skill tokens counted for a candidate's top-skill tags.
pub const SKILL_VOCABULARY: &[&str] = &[
    // Languages and tools
    "python", "java", "javascript", "typescript", "c++", "c#", "golang", "rust", "sql",
    "react", "angular", "node.js", "django", "spring boot", "aws", "azure", "gcp",
    "docker", "kubernetes", "git", "linux", "excel", "power bi", "tableau", "sap",
    "tally", "salesforce", "autocad", "matlab",
    // Data
    "machine learning", "data analysis", "statistics", "etl", "pandas",
    // Sales and marketing
    "business development", "b2b sales", "key account management", "lead generation",
    "crm", "negotiation", "digital marketing", "seo", "market research", "branding",
    // Operations and supply chain
    "logistics", "supply chain", "warehouse", "procurement", "inventory", "customs",
    "export documentation", "import", "export", "incoterms", "vendor management",
    // Finance and HR
    "accounting", "gst", "taxation", "auditing", "financial reporting", "budgeting",
    "recruitment", "payroll", "onboarding", "talent acquisition",
    // Process and people
    "project management", "six sigma", "lean", "quality control", "formulation",
    "leadership", "communication", "team management", "stakeholder management",
];

/// Multi-word phrases pulled out of a JD ahead of single-word tokenisation.
pub const JD_PHRASES: &[&str] = &[
    "business development",
    "key account management",
    "lead generation",
    "supply chain",
    "export documentation",
    "vendor management",
    "project management",
    "stakeholder management",
    "team management",
    "machine learning",
    "data analysis",
    "digital marketing",
    "market research",
    "customer service",
    "financial reporting",
    "talent acquisition",
    "product development",
    "quality control",
    "communication skills",
    "problem solving",
    "power bi",
    "spring boot",
];

/// Stop words dropped from JD keyword extraction.
pub const JD_STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "this", "that", "from", "have", "will", "are", "was",
    "were", "been", "has", "had", "can", "could", "would", "should", "may", "might",
    "must", "shall", "but", "not", "all", "any", "your", "our", "their", "you", "who",
    "what", "which", "when", "where", "into", "also", "such", "other", "more", "than",
    "about", "able", "etc", "per", "across", "within", "including", "well", "its",
    "they", "them", "these", "those", "there", "here", "how", "why", "each", "both",
    "looking", "candidate", "candidates", "job", "role", "position", "years", "year",
    "plus", "good", "strong", "work", "working", "team", "using", "based", "required",
    "preferred", "responsibilities", "requirements", "qualifications", "skills",
];

/// Lines containing any of these words are never taken as a candidate name.
pub const NAME_BOILERPLATE: &[&str] = &[
    "resume", "cv", "curriculum", "vitae", "profile", "email", "e-mail", "phone",
    "mobile", "address", "contact", "summary", "objective", "experience", "education",
    "skills", "linkedin", "sourced",
];

/// Filename tokens that never belong to a name.
pub const FILENAME_NOISE: &[&str] = &[
    "resume", "cv", "naukri", "profile", "updated", "final", "new", "latest", "copy",
    "pdf", "docx", "doc",
];

/// Values the location heuristics sometimes pick up that are not places.
pub const LOCATION_NOISE: &[&str] = &["linkedin", "indeed", "naukri", "resume", "cv"];

/// Commonly misspelled words in resumes, matched as whole words.
pub const MISSPELLINGS: &[&str] = &[
    "recieve", "recieved", "acheive", "acheived", "acheivement", "responsibilites",
    "managment", "experiance", "proffesional", "sucessful", "sucessfully", "comunication",
    "knowlege", "seperate", "occured", "untill", "begining", "enviroment", "stratergy",
    "excellant", "maintainance", "reponsible", "detial", "teh",
];

/// Suffixes counted for the job-hopping flag. "Private" is left out so
/// "X Private Limited" counts once.
pub const CORPORATE_SUFFIX_PATTERN: &str = r"(?i)\b(?:ltd|inc|corp|pvt|limited)\b";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_scorable_category_has_keywords() {
        for role in RoleCategory::SCORABLE {
            assert!(!role.keywords().is_empty(), "{} has no keywords", role);
        }
        for industry in IndustryCategory::SCORABLE {
            assert!(!industry.keywords().is_empty(), "{} has no keywords", industry);
        }
        assert!(RoleCategory::Other.keywords().is_empty());
    }

    #[test]
    fn test_tables_are_lowercase_and_unique() {
        let mut seen = HashSet::new();
        for skill in SKILL_VOCABULARY {
            assert_eq!(*skill, skill.to_lowercase());
            assert!(seen.insert(*skill), "duplicate skill {}", skill);
        }
        for phrase in JD_PHRASES {
            assert!(phrase.contains(' '));
        }
    }

    #[test]
    fn test_serialized_names_match_as_str() {
        let json = serde_json::to_string(&RoleCategory::RndLead).unwrap();
        assert_eq!(json, "\"rnd_lead\"");
        assert_eq!(RoleCategory::RndLead.to_string(), "rnd_lead");
    }
}
