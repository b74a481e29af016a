//! Government scheme catalog with search and category filter

use crate::error::AppError;
use crate::Result;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SchemeCategory {
    Agriculture,
    Education,
    Healthcare,
    Housing,
    Employment,
    Finance,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SchemeStatus {
    Active,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub id: u32,
    pub name: String,
    pub full_name: String,
    pub category: SchemeCategory,
    pub benefit: String,
    pub description: String,
    pub eligibility: String,
    pub documents: Vec<String>,
    pub application_process: String,
    pub status: SchemeStatus,
    pub beneficiaries: String,
    pub launched: String,
}

impl SchemeCategory {
    /// Parse a filter value. `"all"` (or empty) means no filter.
    pub fn parse_filter(value: &str) -> Result<Option<SchemeCategory>> {
        match value.trim().to_lowercase().as_str() {
            "" | "all" => Ok(None),
            "agriculture" => Ok(Some(SchemeCategory::Agriculture)),
            "education" => Ok(Some(SchemeCategory::Education)),
            "healthcare" => Ok(Some(SchemeCategory::Healthcare)),
            "housing" => Ok(Some(SchemeCategory::Housing)),
            "employment" => Ok(Some(SchemeCategory::Employment)),
            "finance" => Ok(Some(SchemeCategory::Finance)),
            other => Err(AppError::invalid(format!("unknown scheme category '{}'", other))),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SchemeCategory::Agriculture => "Agriculture",
            SchemeCategory::Education => "Education",
            SchemeCategory::Healthcare => "Healthcare",
            SchemeCategory::Housing => "Housing",
            SchemeCategory::Employment => "Employment",
            SchemeCategory::Finance => "Financial Inclusion",
        }
    }
}

impl fmt::Display for SchemeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

lazy_static! {
    static ref CATALOG: Vec<Scheme> = builtin_schemes();
}

pub fn catalog() -> &'static [Scheme] {
    &CATALOG
}

pub fn find(id: u32) -> Option<&'static Scheme> {
    CATALOG.iter().find(|s| s.id == id)
}

/// Schemes whose name, full name or description contain `query`
/// (case-insensitive) and that belong to `category` when one is given.
/// Catalog order is kept.
pub fn search(query: &str, category: Option<SchemeCategory>) -> Vec<&'static Scheme> {
    search_in(&CATALOG, query, category)
}

pub fn search_in<'a>(
    schemes: &'a [Scheme],
    query: &str,
    category: Option<SchemeCategory>,
) -> Vec<&'a Scheme> {
    let needle = query.trim().to_lowercase();

    schemes
        .iter()
        .filter(|s| category.map_or(true, |c| s.category == c))
        .filter(|s| {
            needle.is_empty()
                || s.name.to_lowercase().contains(&needle)
                || s.full_name.to_lowercase().contains(&needle)
                || s.description.to_lowercase().contains(&needle)
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn scheme(
    id: u32,
    name: &str,
    full_name: &str,
    category: SchemeCategory,
    benefit: &str,
    description: &str,
    eligibility: &str,
    documents: &[&str],
    application_process: &str,
    beneficiaries: &str,
    launched: &str,
) -> Scheme {
    Scheme {
        id,
        name: name.to_string(),
        full_name: full_name.to_string(),
        category,
        benefit: benefit.to_string(),
        description: description.to_string(),
        eligibility: eligibility.to_string(),
        documents: documents.iter().map(|d| d.to_string()).collect(),
        application_process: application_process.to_string(),
        status: SchemeStatus::Active,
        beneficiaries: beneficiaries.to_string(),
        launched: launched.to_string(),
    }
}

fn builtin_schemes() -> Vec<Scheme> {
    vec![
        scheme(
            1,
            "PM-KISAN",
            "Pradhan Mantri Kisan Samman Nidhi",
            SchemeCategory::Agriculture,
            "₹6,000 per year",
            "Direct income support to all farmer families across the country.",
            "All landholding farmer families",
            &["Aadhaar Card", "Bank Account Details", "Land Records"],
            "Online through PM-KISAN portal or CSC centers",
            "11 crore farmers",
            "2019",
        ),
        scheme(
            2,
            "MGNREGA",
            "Mahatma Gandhi National Rural Employment Guarantee Act",
            SchemeCategory::Employment,
            "100 days of work guaranteed",
            "Provides livelihood security to rural households through guaranteed wage employment.",
            "Adult members of rural households",
            &["Job Card", "Aadhaar Card", "Bank Account"],
            "Apply at Gram Panchayat or online",
            "26 crore households",
            "2005",
        ),
        scheme(
            3,
            "Ayushman Bharat",
            "Pradhan Mantri Jan Arogya Yojana",
            SchemeCategory::Healthcare,
            "₹5 lakh health insurance",
            "Provides health insurance coverage to poor and vulnerable families.",
            "SECC-2011 beneficiaries and rural/urban poor families",
            &["Aadhaar Card", "Ration Card", "SECC-2011 verification"],
            "Empaneled hospitals or through CSC centers",
            "50 crore people",
            "2018",
        ),
        scheme(
            4,
            "PM Awas Yojana",
            "Pradhan Mantri Awas Yojana - Gramin",
            SchemeCategory::Housing,
            "₹1.2-3 lakh for house construction",
            "Provides financial assistance for construction of pucca houses to rural poor.",
            "Households without pucca house and meeting SECC-2011 criteria",
            &["Aadhaar Card", "Bank Account", "Job Card", "Caste Certificate"],
            "Through Gram Panchayat or online portal",
            "2.95 crore houses",
            "2016",
        ),
        scheme(
            5,
            "Sukanya Samriddhi Yojana",
            "Sukanya Samriddhi Account",
            SchemeCategory::Education,
            "High interest savings for girl child",
            "Savings scheme for girl child education and marriage expenses.",
            "Girl child below 10 years",
            &["Birth Certificate", "Parents Aadhaar", "Address Proof"],
            "Post offices and authorized banks",
            "3.5 crore accounts",
            "2015",
        ),
        scheme(
            6,
            "Jan Dhan Yojana",
            "Pradhan Mantri Jan Dhan Yojana",
            SchemeCategory::Finance,
            "Free bank account with insurance",
            "Financial inclusion program providing bank accounts to unbanked population.",
            "All Indian citizens",
            &["Aadhaar Card or any government ID", "Address Proof"],
            "Any bank branch or CSC center",
            "46 crore accounts",
            "2014",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(schemes: &[&Scheme]) -> Vec<String> {
        schemes.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let all = search("", None);
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].name, "PM-KISAN");
        assert_eq!(all[5].name, "Jan Dhan Yojana");
    }

    #[test]
    fn test_query_matches_name_full_name_and_description() {
        assert_eq!(names(&search("kisan", None)), vec!["PM-KISAN"]);
        assert_eq!(names(&search("JAN AROGYA", None)), vec!["Ayushman Bharat"]);
        assert_eq!(
            names(&search("girl child", None)),
            vec!["Sukanya Samriddhi Yojana"]
        );
    }

    #[test]
    fn test_category_filter() {
        let housing = search("", Some(SchemeCategory::Housing));
        assert_eq!(names(&housing), vec!["PM Awas Yojana"]);

        // query and category must both match
        assert!(search("kisan", Some(SchemeCategory::Healthcare)).is_empty());
        assert_eq!(
            names(&search("yojana", Some(SchemeCategory::Finance))),
            vec!["Jan Dhan Yojana"]
        );
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(SchemeCategory::parse_filter("all").unwrap(), None);
        assert_eq!(SchemeCategory::parse_filter("").unwrap(), None);
        assert_eq!(
            SchemeCategory::parse_filter("Healthcare").unwrap(),
            Some(SchemeCategory::Healthcare)
        );
        assert!(matches!(
            SchemeCategory::parse_filter("space"),
            Err(AppError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_find_by_id() {
        assert_eq!(find(2).map(|s| s.name.as_str()), Some("MGNREGA"));
        assert!(find(99).is_none());
    }
}
