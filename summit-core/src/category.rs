// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

/// Market segment a package belongs to.
///
/// Every package is assigned to exactly one category and the rule catalog is
/// keyed by category, so the category is the join between a package's grant
/// map and the rules it can possibly grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "APDC")]
    Apdc,
    #[serde(rename = "JCIM")]
    Jcim,
    Int,
    #[serde(rename = "JP")]
    Jp,
    #[serde(rename = "KR")]
    Kr,
    #[serde(rename = "VIP")]
    Vip,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Apdc,
        Category::Jcim,
        Category::Int,
        Category::Jp,
        Category::Kr,
        Category::Vip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Apdc => "APDC",
            Category::Jcim => "JCIM",
            Category::Int => "Int",
            Category::Jp => "JP",
            Category::Kr => "KR",
            Category::Vip => "VIP",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tournament day of the two-day golf competition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GolfDay {
    Day1,
    Day2,
}

impl GolfDay {
    /// Day number as stored on golf groupings (1 or 2).
    pub fn number(&self) -> u8 {
        match self {
            GolfDay::Day1 => 1,
            GolfDay::Day2 => 2,
        }
    }
}

impl fmt::Display for GolfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {}", self.number())
    }
}
