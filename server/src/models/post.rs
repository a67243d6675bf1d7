use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest message accepted, counted in characters after trimming.
pub const MAX_MESSAGE_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: i64,
    pub message: String,
    pub category: Category,
    pub upvotes: i64,
    pub timestamp: DateTime<Utc>,
}

/// Topics a post can be filed under. Serialized by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Education,
    Corruption,
    Environment,
    Equality,
    #[serde(rename = "Mental Health")]
    MentalHealth,
    Innovation,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Education,
        Category::Corruption,
        Category::Environment,
        Category::Equality,
        Category::MentalHealth,
        Category::Innovation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Education => "Education",
            Category::Corruption => "Corruption",
            Category::Environment => "Environment",
            Category::Equality => "Equality",
            Category::MentalHealth => "Mental Health",
            Category::Innovation => "Innovation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

// Request body for POST /posts/
#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub message: String,
    pub category: String,
}

/// A post that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub message: String,
    pub category: Category,
}

impl CreatePost {
    pub fn validate(self) -> Result<NewPost, String> {
        let message = self.message.trim();
        if message.is_empty() {
            return Err("Message cannot be empty".to_string());
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(format!(
                "Message must be at most {} characters",
                MAX_MESSAGE_CHARS
            ));
        }
        let category = self.category.trim().parse::<Category>()?;

        Ok(NewPost {
            message: message.to_string(),
            category,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Recent,
    Upvotes,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "recent" => Ok(SortOrder::Recent),
            "upvotes" => Ok(SortOrder::Upvotes),
            other => Err(format!(
                "Invalid sort: {}. Must be one of: recent, upvotes",
                other
            )),
        }
    }
}

// Raw query string of GET /posts/
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub sort: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub sort: SortOrder,
    pub category: Option<Category>,
}

impl ListParams {
    pub fn parse(self) -> Result<ListQuery, String> {
        let sort = self.sort.as_deref().unwrap_or_default().parse()?;
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(name) => Some(name.parse()?),
        };
        Ok(ListQuery { sort, category })
    }
}

impl ListQuery {
    pub fn matches(&self, post: &Post) -> bool {
        self.category.is_none_or(|c| c == post.category)
    }

    /// Orders posts in place the way the listing endpoint returns them.
    pub fn sort(&self, posts: &mut [Post]) {
        match self.sort {
            SortOrder::Recent => {
                posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)))
            }
            SortOrder::Upvotes => posts.sort_by(|a, b| {
                b.upvotes
                    .cmp(&a.upvotes)
                    .then(b.timestamp.cmp(&a.timestamp))
                    .then(b.id.cmp(&a.id))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(message: &str, category: &str) -> CreatePost {
        CreatePost {
            message: message.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn category_round_trips_through_display_name() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert_eq!(
            serde_json::to_string(&Category::MentalHealth).unwrap(),
            "\"Mental Health\""
        );
        assert!("mental health".parse::<Category>().is_err());
    }

    #[test]
    fn validate_trims_message() {
        let post = create("  hello  ", "Education").validate().unwrap();
        assert_eq!(post.message, "hello");
        assert_eq!(post.category, Category::Education);
    }

    #[test]
    fn validate_rejects_blank_message() {
        assert!(create("   \n", "Education").validate().is_err());
    }

    #[test]
    fn validate_rejects_long_message() {
        let long = "a".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(create(&long, "Education").validate().is_err());
        let limit = "é".repeat(MAX_MESSAGE_CHARS);
        assert!(create(&limit, "Education").validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_category() {
        let err = create("hi", "Sports").validate().unwrap_err();
        assert!(err.contains("Sports"));
    }

    #[test]
    fn list_params_defaults_and_all() {
        let query = ListParams::default().parse().unwrap();
        assert_eq!(query, ListQuery::default());

        let query = ListParams {
            sort: Some("upvotes".into()),
            category: Some("all".into()),
        }
        .parse()
        .unwrap();
        assert_eq!(query.sort, SortOrder::Upvotes);
        assert_eq!(query.category, None);
    }

    #[test]
    fn list_params_rejects_bad_values() {
        let bad_sort = ListParams {
            sort: Some("oldest".into()),
            category: None,
        };
        assert!(bad_sort.parse().is_err());

        let bad_category = ListParams {
            sort: None,
            category: Some("Sports".into()),
        };
        assert!(bad_category.parse().is_err());
    }
}
