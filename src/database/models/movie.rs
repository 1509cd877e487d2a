use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Movie {
    #[serde(rename = "_id", default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub genre: Genre,
    pub director: Director,
    #[serde(rename = "ImageURL", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Genre {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Director {
    pub name: String,
    #[serde(default)]
    pub bio: String,
}

/// Flat row shape of the `movies` table; genre and director live in their own columns.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre_name: String,
    pub genre_description: String,
    pub director_name: String,
    pub director_bio: String,
    pub image_url: Option<String>,
    pub featured: bool,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            genre: Genre {
                name: row.genre_name,
                description: row.genre_description,
            },
            director: Director {
                name: row.director_name,
                bio: row.director_bio,
            },
            image_url: row.image_url,
            featured: row.featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_document_field_names() {
        let movie = Movie {
            id: Uuid::nil(),
            title: "Jaws".to_string(),
            description: "A shark terrorizes a beach town.".to_string(),
            genre: Genre {
                name: "Thriller".to_string(),
                description: String::new(),
            },
            director: Director {
                name: "Steven Spielberg".to_string(),
                bio: String::new(),
            },
            image_url: Some("jaws.png".to_string()),
            featured: true,
        };

        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["Title"], "Jaws");
        assert_eq!(value["Genre"]["Name"], "Thriller");
        assert_eq!(value["Director"]["Name"], "Steven Spielberg");
        assert_eq!(value["ImageURL"], "jaws.png");
        assert_eq!(value["Featured"], true);
        assert_eq!(value["_id"], Uuid::nil().to_string());
    }

    #[test]
    fn deserializes_minimal_document() {
        let movie: Movie = serde_json::from_value(json!({
            "Title": "Moonlight",
            "Genre": { "Name": "Drama" },
            "Director": { "Name": "Barry Jenkins" }
        }))
        .unwrap();

        assert_eq!(movie.title, "Moonlight");
        assert!(!movie.featured);
        assert!(movie.image_url.is_none());
        assert_eq!(movie.genre.description, "");
    }
}
