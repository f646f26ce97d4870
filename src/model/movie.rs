//! Movie catalog records as served by the API.
//!
//! Field names on the wire are the API's (`_id`, `Title`, `Director`, ...).
use serde::{Deserialize, Deserializer, Serialize};

/// A movie with its embedded genre and director records.
///
/// The API declares `Genre` and `Director` as single objects, while the catalog
/// screens treat them as lists. Both shapes are accepted; a single object becomes
/// a one-element list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Year", default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(rename = "Genre", default, deserialize_with = "one_or_many")]
    pub genres: Vec<Genre>,
    #[serde(rename = "Director", default, deserialize_with = "one_or_many")]
    pub directors: Vec<Director>,
    #[serde(rename = "ImagePath", default)]
    pub image_path: String,
    #[serde(rename = "Featured", default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description", default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Bio", default)]
    pub bio: String,
    #[serde(rename = "Birthyear", default, deserialize_with = "lenient_opt_string")]
    pub birth_year: Option<String>,
    #[serde(rename = "Deathyear", default, deserialize_with = "lenient_opt_string")]
    pub death_year: Option<String>,
}

/// A movie ready for display: directors and genres flattened to strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayMovie {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Year")]
    pub year: String,
    /// Genre titles joined with `", "`.
    #[serde(rename = "Genre")]
    pub genre: String,
    /// Director names joined with `", "`.
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "ImagePath")]
    pub image_path: String,
    #[serde(rename = "Featured")]
    pub featured: bool,
}

impl From<Movie> for DisplayMovie {
    fn from(movie: Movie) -> Self {
        let director = movie
            .directors
            .iter()
            .map(|d| d.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let genre = movie
            .genres
            .iter()
            .map(|g| g.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            year: movie.year,
            genre,
            director,
            image_path: movie.image_path,
            featured: movie.featured,
        }
    }
}

/// Flattens a list of movies for display, preserving order.
pub fn display_movies(movies: Vec<Movie>) -> Vec<DisplayMovie> {
    movies.into_iter().map(DisplayMovie::from).collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<OneOrMany<T>> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<StringOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::Text(text) => text,
        StringOrNumber::Number(number) => number.to_string(),
    }))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}
