//! Parser for the `::`-delimited dataset files.
//!
//! Two files make up the dataset:
//! - movies.dat: movieId::title::genres
//! - ratings.dat: userId::movieId::rating::timestamp
//!
//! The movies file is ISO-8859-1 (Latin-1) encoded, not UTF-8, so both files
//! are read byte-wise and widened to UTF-8 before line splitting.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Read a file with ISO-8859-1 encoding (Latin-1).
///
/// ISO-8859-1 is a single-byte encoding where each byte maps directly to the
/// Unicode code point of the same value, so widening bytes to `char` is an
/// exact conversion.
fn read_lines_latin1(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content: String = bytes.iter().map(|&b| b as char).collect();

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Pull the next `::`-separated field, with file/line context on failure
fn next_field<'a>(
    parts: &mut std::str::Split<'a, &str>,
    file: &str,
    line: usize,
    field: &str,
) -> Result<&'a str> {
    parts.next().ok_or_else(|| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("missing {field}"),
    })
}

/// Parse a numeric field, with file/line context on failure
fn parse_field<T>(raw: &str, file: &str, line: usize, field: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("invalid {field}: {e}"),
    })
}

/// Parse the movies.dat file
///
/// Format: movieId::title::genres
///
/// The title usually carries the year in parentheses: "Toy Story (1995)".
/// Genres are pipe-separated: "Animation|Children's|Comedy".
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    const FILE: &str = "movies.dat";
    let lines = read_lines_latin1(path)?;
    let mut movies = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut parts = trimmed.split("::");
        let movie_id = next_field(&mut parts, FILE, line_no, "movieId")?;
        let title = next_field(&mut parts, FILE, line_no, "title")?;
        let genres = next_field(&mut parts, FILE, line_no, "genres")?;

        movies.push(Movie {
            id: parse_field(movie_id, FILE, line_no, "movieId")?,
            title: title.to_string(),
            year: extract_year_from_title(title),
            genres: parse_genres(genres)?,
        });
    }

    Ok(movies)
}

/// Parse the ratings.dat file
///
/// Format: userId::movieId::rating::timestamp
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    const FILE: &str = "ratings.dat";
    let lines = read_lines_latin1(path)?;
    let mut ratings = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut parts = trimmed.split("::");
        let user_id = next_field(&mut parts, FILE, line_no, "userId")?;
        let movie_id = next_field(&mut parts, FILE, line_no, "movieId")?;
        let rating = next_field(&mut parts, FILE, line_no, "rating")?;
        let timestamp = next_field(&mut parts, FILE, line_no, "timestamp")?;

        ratings.push(Rating {
            user_id: parse_field(user_id, FILE, line_no, "userId")?,
            movie_id: parse_field(movie_id, FILE, line_no, "movieId")?,
            rating: parse_field(rating, FILE, line_no, "rating")?,
            timestamp: parse_field(timestamp, FILE, line_no, "timestamp")?,
        });
    }

    Ok(ratings)
}

/// Extract year from a movie title
///
/// Example: "Toy Story (1995)" -> Some(1995)
///          "Movie Title" -> None
fn extract_year_from_title(title: &str) -> Option<u16> {
    let start = title.rfind('(')?;
    let end = title.rfind(')')?;
    if start < end {
        if let Ok(year) = title[start + 1..end].parse::<u16>() {
            return Some(year);
        }
    }
    None
}

/// Parse a single genre string into the Genre enum
///
/// Example: "Action" -> Ok(Genre::Action)
///          "Sci-Fi" -> Ok(Genre::SciFi)
fn parse_genre(s: &str) -> Result<Genre> {
    match s {
        "Action" => Ok(Genre::Action),
        "Adventure" => Ok(Genre::Adventure),
        "Animation" => Ok(Genre::Animation),
        "Children's" => Ok(Genre::Children), // the dataset spells it with an apostrophe
        "Comedy" => Ok(Genre::Comedy),
        "Crime" => Ok(Genre::Crime),
        "Documentary" => Ok(Genre::Documentary),
        "Drama" => Ok(Genre::Drama),
        "Fantasy" => Ok(Genre::Fantasy),
        "Film-Noir" => Ok(Genre::FilmNoir),
        "Horror" => Ok(Genre::Horror),
        "Musical" => Ok(Genre::Musical),
        "Mystery" => Ok(Genre::Mystery),
        "Romance" => Ok(Genre::Romance),
        "Sci-Fi" => Ok(Genre::SciFi),
        "Thriller" => Ok(Genre::Thriller),
        "War" => Ok(Genre::War),
        "Western" => Ok(Genre::Western),
        _ => Err(DataLoadError::InvalidValue {
            field: "genre".to_string(),
            value: s.to_string(),
        }),
    }
}

/// Parse pipe-separated genres
///
/// Example: "Action|Adventure|Sci-Fi" -> vec![Genre::Action, Genre::Adventure, Genre::SciFi]
fn parse_genres(s: &str) -> Result<Vec<Genre>> {
    s.split('|').map(parse_genre).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year_from_title("Toy Story (1995)"), Some(1995));
        assert_eq!(extract_year_from_title("Movie Title"), None);
        assert_eq!(
            extract_year_from_title("Seven (a.k.a. Se7en) (1995)"),
            Some(1995)
        );
    }

    #[test]
    fn test_parse_genre() {
        assert!(matches!(parse_genre("Action"), Ok(Genre::Action)));
        assert!(matches!(parse_genre("Sci-Fi"), Ok(Genre::SciFi)));
        assert!(matches!(parse_genre("Children's"), Ok(Genre::Children)));
        assert!(parse_genre("Telenovela").is_err());
    }

    #[test]
    fn test_parse_genres_pipe_separated() {
        let genres = parse_genres("Animation|Children's|Comedy").unwrap();
        assert_eq!(
            genres,
            vec![Genre::Animation, Genre::Children, Genre::Comedy]
        );
    }
}
