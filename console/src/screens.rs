// Console screens: each one drives a single repository operation and renders text

use anyhow::{Context, Result};
use common::db::FilmRepository;
use common::models::{Film, SearchPattern};
use std::io::{BufRead, Write};

const RULE: &str =
    "_________________________________________________________________________________";

/// Film created by the create screen
pub fn new_release() -> Film {
    Film::new("SPIDER-MAN: NO WAY HOME", 2021)
}

/// Replacement applied by the update screen
pub fn retitled_film() -> Film {
    Film::with_id(1004, "SUPER/MAN", 2024)
}

/// Film removed by the delete screen
pub const DELETED_FILM_ID: i64 = 1005;

pub fn write_header(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:<4} {:<40} {:>10}", "Id", "Title", "Release Year")?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}

pub fn write_row(out: &mut impl Write, film: &Film) -> Result<()> {
    writeln!(
        out,
        "{:<4} {:<40} {:>10}",
        film.id, film.title, film.release_year
    )?;
    Ok(())
}

fn write_table(out: &mut impl Write, films: &[Film]) -> Result<()> {
    write_header(out)?;
    for film in films {
        write_row(out, film)?;
    }
    Ok(())
}

pub async fn display_all_films(repo: &dyn FilmRepository, out: &mut impl Write) -> Result<()> {
    let films = repo.list_all().await.context("Could not list films")?;
    write_table(out, &films)
}

/// Prompt for a title prefix on `input` and list the matching films
pub async fn display_film_search(
    repo: &dyn FilmRepository,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    write!(out, "Search for films that start with: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let prefix = line.trim_end_matches(['\r', '\n']);

    let films = repo
        .search(&SearchPattern::starts_with(prefix))
        .await
        .with_context(|| format!("Could not search films starting with '{}'", prefix))?;
    write_table(out, &films)
}

pub async fn display_create_film(repo: &dyn FilmRepository, out: &mut impl Write) -> Result<()> {
    let film = repo
        .create(&new_release())
        .await
        .context("Could not create film")?;
    write_row(out, &film)
}

pub async fn display_update_film(repo: &dyn FilmRepository, out: &mut impl Write) -> Result<()> {
    let requested = retitled_film();
    let film = repo
        .update(requested.id, &requested)
        .await
        .with_context(|| format!("Could not update film {}", requested.id))?;
    write_row(out, &film)
}

pub async fn display_delete_film(repo: &dyn FilmRepository, out: &mut impl Write) -> Result<()> {
    repo.delete(DELETED_FILM_ID)
        .await
        .with_context(|| format!("Could not delete film {}", DELETED_FILM_ID))?;
    writeln!(out, "Successfully deleted film.")?;
    Ok(())
}
