//! Interactive exhibition search session.
//!
//! The session reads from any [`BufRead`] and writes to any [`Write`], so the
//! binary drives it with stdin/stdout and tests drive it with in-memory buffers.
//! End of input at any prompt ends the session as if the user chose to exit.

use crate::error::Result;
use crate::exhibition::{Exhibition, ExhibitionClient};
use std::io::{BufRead, Write};
use tracing::warn;

const WELCOME: &str = "Welcome to the Art Institute of Chicago Exhibition Search!";
const GOODBYE: &str =
    "Thank you for using the Art Institute of Chicago Exhibition Search. Goodbye!";

/// Search and report failures on `out` instead of returning them.
/// Any failure yields an empty result set.
pub async fn search_exhibitions<W: Write>(
    client: &ExhibitionClient,
    term: &str,
    out: &mut W,
) -> Result<Vec<Exhibition>> {
    match client.search(term).await {
        Ok(exhibitions) => Ok(exhibitions),
        Err(e) => {
            warn!(term, error = %e, "exhibition search failed");
            match e.status_code() {
                Some(code) => writeln!(out, "Error: Unable to fetch data. Status code: {code}")?,
                None => writeln!(out, "Error: {e}")?,
            }
            Ok(Vec::new())
        }
    }
}

pub fn display_exhibition_count<W: Write>(out: &mut W, count: usize) -> Result<()> {
    match count {
        0 => writeln!(out, "No exhibitions found matching your search term.")?,
        1 => writeln!(out, "1 exhibition found matching your search term.")?,
        n => writeln!(out, "{n} exhibitions found matching your search term.")?,
    }
    Ok(())
}

pub fn display_exhibition_artwork<W: Write>(out: &mut W, exhibition: &Exhibition) -> Result<()> {
    writeln!(out, "\nExhibition: {}", exhibition.title)?;
    writeln!(
        out,
        "Date: {} to {}",
        exhibition.start_date.as_deref().unwrap_or("Unknown"),
        exhibition.end_date.as_deref().unwrap_or("Unknown")
    )?;
    writeln!(out, "\nArtworks in this exhibition:")?;

    if exhibition.artwork_titles.is_empty() {
        writeln!(out, "No artwork titles available for this exhibition.")?;
    } else {
        for (i, title) in exhibition.artwork_titles.iter().enumerate() {
            writeln!(out, "{}. {title}", i + 1)?;
        }
    }
    Ok(())
}

pub struct Explorer<'a, R, W> {
    client: &'a ExhibitionClient,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Explorer<'a, R, W> {
    pub fn new(client: &'a ExhibitionClient, input: R, output: W) -> Self {
        Self {
            client,
            input,
            output,
        }
    }

    /// Consume the session and hand back its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{WELCOME}")?;

        loop {
            let Some(term) = self.prompt_search_term()? else {
                break;
            };

            writeln!(self.output, "Searching for exhibitions matching '{term}'...")?;
            let exhibitions = search_exhibitions(self.client, &term, &mut self.output).await?;
            display_exhibition_count(&mut self.output, exhibitions.len())?;

            if !exhibitions.is_empty() {
                let count = self.prompt_view_count(exhibitions.len())?;
                for exhibition in exhibitions.iter().take(count) {
                    display_exhibition_artwork(&mut self.output, exhibition)?;
                }
            }

            if !self.prompt_continue()? {
                break;
            }
        }

        writeln!(self.output, "{GOODBYE}")?;
        Ok(())
    }

    /// `None` once input is exhausted.
    pub fn prompt_search_term(&mut self) -> Result<Option<String>> {
        self.prompt("Enter a search term for exhibitions: ")
    }

    /// Ask how many of `max` exhibitions to show, re-prompting until the answer
    /// is an integer in `0..=max`.
    pub fn prompt_view_count(&mut self, max: usize) -> Result<usize> {
        if max == 0 {
            return Ok(0);
        }

        let question =
            format!("How many exhibitions would you like to view (1-{max}, or 0 to go back): ");
        loop {
            let Some(answer) = self.prompt(&question)? else {
                return Ok(0);
            };
            match answer.trim().parse::<i64>() {
                Ok(n) if (0..=max as i64).contains(&n) => return Ok(n as usize),
                Ok(_) => writeln!(self.output, "Please enter a number between 0 and {max}.")?,
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    pub fn prompt_continue(&mut self) -> Result<bool> {
        let answer = self.prompt("\nWould you like to search for another exhibition? (y/n): ")?;
        Ok(answer
            .map(|a| a.trim().to_lowercase())
            .is_some_and(|a| a == "y" || a == "yes"))
    }

    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
